use crate::converters::openai::{OpenAIChoice, OpenAIUsage};
use serde::Deserialize;

/// The parts of a chat completion the gateway reads; other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIResponse {
    pub choices: Vec<OpenAIChoice>,
    #[serde(default)]
    pub usage: Option<OpenAIUsage>,
}

impl OpenAIResponse {
    /// Text of the first choice, if the provider returned any.
    pub fn into_reply(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_reply_takes_first_choice() {
        let response: OpenAIResponse = serde_json::from_value(json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1757841257,
            "model": "gpt-4o",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "first" }, "finish_reason": "stop" },
                { "index": 1, "message": { "role": "assistant", "content": "second" }, "finish_reason": "stop" }
            ],
            "usage": { "prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15 }
        }))
        .unwrap();

        assert_eq!(response.usage.as_ref().unwrap().total_tokens, 15);
        assert_eq!(response.into_reply().as_deref(), Some("first"));
    }

    #[test]
    fn test_into_reply_null_content() {
        let response: OpenAIResponse = serde_json::from_value(json!({
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": null, "refusal": "no" }, "finish_reason": "stop" }
            ]
        }))
        .unwrap();

        assert!(response.into_reply().is_none());
    }

    #[test]
    fn test_into_reply_no_choices() {
        let response: OpenAIResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(response.into_reply().is_none());
    }
}
