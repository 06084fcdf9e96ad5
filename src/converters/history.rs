use crate::converters::openai::OpenAIMessage;
use tracing::warn;

/// Outcome of reading a conversation history that arrived as a JSON string.
///
/// A history that does not parse is not an error: the request proceeds as if
/// the caller had sent no history at all.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryParse {
    Parsed(Vec<OpenAIMessage>),
    EmptyOnError(String),
}

impl HistoryParse {
    /// Absent and blank input both parse to an empty conversation.
    pub fn from_json(raw: Option<&str>) -> Self {
        let raw = match raw.map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => return HistoryParse::Parsed(Vec::new()),
        };
        match serde_json::from_str::<Vec<OpenAIMessage>>(raw) {
            Ok(messages) => HistoryParse::Parsed(messages),
            Err(e) => HistoryParse::EmptyOnError(e.to_string()),
        }
    }

    pub fn into_messages(self) -> Vec<OpenAIMessage> {
        match self {
            HistoryParse::Parsed(messages) => messages,
            HistoryParse::EmptyOnError(reason) => {
                warn!("Discarding unparseable conversation history: {}", reason);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::openai::{OpenAIContent, OpenAIContentItem, OpenAIRole};

    #[test]
    fn test_parses_valid_history() {
        let raw = r#"[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]"#;
        let parsed = HistoryParse::from_json(Some(raw));
        let messages = match parsed {
            HistoryParse::Parsed(messages) => messages,
            other => panic!("expected Parsed, got {:?}", other),
        };
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, OpenAIRole::Assistant);
        assert_eq!(messages[1].content, OpenAIContent::Text("hello".to_string()));
    }

    #[test]
    fn test_parses_multipart_content() {
        let raw = r#"[{"role":"user","content":[{"type":"text","text":"look"},{"type":"image_url","image_url":{"url":"data:image/png;base64,AAAA"}}]}]"#;
        let messages = HistoryParse::from_json(Some(raw)).into_messages();
        match &messages[0].content {
            OpenAIContent::Array(items) => {
                assert_eq!(items.len(), 2);
                assert!(matches!(items[1], OpenAIContentItem::ImageUrl { .. }));
            }
            other => panic!("expected parts, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_history_is_empty_on_error() {
        let parsed = HistoryParse::from_json(Some("not json"));
        assert!(matches!(parsed, HistoryParse::EmptyOnError(_)));
        assert!(parsed.into_messages().is_empty());

        let wrong_shape = HistoryParse::from_json(Some(r#"{"role":"user"}"#));
        assert!(matches!(wrong_shape, HistoryParse::EmptyOnError(_)));
    }

    #[test]
    fn test_absent_or_blank_history() {
        assert_eq!(HistoryParse::from_json(None), HistoryParse::Parsed(Vec::new()));
        assert_eq!(HistoryParse::from_json(Some("  ")), HistoryParse::Parsed(Vec::new()));
    }
}
