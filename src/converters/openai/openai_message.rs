use crate::converters::openai::{OpenAIContent, OpenAIRole};
use serde::{Deserialize, Serialize};

/// A single conversation turn, in the shape both the caller and the upstream
/// chat-completions endpoint exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAIMessage {
    pub role: OpenAIRole,
    pub content: OpenAIContent,
}

impl OpenAIMessage {
    pub fn user(content: impl Into<OpenAIContent>) -> Self {
        Self {
            role: OpenAIRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: OpenAIRole::Assistant,
            content: OpenAIContent::Text(text.into()),
        }
    }
}
