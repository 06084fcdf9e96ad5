use serde::{Deserialize, Serialize};
use crate::converters::openai::OpenAIContentItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpenAIContent {
    Text(String),
    Array(Vec<OpenAIContentItem>),
}

impl From<String> for OpenAIContent {
    fn from(text: String) -> Self {
        OpenAIContent::Text(text)
    }
}

impl From<&str> for OpenAIContent {
    fn from(text: &str) -> Self {
        OpenAIContent::Text(text.to_string())
    }
}

impl From<Vec<OpenAIContentItem>> for OpenAIContent {
    fn from(items: Vec<OpenAIContentItem>) -> Self {
        OpenAIContent::Array(items)
    }
}
