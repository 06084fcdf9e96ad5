use crate::converters::openai::OpenAIResponseMessage;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIResponseMessage,
}
