use crate::converters::openai::OpenAIMessage;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct OpenAIRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [OpenAIMessage],
    pub max_tokens: u32,
    pub temperature: f64,
}
