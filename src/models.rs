use crate::converters::chat_builder::AnalysisType;
use crate::converters::openai::OpenAIMessage;
use crate::presets::Preset;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: IndexMap<&'static str, &'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PresetsResponse {
    pub presets: &'static [Preset],
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Option<Vec<OpenAIMessage>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextChatResponse {
    pub response: String,
    pub conversation_history: Vec<OpenAIMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageAnalysisRequest {
    pub image_base64: String,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub preset_action: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageAnalysisResponse {
    pub response: String,
    pub analysis_type: AnalysisType,
}

#[derive(Debug, Clone, Serialize)]
pub struct MultimodalResponse {
    pub response: String,
    pub conversation_history: Vec<OpenAIMessage>,
    pub has_image: bool,
}
