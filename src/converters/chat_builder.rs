use crate::converters::helpers::{self, FALLBACK_IMAGE_MIME};
use crate::converters::history::HistoryParse;
use crate::converters::openai::{OpenAIContentItem, OpenAIMessage};
use crate::error::{ChatError, Result};
use crate::presets::{self, DEFAULT_INSTRUCTION};
use bytes::Bytes;
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::debug;

/// Which instruction path a request took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisType {
    /// The caller's preset key, verbatim, whether or not the table knows it.
    Preset(String),
    Custom,
    Default,
}

impl AnalysisType {
    pub fn as_str(&self) -> &str {
        match self {
            AnalysisType::Preset(key) => key,
            AnalysisType::Custom => "custom",
            AnalysisType::Default => "default",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AnalysisType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A file part pulled out of a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub content_type: String,
    pub bytes: Bytes,
}

/// An image ready to be embedded in a message as a data URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInput {
    mime_type: String,
    base64: String,
}

impl ImageInput {
    pub fn from_upload(file: &UploadedFile) -> Result<Self> {
        if !helpers::is_image_mime(&file.content_type) {
            return Err(ChatError::NotAnImage);
        }
        Ok(Self {
            mime_type: file.content_type.clone(),
            base64: helpers::encode_base64(&file.bytes),
        })
    }

    /// Already-encoded payloads are embedded untouched.
    pub fn from_base64(encoded: impl Into<String>) -> Self {
        Self {
            mime_type: FALLBACK_IMAGE_MIME.to_string(),
            base64: encoded.into(),
        }
    }

    pub fn to_content_item(&self) -> OpenAIContentItem {
        OpenAIContentItem::image_url(helpers::data_url(&self.mime_type, &self.base64))
    }
}

/// Picks the instruction by priority preset > prompt > default. Empty strings
/// count as absent.
pub fn select_instruction(prompt: Option<&str>, preset_key: Option<&str>) -> (String, AnalysisType) {
    if let Some(key) = preset_key.filter(|k| !k.is_empty()) {
        return (presets::instruction_for(key).to_string(), AnalysisType::Preset(key.to_string()));
    }
    if let Some(prompt) = prompt.filter(|p| !p.is_empty()) {
        return (prompt.to_string(), AnalysisType::Custom);
    }
    (DEFAULT_INSTRUCTION.to_string(), AnalysisType::Default)
}

pub fn build_text_turn(mut history: Vec<OpenAIMessage>, message: impl Into<String>) -> Vec<OpenAIMessage> {
    let message: String = message.into();
    history.push(OpenAIMessage::user(message));
    history
}

pub fn build_image_turn(
    image: &ImageInput,
    prompt: Option<&str>,
    preset_key: Option<&str>,
) -> (Vec<OpenAIMessage>, AnalysisType) {
    let (instruction, analysis_type) = select_instruction(prompt, preset_key);
    debug!("Image instruction path: {}", analysis_type);
    let content = vec![OpenAIContentItem::text(instruction), image.to_content_item()];
    (vec![OpenAIMessage::user(content)], analysis_type)
}

#[derive(Debug, Clone)]
pub struct MultimodalTurn {
    pub messages: Vec<OpenAIMessage>,
    pub has_image: bool,
}

pub fn build_multimodal_turn(
    history: HistoryParse,
    message: impl Into<String>,
    image: Option<&UploadedFile>,
) -> MultimodalTurn {
    let mut messages = history.into_messages();
    let mut content = vec![OpenAIContentItem::text(message)];

    let image = image.and_then(|file| match ImageInput::from_upload(file) {
        Ok(image) => Some(image),
        Err(_) => {
            debug!("Ignoring non-image attachment of type {:?}", file.content_type);
            None
        }
    });
    let has_image = image.is_some();
    if let Some(image) = image {
        content.push(image.to_content_item());
    }

    messages.push(OpenAIMessage::user(content));
    MultimodalTurn { messages, has_image }
}

/// Appends the provider's reply as the assistant turn.
pub fn append_reply(mut messages: Vec<OpenAIMessage>, reply: &str) -> Vec<OpenAIMessage> {
    messages.push(OpenAIMessage::assistant(reply));
    messages
}
