use crate::converters::openai::OpenAIImageUrl;
use serde::{Deserialize, Serialize};

/// One typed part of a multi-part message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenAIContentItem {
    Text { text: String },
    ImageUrl { image_url: OpenAIImageUrl },
}

impl OpenAIContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        OpenAIContentItem::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        OpenAIContentItem::ImageUrl {
            image_url: OpenAIImageUrl {
                url: url.into(),
                detail: None,
            },
        }
    }
}
