use crate::config::Config;
use crate::converters::openai::{OpenAIMessage, OpenAIRequest, OpenAIResponse};
use crate::error::{ChatError, Result};
use crate::request_id::{REQUEST_ID_HEADER, RequestId};
use async_trait::async_trait;
use reqwest::header::HeaderValue;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[cfg(test)]
pub mod mock;

/// The upstream chat-completion capability handlers depend on.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Sends `messages` upstream and returns the text of the reply.
    async fn complete(&self, messages: &[OpenAIMessage], request_id: &RequestId) -> Result<String>;
}

#[derive(Debug)]
pub struct LlmClient {
    http_client: reqwest::Client,
    config: Arc<Config>,
}

impl LlmClient {
    pub fn new(http_client: reqwest::Client, config: Arc<Config>) -> Self {
        Self { http_client, config }
    }
}

#[async_trait]
impl ChatCompletion for LlmClient {
    async fn complete(&self, messages: &[OpenAIMessage], request_id: &RequestId) -> Result<String> {
        let request = OpenAIRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };
        let target_url = self.config.completions_url();

        let mut target_request = self
            .http_client
            .post(&target_url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.config.api_key);

        if let Ok(val) = HeaderValue::from_str(&request_id.0) {
            target_request = target_request.header(REQUEST_ID_HEADER, val);
        }

        info!("Forwarding {} message(s) to: {}", messages.len(), target_url);
        if let Ok(body) = serde_json::to_string(&request) {
            debug!("request body: {}", body);
        }

        let response = target_request.json(&request).send().await.map_err(|e| {
            warn!("Failed to send request: {}", e);
            e
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Upstream request failed with status {}: {}", status, body);
            return Err(ChatError::Upstream { status: status.as_u16(), body });
        }

        let response: OpenAIResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse API response: {}", e);
            ChatError::Decode(e)
        })?;
        if let Some(usage) = &response.usage {
            debug!(
                "usage: prompt={} completion={} total={}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }
        response.into_reply().ok_or(ChatError::EmptyReply)
    }
}
