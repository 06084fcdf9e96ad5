use super::ChatCompletion;
use crate::converters::openai::OpenAIMessage;
use crate::error::{ChatError, Result};
use crate::request_id::RequestId;
use async_trait::async_trait;
use std::sync::Mutex;

/// Records every call and answers with a canned reply, or fails when asked to.
#[derive(Debug, Default)]
pub struct MockChatClient {
    reply: String,
    failure: Option<(u16, String)>,
    calls: Mutex<Vec<Vec<OpenAIMessage>>>,
}

impl MockChatClient {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            ..Self::default()
        }
    }

    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self {
            failure: Some((status, body.into())),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Vec<OpenAIMessage>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatCompletion for MockChatClient {
    async fn complete(&self, messages: &[OpenAIMessage], _request_id: &RequestId) -> Result<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        match &self.failure {
            Some((status, body)) => Err(ChatError::Upstream {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(self.reply.clone()),
        }
    }
}
