use async_trait::async_trait;

use super::openai::{ChatChoice, ChatMessage, ChatRequest, ChatResponse};
use super::Provider;
use crate::errors::ProviderError;

/// Mock chat provider returning a canned reply, for tests and dry runs.
#[derive(Debug)]
pub struct MockChat {
    /// Reply returned for every request
    reply: String,

    /// When set, every request fails with this message
    fail_with: Option<String>,
}

impl MockChat {
    /// Create a mock that answers every request with the given reply
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            fail_with: None,
        }
    }

    /// Create a mock that fails every request
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: String::new(),
            fail_with: Some(message.into()),
        }
    }
}

#[async_trait]
impl Provider for MockChat {
    type Request = ChatRequest;
    type Response = ChatResponse;

    async fn complete(&self, _request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        if let Some(message) = &self.fail_with {
            return Err(ProviderError::RequestFailed(message.clone()));
        }
        Ok(ChatResponse {
            choices: vec![ChatChoice {
                message: ChatMessage {
                    role: "assistant".to_string(),
                    content: self.reply.clone(),
                },
            }],
            usage: None,
        })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.fail_with {
            Some(message) => Err(ProviderError::RequestFailed(message.clone())),
            None => Ok(()),
        }
    }

    fn extract_text(response: &ChatResponse) -> String {
        response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .unwrap_or_default()
    }
}
