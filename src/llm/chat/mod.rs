pub mod groq;

use async_trait::async_trait;
use std::sync::Arc;

use self::groq::GroqChatClient;
use super::{ LlmConfig, LlmError };
use crate::config::prompt::PromptMessage;

/// Seam between the response chain and the hosted completion API.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// One request, one extracted answer. No retries, no streaming; timeouts
    /// are whatever the underlying HTTP client defaults to.
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, LlmError>;

    fn model(&self) -> &str;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, LlmError> {
    let client = GroqChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
