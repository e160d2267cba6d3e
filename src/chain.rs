use std::sync::Arc;

use crate::config::prompt::PromptTemplate;
use crate::llm::chat::{ self, ChatClient };
use crate::llm::{ LlmConfig, LlmError };

/// The fixed pipeline: prompt template -> model client -> text extraction.
/// Rebuilt from scratch whenever the session commits a new model; the prior
/// instance is simply dropped.
#[derive(Clone)]
pub struct ResponseChain {
    template: PromptTemplate,
    client: Arc<dyn ChatClient>,
}

impl ResponseChain {
    pub fn new(template: PromptTemplate, client: Arc<dyn ChatClient>) -> Self {
        Self { template, client }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = chat::new_client(config)?;
        Ok(Self::new(PromptTemplate::default(), client))
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// One outbound call per invocation. Callers are expected to have
    /// rejected empty input already.
    pub async fn ask(&self, question: &str) -> Result<String, LlmError> {
        let messages = self.template.render(question);
        self.client.complete(&messages).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;

    use super::*;
    use crate::config::prompt::PromptMessage;

    /// Canned client for chain and session tests. Answers with a fixed
    /// string, or fails every call.
    pub struct StaticClient {
        pub model: String,
        pub answer: Option<String>,
    }

    impl StaticClient {
        pub fn answering(answer: &str) -> Arc<dyn ChatClient> {
            Arc::new(Self {
                model: crate::llm::DEFAULT_MODEL.to_string(),
                answer: Some(answer.to_string()),
            })
        }

        pub fn failing() -> Arc<dyn ChatClient> {
            Arc::new(Self {
                model: crate::llm::DEFAULT_MODEL.to_string(),
                answer: None,
            })
        }
    }

    #[async_trait]
    impl ChatClient for StaticClient {
        async fn complete(&self, _messages: &[PromptMessage]) -> Result<String, LlmError> {
            self.answer.clone().ok_or(LlmError::EmptyCompletion)
        }

        fn model(&self) -> &str {
            &self.model
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::StaticClient;

    #[tokio::test]
    async fn ask_returns_client_text() {
        let chain = ResponseChain::new(
            PromptTemplate::default(),
            StaticClient::answering("Stay on high ground.")
        );
        let answer = chain.ask("Is my area flood-prone?").await.unwrap();
        assert_eq!(answer, "Stay on high ground.");
    }

    #[tokio::test]
    async fn ask_propagates_client_failure() {
        let chain = ResponseChain::new(PromptTemplate::default(), StaticClient::failing());
        assert!(chain.ask("anything").await.is_err());
    }
}
