pub mod chat;

use thiserror::Error;

/// Models the sidebar dropdown offers. The remote side decides what each one
/// actually is; we only gate selection to this closed set.
pub const SUPPORTED_MODELS: [&str; 4] = [
    "llama3-70b-8192",
    "llama3-8b-8192",
    "mixtral-8x7b-32768",
    "gemma-7b-it",
];

pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

pub fn is_supported_model(model: &str) -> bool {
    SUPPORTED_MODELS.iter().any(|m| *m == model)
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
}

impl LlmConfig {
    pub fn with_model(&self, model: &str) -> Self {
        Self {
            model: model.to_string(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("invalid API key format: {0}")]
    InvalidApiKey(String),

    #[error("request to model provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model returned no completion choices")]
    EmptyCompletion,
}
