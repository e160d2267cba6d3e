use async_trait::async_trait;
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };

use super::ChatClient;
use crate::config::prompt::PromptMessage;
use crate::llm::{ LlmConfig, LlmError };

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Debug)]
pub struct GroqChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
}

#[derive(Serialize, Deserialize)]
struct GroqMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct GroqRequest {
    messages: Vec<GroqMessage>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
}

#[derive(Deserialize)]
struct GroqChoice {
    message: GroqMessage,
}

impl GroqChatClient {
    pub fn new(
        api_key: &str,
        model: String,
        base_url: Option<String>,
    ) -> Result<Self, LlmError> {
        let api_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| LlmError::InvalidApiKey(e.to_string()))?
        );

        let http = HttpClient::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            model,
            base_url: api_url,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        Self::new(&config.api_key, config.model.clone(), config.base_url.clone())
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatClient for GroqChatClient {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, LlmError> {
        let messages = messages
            .iter()
            .map(|m| GroqMessage {
                role: m.role.as_str().to_string(),
                content: m.content.clone(),
            })
            .collect();

        let req = GroqRequest {
            messages,
            model: self.model.clone(),
            temperature: 0.7,
            max_tokens: 1024,
        };

        let resp = self.http
            .post(self.completions_url())
            .json(&req)
            .send().await?
            .error_for_status()?
            .json::<GroqResponse>().await?;

        let content = resp.choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyCompletion)?
            .message.content;

        Ok(content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::DEFAULT_MODEL;

    #[test]
    fn builds_with_default_base_url() {
        let client = GroqChatClient::new("test-key", DEFAULT_MODEL.to_string(), None).unwrap();
        assert_eq!(client.completions_url(), "https://api.groq.com/openai/v1/chat/completions");
        assert_eq!(client.model(), DEFAULT_MODEL);
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = GroqChatClient::new(
            "test-key",
            DEFAULT_MODEL.to_string(),
            Some("http://localhost:9999/v1/".to_string())
        ).unwrap();
        assert_eq!(client.completions_url(), "http://localhost:9999/v1/chat/completions");
    }

    #[test]
    fn rejects_unprintable_api_key() {
        let err = GroqChatClient::new("bad\nkey", DEFAULT_MODEL.to_string(), None).unwrap_err();
        assert!(matches!(err, LlmError::InvalidApiKey(_)));
    }
}
