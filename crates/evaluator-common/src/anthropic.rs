//! Client for the Anthropic Messages API.
//!
//! One non-streaming `POST {base_url}/v1/messages` per call. Only the first content
//! block is read; a non-text first block yields an empty string.
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CommonError;
use crate::generation::{self, GenerationError, TextGenerator};

const API_VERSION: &str = "2023-06-01";

#[derive(Clone, Debug)]
pub struct AnthropicClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Option<Duration>,
    pub max_error_body_bytes: usize,
}

impl AnthropicClientConfig {
    /// Required:
    /// - `ANTHROPIC_API_KEY`
    ///
    /// Optional:
    /// - `ANTHROPIC_BASE_URL` (default: "https://api.anthropic.com")
    /// - `LLM_MODEL` (default: "claude-sonnet-4-20250514")
    /// - `LLM_TIMEOUT_SECS` (unset: no client-side timeout)
    /// - `LLM_MAX_ERROR_BODY_BYTES` (default: 8192)
    pub fn from_env() -> Result<Self, CommonError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(CommonError::MissingEnv("ANTHROPIC_API_KEY"))?;
        let base_url = std::env::var("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com".to_string());
        let model =
            std::env::var("LLM_MODEL").unwrap_or_else(|_| "claude-sonnet-4-20250514".to_string());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            timeout: generation::timeout_from_env(),
            max_error_body_bytes: generation::max_error_body_bytes_from_env(),
        })
    }
}

#[derive(Clone)]
pub struct AnthropicClient {
    config: AnthropicClientConfig,
    http: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(config: AnthropicClientConfig) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent("company-evaluator")
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &AnthropicClientConfig {
        &self.config
    }

    pub async fn create_message(
        &self,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse, GenerationError> {
        let url = format!("{}/v1/messages", self.config.base_url);
        let mut builder = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(request);
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        let resp = builder.send().await?;
        generation::parse_json_response(resp, self.config.max_error_body_bytes).await
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError> {
        let request = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens,
            messages: vec![InputMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };
        let response = self.create_message(&request).await?;
        response.into_text()
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<InputMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    pub id: Option<String>,
    pub model: Option<String>,
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<String>,
    pub usage: Option<MessagesUsage>,
}

impl MessagesResponse {
    pub fn into_text(self) -> Result<String, GenerationError> {
        match self.content.into_iter().next() {
            Some(ContentBlock::Text { text }) => Ok(text),
            Some(ContentBlock::Other) => Ok(String::new()),
            None => Err(GenerationError::MissingContent),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesUsage {
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_messages_api_shape() {
        let request = MessagesRequest {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 1500,
            messages: vec![InputMessage {
                role: "user".to_string(),
                content: "hello".to_string(),
            }],
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["max_tokens"], 1500);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
    }

    #[test]
    fn first_text_block_is_returned() {
        let body = r#"{
            "id": "msg_01",
            "model": "claude-sonnet-4-20250514",
            "content": [{"type": "text", "text": "{\"verdict\":\"red_flags\"}"}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 900, "output_tokens": 12}
        }"#;
        let response: MessagesResponse = serde_json::from_str(body).expect("deserialize");
        assert_eq!(
            response.into_text().expect("text"),
            "{\"verdict\":\"red_flags\"}"
        );
    }

    #[test]
    fn non_text_first_block_yields_empty_text() {
        let body = r#"{"content": [{"type": "tool_use", "id": "t1", "name": "x", "input": {}}]}"#;
        let response: MessagesResponse = serde_json::from_str(body).expect("deserialize");
        assert_eq!(response.into_text().expect("text"), "");
    }

    #[test]
    fn empty_content_is_missing_content() {
        let response: MessagesResponse =
            serde_json::from_str(r#"{"content": []}"#).expect("deserialize");
        assert!(matches!(
            response.into_text(),
            Err(GenerationError::MissingContent)
        ));
    }
}
