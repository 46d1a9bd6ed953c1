//! The text-generation seam.
//!
//! The evaluation pipeline depends only on "submit prompt text, receive generated text".
//! Provider clients (`AnthropicClient`, `OpenAiClient`) implement `TextGenerator`; the
//! pipeline holds an `Arc<dyn TextGenerator>` and never names a provider.
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned error: status={status} message={message}")]
    Upstream { status: StatusCode, message: String },

    #[error("upstream returned non-JSON error: status={status} body={body}")]
    UpstreamBody { status: StatusCode, body: String },

    #[error("response contained no content")]
    MissingContent,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Submit a single user prompt and return the generated text, capped at `max_tokens`.
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError>;

    /// Model identifier sent upstream, used for logging.
    fn model(&self) -> &str;
}

/// Decode a successful JSON body, or turn a non-2xx response into an upstream error.
pub(crate) async fn parse_json_response<T: for<'de> Deserialize<'de>>(
    resp: reqwest::Response,
    max_error_body_bytes: usize,
) -> Result<T, GenerationError> {
    if resp.status().is_success() {
        let json = resp.json::<T>().await?;
        return Ok(json);
    }
    Err(to_upstream_error(resp, max_error_body_bytes).await)
}

async fn to_upstream_error(resp: reqwest::Response, max_error_body_bytes: usize) -> GenerationError {
    let status = resp.status();
    let body = read_limited_text(resp, max_error_body_bytes).await;
    upstream_error_from_body(status, body)
}

/// Both supported providers wrap failures as `{"error": {"message": ...}}`.
fn upstream_error_from_body(status: StatusCode, body: String) -> GenerationError {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(&body) {
        let message = parsed
            .error
            .message
            .unwrap_or_else(|| "unknown upstream error".to_string());
        return GenerationError::Upstream { status, message };
    }
    GenerationError::UpstreamBody { status, body }
}

async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    match resp.bytes().await {
        Ok(mut b) => {
            if b.len() > max_bytes {
                b.truncate(max_bytes);
            }
            String::from_utf8_lossy(&b).to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to read upstream error body");
            "<failed to read error body>".to_string()
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorObject,
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    message: Option<String>,
}

pub(crate) fn max_error_body_bytes_from_env() -> usize {
    std::env::var("LLM_MAX_ERROR_BODY_BYTES")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(8 * 1024)
}

pub(crate) fn timeout_from_env() -> Option<std::time::Duration> {
    std::env::var("LLM_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|&n| n > 0)
        .map(std::time::Duration::from_secs)
}
