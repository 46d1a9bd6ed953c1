//! Page fetching with graceful degradation.
//!
//! `PageFetcher::fetch_page` never fails: timeouts, non-2xx statuses and network errors
//! are logged and collapse to an empty body, so callers proceed with whatever pages
//! could be retrieved.
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::CommonError;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; ShouldIApplyBot/1.0; +https://shouldiapply.com)";

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Raw response body of `url`, or an empty string on any failure.
    async fn fetch_page(&self, url: &str) -> String;
}

#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl FetchConfig {
    /// Optional:
    /// - `FETCH_TIMEOUT_SECS` (default: 10)
    /// - `FETCH_USER_AGENT` (default: [`DEFAULT_USER_AGENT`])
    pub fn from_env() -> Self {
        let timeout = std::env::var("FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&n| n > 0)
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(10));
        let user_agent =
            std::env::var("FETCH_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        Self {
            timeout,
            user_agent,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("http status {0}")]
    Status(reqwest::StatusCode),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// `PageFetcher` backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct HttpPageFetcher {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpPageFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .build()?;
        Ok(Self {
            http,
            timeout: config.timeout,
        })
    }

    /// One GET of `url`. The deadline covers both the response head and the body read;
    /// on expiry the in-flight request is dropped.
    pub async fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        let request = async {
            let resp = self.http.get(url).send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(FetchError::Status(status));
            }
            Ok::<_, FetchError>(resp.text().await?)
        };
        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| FetchError::Timeout(self.timeout))?
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, url: &str) -> String {
        match self.try_fetch(url).await {
            Ok(body) => {
                debug!(url, bytes = body.len(), "fetched page");
                body
            }
            Err(FetchError::Status(status)) => {
                debug!(url, status = %status, "page returned non-success status");
                String::new()
            }
            Err(e) => {
                warn!(url, error = %e, "page fetch failed");
                String::new()
            }
        }
    }
}
