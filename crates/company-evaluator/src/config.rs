use std::str::FromStr;
use std::sync::Arc;

use evaluator_common::anthropic::{AnthropicClient, AnthropicClientConfig};
use evaluator_common::fetch::{FetchConfig, HttpPageFetcher};
use evaluator_common::generation::TextGenerator;
use evaluator_common::openai::{OpenAiClient, OpenAiClientConfig};

use crate::error::AppError;
use crate::pipeline::{Evaluator, DEFAULT_MAX_TOKENS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAi,
}

impl FromStr for Provider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" => Ok(Provider::Anthropic),
            "openai" => Ok(Provider::OpenAi),
            other => Err(AppError::Config(format!(
                "unknown LLM_PROVIDER {other:?} (expected \"anthropic\" or \"openai\")"
            ))),
        }
    }
}

/// Application configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    /// Output cap for the single model call.
    pub max_tokens: u32,
    pub fetch: FetchConfig,
}

impl Config {
    /// Optional:
    /// - `LLM_PROVIDER` (default: "anthropic")
    /// - `LLM_MAX_TOKENS` (default: 1500)
    /// - `FETCH_TIMEOUT_SECS`, `FETCH_USER_AGENT` (see `FetchConfig`)
    ///
    /// Provider credentials are read when the generator is built.
    pub fn from_env() -> Result<Self, AppError> {
        let provider = match std::env::var("LLM_PROVIDER") {
            Ok(raw) => raw.parse()?,
            Err(_) => Provider::Anthropic,
        };

        let max_tokens = match std::env::var("LLM_MAX_TOKENS") {
            Ok(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    AppError::Config(format!("LLM_MAX_TOKENS must be a positive integer, got {raw:?}"))
                })?,
            Err(_) => DEFAULT_MAX_TOKENS,
        };

        Ok(Self {
            provider,
            max_tokens,
            fetch: FetchConfig::from_env(),
        })
    }

    pub fn build_generator(&self) -> Result<Arc<dyn TextGenerator>, AppError> {
        let generator: Arc<dyn TextGenerator> = match self.provider {
            Provider::Anthropic => {
                Arc::new(AnthropicClient::new(AnthropicClientConfig::from_env()?)?)
            }
            Provider::OpenAi => Arc::new(OpenAiClient::new(OpenAiClientConfig::from_env())?),
        };
        Ok(generator)
    }

    pub fn build_evaluator(&self) -> Result<Evaluator, AppError> {
        let fetcher = Arc::new(HttpPageFetcher::new(self.fetch.clone())?);
        let generator = self.build_generator()?;
        Ok(Evaluator::new(fetcher, generator, self.max_tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parses_case_insensitively() {
        assert_eq!("anthropic".parse::<Provider>().expect("valid"), Provider::Anthropic);
        assert_eq!(" OpenAI ".parse::<Provider>().expect("valid"), Provider::OpenAi);
        assert!(matches!(
            "gemini".parse::<Provider>(),
            Err(AppError::Config(_))
        ));
    }
}
