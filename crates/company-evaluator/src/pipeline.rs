//! The evaluation pipeline.
//!
//! normalize -> fetch the three site pages concurrently -> extract text -> build the
//! prompt -> one model call -> parse the reply as JSON. Single attempt throughout.
use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, info};

use evaluator_common::fetch::PageFetcher;
use evaluator_common::generation::TextGenerator;

use crate::error::EvaluateError;
use crate::extract::extract_text;
use crate::model::EvaluationRequest;
use crate::normalize::{CompanyTarget, SitePage};
use crate::prompt::{build_prompt, PageContents};

pub const DEFAULT_MAX_TOKENS: u32 = 1500;

#[derive(Clone)]
pub struct Evaluator {
    fetcher: Arc<dyn PageFetcher>,
    generator: Arc<dyn TextGenerator>,
    max_tokens: u32,
}

impl Evaluator {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        generator: Arc<dyn TextGenerator>,
        max_tokens: u32,
    ) -> Self {
        Self {
            fetcher,
            generator,
            max_tokens,
        }
    }

    pub async fn evaluate(&self, request: &EvaluationRequest) -> Result<Value, EvaluateError> {
        let target = CompanyTarget::from_input(&request.raw_url);
        info!(url = %target.url, domain = %target.domain, "evaluating company");

        let pages = self.fetch_pages(&target).await;
        info!(
            domain = %target.domain,
            pages_fetched = pages.fetched_count(),
            "site content collected"
        );

        let prompt = build_prompt(&target, &pages);
        debug!(prompt_chars = prompt.chars().count(), "prompt built");

        let reply = self.generator.generate(&prompt, self.max_tokens).await?;
        info!(
            model = self.generator.model(),
            reply_chars = reply.chars().count(),
            "model replied"
        );
        parse_reply(&reply)
    }

    /// Fetch and extract every page concurrently. Failed pages come back empty.
    pub async fn fetch_pages(&self, target: &CompanyTarget) -> PageContents {
        let fetches = SitePage::ALL.iter().map(|&page| {
            let url = target.page_url(page);
            async move {
                let html = self.fetcher.fetch_page(&url).await;
                (page, extract_text(&html))
            }
        });

        let mut pages = PageContents::default();
        for (page, text) in join_all(fetches).await {
            pages.set(page, text);
        }
        pages
    }
}

/// Parse the model's reply verbatim. No repair or substring extraction is attempted.
pub fn parse_reply(reply: &str) -> Result<Value, EvaluateError> {
    serde_json::from_str(reply).map_err(EvaluateError::MalformedReply)
}
