//! The answer pipeline: dispatch, extract, score, fuse.
//!
//! The orchestrator is the only entry point callers need: it takes a prompt
//! string and always returns an answer string. Every failure mode inside the
//! pipeline is absorbed along the way; there is no fatal error path.

pub mod dispatch;
pub mod extract;
pub mod fuse;
pub mod score;

pub use dispatch::{
    Dispatcher, FetchOutcome, HttpTransport, RawResult, Transport, TransportError,
    TransportResponse,
};
pub use fuse::{Candidate, NO_USABLE_ANSWER, fuse as fuse_candidates};

use crate::config::Config;
use crate::log_debug;

use std::sync::Arc;

/// Returned for an empty or whitespace-only prompt; nothing is dispatched.
pub const EMPTY_PROMPT: &str = "Please enter a question first.";

/// Facade over the whole pipeline. Holds the immutable configuration and the
/// dispatcher; every query is processed independently.
pub struct Orchestrator {
    config: Config,
    dispatcher: Dispatcher,
}

impl Orchestrator {
    /// Build an orchestrator with the production HTTP transport.
    pub fn new(config: Config) -> Result<Self, TransportError> {
        let transport = Arc::new(HttpTransport::new(&config.network)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Build an orchestrator over an arbitrary transport (used by tests).
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        let dispatcher = Dispatcher::new(transport, &config.network);
        Self { config, dispatcher }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Answer a prompt. Always returns a string: the fused answer, the fixed
    /// no-answer message, or the empty-prompt message.
    pub async fn answer(&self, prompt: &str) -> String {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return EMPTY_PROMPT.to_string();
        }

        let raw = self.dispatcher.dispatch(prompt, &self.config.sources).await;
        let responded = raw.iter().filter(|r| r.outcome.body().is_some()).count();
        log_debug!(
            "{}/{} sources responded with a body",
            responded,
            self.config.sources.len()
        );

        let candidates = self.collect_candidates(raw);
        fuse::fuse(&candidates, self.config.fusion.max_fused)
    }

    /// Run extraction and scoring over the raw results, keeping source order.
    /// Sources whose extraction is absent or too short contribute nothing.
    fn collect_candidates(&self, raw: Vec<RawResult>) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for result in raw {
            let Some(body) = result.outcome.body() else {
                continue;
            };
            let Some(text) = extract::extract(body) else {
                log_debug!("[{}] body carried no usable text", result.source);
                continue;
            };
            if text.chars().count() <= self.config.fusion.min_answer_chars {
                log_debug!("[{}] extraction too short, dropped", result.source);
                continue;
            }
            let score = score::score(&text, &self.config.scoring);
            candidates.push(Candidate {
                source: result.source,
                text,
                score,
            });
        }
        candidates
    }
}
