//! Concurrent source fan-out.
//!
//! One GET per configured source, bounded by a worker limit, each call with
//! its own deadline. A failing call degrades to an absence outcome for that
//! source alone; the dispatcher always returns exactly one result per source
//! and never fails as a whole.

use crate::config::NetworkConfig;
use crate::log_debug;
use crate::sources::Source;

use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;

/// Errors the transport layer can surface. Everything here is recovered
/// locally as an absence outcome; nothing propagates past the dispatcher.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// A raw HTTP response as the pipeline sees it.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Seam between the dispatcher and the network. Tests substitute a stub.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

/// Production transport backed by a shared, pooled `reqwest` client.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(network: &NetworkConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(network.user_agent.clone())
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        Ok(TransportResponse { status, body })
    }
}

/// What one upstream call produced. Only `Success` carries a body worth
/// extracting; every other variant is an absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(String),
    Timeout,
    Status(u16),
    Network(String),
    EmptyBody,
}

impl FetchOutcome {
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Success(body) => Some(body),
            _ => None,
        }
    }
}

/// The outcome of one source's call for one query.
#[derive(Debug, Clone)]
pub struct RawResult {
    pub source: String,
    pub outcome: FetchOutcome,
}

/// Fans a prompt out to every configured source concurrently.
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    timeout: Duration,
    max_in_flight: usize,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, network: &NetworkConfig) -> Self {
        Self {
            transport,
            timeout: network.timeout(),
            max_in_flight: network.max_concurrent_calls.max(1),
        }
    }

    /// Issue one request per source and wait for every call (or its timeout).
    /// Returns exactly one `RawResult` per source, in source order.
    pub async fn dispatch(&self, prompt: &str, sources: &[Source]) -> Vec<RawResult> {
        let workers = Arc::new(Semaphore::new(self.max_in_flight));
        let mut handles = Vec::with_capacity(sources.len());

        for source in sources {
            let transport = Arc::clone(&self.transport);
            let workers = Arc::clone(&workers);
            let timeout = self.timeout;
            let name = source.name.clone();
            let rendered = source.render_url(prompt);

            handles.push(tokio::spawn(async move {
                let outcome = match rendered {
                    Ok(url) => match workers.acquire_owned().await {
                        Ok(_permit) => fetch_one(transport.as_ref(), &url, timeout).await,
                        Err(_) => FetchOutcome::Network("worker pool closed".to_string()),
                    },
                    Err(e) => FetchOutcome::Network(e.to_string()),
                };
                log_debug!("[{}] outcome: {}", name, summarize(&outcome));
                RawResult {
                    source: name,
                    outcome,
                }
            }));
        }

        // Every task is joined before returning; a panicked task degrades to
        // a failure outcome for its source only.
        join_all(handles)
            .await
            .into_iter()
            .zip(sources)
            .map(|(joined, source)| {
                joined.unwrap_or_else(|e| {
                    tracing::warn!("source task for '{}' did not finish: {e}", source.name);
                    RawResult {
                        source: source.name.clone(),
                        outcome: FetchOutcome::Network(format!("task failed: {e}")),
                    }
                })
            })
            .collect()
    }
}

/// One bounded, deadlined call. The timeout clock starts once a worker slot
/// is held, so queued sources are not penalized for waiting.
async fn fetch_one(transport: &dyn Transport, url: &str, deadline: Duration) -> FetchOutcome {
    match tokio::time::timeout(deadline, transport.fetch(url)).await {
        Ok(Ok(response)) => {
            if response.status != 200 {
                FetchOutcome::Status(response.status)
            } else if response.body.trim().is_empty() {
                FetchOutcome::EmptyBody
            } else {
                FetchOutcome::Success(response.body)
            }
        }
        Ok(Err(e)) => FetchOutcome::Network(e.to_string()),
        Err(_) => FetchOutcome::Timeout,
    }
}

fn summarize(outcome: &FetchOutcome) -> String {
    match outcome {
        FetchOutcome::Success(body) => format!("success ({} bytes)", body.len()),
        FetchOutcome::Timeout => "timeout".to_string(),
        FetchOutcome::Status(status) => format!("http {status}"),
        FetchOutcome::Network(reason) => format!("network error: {reason}"),
        FetchOutcome::EmptyBody => "empty body".to_string(),
    }
}
