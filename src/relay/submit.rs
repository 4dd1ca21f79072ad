//! Question Submission
//!
//! One entry point (`Submitter::submit`) for all the ways a question can reach a worker.
//! The mode is fixed by configuration when the relay starts:
//!
//! - **FireAndForget**: enqueue and return the task id at once. The client later asks
//!   `/api/status` for the answer.
//! - **Blocking**: enqueue, then check for the answer every `poll_interval` until it
//!   arrives or `deadline` passes. On deadline the task is retracted from the queue if
//!   no worker has claimed it yet; an already claimed task is simply abandoned and its
//!   answer will never be read.
//! - **Forward**: skip the queue and POST the question straight to a worker that is
//!   reachable over HTTP, returning its reply as-is.

use super::error::RelayError;
use super::protocol::AskResponse;
use super::store::TaskStore;
use super::types::TaskId;

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Default wait between answer checks in blocking mode.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
/// Default blocking-mode deadline.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(90);
/// Default timeout for a forwarded request.
pub const DEFAULT_FORWARD_TIMEOUT: Duration = Duration::from_secs(120);

/// Path appended to the forward base URL.
const FORWARD_PATH: &str = "/ask";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitMode {
    FireAndForget,
    Blocking {
        poll_interval: Duration,
        deadline: Duration,
    },
    Forward {
        /// Base URL of the worker, without a trailing slash.
        url: String,
        timeout: Duration,
    },
}

impl SubmitMode {
    pub fn blocking() -> Self {
        SubmitMode::Blocking {
            poll_interval: DEFAULT_POLL_INTERVAL,
            deadline: DEFAULT_DEADLINE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubmitMode::FireAndForget => "fire-and-forget",
            SubmitMode::Blocking { .. } => "blocking",
            SubmitMode::Forward { .. } => "forward",
        }
    }
}

#[derive(Serialize)]
struct ForwardRequest<'a> {
    question: &'a str,
}

/// Accepts questions on behalf of the website.
pub struct Submitter {
    store: Arc<dyn TaskStore>,
    mode: SubmitMode,
    http_client: reqwest::Client,
}

impl Submitter {
    pub fn new(store: Arc<dyn TaskStore>, mode: SubmitMode) -> Self {
        Self {
            store,
            mode,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn mode(&self) -> &SubmitMode {
        &self.mode
    }

    /// Validates `question` and hands it to a worker according to the configured mode.
    ///
    /// Validation happens before any store access, so a rejected question never
    /// reaches the queue.
    pub async fn submit(&self, question: &str) -> Result<AskResponse, RelayError> {
        // Whitespace-only counts as empty.
        if question.trim().is_empty() {
            return Err(RelayError::Validation("Question is empty".to_string()));
        }

        match &self.mode {
            SubmitMode::FireAndForget => {
                let id = self.store.enqueue(question.to_string());
                tracing::info!("Task {} queued", id.0);
                Ok(AskResponse::Queued { id })
            }
            SubmitMode::Blocking {
                poll_interval,
                deadline,
            } => {
                let id = self.store.enqueue(question.to_string());
                tracing::info!("Task {} queued, waiting up to {:?}", id.0, deadline);
                let answer = self.wait_for_answer(&id, *poll_interval, *deadline).await?;
                Ok(AskResponse::Answered { answer })
            }
            SubmitMode::Forward { url, timeout } => {
                let body = self.forward(url, question, *timeout).await?;
                Ok(AskResponse::Forwarded(body))
            }
        }
    }

    /// Sleep-based long-poll on the results map.
    async fn wait_for_answer(
        &self,
        id: &TaskId,
        poll_interval: Duration,
        deadline: Duration,
    ) -> Result<String, RelayError> {
        let expires_at = Instant::now() + deadline;

        loop {
            if let Some(answer) = self.store.take_result(id) {
                tracing::info!("Task {} answered", id.0);
                return Ok(answer);
            }

            let now = Instant::now();
            if now >= expires_at {
                break;
            }
            tokio::time::sleep(poll_interval.min(expires_at - now)).await;
        }

        if self.store.remove_pending(id) {
            tracing::warn!("Task {} timed out unclaimed, retracted from queue", id.0);
        } else {
            tracing::warn!("Task {} timed out after being claimed, abandoning", id.0);
        }

        Err(RelayError::Timeout(deadline))
    }

    async fn forward(
        &self,
        url: &str,
        question: &str,
        timeout: Duration,
    ) -> Result<serde_json::Value, RelayError> {
        let target = format!("{}{}", url, FORWARD_PATH);
        tracing::debug!("Forwarding question to {}", target);

        let response = self
            .http_client
            .post(target)
            .json(&ForwardRequest { question })
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Connection to worker failed: {}", e);
                RelayError::WorkerUnreachable(e.to_string())
            })?;

        if !response.status().is_success() {
            tracing::warn!("Worker replied with status {}", response.status());
        }

        response.json::<serde_json::Value>().await.map_err(|e| {
            tracing::error!("Worker sent an unreadable reply: {}", e);
            RelayError::WorkerUnreachable(e.to_string())
        })
    }
}
