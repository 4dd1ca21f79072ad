//! Relay HTTP Protocol
//!
//! Endpoint paths and the Data Transfer Objects (DTOs) exchanged with the two
//! parties of the relay: the website (ask/status) and the worker (poll/result).
//!
//! Request fields are optional on the wire so that a missing field surfaces as a
//! validation error from the handler rather than as a deserialization failure.

use super::types::TaskId;
use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Client submits a question.
pub const ENDPOINT_ASK: &str = "/api/ask";
/// Worker claims the oldest pending task.
pub const ENDPOINT_POLL: &str = "/api/poll";
/// Worker publishes the answer for a claimed task.
pub const ENDPOINT_RESULT: &str = "/api/result";
/// Client checks (and consumes) the answer for a task.
pub const ENDPOINT_STATUS: &str = "/api/status";
/// Queue depth and submission mode.
pub const ENDPOINT_HEALTH: &str = "/api/health";

// --- Data Transfer Objects ---

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,
}

/// Response to a submission; the shape depends on the configured mode.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AskResponse {
    /// Fire-and-forget: the caller polls `/api/status` with this id.
    Queued { id: TaskId },
    /// Blocking: the worker answered within the deadline.
    Answered { answer: String },
    /// Forward: the worker's own response body, passed through untouched.
    Forwarded(serde_json::Value),
}

/// Worker poll response. `id` is `null` when the queue is empty.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PollResponse {
    pub id: Option<TaskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl PollResponse {
    pub fn empty() -> Self {
        Self {
            id: None,
            question: None,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ResultRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ResultResponse {
    pub ok: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StatusParams {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub mode: String,
    pub pending: usize,
    pub unclaimed_results: usize,
    pub oldest_pending_age_ms: Option<u64>,
}

/// Body of every error response.
///
/// `code` lets callers tell a malformed request apart from a timeout without
/// parsing the human-readable message.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
