use serde::{Deserialize, Serialize};

/// Unique identifier for a submitted question.
///
/// Wrapper around a UUID v4 string. Generated by the store at enqueue time and
/// handed to both the client (to check status) and the worker (to post the answer).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TaskId(pub String);

impl TaskId {
    /// Generates a new random UUID v4-based TaskId.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

/// A single question waiting for a worker.
///
/// Tasks are never mutated once enqueued. After a worker claims one it exists
/// only in the worker's memory until the answer is posted back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub question: String,
    /// Timestamp (ms) when the task was enqueued.
    pub submitted_at: u64,
}

/// Point-in-time counters over the store, used for health and stats logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreStats {
    /// Tasks waiting in the pending queue.
    pub pending: usize,
    /// Answers published but not yet consumed by a client.
    pub unclaimed_results: usize,
    /// Age of the head of the queue, if any.
    pub oldest_pending_age_ms: Option<u64>,
}

/// Helper to get the current system time in milliseconds.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
