//! Task Store
//!
//! The single piece of shared mutable state in the relay: a FIFO queue of pending
//! questions and a map of published answers waiting for their client.
//!
//! ## Guarantees
//! - **FIFO**: `dequeue` serves tasks in exactly the order they were enqueued.
//! - **Single dispatch**: concurrent `dequeue` calls never hand out the same task twice.
//! - **Destructive read**: `take_result` removes the answer, so at most one caller receives it.
//! - **Disjointness**: a task id is never in the pending queue and the results map at once.
//!
//! ## Durability
//! There is none. Everything lives for as long as the hosting process does; a restart
//! drops all pending tasks and unclaimed answers. Callers are expected to re-submit.

use super::types::*;

use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Storage seam for the relay.
///
/// Every handler talks to the queue through this trait so the in-memory backend can be
/// swapped for a durable one without touching request handling. None of the operations
/// fail: "nothing there" is reported as `None`/`false`, never as an error.
pub trait TaskStore: Send + Sync {
    /// Appends a new task to the tail of the queue and returns its freshly generated id.
    fn enqueue(&self, question: String) -> TaskId;

    /// Removes and returns the oldest pending task.
    fn dequeue(&self) -> Option<Task>;

    /// Stores the answer for `id`, replacing any earlier answer for the same id.
    ///
    /// The id is not checked against known tasks.
    fn publish_result(&self, id: TaskId, answer: String);

    /// Atomically removes and returns the answer for `id`.
    fn take_result(&self, id: &TaskId) -> Option<String>;

    /// Retracts a task that is still waiting in the queue.
    ///
    /// Returns `false` when the task was already claimed or never existed.
    fn remove_pending(&self, id: &TaskId) -> bool;

    fn stats(&self) -> StoreStats;
}

/// Process-local `TaskStore`.
///
/// The queue sits behind a mutex (pop must be mutually exclusive); answers live in a
/// `DashMap` whose `remove` already gives the take-once semantics we need.
#[derive(Default)]
pub struct MemoryTaskStore {
    pending: Mutex<VecDeque<Task>>,
    results: DashMap<TaskId, String>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_pending(&self, id: &TaskId) -> bool {
        self.pending.lock().iter().any(|task| &task.id == id)
    }
}

impl TaskStore for MemoryTaskStore {
    fn enqueue(&self, question: String) -> TaskId {
        let task = Task {
            id: TaskId::new(),
            question,
            submitted_at: now_ms(),
        };
        let task_id = task.id.clone();

        let mut pending = self.pending.lock();
        pending.push_back(task);

        tracing::debug!("Enqueued task {} (queue depth {})", task_id.0, pending.len());
        task_id
    }

    fn dequeue(&self) -> Option<Task> {
        self.pending.lock().pop_front()
    }

    fn publish_result(&self, id: TaskId, answer: String) {
        // Held across the insert so no reader sees the id in both collections.
        let mut pending = self.pending.lock();
        let before = pending.len();
        pending.retain(|task| task.id != id);
        if pending.len() != before {
            tracing::warn!("Answer for {} arrived while it was still queued", id.0);
        }

        if self.results.insert(id.clone(), answer).is_some() {
            tracing::debug!("Replaced earlier answer for {}", id.0);
        }
    }

    fn take_result(&self, id: &TaskId) -> Option<String> {
        self.results.remove(id).map(|(_, answer)| answer)
    }

    fn remove_pending(&self, id: &TaskId) -> bool {
        let mut pending = self.pending.lock();
        match pending.iter().position(|task| &task.id == id) {
            Some(index) => {
                pending.remove(index);
                true
            }
            None => false,
        }
    }

    fn stats(&self) -> StoreStats {
        let pending = self.pending.lock();
        let now = now_ms();

        StoreStats {
            pending: pending.len(),
            unclaimed_results: self.results.len(),
            oldest_pending_age_ms: pending
                .front()
                .map(|task| now.saturating_sub(task.submitted_at)),
        }
    }
}
