//! Question Relay Module
//!
//! Mediates between a public website and a question-answering worker running on a
//! private machine. The two never talk to each other directly: both sides only make
//! short HTTP requests to the relay, which keeps the work in an in-memory queue.
//!
//! ## Flow
//! 1. **Ask**: the website submits a question. It is enqueued and the id returned, or
//!    (blocking mode) the request is held open until the answer shows up.
//! 2. **Poll**: the worker claims the oldest pending task. The task leaves the store;
//!    from here on only the worker knows about it.
//! 3. **Result**: the worker posts the answer under the task id.
//! 4. **Status**: the website collects the answer. Reading it deletes it.
//!
//! Delivery is at-most-once. A task claimed by a worker that then crashes is lost,
//! and the client eventually sees "not ready" forever or a timeout.
//!
//! ## Submodules
//! - **`store`**: The `TaskStore` trait and its in-memory implementation.
//! - **`submit`**: Submission modes (fire-and-forget, blocking, forward).
//! - **`handlers`**: Axum handlers for the endpoints.
//! - **`router`**: Route table and CORS.
//! - **`protocol`**: Endpoint paths and request/response DTOs.
//! - **`error`**: `RelayError` and its JSON rendering.

pub mod types;
pub mod protocol;
pub mod error;
pub mod store;
pub mod submit;
pub mod handlers;
pub mod router;
