//! Voxel Gates Question Relay
//!
//! The website of the Voxel Gates game lets players ask questions that are answered by a
//! process running on a developer's own machine. That machine cannot accept inbound
//! connections, so this crate sits in between: the website drops questions into a queue,
//! the worker polls the queue, and answers travel back the same way.
//!
//! ## Modules
//! - **`relay`**: The task store, submission modes and HTTP endpoints.
//! - **`config`**: Command-line/environment configuration for the binary.
//!
//! ## Constraints
//! All state is held in process memory. A restart or a cold start on a new instance loses
//! every pending question and every answer nobody has collected yet.

pub mod config;
pub mod relay;
