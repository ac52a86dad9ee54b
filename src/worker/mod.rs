//! Background worker for publish jobs.
//!
//! This module keeps network I/O off the UI thread. Store operations stay
//! synchronous on the caller's thread; only publishing is handed to the
//! worker.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::SyncWorker;
pub use messages::{PublishJob, TraceContext, WorkerMessage, WorkerResponse};
