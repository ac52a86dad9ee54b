//! Remote sync: publishing collections to a GitHub repository.
//!
//! # Modules
//!
//! - `client`: [`RemoteSyncClient`] and the [`SyncConfigSource`] seam
//! - `types`: Contents API wire types and content encoding

pub mod client;
pub mod types;

pub use client::{RemoteSyncClient, SyncConfigSource};
pub use types::{encode_content, PublishReceipt};
