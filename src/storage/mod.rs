//! Storage layer for locally persisted portfolio collections.
//!
//! This module provides the synchronous store the panels read on mount and
//! rewrite after every mutation. Raw string backends sit underneath a typed
//! collection store that owns JSON parsing, default seeding and id-based
//! upsert/remove.
//!
//! # Modules
//!
//! - `backend`: Key-value backend trait
//! - `memory`: In-memory backend with optional quota
//! - `json`: Single-file JSON backend with atomic writes
//! - `collection`: Typed collection store and tagged parse results
//! - `keys`: Fixed storage keys and typed collection markers
//! - `defaults`: Built-in seed data

pub mod backend;
pub mod collection;
pub mod defaults;
pub mod json;
pub mod keys;
pub mod memory;

pub use backend::KeyValueBackend;
pub use collection::{upsert_by_id, CollectionStore, Stored};
pub use defaults::DEFAULT_AUTHOR;
pub use json::JsonFileBackend;
pub use keys::{
    BlogPosts, Collection, CollectionKind, Projects, Testimonials, BLOG_POSTS_KEY, PROJECTS_KEY,
    SYNC_CONFIG_KEY, TESTIMONIALS_KEY,
};
pub use memory::MemoryBackend;
