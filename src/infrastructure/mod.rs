//! Infrastructure layer for filesystem and environment interactions.
//!
//! Currently this is path handling: where the store file and span export
//! live, and tilde expansion for configured directories.

pub mod paths;

pub use paths::{default_data_dir, expand_tilde, store_file, trace_file};
