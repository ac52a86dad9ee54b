//! Key-value backend abstraction.
//!
//! This module defines the [`KeyValueBackend`] trait, the raw string store the
//! collection layer sits on. It mirrors the shape of a browser's local storage:
//! string keys, string values, synchronous access, optional byte quota.
//!
//! # Design Philosophy
//!
//! Backends know nothing about JSON or collections. They store whatever string
//! they are given, which lets the collection layer detect and heal corrupt
//! values instead of the backend refusing to open.

use crate::domain::error::{PortfolioError, Result};

/// Raw synchronous string storage.
///
/// Writes must be visible to the next read on the same instance immediately.
///
/// # Implementations
///
/// - [`crate::storage::MemoryBackend`]: process-local map
/// - [`crate::storage::JsonFileBackend`]: single JSON file with atomic writes
///
/// # Examples
///
/// ```
/// use portfolio_sync::storage::{KeyValueBackend, MemoryBackend};
///
/// let mut backend = MemoryBackend::new();
/// backend.set_item("greeting", "\"hello\"".to_string())?;
/// assert_eq!(backend.get_item("greeting")?.as_deref(), Some("\"hello\""));
/// # Ok::<(), portfolio_sync::PortfolioError>(())
/// ```
pub trait KeyValueBackend: Send {
    /// Returns the raw value under `key`, or `None` if the key was never set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::QuotaExceeded`] if the write would exceed the
    /// backend's quota (the previous value is kept), or a storage error if the
    /// write fails.
    fn set_item(&mut self, key: &str, value: String) -> Result<()>;

    /// Deletes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Checks a pending write against an optional byte quota.
///
/// `current_total` is the byte size of all entries before the write and
/// `previous_len` the size of the entry being replaced (keys included).
pub(crate) fn check_quota(
    quota: Option<usize>,
    key: &str,
    value: &str,
    current_total: usize,
    previous_len: usize,
) -> Result<()> {
    let Some(limit) = quota else {
        return Ok(());
    };

    let size = current_total
        .saturating_sub(previous_len)
        .saturating_add(key.len() + value.len());

    if size > limit {
        tracing::warn!(key = %key, size, limit, "storage quota exceeded");
        return Err(PortfolioError::QuotaExceeded {
            key: key.to_string(),
            size,
            limit,
        });
    }
    Ok(())
}
