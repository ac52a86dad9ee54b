//! In-memory key-value backend.
//!
//! Holds entries in a `HashMap` for the life of the process. Used for tests and
//! for hosts that persist elsewhere.

use super::backend::{check_quota, KeyValueBackend};
use crate::domain::error::Result;
use std::collections::HashMap;

/// Process-local string storage with an optional byte quota.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryBackend {
    /// Creates an empty backend with no quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the total size of keys plus values to `limit` bytes.
    #[must_use]
    pub fn with_quota(mut self, limit: usize) -> Self {
        self.quota = Some(limit);
        self
    }

    /// Total bytes held across keys and values.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<()> {
        let previous_len = self.entries.get(key).map_or(0, |v| key.len() + v.len());
        check_quota(self.quota, key, &value, self.used_bytes(), previous_len)?;

        tracing::trace!(key = %key, bytes = value.len(), "memory backend write");
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
