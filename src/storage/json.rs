//! JSON file-based key-value backend.
//!
//! This module provides a durable, human-readable backend that keeps every key
//! in one JSON file. It uses atomic file writes (write-to-temp + rename) so the
//! file is never left half-written.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - the whole file is loaded into memory once
//! - **Write**: O(n) - every write re-serializes and rewrites the file
//! - **Best for**: a handful of collections with infrequent writes

use super::backend::{check_quota, KeyValueBackend};
use crate::domain::error::{PortfolioError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current version of the on-disk container format.
const FORMAT_VERSION: u32 = 1;

/// On-disk container.
///
/// Values are the raw strings handed to [`KeyValueBackend::set_item`], so a
/// corrupt collection value never prevents the file from loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FileData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Raw values by key.
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for FileData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// Single-file JSON backend.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It is meant to be owned by the UI
/// thread, which runs every store operation to completion.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "blogPosts": "[{\"id\":\"1\",\"title\":\"...\"}]",
///     "gh_sync_config": "{\"owner\":\"octo\",...}"
///   }
/// }
/// ```
#[derive(Debug)]
pub struct JsonFileBackend {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory copy of the file, loaded on creation.
    data: FileData,

    /// Optional limit on total key plus value bytes.
    quota: Option<usize>,
}

impl JsonFileBackend {
    /// Opens the backend at `file_path`, creating parent directories.
    ///
    /// A missing file starts empty; nothing is written until the first
    /// `set_item`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but is not a valid container
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use portfolio_sync::storage::JsonFileBackend;
    /// use std::path::PathBuf;
    ///
    /// let backend = JsonFileBackend::open(PathBuf::from("/tmp/portfolio/store.json"))?;
    /// # Ok::<(), portfolio_sync::PortfolioError>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON file backend");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no store file yet, starting empty");
            FileData::default()
        };

        tracing::debug!(entry_count = data.entries.len(), "JSON file backend ready");

        Ok(Self {
            file_path,
            data,
            quota: None,
        })
    }

    /// Limits the total size of keys plus values to `limit` bytes.
    #[must_use]
    pub fn with_quota(mut self, limit: usize) -> Self {
        self.quota = Some(limit);
        self
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<FileData> {
        let contents = std::fs::read_to_string(path)?;
        let data: FileData = serde_json::from_str(&contents).map_err(|e| {
            PortfolioError::Storage(format!("failed to parse store file {}: {e}", path.display()))
        })?;

        if data.version != FORMAT_VERSION {
            return Err(PortfolioError::Storage(format!(
                "unsupported store format version {}",
                data.version
            )));
        }

        tracing::debug!(entries = data.entries.len(), "loaded store file");
        Ok(data)
    }

    /// Writes `data` to disk atomically.
    ///
    /// Writes to a temporary sibling file, then renames it over the target.
    fn persist(&self, data: &FileData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "store file saved");
        Ok(())
    }

    fn used_bytes(&self) -> usize {
        self.data.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueBackend for JsonFileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<()> {
        let _span = tracing::debug_span!("json_set_item", key = %key, bytes = value.len()).entered();

        let previous_len = self.data.entries.get(key).map_or(0, |v| key.len() + v.len());
        check_quota(self.quota, key, &value, self.used_bytes(), previous_len)?;

        // Only adopt the new entry once it is on disk.
        let mut next = self.data.clone();
        next.entries.insert(key.to_string(), value);
        self.persist(&next)?;
        self.data = next;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_remove_item", key = %key).entered();

        if !self.data.entries.contains_key(key) {
            return Ok(());
        }

        let mut next = self.data.clone();
        next.entries.remove(key);
        self.persist(&next)?;
        self.data = next;
        Ok(())
    }
}
