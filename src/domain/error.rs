//! Error types for portfolio storage and sync operations.
//!
//! This module defines the centralized error type [`PortfolioError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! Errors fall into three families that callers treat differently:
//!
//! - **Store errors** (`StorageCorrupt`, `QuotaExceeded`, `Storage`, `Io`,
//!   `Serialization`): corrupt reads are healed locally by substituting
//!   defaults, write failures are shown to the user.
//! - **Configuration errors** (`ConfigMissing`, `InvalidConfig`): the caller
//!   must prompt for sync settings instead of retrying.
//! - **Publish errors** (`PublishFailed`, `ConcurrentModification`): shown to
//!   the user verbatim; the user re-invokes the publish manually.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for portfolio store and sync operations.
///
/// # Examples
///
/// ```
/// use portfolio_sync::PortfolioError;
///
/// let err = PortfolioError::publish_failed(Some(401), "Bad credentials");
/// assert_eq!(err.to_string(), "Publish failed (HTTP 401): Bad credentials");
/// ```
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// A stored value is not valid JSON or does not have the expected shape.
    #[error("Stored value for '{key}' is corrupt: {reason}")]
    StorageCorrupt {
        /// Storage key holding the corrupt value.
        key: String,
        /// Parser message describing the problem.
        reason: String,
    },

    /// Writing a value would exceed the backend's storage quota.
    ///
    /// The previous value under `key` is left untouched.
    #[error("Storage quota exceeded writing '{key}': {size} bytes over a {limit} byte limit")]
    QuotaExceeded {
        /// Storage key being written.
        key: String,
        /// Total bytes the store would hold after the write.
        size: usize,
        /// Configured quota in bytes.
        limit: usize,
    },

    /// Storage backend operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be converted to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A publish was attempted without a stored sync configuration or token.
    #[error("GitHub configuration missing")]
    ConfigMissing,

    /// Sync settings failed validation.
    #[error("Invalid sync settings: {0}")]
    InvalidConfig(String),

    /// The remote rejected the write, or the request could not be sent.
    ///
    /// `status` is `None` when no HTTP response was received.
    #[error("Publish failed{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    PublishFailed {
        /// HTTP status of the rejecting response, if any.
        status: Option<u16>,
        /// Remote-reported message, or a generic description.
        message: String,
    },

    /// The remote file changed between the metadata read and the write.
    #[error("Remote file '{path}' was modified concurrently: {message}")]
    ConcurrentModification {
        /// Repository path of the file.
        path: String,
        /// Remote-reported message.
        message: String,
    },

    /// Crate configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The publish worker could not run a job.
    #[error("Worker error: {0}")]
    Worker(String),
}

impl PortfolioError {
    /// Creates a publish failure from an optional status and message.
    pub fn publish_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::PublishFailed {
            status,
            message: message.into(),
        }
    }

    /// Creates a corrupt-storage error for `key`.
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StorageCorrupt {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Returns the serializable classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::StorageCorrupt { .. } => ErrorKind::StorageCorrupt,
            Self::QuotaExceeded { .. } | Self::Storage(_) | Self::Io(_) | Self::Serialization(_) => {
                ErrorKind::Storage
            }
            Self::ConfigMissing => ErrorKind::ConfigMissing,
            Self::InvalidConfig(_) | Self::Config(_) => ErrorKind::InvalidConfig,
            Self::PublishFailed { .. } | Self::Worker(_) => ErrorKind::PublishFailed,
            Self::ConcurrentModification { .. } => ErrorKind::ConcurrentModification,
        }
    }

    /// Whether the caller should open the sync settings dialog in response.
    #[must_use]
    pub const fn needs_configuration(&self) -> bool {
        matches!(self, Self::ConfigMissing | Self::InvalidConfig(_))
    }
}

/// Coarse error classification that can cross the worker channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    StorageCorrupt,
    Storage,
    ConfigMissing,
    InvalidConfig,
    PublishFailed,
    ConcurrentModification,
}

/// A specialized `Result` type for portfolio operations.
pub type Result<T> = std::result::Result<T, PortfolioError>;
