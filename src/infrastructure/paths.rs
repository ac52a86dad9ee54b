//! Filesystem locations for the store file and span export.
//!
//! Everything the crate writes lives under one data directory, by default
//! `<platform data dir>/portfolio-sync` (for example
//! `~/.local/share/portfolio-sync` on Linux).

use std::path::{Path, PathBuf};

/// Name of the application directory inside the platform data directory.
pub const APP_DIR_NAME: &str = "portfolio-sync";

/// File holding every persisted collection and the sync settings.
pub const STORE_FILE_NAME: &str = "portfolio.json";

/// File receiving exported spans, one JSON object per line.
pub const TRACE_FILE_NAME: &str = "portfolio-sync-spans.jsonl";

/// Returns the default data directory.
///
/// Falls back to `./portfolio-sync` when the platform has no data directory
/// (for example when `HOME` is unset).
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(
        || {
            tracing::warn!("no platform data directory, using working directory");
            PathBuf::from(APP_DIR_NAME)
        },
        |dir| dir.join(APP_DIR_NAME),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde, and tilde paths when no home directory is known,
/// are returned unchanged.
///
/// ```
/// use portfolio_sync::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/var/lib/site"), std::path::PathBuf::from("/var/lib/site"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map_or_else(|| PathBuf::from(path), |h| h.join(rest)),
        None => PathBuf::from(path),
    }
}

/// Store file inside `data_dir`.
#[must_use]
pub fn store_file(data_dir: &Path) -> PathBuf {
    data_dir.join(STORE_FILE_NAME)
}

/// Span export file inside `data_dir`.
#[must_use]
pub fn trace_file(data_dir: &Path) -> PathBuf {
    data_dir.join(TRACE_FILE_NAME)
}
