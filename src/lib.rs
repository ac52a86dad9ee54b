//! portfolio-sync: local collection store and GitHub content sync for a
//! personal portfolio site.
//!
//! The crate keeps three editable collections (projects, blog posts and
//! testimonials) in a local key-value store, and publishes any of them as a
//! JSON file to a GitHub repository through the contents API.
//!
//! - Collections are seeded with built-in defaults on first read; afterwards
//!   the stored value, even an empty list, is authoritative
//! - Every mutation rewrites the whole collection
//! - Publishing reads the file's current hash, then writes with it; a
//!   concurrent remote change surfaces as a distinct error
//! - Sync settings are re-read from the store on every publish

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Panel Layer (app/)                                 │  ← Event handling
//! │  - Blog view modes and search                       │
//! │  - Publish in-flight tracking                       │
//! │  - Settings dialog state                            │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Storage Layer │   │ Worker Layer  │   │ Sync Layer    │
//! │ (storage/)    │   │ (worker/)     │   │ (sync/)       │
//! │ - Backends    │   │ - Publish jobs│   │ - Contents API│
//! │ - Seeding     │   │ - Trace links │   │ - Base64 JSON │
//! │ - Upsert      │   │               │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directory paths (infrastructure/)           │
//! │  - Error types (domain/error)                       │
//! │  - Project, BlogPost, Testimonial, SyncConfig       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - JSON-lines span file with rotation               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Panel state machine with event/action model
//! - [`domain`]: Entities, sync settings and errors
//! - [`infrastructure`]: Data directory paths
//! - [`storage`]: Key-value backends and the typed collection store
//! - [`sync`]: GitHub contents API client
//! - [`worker`]: Background publish worker
//! - [`observability`]: Tracing subscriber and span export
//!
//! # Configuration
//!
//! [`Config`] can be built in code, from a string map, or from a TOML file:
//!
//! ```toml
//! data_dir = "~/.local/share/portfolio-sync"
//! api_base_url = "https://api.github.com"
//! request_timeout_secs = 30
//! storage_quota_bytes = 5242880
//! author = "Muluken Ugamo"
//! trace_level = "portfolio_sync=debug"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use portfolio_sync::app::{handle_event, Action, Event};
//! use portfolio_sync::storage::CollectionKind;
//! use portfolio_sync::worker::SyncWorker;
//! use portfolio_sync::{initialize, Config};
//!
//! # async fn run() -> portfolio_sync::Result<()> {
//! let config = Config::default();
//! let (mut state, mut store) = initialize(&config)?;
//! let worker = SyncWorker::from_config(&config)?;
//! let (replies, mut responses) = tokio::sync::mpsc::unbounded_channel();
//!
//! for action in handle_event(&mut state, &mut store, &Event::Publish(CollectionKind::BlogPosts))? {
//!     if let Action::Publish(message) = action {
//!         worker.spawn(message, replies.clone());
//!     }
//! }
//!
//! if let Some(response) = responses.recv().await {
//!     handle_event(&mut state, &mut store, &Event::WorkerResponse(response))?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod sync;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{PortfolioError, Result};
pub use storage::{CollectionStore, JsonFileBackend};
pub use sync::RemoteSyncClient;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Default storage quota, matching a browser origin's local storage (5 MiB).
pub const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Crate configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory for the store file and span export.
    ///
    /// Default: `<platform data dir>/portfolio-sync`.
    pub data_dir: PathBuf,

    /// Root of the GitHub-compatible REST API. Default: `https://api.github.com`
    pub api_base_url: String,

    /// Per-request timeout for publishing. Default: none
    pub request_timeout_secs: Option<u64>,

    /// Maximum total size of stored values. `None` disables the limit.
    /// Default: 5 MiB
    pub storage_quota_bytes: Option<usize>,

    /// Author stamped on new blog posts.
    pub author: String,

    /// Tracing filter directive (`trace`, `debug`, `info`, `warn`, `error`,
    /// or any `EnvFilter` syntax). Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: infrastructure::default_data_dir(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: None,
            storage_quota_bytes: Some(DEFAULT_STORAGE_QUOTA_BYTES),
            author: storage::DEFAULT_AUTHOR.to_string(),
            trace_level: None,
        }
    }
}

/// On-disk shape of the TOML configuration; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<String>,
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    storage_quota_bytes: Option<usize>,
    author: Option<String>,
    trace_level: Option<String>,
}

impl Config {
    /// Parses configuration from a string map, such as host-provided
    /// settings.
    ///
    /// # Parsing Rules
    ///
    /// - `data_dir`: `~` expands to the home directory
    /// - `request_timeout_secs`: integer seconds; `0` or unparseable means no
    ///   timeout
    /// - `storage_quota_bytes`: integer bytes; `0` disables the quota,
    ///   unparseable falls back to 5 MiB
    /// - blank values are treated as missing
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use portfolio_sync::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("request_timeout_secs".to_string(), "15".to_string());
    /// map.insert("storage_quota_bytes".to_string(), "0".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.request_timeout_secs, Some(15));
    /// assert_eq!(config.storage_quota_bytes, None);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            map.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let request_timeout_secs = get("request_timeout_secs").and_then(|s| {
            s.parse::<u64>()
                .map_err(|e| tracing::warn!(value = %s, error = %e, "ignoring invalid request timeout"))
                .ok()
        });

        let storage_quota_bytes = get("storage_quota_bytes").map(|s| {
            s.parse::<usize>().unwrap_or_else(|e| {
                tracing::warn!(value = %s, error = %e, "invalid storage quota, using default");
                DEFAULT_STORAGE_QUOTA_BYTES
            })
        });

        Self::default().merge(ConfigFile {
            data_dir: get("data_dir"),
            api_base_url: get("api_base_url"),
            request_timeout_secs,
            storage_quota_bytes,
            author: get("author"),
            trace_level: get("trace_level"),
        })
    }

    /// Loads configuration from a TOML file. Missing keys keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Config`] if the file cannot be read, is not
    /// valid TOML, or contains unknown keys.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PortfolioError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let file: ConfigFile = toml::from_str(&text).map_err(|e| {
            PortfolioError::Config(format!("invalid config {}: {e}", path.display()))
        })?;
        Ok(Self::default().merge(file))
    }

    fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(dir) = file.data_dir {
            self.data_dir = infrastructure::expand_tilde(&dir);
        }
        if let Some(url) = file.api_base_url {
            self.api_base_url = url;
        }
        self.request_timeout_secs = file.request_timeout_secs.filter(|secs| *secs > 0);
        if let Some(quota) = file.storage_quota_bytes {
            self.storage_quota_bytes = (quota > 0).then_some(quota);
        }
        if let Some(author) = file.author {
            self.author = author;
        }
        self.trace_level = file.trace_level.or(self.trace_level);
        self
    }
}

/// Opens the store in `config.data_dir` and loads every collection.
///
/// Does not install tracing; call [`observability::init_tracing`] first if
/// spans should be exported.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the store file
/// exists but is not a valid store.
pub fn initialize(config: &Config) -> Result<(AppState, CollectionStore<JsonFileBackend>)> {
    let _span = tracing::debug_span!("initialize", data_dir = %config.data_dir.display()).entered();

    let mut backend = JsonFileBackend::open(infrastructure::store_file(&config.data_dir))?;
    if let Some(quota) = config.storage_quota_bytes {
        backend = backend.with_quota(quota);
    }

    let mut store = CollectionStore::new(backend);
    let mut state = AppState::new(config.author.clone());
    handle_event(&mut state, &mut store, &Event::Mount)?;

    tracing::debug!("portfolio panels initialized");
    Ok((state, store))
}
