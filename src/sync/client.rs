//! GitHub contents API client for publishing collections.
//!
//! Publishing is a two-phase protocol that is deliberately not atomic:
//!
//! ```text
//! GET  /repos/{owner}/{repo}/contents/{path}?ref={branch}  → current sha (or none)
//! PUT  /repos/{owner}/{repo}/contents/{path}               → {message, content, sha?, branch}
//! ```
//!
//! If another writer changes the file between the two calls, the remote
//! rejects the hash-conditioned write with `409 Conflict`, which surfaces as
//! [`PortfolioError::ConcurrentModification`]. Nothing is retried or merged.

use super::types::{
    encode_content, ApiErrorBody, ContentsMetadata, PublishReceipt, PutContentsRequest,
    PutContentsResponse,
};
use crate::domain::error::{PortfolioError, Result};
use crate::domain::SyncConfig;
use crate::storage::{CollectionStore, KeyValueBackend};
use crate::Config;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn, Instrument};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const CLIENT_USER_AGENT: &str = concat!("portfolio-sync/", env!("CARGO_PKG_VERSION"));
const GENERIC_PUBLISH_ERROR: &str = "Failed to push to GitHub";

/// Anything that can produce the current sync settings.
///
/// The client asks for the settings on every publish, so edits made in the
/// settings dialog take effect on the next call.
pub trait SyncConfigSource {
    /// Returns the current settings, or `None` if none are stored.
    fn sync_config(&self) -> Option<SyncConfig>;
}

impl<B: KeyValueBackend> SyncConfigSource for CollectionStore<B> {
    fn sync_config(&self) -> Option<SyncConfig> {
        self.load_sync_config()
    }
}

impl SyncConfigSource for Option<SyncConfig> {
    fn sync_config(&self) -> Option<SyncConfig> {
        self.clone()
    }
}

/// Client for publishing JSON files through the GitHub contents API.
#[derive(Debug, Clone)]
pub struct RemoteSyncClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RemoteSyncClient {
    /// Creates a client against `https://api.github.com`.
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default URL is valid"),
        }
    }

    /// Builds a client from crate configuration.
    ///
    /// Applies `api_base_url` and, when set, `request_timeout_secs` to every
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Config`] if the base URL is invalid or the
    /// HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(CLIENT_USER_AGENT);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| PortfolioError::Config(format!("failed to build HTTP client: {e}")))?;

        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            PortfolioError::Config(format!("invalid API base URL '{}': {e}", config.api_base_url))
        })?;

        Ok(Self::new(http).with_base_url(base_url))
    }

    /// Points the client at another GitHub-compatible API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Returns the API root.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Publishes `content` to `path`, reading settings from `source`.
    ///
    /// # Errors
    ///
    /// See [`RemoteSyncClient::publish_with_config`].
    pub async fn publish<S, T>(
        &self,
        source: &S,
        path: &str,
        content: &T,
        message: &str,
    ) -> Result<PublishReceipt>
    where
        S: SyncConfigSource + ?Sized,
        T: Serialize + ?Sized,
    {
        let config = source.sync_config();
        self.publish_with_config(config.as_ref(), path, content, message)
            .await
    }

    /// Publishes `content` as a pretty-printed JSON file at `path`.
    ///
    /// # Errors
    ///
    /// - [`PortfolioError::ConfigMissing`] if `config` is `None` or has no
    ///   token. No request is sent.
    /// - [`PortfolioError::ConcurrentModification`] if the remote answers
    ///   `409 Conflict` because the file changed after its hash was read.
    /// - [`PortfolioError::PublishFailed`] for any other rejection, carrying
    ///   the remote message, or if a request cannot be sent.
    pub async fn publish_with_config<T: Serialize + ?Sized>(
        &self,
        config: Option<&SyncConfig>,
        path: &str,
        content: &T,
        message: &str,
    ) -> Result<PublishReceipt> {
        let config = config
            .filter(|c| c.has_token())
            .ok_or(PortfolioError::ConfigMissing)?;

        let span = tracing::debug_span!(
            "publish",
            owner = %config.owner,
            repo = %config.repo,
            path = %path
        );

        async {
            let url = self.contents_url(config, path)?;
            let branch = config.effective_branch();
            let encoded = encode_content(content)?;

            let sha = self.fetch_sha(config, &url, branch).await?;
            debug!(has_sha = sha.is_some(), "captured prior version");

            let body = PutContentsRequest {
                message,
                content: encoded,
                sha,
                branch,
            };
            let receipt = self.put_contents(config, url, path, body).await?;

            info!(created = receipt.created, commit = ?receipt.commit_sha, "published to GitHub");
            Ok(receipt)
        }
        .instrument(span)
        .await
    }

    /// Reads the current blob hash of the file at `url`.
    ///
    /// Returns `None` when the file does not exist. Any other non-success
    /// status, or a body without a usable `sha`, is also treated as "no prior
    /// version" and logged; the write is attempted anyway.
    async fn fetch_sha(&self, config: &SyncConfig, url: &Url, branch: &str) -> Result<Option<String>> {
        let mut read_url = url.clone();
        read_url.query_pairs_mut().append_pair("ref", branch);

        let response = self
            .authorized(self.http.get(read_url), config)
            .send()
            .await
            .map_err(|e| PortfolioError::publish_failed(None, format!("metadata request failed: {e}")))?;

        match response.status() {
            StatusCode::OK => match response.json::<ContentsMetadata>().await {
                Ok(metadata) => Ok(Some(metadata.sha)),
                Err(e) => {
                    warn!(error = %e, "metadata response had no usable sha, treating file as absent");
                    Ok(None)
                }
            },
            StatusCode::NOT_FOUND => {
                debug!("file does not exist yet");
                Ok(None)
            }
            status => {
                warn!(status = status.as_u16(), "metadata read failed, treating file as absent");
                Ok(None)
            }
        }
    }

    async fn put_contents(
        &self,
        config: &SyncConfig,
        url: Url,
        path: &str,
        body: PutContentsRequest<'_>,
    ) -> Result<PublishReceipt> {
        let response = self
            .authorized(self.http.put(url), config)
            .json(&body)
            .send()
            .await
            .map_err(|e| PortfolioError::publish_failed(None, format!("write request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            let parsed = response
                .json::<PutContentsResponse>()
                .await
                .unwrap_or_default();
            return Ok(PublishReceipt {
                path: path.to_string(),
                created: status == StatusCode::CREATED,
                content_sha: parsed.content.map(|c| c.sha),
                commit_sha: parsed.commit.map(|c| c.sha),
            });
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GENERIC_PUBLISH_ERROR.to_string());

        if status == StatusCode::CONFLICT {
            warn!(message = %message, "remote file changed since its hash was read");
            return Err(PortfolioError::ConcurrentModification {
                path: path.to_string(),
                message,
            });
        }

        warn!(status = status.as_u16(), message = %message, "publish rejected");
        Err(PortfolioError::publish_failed(Some(status.as_u16()), message))
    }

    fn authorized(&self, request: reqwest::RequestBuilder, config: &SyncConfig) -> reqwest::RequestBuilder {
        request
            .bearer_auth(config.token.trim())
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
    }

    /// Builds `{base}/repos/{owner}/{repo}/contents/{path}`, encoding each
    /// segment.
    fn contents_url(&self, config: &SyncConfig, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| PortfolioError::Config(format!("API base URL '{}' cannot have a path", self.base_url)))?
            .pop_if_empty()
            .extend(["repos", config.owner.as_str(), config.repo.as_str(), "contents"])
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SyncConfig {
        SyncConfig {
            owner: "Muler8905".into(),
            repo: "portfolio".into(),
            token: "ghp_test".into(),
            branch: String::new(),
        }
    }

    #[test]
    fn contents_url_joins_segments() {
        let client = RemoteSyncClient::new(reqwest::Client::new());
        let url = client.contents_url(&config(), "src/data/blog.json").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/Muler8905/portfolio/contents/src/data/blog.json"
        );
    }

    #[test]
    fn contents_url_keeps_base_path_and_encodes() {
        let base = Url::parse("https://ghe.example.com/api/v3/").unwrap();
        let client = RemoteSyncClient::new(reqwest::Client::new()).with_base_url(base);
        let url = client.contents_url(&config(), "/data/my posts.json").unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/Muler8905/portfolio/contents/data/my%20posts.json"
        );
    }

    #[test]
    fn from_config_rejects_bad_base_url() {
        let config = Config {
            api_base_url: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            RemoteSyncClient::from_config(&config),
            Err(PortfolioError::Config(_))
        ));
    }

    #[tokio::test]
    async fn missing_config_fails_before_any_request() {
        let base = Url::parse("http://127.0.0.1:9").unwrap();
        let client = RemoteSyncClient::new(reqwest::Client::new()).with_base_url(base);

        let none: Option<SyncConfig> = None;
        let err = client.publish(&none, "blog.json", &[1], "msg").await.unwrap_err();
        assert!(matches!(err, PortfolioError::ConfigMissing));

        let blank_token = SyncConfig {
            token: "  ".into(),
            ..config()
        };
        let err = client
            .publish_with_config(Some(&blank_token), "blog.json", &[1], "msg")
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::ConfigMissing));
    }
}
