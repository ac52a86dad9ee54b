//! GitHub sync settings and the form that collects them.
//!
//! [`SyncConfig`] is the singleton record the sync client reads before every
//! publish. [`SyncSettingsForm`] is the raw dialog input; it validates and
//! normalizes into a `SyncConfig`.

use super::entity::non_blank_or;
use super::error::{PortfolioError, Result};
use serde::{Deserialize, Serialize};

/// Branch used when the settings leave it blank.
pub const DEFAULT_BRANCH: &str = "main";

/// Credentials and target repository for publishing.
///
/// The token is never shown in plaintext once entered: `Debug` redacts it and
/// [`SyncConfig::masked_token`] reveals only its last four characters.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// GitHub account or organization owning the repository.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Personal access token.
    pub token: String,
    /// Target branch; blank means [`DEFAULT_BRANCH`].
    #[serde(default)]
    pub branch: String,
}

impl SyncConfig {
    /// Returns the branch to write to, falling back to `main`.
    ///
    /// # Examples
    ///
    /// ```
    /// use portfolio_sync::domain::SyncConfig;
    ///
    /// let config = SyncConfig {
    ///     owner: "octo".into(),
    ///     repo: "site".into(),
    ///     token: "ghp_secret".into(),
    ///     branch: String::new(),
    /// };
    /// assert_eq!(config.effective_branch(), "main");
    /// ```
    #[must_use]
    pub fn effective_branch(&self) -> &str {
        let branch = self.branch.trim();
        if branch.is_empty() {
            DEFAULT_BRANCH
        } else {
            branch
        }
    }

    /// Checks that owner, repository and token are non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidConfig`] naming the first blank
    /// required field.
    pub fn ensure_complete(&self) -> Result<()> {
        for (label, value) in [
            ("owner", &self.owner),
            ("repository", &self.repo),
            ("token", &self.token),
        ] {
            if value.trim().is_empty() {
                return Err(PortfolioError::InvalidConfig(format!("{label} is required")));
            }
        }
        Ok(())
    }

    /// Whether a token is present.
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// Returns the token with everything but the last four characters hidden.
    #[must_use]
    pub fn masked_token(&self) -> String {
        let chars: Vec<char> = self.token.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{visible}", "*".repeat(chars.len() - 4))
    }
}

impl std::fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncConfig")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &"[REDACTED]")
            .field("branch", &self.branch)
            .finish()
    }
}

/// Raw input from the sync settings dialog.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettingsForm {
    pub owner: String,
    pub repo: String,
    pub token: String,
    pub branch: String,
}

impl Default for SyncSettingsForm {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            token: String::new(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

impl std::fmt::Debug for SyncSettingsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncSettingsForm")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &"[REDACTED]")
            .field("branch", &self.branch)
            .finish()
    }
}

impl SyncSettingsForm {
    /// Prefills the form from a stored record, or returns a blank form.
    #[must_use]
    pub fn prefill(existing: Option<&SyncConfig>) -> Self {
        existing.map_or_else(Self::default, |config| Self {
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            token: config.token.clone(),
            branch: config.effective_branch().to_string(),
        })
    }

    /// Validates the form and converts it into a [`SyncConfig`].
    ///
    /// Owner, repository and token must be non-blank. Fields are trimmed and a
    /// blank branch becomes `main`.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidConfig`] naming the first blank
    /// required field.
    pub fn validate(&self) -> Result<SyncConfig> {
        let config = SyncConfig {
            owner: self.owner.trim().to_string(),
            repo: self.repo.trim().to_string(),
            token: self.token.trim().to_string(),
            branch: non_blank_or(&self.branch, DEFAULT_BRANCH),
        };
        config.ensure_complete()?;
        Ok(config)
    }
}
