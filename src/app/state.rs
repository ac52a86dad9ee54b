//! Panel state: loaded collections, blog view, settings dialog and in-flight
//! publishes.
//!
//! `AppState` is the single source of truth the host renders from. It is
//! mutated only by [`handle_event`](crate::app::handle_event); the helper
//! methods here are the queries and small transitions the handler composes.

use super::modes::BlogView;
use crate::domain::error::Result;
use crate::domain::{BlogPost, PostDraft, Project, SyncConfig, SyncSettingsForm, Testimonial};
use crate::storage::CollectionKind;
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::HashSet;

/// Everything the portfolio panels display.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Author stamped on newly created posts.
    pub author: String,

    pub projects: Vec<Project>,

    /// All posts, newest first.
    pub posts: Vec<BlogPost>,

    /// Posts matching `search_query`, in `posts` order.
    pub filtered_posts: Vec<BlogPost>,

    /// Current blog search text.
    pub search_query: String,

    pub testimonials: Vec<Testimonial>,

    /// Visible blog screen.
    pub blog_view: BlogView,

    /// Whether the sync settings dialog is shown.
    pub settings_open: bool,

    /// Values in the sync settings dialog.
    pub settings_form: SyncSettingsForm,

    publishing: HashSet<CollectionKind>,
    pending_publish: Option<CollectionKind>,
}

impl AppState {
    /// Creates empty state. Collections are filled by `Event::Mount`.
    #[must_use]
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            ..Self::default()
        }
    }

    /// Whether a publish of `collection` has been issued and not yet answered.
    #[must_use]
    pub fn is_publishing(&self, collection: CollectionKind) -> bool {
        self.publishing.contains(&collection)
    }

    pub(crate) fn begin_publish(&mut self, collection: CollectionKind) -> bool {
        self.publishing.insert(collection)
    }

    pub(crate) fn finish_publish(&mut self, collection: CollectionKind) {
        self.publishing.remove(&collection);
    }

    /// Collection whose publish is waiting for settings to be saved.
    #[must_use]
    pub const fn pending_publish(&self) -> Option<CollectionKind> {
        self.pending_publish
    }

    /// Opens the settings dialog prefilled from `stored`.
    ///
    /// When `retry` is set, saving the settings will publish that collection.
    pub(crate) fn open_settings(&mut self, stored: Option<&SyncConfig>, retry: Option<CollectionKind>) {
        self.settings_form = SyncSettingsForm::prefill(stored);
        self.settings_open = true;
        if retry.is_some() {
            self.pending_publish = retry;
        }
    }

    /// Closes the dialog, returning the collection to publish next, if any.
    pub(crate) fn close_settings(&mut self) -> Option<CollectionKind> {
        self.settings_open = false;
        self.pending_publish.take()
    }

    /// Finds a post by id.
    #[must_use]
    pub fn post(&self, id: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// Post shown in the detail view.
    #[must_use]
    pub fn current_post(&self) -> Option<&BlogPost> {
        match &self.blog_view {
            BlogView::Detail(id) => self.post(id),
            BlogView::List | BlogView::Compose { .. } => None,
        }
    }

    /// Initial editor contents for the current compose view.
    ///
    /// Empty for a new post, prefilled when editing.
    #[must_use]
    pub fn compose_draft(&self) -> PostDraft {
        self.blog_view
            .editing_id()
            .and_then(|id| self.post(id))
            .map(PostDraft::from_post)
            .unwrap_or_default()
    }

    /// Recomputes `filtered_posts` from `posts` and `search_query`.
    ///
    /// The query is split on whitespace; a post matches when every token
    /// fuzzy-matches its title, excerpt or category (case-insensitive).
    pub fn apply_search_filter(&mut self) {
        use fuzzy_matcher::FuzzyMatcher;

        let tokens: Vec<String> = self
            .search_query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        if tokens.is_empty() {
            self.filtered_posts.clone_from(&self.posts);
            return;
        }

        let matcher = SkimMatcherV2::default();
        self.filtered_posts = self
            .posts
            .iter()
            .filter(|post| {
                let haystack =
                    format!("{} {} {}", post.title, post.excerpt, post.category).to_lowercase();
                tokens
                    .iter()
                    .all(|token| matcher.fuzzy_match(&haystack, token).is_some())
            })
            .cloned()
            .collect();

        tracing::debug!(
            query = %self.search_query,
            matched = self.filtered_posts.len(),
            total = self.posts.len(),
            "blog search applied"
        );
    }

    /// Serializes the in-memory copy of `collection` for publishing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PortfolioError::Serialization`] if the collection
    /// cannot be converted to JSON.
    pub fn snapshot(&self, collection: CollectionKind) -> Result<serde_json::Value> {
        let value = match collection {
            CollectionKind::Projects => serde_json::to_value(&self.projects)?,
            CollectionKind::BlogPosts => serde_json::to_value(&self.posts)?,
            CollectionKind::Testimonials => serde_json::to_value(&self.testimonials)?,
        };
        Ok(value)
    }
}
