//! Portfolio project model.
//!
//! A project is a showcase entry rendered on the projects panel and its detail
//! page. Records serialize with camelCase field names, the format the site
//! persists and publishes.

use super::entity::Entity;
use serde::{Deserialize, Serialize};

/// A showcased software project.
///
/// # Fields
///
/// - `id`: Opaque identifier, unique within the `projects` collection
/// - `title`, `description`: Card heading and summary
/// - `long_description`: Detail page body
/// - `tags`: Technology labels in display order
/// - `image_url`, `repo_url`, `demo_url`: Links shown on the card
/// - `features`: Bullet list in display order
/// - `challenges`: Optional write-up, omitted from JSON when absent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub tags: Vec<String>,
    pub image_url: String,
    pub repo_url: String,
    pub demo_url: String,
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<String>,
}

impl Project {
    /// Creates a project with a fresh id and empty optional content.
    ///
    /// # Examples
    ///
    /// ```
    /// use portfolio_sync::domain::Project;
    ///
    /// let project = Project::new("Fitness Hub AI", "Workout plan generator");
    /// assert_eq!(project.title, "Fitness Hub AI");
    /// assert!(project.tags.is_empty());
    /// assert!(project.challenges.is_none());
    /// ```
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: super::entity::new_entity_id(),
            title: title.into(),
            description: description.into(),
            long_description: String::new(),
            tags: Vec::new(),
            image_url: String::new(),
            repo_url: String::new(),
            demo_url: String::new(),
            features: Vec::new(),
            challenges: None,
        }
    }

    /// Returns true if any tag equals `tag`, ignoring ASCII case.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

impl Entity for Project {
    fn id(&self) -> &str {
        &self.id
    }
}
