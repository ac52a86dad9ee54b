//! Fixed storage keys and the typed collections stored under them.

use super::defaults;
use crate::domain::{BlogPost, Entity, Project, Testimonial};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Key of the projects collection.
pub const PROJECTS_KEY: &str = "projects";

/// Key of the blog posts collection.
pub const BLOG_POSTS_KEY: &str = "blogPosts";

/// Key of the testimonials collection.
pub const TESTIMONIALS_KEY: &str = "portfolio_testimonials";

/// Key of the singleton sync settings record.
pub const SYNC_CONFIG_KEY: &str = "gh_sync_config";

/// A named collection with a fixed key and built-in seed data.
pub trait Collection {
    /// Record type held by the collection.
    type Item: Entity + Clone + Serialize + DeserializeOwned;

    /// Storage key.
    const KEY: &'static str;

    /// Which collection this is, for runtime dispatch.
    const KIND: CollectionKind;

    /// Seed list written on the first read of an empty store.
    fn defaults() -> Vec<Self::Item>;
}

/// The projects collection.
#[derive(Debug, Clone, Copy)]
pub struct Projects;

/// The blog posts collection.
#[derive(Debug, Clone, Copy)]
pub struct BlogPosts;

/// The testimonials collection.
#[derive(Debug, Clone, Copy)]
pub struct Testimonials;

impl Collection for Projects {
    type Item = Project;
    const KEY: &'static str = PROJECTS_KEY;
    const KIND: CollectionKind = CollectionKind::Projects;

    fn defaults() -> Vec<Project> {
        defaults::default_projects()
    }
}

impl Collection for BlogPosts {
    type Item = BlogPost;
    const KEY: &'static str = BLOG_POSTS_KEY;
    const KIND: CollectionKind = CollectionKind::BlogPosts;

    fn defaults() -> Vec<BlogPost> {
        defaults::default_blog_posts()
    }
}

impl Collection for Testimonials {
    type Item = Testimonial;
    const KEY: &'static str = TESTIMONIALS_KEY;
    const KIND: CollectionKind = CollectionKind::Testimonials;

    fn defaults() -> Vec<Testimonial> {
        defaults::default_testimonials()
    }
}

/// Runtime name for one of the publishable collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionKind {
    Projects,
    BlogPosts,
    Testimonials,
}

impl CollectionKind {
    /// Every publishable collection.
    pub const ALL: [Self; 3] = [Self::Projects, Self::BlogPosts, Self::Testimonials];

    /// Storage key of the collection.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Projects => PROJECTS_KEY,
            Self::BlogPosts => BLOG_POSTS_KEY,
            Self::Testimonials => TESTIMONIALS_KEY,
        }
    }

    /// Repository path the collection is published to.
    #[must_use]
    pub const fn remote_path(self) -> &'static str {
        match self {
            Self::Projects => "src/data/projects.json",
            Self::BlogPosts => "src/data/blog.json",
            Self::Testimonials => "src/data/testimonials.json",
        }
    }

    /// Human-readable name used in commit messages and notices.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::BlogPosts => "blog posts",
            Self::Testimonials => "testimonials",
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn kinds_agree_with_typed_collections() {
        assert_eq!(Projects::KIND.key(), Projects::KEY);
        assert_eq!(BlogPosts::KIND.key(), BlogPosts::KEY);
        assert_eq!(Testimonials::KIND.key(), Testimonials::KEY);
    }

    #[test]
    fn remote_paths_are_distinct() {
        let paths: HashSet<&str> = CollectionKind::ALL.iter().map(|k| k.remote_path()).collect();
        assert_eq!(paths.len(), CollectionKind::ALL.len());
        assert_eq!(CollectionKind::BlogPosts.remote_path(), "src/data/blog.json");
    }
}
