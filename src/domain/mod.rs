//! Domain layer for the portfolio data model.
//!
//! This module contains the record types stored in local collections and
//! published to GitHub, independent of any storage backend or HTTP client.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`entity`]: The `Entity` identity trait and id generation
//! - [`project`]: Showcased projects
//! - [`blog`]: Blog posts and editor drafts
//! - [`testimonial`]: Client testimonials and review drafts
//! - [`sync_config`]: GitHub sync settings and their form
//!
//! # Examples
//!
//! ```
//! use portfolio_sync::domain::{Entity, Testimonial, TestimonialDraft};
//!
//! let review = Testimonial::from_draft(TestimonialDraft {
//!     name: "Dawit Tesfaye".into(),
//!     text: "Professional and responsive".into(),
//!     ..Default::default()
//! });
//! assert!(!review.id().is_empty());
//! ```

pub mod blog;
pub mod entity;
pub mod error;
pub mod project;
pub mod sync_config;
pub mod testimonial;

pub use blog::{estimate_read_time, format_display_date, BlogPost, PostDraft};
pub use entity::{new_entity_id, Entity};
pub use error::{ErrorKind, PortfolioError, Result};
pub use project::Project;
pub use sync_config::{SyncConfig, SyncSettingsForm, DEFAULT_BRANCH};
pub use testimonial::{avatar_url_for, Testimonial, TestimonialDraft};
