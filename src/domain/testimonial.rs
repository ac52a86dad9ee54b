//! Client testimonial model and the review form draft.

use super::entity::{new_entity_id, non_blank_or, Entity};
use serde::{Deserialize, Serialize};
use url::Url;

/// Avatar service used for testimonials added through the review form.
const AVATAR_ENDPOINT: &str = "https://api.dicebear.com/9.x/initials/svg";

/// A client testimonial shown in the carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub text: String,
    pub avatar: String,
}

/// Fields collected by the "Add Review" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestimonialDraft {
    pub name: String,
    pub role: String,
    pub company: String,
    pub text: String,
}

impl Testimonial {
    /// Creates a testimonial from a form draft with a generated avatar.
    ///
    /// Blank name and role default to `Anonymous` and `Client`; a blank
    /// company is left out.
    ///
    /// # Examples
    ///
    /// ```
    /// use portfolio_sync::domain::{Testimonial, TestimonialDraft};
    ///
    /// let t = Testimonial::from_draft(TestimonialDraft {
    ///     name: "Tigist Haile".into(),
    ///     text: "Great work".into(),
    ///     ..Default::default()
    /// });
    /// assert_eq!(t.role, "Client");
    /// assert!(t.company.is_none());
    /// assert!(t.avatar.ends_with("seed=Tigist+Haile"));
    /// ```
    #[must_use]
    pub fn from_draft(draft: TestimonialDraft) -> Self {
        let name = non_blank_or(&draft.name, "Anonymous");
        let company = draft.company.trim().to_string();

        Self {
            id: new_entity_id(),
            avatar: avatar_url_for(&name),
            role: non_blank_or(&draft.role, "Client"),
            company: (!company.is_empty()).then_some(company),
            text: draft.text,
            name,
        }
    }

    /// Returns `role` and `company` joined for the byline, e.g. `CEO, Addis Tech`.
    #[must_use]
    pub fn byline(&self) -> String {
        match &self.company {
            Some(company) => format!("{}, {company}", self.role),
            None => self.role.clone(),
        }
    }
}

impl Entity for Testimonial {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Builds the initials avatar URL for a display name.
#[must_use]
pub fn avatar_url_for(name: &str) -> String {
    Url::parse_with_params(AVATAR_ENDPOINT, &[("seed", name)])
        .map_or_else(|_| AVATAR_ENDPOINT.to_string(), String::from)
}
