//! View mode of the blog panel.
//!
//! ```text
//! List ──OpenPost──▶ Detail(id)
//!  │ ▲                  │
//!  │ └──BackToList──────┘
//!  └──ComposePost / EditPost──▶ Compose { editing }
//! ```
//!
//! Saving a draft or deleting the post being viewed returns to `List`.

/// Which blog screen is visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BlogView {
    /// Card grid of (filtered) posts.
    #[default]
    List,

    /// Full view of one post.
    Detail(String),

    /// Editor form.
    Compose {
        /// Id of the post being edited, `None` for a new post.
        editing: Option<String>,
    },
}

impl BlogView {
    /// Id of the post being edited, if the editor is open on an existing post.
    #[must_use]
    pub fn editing_id(&self) -> Option<&str> {
        match self {
            Self::Compose { editing } => editing.as_deref(),
            Self::List | Self::Detail(_) => None,
        }
    }

    /// Whether this view shows or edits the post `id`.
    #[must_use]
    pub fn refers_to(&self, id: &str) -> bool {
        match self {
            Self::Detail(shown) => shown == id,
            Self::Compose { editing } => editing.as_deref() == Some(id),
            Self::List => false,
        }
    }
}
