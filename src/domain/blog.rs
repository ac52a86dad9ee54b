//! Blog post model and the draft produced by the post editor.

use super::entity::{new_entity_id, non_blank_or, Entity};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cover image used when a draft leaves the image URL blank.
pub const DEFAULT_POST_IMAGE: &str =
    "https://images.unsplash.com/photo-1517694712202-14dd9538aa97?q=80&w=800&auto=format&fit=crop";

/// Category used when a draft leaves the category blank.
pub const DEFAULT_POST_CATEGORY: &str = "General";

/// Reading speed used for read-time estimates.
const WORDS_PER_MINUTE: usize = 200;

/// Separator between paragraphs in post content.
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// A published blog post.
///
/// `date` and `read_time` are display strings (`"Oct 12, 2024"`,
/// `"5 min read"`) and are never parsed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub date: String,
    pub category: String,
    pub image_url: String,
    pub read_time: String,
}

/// Editable fields collected by the post editor.
///
/// Blank fields are filled with defaults when a post is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub image_url: String,
}

impl PostDraft {
    /// Prefills a draft from an existing post for editing.
    #[must_use]
    pub fn from_post(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            category: post.category.clone(),
            image_url: post.image_url.clone(),
        }
    }
}

impl BlogPost {
    /// Creates a post from a draft, dated `date` and attributed to `author`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use portfolio_sync::domain::{BlogPost, PostDraft};
    ///
    /// let draft = PostDraft { content: "Hello world".into(), ..Default::default() };
    /// let date = NaiveDate::from_ymd_opt(2024, 10, 12).unwrap();
    /// let post = BlogPost::from_draft(draft, "Muluken Ugamo", date);
    ///
    /// assert_eq!(post.title, "Untitled");
    /// assert_eq!(post.category, "General");
    /// assert_eq!(post.date, "Oct 12, 2024");
    /// assert_eq!(post.read_time, "1 min read");
    /// ```
    #[must_use]
    pub fn from_draft(draft: PostDraft, author: &str, date: NaiveDate) -> Self {
        let mut post = Self {
            id: new_entity_id(),
            title: String::new(),
            excerpt: String::new(),
            content: String::new(),
            author: author.to_string(),
            date: format_display_date(date),
            category: String::new(),
            image_url: String::new(),
            read_time: String::new(),
        };
        post.apply_draft(draft);
        post
    }

    /// Creates a post dated today in the local timezone.
    #[must_use]
    pub fn create(draft: PostDraft, author: &str) -> Self {
        Self::from_draft(draft, author, chrono::Local::now().date_naive())
    }

    /// Replaces the editable fields with the draft's and recomputes read time.
    ///
    /// Id, author and date are kept.
    pub fn apply_draft(&mut self, draft: PostDraft) {
        self.title = non_blank_or(&draft.title, "Untitled");
        self.excerpt = draft.excerpt;
        self.category = non_blank_or(&draft.category, DEFAULT_POST_CATEGORY);
        self.image_url = non_blank_or(&draft.image_url, DEFAULT_POST_IMAGE);
        self.read_time = estimate_read_time(&draft.content);
        self.content = draft.content;
    }

    /// Splits the content into paragraphs on blank lines.
    ///
    /// Empty paragraphs (from runs of blank lines) are skipped.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content
            .split(PARAGRAPH_SEPARATOR)
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

impl Entity for BlogPost {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Formats a date the way post cards show it, e.g. `Oct 12, 2024`.
#[must_use]
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Estimates reading time at 200 words per minute, never less than a minute.
///
/// # Examples
///
/// ```
/// use portfolio_sync::domain::estimate_read_time;
///
/// assert_eq!(estimate_read_time(""), "1 min read");
/// assert_eq!(estimate_read_time(&"word ".repeat(401)), "3 min read");
/// ```
#[must_use]
pub fn estimate_read_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}
