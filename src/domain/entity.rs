//! Identity shared by every stored record.
//!
//! Collections match elements by an opaque string id. Ids for newly created
//! records come from [`new_entity_id`], which derives them from the current
//! Unix time in milliseconds.

use std::sync::atomic::{AtomicI64, Ordering};

/// A record that can live in a keyed collection.
pub trait Entity {
    /// Opaque identifier, unique within the record's collection.
    fn id(&self) -> &str;
}

/// Last id handed out by [`new_entity_id`] in this process.
static LAST_ISSUED_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Generates an id for a new record from the current timestamp.
///
/// Ids issued by one process are strictly increasing: two requests within
/// the same millisecond get consecutive values.
///
/// # Examples
///
/// ```
/// use portfolio_sync::domain::new_entity_id;
///
/// let first: i64 = new_entity_id().parse().unwrap();
/// let second: i64 = new_entity_id().parse().unwrap();
/// assert!(second > first);
/// ```
#[must_use]
pub fn new_entity_id() -> String {
    let now = chrono::Utc::now().timestamp_millis();
    let previous = LAST_ISSUED_MILLIS
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last.saturating_add(1)))
        })
        .unwrap_or(now);
    now.max(previous.saturating_add(1)).to_string()
}

/// Returns `value` trimmed, or `fallback` when nothing but whitespace is left.
pub(crate) fn non_blank_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
