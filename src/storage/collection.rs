//! Collection store: typed JSON collections over a key-value backend.
//!
//! [`CollectionStore`] is the only place stored JSON is parsed. Every read goes
//! through [`CollectionStore::read`], which returns a tagged [`Stored`] result
//! so corrupt values are recognized at the boundary instead of leaking into
//! callers as half-parsed data.
//!
//! # Seeding
//!
//! A collection is seeded with its defaults the first time it is read while
//! its key is absent. Once a value exists, including an empty list, it is
//! authoritative and defaults are never written again. A corrupt value is
//! answered with the defaults but left in place.
//!
//! # Examples
//!
//! ```
//! use portfolio_sync::domain::{BlogPost, PostDraft};
//! use portfolio_sync::storage::{BlogPosts, CollectionStore, MemoryBackend};
//!
//! let mut store = CollectionStore::new(MemoryBackend::new());
//! let seeded = store.load_collection::<BlogPosts>();
//! assert_eq!(seeded.len(), 1);
//!
//! let post = BlogPost::create(PostDraft::default(), "Author");
//! let posts = store.upsert_into::<BlogPosts>(post.clone())?;
//! assert_eq!(posts[0], post);
//! # Ok::<(), portfolio_sync::PortfolioError>(())
//! ```

use super::backend::KeyValueBackend;
use super::keys::{Collection, SYNC_CONFIG_KEY};
use crate::domain::error::{PortfolioError, Result};
use crate::domain::{Entity, SyncConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Tagged result of reading and parsing one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stored<T> {
    /// The key has never been written.
    Absent,
    /// The value parsed into the expected shape.
    Valid(T),
    /// The value exists but is not valid JSON of the expected shape.
    Corrupt {
        /// Parser message.
        reason: String,
    },
}

/// Replaces the first element sharing `item`'s id and drops later duplicates
/// of that id, or prepends `item` if none matches.
///
/// Returns the new list and whether an existing element was replaced. This is
/// the in-memory half of [`CollectionStore::upsert`].
pub fn upsert_by_id<T: Entity>(items: Vec<T>, item: T) -> (Vec<T>, bool) {
    let target_id = item.id().to_string();
    let mut updated = Vec::with_capacity(items.len() + 1);
    let mut pending = Some(item);

    for existing in items {
        if existing.id() == target_id {
            // First match takes the new item, later ones are dropped.
            updated.extend(pending.take());
            continue;
        }
        updated.push(existing);
    }

    let replaced = pending.is_none();
    if let Some(new) = pending {
        updated.insert(0, new);
    }
    (updated, replaced)
}

/// JSON collections stored over a [`KeyValueBackend`].
///
/// All operations are synchronous and complete before returning; a write is
/// visible to the next read immediately.
#[derive(Debug)]
pub struct CollectionStore<B> {
    backend: B,
}

impl<B: KeyValueBackend> CollectionStore<B> {
    /// Wraps a backend.
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the underlying backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads `key` and parses it as `T`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself cannot be read. Parse
    /// failures are reported as [`Stored::Corrupt`].
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Stored<T>> {
        let Some(raw) = self.backend.get_item(key)? else {
            return Ok(Stored::Absent);
        };

        Ok(match serde_json::from_str::<T>(&raw) {
            Ok(value) => Stored::Valid(value),
            Err(e) => Stored::Corrupt {
                reason: e.to_string(),
            },
        })
    }

    /// Loads `key`, seeding it with `default` if it was never written.
    ///
    /// - Absent: `default` is persisted and returned.
    /// - Corrupt or unreadable: `default` is returned and the stored value is
    ///   left untouched.
    /// - Valid: the stored value is returned, even if it is an empty list.
    ///
    /// This never fails; problems are logged.
    pub fn load<T>(&mut self, key: &str, default: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        let _span = tracing::debug_span!("store_load", key = %key).entered();

        match self.read::<T>(key) {
            Ok(Stored::Valid(value)) => value,
            Ok(Stored::Absent) => {
                tracing::debug!("key absent, seeding defaults");
                if let Err(e) = self.save(key, &default) {
                    tracing::warn!(error = %e, "failed to persist seeded defaults");
                }
                default
            }
            Ok(Stored::Corrupt { reason }) => {
                let err = PortfolioError::corrupt(key, reason);
                tracing::warn!(error = %err, "using defaults in place of corrupt value");
                default
            }
            Err(e) => {
                tracing::warn!(error = %e, "backend read failed, using defaults");
                default
            }
        }
    }

    /// Serializes `value` to JSON and writes it under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails, the write exceeds the backend
    /// quota, or the backend cannot be written.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        tracing::debug!(key = %key, bytes = json.len(), "saving value");
        self.backend.set_item(key, json)
    }

    /// Inserts or replaces `item` in the collection under `key`.
    ///
    /// The first element with the same id is replaced in place and any later
    /// duplicates of that id are dropped; if none matches, `item` is
    /// prepended. The whole collection is then rewritten and returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the rewritten collection cannot be saved.
    pub fn upsert<T>(&mut self, key: &str, default: Vec<T>, item: T) -> Result<Vec<T>>
    where
        T: Entity + Serialize + DeserializeOwned,
    {
        let _span = tracing::debug_span!("store_upsert", key = %key, id = %item.id()).entered();

        let current = self.load(key, default);
        let (updated, replaced) = upsert_by_id(current, item);

        tracing::debug!(replaced, count = updated.len(), "upserted item");
        self.save(key, &updated)?;
        Ok(updated)
    }

    /// Removes every element with id `id` from the collection under `key`.
    ///
    /// The collection is rewritten whether or not anything matched, so
    /// calling this twice yields the same result as calling it once.
    ///
    /// # Errors
    ///
    /// Returns an error if the rewritten collection cannot be saved.
    pub fn remove<T>(&mut self, key: &str, default: Vec<T>, id: &str) -> Result<Vec<T>>
    where
        T: Entity + Serialize + DeserializeOwned,
    {
        let _span = tracing::debug_span!("store_remove", key = %key, id = %id).entered();

        let mut items = self.load(key, default);
        let before = items.len();
        items.retain(|item| item.id() != id);

        tracing::debug!(removed = before - items.len(), "removed item");
        self.save(key, &items)?;
        Ok(items)
    }

    /// Loads a typed collection, seeding its defaults on first read.
    pub fn load_collection<C: Collection>(&mut self) -> Vec<C::Item> {
        self.load(C::KEY, C::defaults())
    }

    /// Rewrites a typed collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be saved.
    pub fn save_collection<C: Collection>(&mut self, items: &[C::Item]) -> Result<()> {
        self.save(C::KEY, items)
    }

    /// Upserts into a typed collection. See [`CollectionStore::upsert`].
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be saved.
    pub fn upsert_into<C: Collection>(&mut self, item: C::Item) -> Result<Vec<C::Item>> {
        self.upsert(C::KEY, C::defaults(), item)
    }

    /// Removes from a typed collection. See [`CollectionStore::remove`].
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be saved.
    pub fn remove_from<C: Collection>(&mut self, id: &str) -> Result<Vec<C::Item>> {
        self.remove(C::KEY, C::defaults(), id)
    }

    /// Returns the stored sync settings, or `None` if absent or corrupt.
    #[must_use]
    pub fn load_sync_config(&self) -> Option<SyncConfig> {
        match self.read::<SyncConfig>(SYNC_CONFIG_KEY) {
            Ok(Stored::Valid(config)) => Some(config),
            Ok(Stored::Absent) => None,
            Ok(Stored::Corrupt { reason }) => {
                tracing::warn!(reason = %reason, "ignoring corrupt sync config");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read sync config");
                None
            }
        }
    }

    /// Persists sync settings, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidConfig`] if owner, repository or token
    /// is blank, or a storage error if the record cannot be written.
    pub fn save_sync_config(&mut self, config: &SyncConfig) -> Result<()> {
        config.ensure_complete()?;

        tracing::debug!(owner = %config.owner, repo = %config.repo, "saving sync config");
        self.save(SYNC_CONFIG_KEY, config)
    }

    /// Deletes the stored sync settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn clear_sync_config(&mut self) -> Result<()> {
        self.backend.remove_item(SYNC_CONFIG_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Project, SyncSettingsForm, Testimonial, TestimonialDraft};
    use crate::storage::keys::{Projects, Testimonials, PROJECTS_KEY};
    use crate::storage::MemoryBackend;

    fn store() -> CollectionStore<MemoryBackend> {
        CollectionStore::new(MemoryBackend::new())
    }

    fn review(name: &str) -> Testimonial {
        Testimonial::from_draft(TestimonialDraft {
            name: name.to_string(),
            text: "Great".to_string(),
            ..TestimonialDraft::default()
        })
    }

    #[test]
    fn first_load_seeds_and_persists_defaults() {
        let mut store = store();
        let projects = store.load_collection::<Projects>();
        assert_eq!(projects, Projects::defaults());

        let stored: Stored<Vec<Project>> = store.read(PROJECTS_KEY).unwrap();
        assert_eq!(stored, Stored::Valid(Projects::defaults()));
    }

    #[test]
    fn emptied_collection_stays_empty() {
        let mut store = store();
        store.load_collection::<Projects>();
        store.save_collection::<Projects>(&[]).unwrap();

        assert!(store.load_collection::<Projects>().is_empty());
    }

    #[test]
    fn corrupt_value_yields_defaults_without_overwriting() {
        let mut store = store();
        store.save(PROJECTS_KEY, "not an array").unwrap();

        let projects = store.load_collection::<Projects>();
        assert_eq!(projects, Projects::defaults());
        assert_eq!(
            store.backend().get_item(PROJECTS_KEY).unwrap().as_deref(),
            Some("\"not an array\"")
        );
    }

    #[test]
    fn invalid_json_is_reported_corrupt() {
        let mut backend = MemoryBackend::new();
        backend.set_item(PROJECTS_KEY, "{[".to_string()).unwrap();
        let store = CollectionStore::new(backend);

        let stored: Stored<Vec<Project>> = store.read(PROJECTS_KEY).unwrap();
        assert!(matches!(stored, Stored::Corrupt { .. }));
    }

    #[test]
    fn upsert_prepends_new_items() {
        let mut store = store();
        store.save_collection::<Testimonials>(&[]).unwrap();

        let first = review("Abebe");
        let second = review("Tigist");
        store.upsert_into::<Testimonials>(first.clone()).unwrap();
        let items = store.upsert_into::<Testimonials>(second.clone()).unwrap();

        assert_eq!(items, vec![second, first]);
    }

    #[test]
    fn upsert_replaces_in_place_and_collapses_duplicates() {
        let mut store = store();
        let a = review("A");
        let b = review("B");
        let mut a_dup = a.clone();
        a_dup.text = "duplicate".to_string();
        store
            .save_collection::<Testimonials>(&[b.clone(), a.clone(), a_dup])
            .unwrap();

        let mut edited = a.clone();
        edited.text = "edited".to_string();
        let items = store.upsert_into::<Testimonials>(edited.clone()).unwrap();

        assert_eq!(items, vec![b, edited]);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = store();
        let seeded = store.load_collection::<Testimonials>();
        let id = seeded[0].id.clone();

        let once = store.remove_from::<Testimonials>(&id).unwrap();
        let twice = store.remove_from::<Testimonials>(&id).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once.len(), seeded.len() - 1);
    }

    #[test]
    fn sync_config_round_trip_and_clear() {
        let mut store = store();
        assert!(store.load_sync_config().is_none());

        let config = SyncConfig {
            owner: "octo".into(),
            repo: "site".into(),
            token: "ghp_123".into(),
            branch: "main".into(),
        };
        store.save_sync_config(&config).unwrap();
        assert_eq!(store.load_sync_config(), Some(config));

        store.clear_sync_config().unwrap();
        assert!(store.load_sync_config().is_none());
    }

    #[test]
    fn sync_config_requires_token() {
        let mut store = store();
        let config = SyncConfig {
            owner: "octo".into(),
            repo: "site".into(),
            token: " ".into(),
            branch: String::new(),
        };
        let form_err = SyncSettingsForm::prefill(Some(&config)).validate().unwrap_err();
        let store_err = store.save_sync_config(&config).unwrap_err();

        assert_eq!(store_err.to_string(), form_err.to_string());
        assert!(matches!(store_err, PortfolioError::InvalidConfig(ref msg) if msg == "token is required"));
        assert!(store.load_sync_config().is_none());
    }

    #[test]
    fn corrupt_sync_config_reads_as_absent() {
        let mut backend = MemoryBackend::new();
        backend.set_item(SYNC_CONFIG_KEY, "[1,2]".to_string()).unwrap();
        let store = CollectionStore::new(backend);
        assert!(store.load_sync_config().is_none());
    }
}
