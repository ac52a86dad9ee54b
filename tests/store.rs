//! Collection store behavior over the in-memory and file backends.

use portfolio_sync::domain::{BlogPost, Entity, PostDraft, Project};
use portfolio_sync::storage::{
    BlogPosts, CollectionStore, JsonFileBackend, KeyValueBackend, MemoryBackend, Projects,
    Stored, PROJECTS_KEY,
};
use portfolio_sync::PortfolioError;
use proptest::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn project(id: &str, title: &str) -> Project {
    Project {
        id: id.to_string(),
        ..Project::new(title, "description")
    }
}

fn ids<T: Entity>(items: &[T]) -> Vec<&str> {
    items.iter().map(Entity::id).collect()
}

fn finite_f64() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        finite_f64().prop_map(Value::from),
        ".{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn upsert_leaves_exactly_one_copy(
        existing in proptest::collection::vec(0u8..8, 0..12),
        target in 0u8..8,
    ) {
        let mut store = CollectionStore::new(MemoryBackend::new());
        let items: Vec<Project> = existing
            .iter()
            .map(|n| project(&n.to_string(), "old"))
            .collect();
        store.save_collection::<Projects>(&items).unwrap();

        let target_id = target.to_string();
        let updated = store.upsert_into::<Projects>(project(&target_id, "new")).unwrap();

        let copies: Vec<&Project> = updated.iter().filter(|p| p.id == target_id).collect();
        prop_assert_eq!(copies.len(), 1);
        prop_assert_eq!(copies[0].title.as_str(), "new");

        let others_before: Vec<&str> = items.iter().map(|p| p.id.as_str()).filter(|id| *id != target_id).collect();
        let others_after: Vec<&str> = updated.iter().map(|p| p.id.as_str()).filter(|id| *id != target_id).collect();
        prop_assert_eq!(others_before, others_after);

        if !existing.contains(&target) {
            prop_assert_eq!(updated[0].id.as_str(), target_id.as_str());
        }

        prop_assert_eq!(store.load_collection::<Projects>(), updated);
    }

    #[test]
    fn remove_is_idempotent_and_exhaustive(
        existing in proptest::collection::vec(0u8..6, 0..12),
        target in 0u8..6,
    ) {
        let mut store = CollectionStore::new(MemoryBackend::new());
        let items: Vec<Project> = existing.iter().map(|n| project(&n.to_string(), "p")).collect();
        store.save_collection::<Projects>(&items).unwrap();

        let target_id = target.to_string();
        let once = store.remove_from::<Projects>(&target_id).unwrap();
        let twice = store.remove_from::<Projects>(&target_id).unwrap();

        prop_assert!(once.iter().all(|p| p.id != target_id));
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(
            once.len(),
            items.len() - existing.iter().filter(|n| **n == target).count()
        );
    }

    #[test]
    fn saved_collections_load_back_unchanged(titles in proptest::collection::vec("[a-zA-Z ]{0,16}", 0..6)) {
        let mut store = CollectionStore::new(MemoryBackend::new());
        let items: Vec<Project> = titles
            .iter()
            .enumerate()
            .map(|(i, t)| project(&i.to_string(), t))
            .collect();

        store.save_collection::<Projects>(&items).unwrap();
        prop_assert_eq!(store.load_collection::<Projects>(), items);
    }

    #[test]
    fn saved_floats_load_back_exactly(values in prop::collection::vec(finite_f64(), 0..8)) {
        let mut store = CollectionStore::new(MemoryBackend::new());
        store.save("metrics", &values).unwrap();

        let loaded: Vec<f64> = store.load("metrics", Vec::new());
        prop_assert_eq!(loaded, values);
    }

    #[test]
    fn saved_json_values_load_back_unchanged(value in json_value()) {
        let mut store = CollectionStore::new(MemoryBackend::new());
        store.save("document", &value).unwrap();

        prop_assert_eq!(store.load("document", Value::Null), value);
    }
}

#[test]
fn first_read_seeds_and_persists_defaults() {
    let mut store = CollectionStore::new(MemoryBackend::new());
    assert_eq!(store.read::<Vec<Project>>(PROJECTS_KEY).unwrap(), Stored::Absent);

    let seeded = store.load_collection::<Projects>();
    assert_eq!(seeded.len(), 3);
    assert_eq!(
        store.read::<Vec<Project>>(PROJECTS_KEY).unwrap(),
        Stored::Valid(seeded)
    );
}

#[test]
fn emptied_collection_stays_empty() {
    let mut store = CollectionStore::new(MemoryBackend::new());
    store.save_collection::<Projects>(&[]).unwrap();

    assert!(store.load_collection::<Projects>().is_empty());
    assert!(store.load_collection::<Projects>().is_empty());
}

#[test]
fn corrupt_value_yields_defaults_without_overwrite() {
    let mut backend = MemoryBackend::new();
    backend.set_item(PROJECTS_KEY, "{not json".to_string()).unwrap();
    let mut store = CollectionStore::new(backend);

    assert_eq!(store.load_collection::<Projects>().len(), 3);
    assert_eq!(
        store.backend().get_item(PROJECTS_KEY).unwrap().as_deref(),
        Some("{not json")
    );
}

#[test]
fn wrongly_shaped_value_is_corrupt() {
    let mut backend = MemoryBackend::new();
    backend.set_item(PROJECTS_KEY, r#"{"id":"1"}"#.to_string()).unwrap();
    let store = CollectionStore::new(backend);

    assert!(matches!(
        store.read::<Vec<Project>>(PROJECTS_KEY).unwrap(),
        Stored::Corrupt { .. }
    ));
}

#[test]
fn new_posts_are_prepended_newest_first() {
    let mut store = CollectionStore::new(MemoryBackend::new());
    store.save_collection::<BlogPosts>(&[]).unwrap();

    let first = BlogPost::create(PostDraft { title: "P1".into(), ..PostDraft::default() }, "A");
    let second = BlogPost::create(PostDraft { title: "P2".into(), ..PostDraft::default() }, "A");
    store.upsert_into::<BlogPosts>(first.clone()).unwrap();
    let posts = store.upsert_into::<BlogPosts>(second.clone()).unwrap();

    assert_eq!(ids(&posts), vec![second.id.as_str(), first.id.as_str()]);
}

#[test]
fn quota_rejects_write_and_keeps_previous_value() {
    let mut store = CollectionStore::new(MemoryBackend::new().with_quota(400));
    let small = vec![project("1", "small")];
    store.save_collection::<Projects>(&small).unwrap();

    let huge = vec![project("1", &"x".repeat(1000))];
    let err = store.save_collection::<Projects>(&huge).unwrap_err();

    assert!(matches!(err, PortfolioError::QuotaExceeded { .. }));
    assert_eq!(store.load_collection::<Projects>(), small);
}

#[test]
fn file_backend_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("portfolio.json");

    let mut store = CollectionStore::new(JsonFileBackend::open(path.clone()).unwrap());
    store.save_collection::<Projects>(&[project("7", "kept")]).unwrap();
    drop(store);

    let mut reopened = CollectionStore::new(JsonFileBackend::open(path).unwrap());
    let projects = reopened.load_collection::<Projects>();
    assert_eq!(ids(&projects), vec!["7"]);
}
