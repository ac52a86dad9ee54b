//! Panel event flows, including a publish round trip through the worker.

use portfolio_sync::app::{handle_event, Action, AppState, BlogView, Event, NoticeLevel};
use portfolio_sync::domain::{ErrorKind, PostDraft, SyncConfig, TestimonialDraft};
use portfolio_sync::storage::{CollectionKind, CollectionStore, MemoryBackend};
use portfolio_sync::sync::PublishReceipt;
use portfolio_sync::worker::{SyncWorker, WorkerMessage, WorkerResponse};
use portfolio_sync::RemoteSyncClient;
use serde_json::json;
use url::Url;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mounted(backend: MemoryBackend) -> (AppState, CollectionStore<MemoryBackend>) {
    let mut store = CollectionStore::new(backend);
    let mut state = AppState::new("Muluken Ugamo");
    handle_event(&mut state, &mut store, &Event::Mount).unwrap();
    (state, store)
}

fn configured() -> (AppState, CollectionStore<MemoryBackend>) {
    let (state, mut store) = mounted(MemoryBackend::new());
    store
        .save_sync_config(&SyncConfig {
            owner: "Muler8905".into(),
            repo: "portfolio".into(),
            token: "ghp_valid".into(),
            branch: "main".into(),
        })
        .unwrap();
    (state, store)
}

fn draft(title: &str) -> PostDraft {
    PostDraft {
        title: title.into(),
        content: "Some words here".into(),
        ..PostDraft::default()
    }
}

fn published(collection: CollectionKind) -> WorkerResponse {
    WorkerResponse::Published {
        collection,
        receipt: PublishReceipt {
            path: collection.remote_path().into(),
            created: false,
            content_sha: None,
            commit_sha: Some("c0ffee".into()),
        },
    }
}

#[test]
fn mount_seeds_every_collection() {
    let (state, _store) = mounted(MemoryBackend::new());
    assert_eq!(state.projects.len(), 3);
    assert_eq!(state.posts.len(), 1);
    assert_eq!(state.testimonials.len(), 3);
    assert_eq!(state.blog_view, BlogView::List);
}

#[test]
fn created_posts_are_prepended() {
    let (mut state, mut store) = mounted(MemoryBackend::new());
    let seeded_id = state.posts[0].id.clone();

    for title in ["P1", "P2"] {
        handle_event(&mut state, &mut store, &Event::ComposePost).unwrap();
        handle_event(&mut state, &mut store, &Event::SavePost(draft(title))).unwrap();
    }

    let titles: Vec<&str> = state.posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles[..2], ["P2", "P1"]);
    assert_eq!(state.posts[2].id, seeded_id);
    assert_eq!(state.posts[0].author, "Muluken Ugamo");
    assert_eq!(state.filtered_posts, state.posts);

    let mut reloaded = AppState::new("x");
    handle_event(&mut reloaded, &mut store, &Event::Mount).unwrap();
    assert_eq!(reloaded.posts, state.posts);
}

#[test]
fn deleting_viewed_post_returns_to_list() {
    let (mut state, mut store) = mounted(MemoryBackend::new());
    let id = state.posts[0].id.clone();

    handle_event(&mut state, &mut store, &Event::OpenPost(id.clone())).unwrap();
    assert_eq!(state.current_post().map(|p| p.id.as_str()), Some(id.as_str()));

    handle_event(&mut state, &mut store, &Event::DeletePost(id)).unwrap();
    assert_eq!(state.blog_view, BlogView::List);
    assert!(state.posts.is_empty());
    assert!(state.filtered_posts.is_empty());
}

#[test]
fn search_filters_posts() {
    let (mut state, mut store) = mounted(MemoryBackend::new());
    handle_event(&mut state, &mut store, &Event::SavePost(draft("Kubernetes notes"))).unwrap();

    handle_event(&mut state, &mut store, &Event::SearchPosts("kubernetes".into())).unwrap();
    assert_eq!(state.filtered_posts.len(), 1);
    assert_eq!(state.filtered_posts[0].title, "Kubernetes notes");

    handle_event(&mut state, &mut store, &Event::SearchPosts(String::new())).unwrap();
    assert_eq!(state.filtered_posts.len(), 2);
}

#[test]
fn store_failure_keeps_change_in_memory() {
    let (mut state, mut store) = mounted(MemoryBackend::new().with_quota(64));
    let before = state.testimonials.len();

    let actions = handle_event(
        &mut state,
        &mut store,
        &Event::AddTestimonial(TestimonialDraft {
            name: "Ada".into(),
            text: "Great work".into(),
            ..TestimonialDraft::default()
        }),
    )
    .unwrap();

    assert_eq!(state.testimonials.len(), before + 1);
    assert_eq!(state.testimonials[0].name, "Ada");
    assert!(matches!(
        actions.as_slice(),
        [Action::Notify(notice)] if notice.level == NoticeLevel::Error
    ));
}

#[test]
fn publish_without_settings_opens_dialog() {
    let (mut state, mut store) = mounted(MemoryBackend::new());

    let actions =
        handle_event(&mut state, &mut store, &Event::Publish(CollectionKind::BlogPosts)).unwrap();

    assert_eq!(actions, vec![Action::OpenSyncSettings]);
    assert!(state.settings_open);
    assert!(!state.is_publishing(CollectionKind::BlogPosts));
}

#[test]
fn publish_while_in_flight_is_ignored() {
    let (mut state, mut store) = configured();

    let first =
        handle_event(&mut state, &mut store, &Event::Publish(CollectionKind::Projects)).unwrap();
    let second =
        handle_event(&mut state, &mut store, &Event::Publish(CollectionKind::Projects)).unwrap();
    let other =
        handle_event(&mut state, &mut store, &Event::Publish(CollectionKind::Testimonials)).unwrap();

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(other.len(), 1);

    let Action::Publish(WorkerMessage::Publish { job, .. }) = &first[0] else {
        panic!("expected publish action, got {first:?}");
    };
    assert_eq!(job.path, "src/data/projects.json");
    assert!(job.message.starts_with("Update projects from UI: "));
    assert_eq!(job.content.as_array().map(Vec::len), Some(3));
    assert_eq!(job.config.as_ref().map(|c| c.token.as_str()), Some("ghp_valid"));

    handle_event(
        &mut state,
        &mut store,
        &Event::WorkerResponse(published(CollectionKind::Projects)),
    )
    .unwrap();
    assert!(!state.is_publishing(CollectionKind::Projects));
    assert!(state.is_publishing(CollectionKind::Testimonials));
}

#[test]
fn finished_publish_notifies() {
    let (mut state, mut store) = configured();
    handle_event(&mut state, &mut store, &Event::Publish(CollectionKind::BlogPosts)).unwrap();

    let actions = handle_event(
        &mut state,
        &mut store,
        &Event::WorkerResponse(published(CollectionKind::BlogPosts)),
    )
    .unwrap();

    assert!(matches!(
        actions.as_slice(),
        [Action::Notify(notice)] if notice.level == NoticeLevel::Success
            && notice.message == "Successfully synced blog posts with GitHub!"
    ));
}

#[test]
fn config_missing_response_reopens_settings() {
    let (mut state, mut store) = mounted(MemoryBackend::new());

    let actions = handle_event(
        &mut state,
        &mut store,
        &Event::WorkerResponse(WorkerResponse::PublishFailed {
            collection: CollectionKind::Testimonials,
            kind: ErrorKind::ConfigMissing,
            message: "GitHub configuration missing".into(),
        }),
    )
    .unwrap();

    assert!(state.settings_open);
    assert_eq!(actions.len(), 2);
    assert!(matches!(
        &actions[0],
        Action::Notify(notice) if notice.message == "Error syncing testimonials: GitHub configuration missing"
    ));
    assert_eq!(actions[1], Action::OpenSyncSettings);
}

#[tokio::test]
async fn publish_round_trip_through_worker() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sha": "abc" })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "message": "is at def but expected abc" })))
        .mount(&server)
        .await;

    let client = RemoteSyncClient::new(reqwest::Client::new())
        .with_base_url(Url::parse(&server.uri()).unwrap());
    let worker = SyncWorker::new(client);
    let (replies, mut responses) = tokio::sync::mpsc::unbounded_channel();

    let (mut state, mut store) = configured();
    for action in handle_event(&mut state, &mut store, &Event::Publish(CollectionKind::BlogPosts)).unwrap() {
        if let Action::Publish(message) = action {
            worker.spawn(message, replies.clone());
        }
    }

    let response = responses.recv().await.unwrap();
    assert!(matches!(
        response,
        WorkerResponse::PublishFailed { kind: ErrorKind::ConcurrentModification, .. }
    ));

    let actions = handle_event(&mut state, &mut store, &Event::WorkerResponse(response)).unwrap();
    assert!(!state.is_publishing(CollectionKind::BlogPosts));
    assert!(!state.settings_open);
    assert!(matches!(
        actions.as_slice(),
        [Action::Notify(notice)] if notice.level == NoticeLevel::Error
    ));
}
