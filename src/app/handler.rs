//! Event handling for the portfolio panels.
//!
//! [`handle_event`] is the only writer of [`AppState`]. Store mutations run
//! synchronously inside it; publishing is returned as an [`Action::Publish`]
//! and its result comes back later as [`Event::WorkerResponse`].
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mount`
//! - **Projects**: `SaveProject`, `DeleteProject`
//! - **Blog**: `ComposePost`, `EditPost`, `SavePost`, `DeletePost`, `OpenPost`,
//!   `BackToList`, `SearchPosts`
//! - **Testimonials**: `AddTestimonial`, `DeleteTestimonial`
//! - **Sync**: `OpenSettings`, `CloseSettings`, `SaveSettings`, `Publish`,
//!   `WorkerResponse`
//!
//! # Example
//!
//! ```
//! use portfolio_sync::app::{handle_event, AppState, Event};
//! use portfolio_sync::storage::{CollectionStore, MemoryBackend};
//!
//! let mut store = CollectionStore::new(MemoryBackend::new());
//! let mut state = AppState::new("Author");
//! handle_event(&mut state, &mut store, &Event::Mount)?;
//! assert_eq!(state.projects.len(), 3);
//! # Ok::<(), portfolio_sync::PortfolioError>(())
//! ```

use super::actions::{Action, Notice};
use super::modes::BlogView;
use super::state::AppState;
use crate::domain::error::Result;
use crate::domain::{
    BlogPost, Entity, ErrorKind, PostDraft, Project, SyncSettingsForm, Testimonial,
    TestimonialDraft,
};
use crate::storage::{
    upsert_by_id, BlogPosts, CollectionKind, CollectionStore, KeyValueBackend, Projects,
    Testimonials,
};
use crate::worker::{PublishJob, WorkerMessage, WorkerResponse};

/// Commit message timestamp, local time.
const COMMIT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// User interactions and worker results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Panels became visible: load every collection, seeding empty keys.
    Mount,

    /// Create or replace a project.
    SaveProject(Project),
    /// Remove a project by id.
    DeleteProject(String),

    /// Open the editor for a new post.
    ComposePost,
    /// Open the editor on an existing post.
    EditPost(String),
    /// Submit the editor.
    SavePost(PostDraft),
    /// Remove a post by id.
    DeletePost(String),
    /// Show one post.
    OpenPost(String),
    /// Return to the post list.
    BackToList,
    /// Replace the blog search query.
    SearchPosts(String),

    /// Create a testimonial and prepend it.
    AddTestimonial(TestimonialDraft),
    /// Remove a testimonial by id.
    DeleteTestimonial(String),

    /// Open the sync settings dialog.
    OpenSettings,
    /// Dismiss the dialog without saving.
    CloseSettings,
    /// Validate and persist the dialog.
    SaveSettings(SyncSettingsForm),

    /// Publish a collection to the configured repository.
    Publish(CollectionKind),

    /// A publish finished.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutating `state` and `store`, and returns the actions
/// the host must perform.
///
/// Store write failures do not abort the event: the change is kept in memory
/// and reported with an error [`Notice`].
///
/// # Errors
///
/// Returns an error only if a collection snapshot cannot be serialized for
/// publishing.
#[allow(clippy::too_many_lines)]
pub fn handle_event<B: KeyValueBackend>(
    state: &mut AppState,
    store: &mut CollectionStore<B>,
    event: &Event,
) -> Result<Vec<Action>> {
    let _span = tracing::debug_span!("handle_event", event = event_name(event)).entered();

    match event {
        Event::Mount => {
            state.projects = store.load_collection::<Projects>();
            state.posts = store.load_collection::<BlogPosts>();
            state.testimonials = store.load_collection::<Testimonials>();
            state.blog_view = BlogView::List;
            state.apply_search_filter();

            tracing::debug!(
                projects = state.projects.len(),
                posts = state.posts.len(),
                testimonials = state.testimonials.len(),
                "collections loaded"
            );
            Ok(vec![])
        }

        Event::SaveProject(project) => {
            let written = store.upsert_into::<Projects>(project.clone());
            Ok(apply_write(&mut state.projects, written, |items| {
                upsert_by_id(items, project.clone()).0
            }))
        }
        Event::DeleteProject(id) => {
            let written = store.remove_from::<Projects>(id);
            Ok(apply_write(&mut state.projects, written, |items| {
                without_id(items, id)
            }))
        }

        Event::ComposePost => {
            state.blog_view = BlogView::Compose { editing: None };
            Ok(vec![])
        }
        Event::EditPost(id) => {
            if state.post(id).is_some() {
                state.blog_view = BlogView::Compose {
                    editing: Some(id.clone()),
                };
            } else {
                tracing::debug!(id = %id, "edit requested for unknown post");
            }
            Ok(vec![])
        }
        Event::SavePost(draft) => {
            let existing = state.blog_view.editing_id().and_then(|id| state.post(id)).cloned();
            let post = match existing {
                Some(mut post) => {
                    post.apply_draft(draft.clone());
                    post
                }
                None => BlogPost::create(draft.clone(), &state.author),
            };
            tracing::debug!(id = %post.id, title = %post.title, "saving post");

            let written = store.upsert_into::<BlogPosts>(post.clone());
            let actions = apply_write(&mut state.posts, written, |items| {
                upsert_by_id(items, post).0
            });
            state.blog_view = BlogView::List;
            state.apply_search_filter();
            Ok(actions)
        }
        Event::DeletePost(id) => {
            let written = store.remove_from::<BlogPosts>(id);
            let actions = apply_write(&mut state.posts, written, |items| without_id(items, id));
            if state.blog_view.refers_to(id) {
                state.blog_view = BlogView::List;
            }
            state.apply_search_filter();
            Ok(actions)
        }
        Event::OpenPost(id) => {
            if state.post(id).is_some() {
                state.blog_view = BlogView::Detail(id.clone());
            } else {
                tracing::debug!(id = %id, "open requested for unknown post");
            }
            Ok(vec![])
        }
        Event::BackToList => {
            state.blog_view = BlogView::List;
            Ok(vec![])
        }
        Event::SearchPosts(query) => {
            state.search_query.clone_from(query);
            state.apply_search_filter();
            Ok(vec![])
        }

        Event::AddTestimonial(draft) => {
            let testimonial = Testimonial::from_draft(draft.clone());
            let written = store.upsert_into::<Testimonials>(testimonial.clone());
            Ok(apply_write(&mut state.testimonials, written, |items| {
                upsert_by_id(items, testimonial).0
            }))
        }
        Event::DeleteTestimonial(id) => {
            let written = store.remove_from::<Testimonials>(id);
            Ok(apply_write(&mut state.testimonials, written, |items| {
                without_id(items, id)
            }))
        }

        Event::OpenSettings => {
            state.open_settings(store.load_sync_config().as_ref(), None);
            Ok(vec![])
        }
        Event::CloseSettings => {
            if let Some(dropped) = state.close_settings() {
                tracing::debug!(collection = %dropped, "settings dismissed, publish abandoned");
            }
            Ok(vec![])
        }
        Event::SaveSettings(form) => {
            state.settings_form = form.clone();
            let config = match form.validate() {
                Ok(config) => config,
                Err(e) => return Ok(vec![Action::Notify(Notice::error(e.to_string()))]),
            };
            if let Err(e) = store.save_sync_config(&config) {
                tracing::warn!(error = %e, "failed to save sync settings");
                return Ok(vec![Action::Notify(Notice::error(format!(
                    "Could not save GitHub settings: {e}"
                )))]);
            }

            tracing::debug!(owner = %config.owner, repo = %config.repo, "sync settings saved");
            let mut actions = vec![Action::Notify(Notice::info("GitHub settings saved"))];
            if let Some(retry) = state.close_settings() {
                actions.extend(handle_event(state, store, &Event::Publish(retry))?);
            }
            Ok(actions)
        }

        Event::Publish(collection) => {
            let collection = *collection;
            if state.is_publishing(collection) {
                tracing::debug!(collection = %collection, "publish already in flight, ignoring");
                return Ok(vec![]);
            }

            let Some(config) = store.load_sync_config().filter(|c| c.has_token()) else {
                tracing::debug!(collection = %collection, "no sync settings, opening dialog");
                state.open_settings(None, Some(collection));
                return Ok(vec![Action::OpenSyncSettings]);
            };

            let job = PublishJob {
                collection,
                path: collection.remote_path().to_string(),
                message: commit_message(collection),
                content: state.snapshot(collection)?,
                config: Some(config),
            };
            state.begin_publish(collection);

            tracing::debug!(collection = %collection, path = %job.path, "publish issued");
            Ok(vec![Action::Publish(WorkerMessage::publish(job))])
        }

        Event::WorkerResponse(response) => {
            let collection = response.collection();
            state.finish_publish(collection);

            match response {
                WorkerResponse::Published { receipt, .. } => {
                    tracing::debug!(
                        collection = %collection,
                        created = receipt.created,
                        "publish completed"
                    );
                    Ok(vec![Action::Notify(Notice::success(format!(
                        "Successfully synced {collection} with GitHub!"
                    )))])
                }
                WorkerResponse::PublishFailed { kind, message, .. } => {
                    tracing::debug!(collection = %collection, kind = ?kind, "publish failed");
                    let mut actions = vec![Action::Notify(Notice::error(format!(
                        "Error syncing {collection}: {message}"
                    )))];
                    if *kind == ErrorKind::ConfigMissing {
                        state.open_settings(store.load_sync_config().as_ref(), Some(collection));
                        actions.push(Action::OpenSyncSettings);
                    }
                    Ok(actions)
                }
            }
        }
    }
}

/// Adopts the stored collection after a successful write, or applies
/// `local` to the in-memory copy and reports the failure.
fn apply_write<T>(
    items: &mut Vec<T>,
    written: Result<Vec<T>>,
    local: impl FnOnce(Vec<T>) -> Vec<T>,
) -> Vec<Action> {
    match written {
        Ok(updated) => {
            *items = updated;
            vec![]
        }
        Err(e) => {
            tracing::warn!(error = %e, "store write failed, keeping change in memory");
            *items = local(std::mem::take(items));
            vec![Action::Notify(Notice::error(format!(
                "Failed to save changes to local storage: {e}"
            )))]
        }
    }
}

fn without_id<T: Entity>(mut items: Vec<T>, id: &str) -> Vec<T> {
    items.retain(|item| item.id() != id);
    items
}

fn commit_message(collection: CollectionKind) -> String {
    format!(
        "Update {collection} from UI: {}",
        chrono::Local::now().format(COMMIT_TIME_FORMAT)
    )
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Mount => "mount",
        Event::SaveProject(_) => "save_project",
        Event::DeleteProject(_) => "delete_project",
        Event::ComposePost => "compose_post",
        Event::EditPost(_) => "edit_post",
        Event::SavePost(_) => "save_post",
        Event::DeletePost(_) => "delete_post",
        Event::OpenPost(_) => "open_post",
        Event::BackToList => "back_to_list",
        Event::SearchPosts(_) => "search_posts",
        Event::AddTestimonial(_) => "add_testimonial",
        Event::DeleteTestimonial(_) => "delete_testimonial",
        Event::OpenSettings => "open_settings",
        Event::CloseSettings => "close_settings",
        Event::SaveSettings(_) => "save_settings",
        Event::Publish(_) => "publish",
        Event::WorkerResponse(_) => "worker_response",
    }
}
