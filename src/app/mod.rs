//! Panel layer: state, events and the actions they produce.
//!
//! ```text
//! host input ──▶ Event ──▶ handle_event ──▶ AppState + CollectionStore
//!                               │
//!                               └──▶ Vec<Action> ──▶ host (worker, dialog, notices)
//!                                                      │
//!            Event::WorkerResponse ◀───────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects returned to the host
//! - [`handler`]: Event processing
//! - [`modes`]: Blog view state machine
//! - [`state`]: Panel state container and blog search

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::{Action, Notice, NoticeLevel};
pub use handler::{handle_event, Event};
pub use modes::BlogView;
pub use state::AppState;
