//! Side effects requested by the event handler.
//!
//! The handler mutates [`AppState`](crate::app::AppState) and the store
//! directly; everything it cannot do itself (network work, dialogs, user
//! notices) comes back as an [`Action`] for the host to carry out.

use crate::worker::WorkerMessage;

/// Severity of a user notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Neutral information.
    Info,
    /// An operation completed.
    Success,
    /// An operation failed.
    Error,
}

/// Message to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text to display.
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Commands for the host runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hand a publish job to the sync worker.
    ///
    /// The collection stays marked in flight until the matching
    /// `Event::WorkerResponse` arrives.
    Publish(WorkerMessage),

    /// Show the sync settings dialog. The form is already prefilled in state.
    OpenSyncSettings,

    /// Show a notice.
    Notify(Notice),
}
