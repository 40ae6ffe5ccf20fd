//! Published controller state and change events.

use artboard_core::Artwork;
use serde::Serialize;

/// Outcome of the most recent full-collection refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    #[default]
    Loading,
    Success,
    Failed,
}

/// Everything the presentation layer reads from the controller.
///
/// Written only by [`SyncController`](crate::SyncController).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncState {
    /// Newest-first artwork list from the last successful refresh.
    pub artworks: Vec<Artwork>,
    pub status: OperationStatus,
    /// Set when a create or update fails. Cleared by `clear_error`.
    pub error_message: Option<String>,
    /// Outcome of the last delete. One-shot: stays set until
    /// `clear_delete_feedback` is called.
    pub delete_feedback: Option<String>,
}

/// Mutation kinds, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

/// A state change, broadcast to subscribers as it happens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SyncEvent {
    RefreshStarted,

    RefreshSucceeded { count: usize },

    RefreshFailed { error: String },

    ArtworkCreated { id: String },

    ArtworkUpdated { id: String },

    /// `message` is the service's own text.
    ArtworkDeleted { id: String, message: String },

    MutationFailed { operation: Mutation, error: String },
}
