use crate::tools::ToolKind;
use gd_core::{LayerId, ObjectId, SnapshotError};
use thiserror::Error;

/// Rejected editor operations. None of these end the session; the caller
/// reports them and the scene stays as it was.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("the background layer cannot be deleted")]
    BackgroundLayerLocked,
    #[error("no layer with id `{0}`")]
    UnknownLayer(LayerId),
    #[error("no object with id `{0}`")]
    UnknownObject(ObjectId),
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
    #[error("a history restore is already in progress")]
    RestoreInProgress,
    #[error("the {0} tool is unavailable")]
    ToolUnavailable(ToolKind),
    #[error("no project is open")]
    NoProject,
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Failures reported by a persistence gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("conflicting project")]
    Conflict,
    #[error("network failure: {0}")]
    Network(String),
    #[error("project not found")]
    NotFound,
}

impl GatewayError {
    /// Message shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            GatewayError::PermissionDenied => "You don't have permission to save this project",
            GatewayError::Conflict => "A project with this name already exists",
            GatewayError::Network(_) => "Network error: check your connection and try again",
            GatewayError::NotFound => "Project not found",
        }
    }
}
