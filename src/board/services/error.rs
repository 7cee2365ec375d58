//! Service-level errors for board operations.

use thiserror::Error;

use super::ValidationError;
use crate::board::{
    domain::{BoardDomainError, StatusKey, TaskId},
    ports::ApiError,
};

/// Errors returned by [`super::BoardSyncController`] operations.
#[derive(Debug, Clone, Error)]
pub enum BoardSyncError {
    /// Loading a column, a task detail, or the active sprint failed; local
    /// state is left as it was.
    #[error("failed to load {what}: {source}")]
    Fetch {
        /// What was being loaded.
        what: String,
        /// Underlying API failure.
        #[source]
        source: ApiError,
    },

    /// Client-side input validation failed before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server did not confirm an optimistic status change.
    #[error("failed to move task {task_id} to {status}: {source}")]
    StatusUpdate {
        /// Task that was moved.
        task_id: TaskId,
        /// Requested status.
        status: StatusKey,
        /// Underlying API failure.
        #[source]
        source: ApiError,
    },

    /// A create, edit, or comment call failed.
    #[error("failed to {operation}: {source}")]
    Api {
        /// Operation that failed.
        operation: &'static str,
        /// Underlying API failure.
        #[source]
        source: ApiError,
    },

    /// A status names no configured column.
    #[error("unknown board column: {0}")]
    UnknownColumn(StatusKey),

    /// The task is not on the board.
    #[error("task {0} is not on the board")]
    TaskNotOnBoard(TaskId),

    /// Domain invariant violated.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
}

/// Result type for board service operations.
pub type BoardSyncResult<T> = Result<T, BoardSyncError>;
