//! Error types for board domain validation and parsing.

use super::{StatusKey, TaskId};
use thiserror::Error;

/// Errors returned while constructing or mutating board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// A status value failed validation.
    #[error(transparent)]
    InvalidStatus(#[from] ParseStatusKeyError),

    /// A layout was configured without columns.
    #[error("board layout must contain at least one column")]
    EmptyLayout,

    /// Two columns share the same status key.
    #[error("duplicate board column: {0}")]
    DuplicateColumn(StatusKey),

    /// The default status names no configured column.
    #[error("default status {0} is not a board column")]
    UnknownDefaultStatus(StatusKey),

    /// A status names no configured column.
    #[error("unknown board column: {0}")]
    UnknownColumn(StatusKey),

    /// A task was placed in a column other than its status.
    #[error("task {task_id} has status {actual}, expected {expected}")]
    StatusMismatch {
        /// Offending task.
        task_id: TaskId,
        /// Column the task was placed in.
        expected: StatusKey,
        /// Status the task carries.
        actual: StatusKey,
    },

    /// An activity record carries an unsupported type discriminant.
    #[error("unknown activity type: {0}")]
    UnknownActivityType(String),

    /// An activity record lacks a value its type requires.
    #[error("activity of type {kind} is missing its {field} value")]
    MissingActivityValue {
        /// Wire discriminant of the activity.
        kind: String,
        /// Name of the missing field.
        field: &'static str,
    },
}

/// Error returned while parsing a task status key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task status: {0:?}")]
pub struct ParseStatusKeyError(pub String);
