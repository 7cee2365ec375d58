//! Board services: the synchronization controller and its request types.

mod context;
mod editing;
mod error;
mod outcome;
mod sync;
mod validation;

pub use error::{BoardSyncError, BoardSyncResult};
pub use outcome::{
    BoardLoadReport, BoardSettings, DropOutcome, PendingMove, ReconcilePolicy, Reconciliation,
    RetryReport, SkipReason, SyncPhase, UnsyncedCard,
};
pub use sync::BoardSyncController;
pub use validation::{
    CreateTaskRequest, FieldIssue, ValidationError, validate_comment, validate_update,
};
