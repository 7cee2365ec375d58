//! Values describing the progress and result of board synchronization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::BoardSyncError;
use crate::board::domain::{BoardLayout, SprintId, StatusKey, TaskId, TaskLocation};

/// What happens to a card whose status change the server rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcilePolicy {
    /// Leave the card in its new column and flag it as unsynced.
    #[default]
    MarkUnsynced,
    /// Put the card back where it was before the drop.
    Revert,
}

/// Fixed configuration of a board controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSettings {
    layout: BoardLayout,
    sprint_scoped: bool,
    reconcile: ReconcilePolicy,
}

impl BoardSettings {
    /// Creates settings for `layout` with sprint scoping off and the default
    /// reconciliation policy.
    #[must_use]
    pub fn new(layout: BoardLayout) -> Self {
        Self {
            layout,
            sprint_scoped: false,
            reconcile: ReconcilePolicy::default(),
        }
    }

    /// Requires an active sprint before cards leave the default column.
    #[must_use]
    pub const fn with_sprint_scoped(mut self, sprint_scoped: bool) -> Self {
        self.sprint_scoped = sprint_scoped;
        self
    }

    /// Sets the reconciliation policy for rejected moves.
    #[must_use]
    pub const fn with_reconcile(mut self, reconcile: ReconcilePolicy) -> Self {
        self.reconcile = reconcile;
        self
    }

    /// Returns the column layout.
    #[must_use]
    pub const fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Returns whether drops outside the default column need an active sprint.
    #[must_use]
    pub const fn sprint_scoped(&self) -> bool {
        self.sprint_scoped
    }

    /// Returns the reconciliation policy.
    #[must_use]
    pub const fn reconcile(&self) -> ReconcilePolicy {
        self.reconcile
    }
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self::new(BoardLayout::default())
    }
}

/// Synchronization state of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Matches the last known server state.
    Idle,
    /// Being dragged.
    Dragging,
    /// Moved locally; the server has not answered yet.
    OptimisticMoved,
    /// Moved locally; the server rejected or never received the change.
    Unsynced,
}

/// Why a drop did nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No drag was in progress.
    NoActiveDrag,
    /// The card was dropped on its own column.
    SameColumn,
    /// The target names no board column.
    UnknownColumn(StatusKey),
    /// The board is sprint scoped and no sprint is active.
    SprintRequired,
}

/// An optimistic move applied locally and awaiting server confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    pub(super) task_id: TaskId,
    pub(super) title: String,
    pub(super) origin: Option<TaskLocation>,
    pub(super) previous_sprint: Option<SprintId>,
    pub(super) target: StatusKey,
    pub(super) sprint_id: Option<SprintId>,
    pub(super) generation: u64,
    pub(super) drag_token: u64,
}

impl PendingMove {
    /// Returns the moved task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns where the card sat before the move, if it was on the board.
    #[must_use]
    pub const fn origin(&self) -> Option<&TaskLocation> {
        self.origin.as_ref()
    }

    /// Returns the target status.
    #[must_use]
    pub const fn target(&self) -> &StatusKey {
        &self.target
    }

    /// Returns the sprint sent with the status update.
    #[must_use]
    pub const fn sprint_id(&self) -> Option<SprintId> {
        self.sprint_id
    }
}

/// How local state was reconciled after a rejected move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The card stays in the target column, flagged unsynced.
    KeptUnsynced,
    /// The card was returned to its original position.
    Reverted,
    /// A later move or reload already replaced this one; nothing changed.
    Superseded,
}

/// Result of a drop, once the server has answered.
#[derive(Debug, Clone)]
pub enum DropOutcome {
    /// Nothing was moved and no request was sent.
    Skipped(SkipReason),
    /// The server accepted the status change.
    Confirmed {
        /// Moved task.
        task_id: TaskId,
    },
    /// The server rejected the status change.
    Failed {
        /// Moved task.
        task_id: TaskId,
        /// Failure reported to the user.
        error: BoardSyncError,
        /// What happened to the card afterwards.
        reconciliation: Reconciliation,
    },
}

impl DropOutcome {
    /// Returns whether the server confirmed the move.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

/// A card whose local position the server has not confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsyncedCard {
    /// Task whose move failed.
    pub task_id: TaskId,
    /// Status shown locally.
    pub status: StatusKey,
    /// Sprint to send when retrying.
    pub sprint_id: Option<SprintId>,
    /// When the card was first flagged.
    pub since: DateTime<Utc>,
    /// Last failure message.
    pub reason: String,
}

/// Summary of [`super::BoardSyncController::retry_unsynced`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryReport {
    /// Cards the server accepted on retry.
    pub confirmed: Vec<TaskId>,
    /// Cards that are still unsynced.
    pub still_unsynced: Vec<TaskId>,
}

/// Summary of [`super::BoardSyncController::load_board`].
#[derive(Debug, Clone, Default)]
pub struct BoardLoadReport {
    /// Columns loaded, with the number of tasks in each.
    pub loaded: Vec<(StatusKey, usize)>,
    /// Columns that failed to load; their buckets were left unchanged.
    pub failed: Vec<(StatusKey, BoardSyncError)>,
}

impl BoardLoadReport {
    /// Returns whether every column loaded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

