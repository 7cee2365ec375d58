//! Optimistic drag-and-drop synchronization of the board.
//!
//! A drop moves the card locally before the server is asked to change the
//! task's status. The reply is reconciled against the card's current move
//! generation, so a late answer for an older move never touches a newer one.

use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use super::{
    BoardLoadReport, BoardSettings, BoardSyncError, BoardSyncResult, DropOutcome, PendingMove,
    ReconcilePolicy, Reconciliation, RetryReport, SkipReason, SyncPhase, UnsyncedCard,
};
use crate::board::{
    domain::{BoardContext, BoardSnapshot, SprintId, StatusKey, Task, TaskId},
    ports::{ApiError, BoardApi, Notification, Notifier},
};

/// Keeps a board snapshot in step with the server.
///
/// Clones share the same board state.
pub struct BoardSyncController<A, N, C>
where
    A: BoardApi,
    N: Notifier,
    C: Clock + Send + Sync,
{
    pub(super) api: Arc<A>,
    pub(super) notifier: Arc<N>,
    pub(super) clock: Arc<C>,
    pub(super) settings: Arc<BoardSettings>,
    pub(super) state: Arc<Mutex<BoardState>>,
}

impl<A, N, C> Clone for BoardSyncController<A, N, C>
where
    A: BoardApi,
    N: Notifier,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            notifier: Arc::clone(&self.notifier),
            clock: Arc::clone(&self.clock),
            settings: Arc::clone(&self.settings),
            state: Arc::clone(&self.state),
        }
    }
}

pub(super) struct BoardState {
    pub(super) context: BoardContext,
    pub(super) snapshot: BoardSnapshot,
    pub(super) cards: HashMap<TaskId, CardSync>,
    drag: Option<DragMarker>,
    next_generation: u64,
    next_drag_token: u64,
    loaded_at: HashMap<StatusKey, DateTime<Utc>>,
}

struct DragMarker {
    token: u64,
    task: Task,
    /// Set once the card has been dropped and moved locally.
    dropped: bool,
}

/// Sync bookkeeping for a card that differs from the last known server state.
pub(super) enum CardSync {
    Pending {
        generation: u64,
    },
    Unsynced {
        generation: u64,
        status: StatusKey,
        sprint_id: Option<SprintId>,
        since: DateTime<Utc>,
        reason: String,
    },
}

impl CardSync {
    const fn generation(&self) -> u64 {
        match self {
            Self::Pending { generation } | Self::Unsynced { generation, .. } => *generation,
        }
    }
}

impl BoardState {
    fn new(context: BoardContext, settings: &BoardSettings) -> Self {
        Self {
            context,
            snapshot: BoardSnapshot::new(settings.layout()),
            cards: HashMap::new(),
            drag: None,
            next_generation: 0,
            next_drag_token: 0,
            loaded_at: HashMap::new(),
        }
    }

    fn is_current(&self, task_id: TaskId, generation: u64) -> bool {
        self.cards
            .get(&task_id)
            .is_some_and(|entry| entry.generation() == generation)
    }

    fn release_drag(&mut self, token: u64) {
        if self.drag.as_ref().is_some_and(|marker| marker.token == token) {
            self.drag = None;
        }
    }
}

impl<A, N, C> BoardSyncController<A, N, C>
where
    A: BoardApi,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates a controller with an empty board for `context`.
    #[must_use]
    pub fn new(
        api: Arc<A>,
        notifier: Arc<N>,
        clock: Arc<C>,
        context: BoardContext,
        settings: BoardSettings,
    ) -> Self {
        let state = BoardState::new(context, &settings);
        Self {
            api,
            notifier,
            clock,
            settings: Arc::new(settings),
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Returns the controller settings.
    #[must_use]
    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    /// Fetches one column from the server and replaces its bucket.
    ///
    /// Tasks whose status does not match the column are skipped. Loaded
    /// tasks lose any pending or unsynced marker.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::UnknownColumn`] when `status` is not a
    /// column and [`BoardSyncError::Fetch`] when the request fails; the
    /// bucket is left unchanged in both cases.
    pub async fn load_column(&self, status: &StatusKey) -> BoardSyncResult<Vec<Task>> {
        if !self.settings.layout().contains(status) {
            return Err(BoardSyncError::UnknownColumn(status.clone()));
        }
        let project_id = self.lock().context.project_id();

        let fetched = self
            .api
            .list_tasks_by_status(project_id, status)
            .await
            .map_err(|source| BoardSyncError::Fetch {
                what: format!("column {status}"),
                source,
            })?;

        let (tasks, stray): (Vec<Task>, Vec<Task>) = fetched
            .into_iter()
            .partition(|task| task.status() == status);
        for task in &stray {
            warn!(
                task_id = %task.id(),
                column = %status,
                actual = %task.status(),
                "skipping task listed under the wrong column"
            );
        }

        let loaded: HashSet<TaskId> = tasks.iter().map(Task::id).collect();
        let now = self.clock.utc();
        let mut state = self.lock();
        state.snapshot.replace_column(status, tasks.clone())?;
        let BoardState {
            snapshot, cards, ..
        } = &mut *state;
        cards.retain(|task_id, _| !loaded.contains(task_id) && snapshot.contains(*task_id));
        state.loaded_at.insert(status.clone(), now);
        debug!(column = %status, count = tasks.len(), "column loaded");
        Ok(tasks)
    }

    /// Loads every column, continuing past failures.
    ///
    /// A single error notification names the columns that failed.
    pub async fn load_board(&self) -> BoardLoadReport {
        let mut report = BoardLoadReport::default();
        for column in self.settings.layout().columns() {
            match self.load_column(column.key()).await {
                Ok(tasks) => report.loaded.push((column.key().clone(), tasks.len())),
                Err(err) => {
                    warn!(column = %column.key(), error = %err, "column failed to load");
                    report.failed.push((column.key().clone(), err));
                }
            }
        }
        if !report.is_complete() {
            let labels: Vec<&str> = report
                .failed
                .iter()
                .filter_map(|(status, _)| self.settings.layout().column(status))
                .map(|column| column.label())
                .collect();
            self.notifier.notify(Notification::error(format!(
                "Could not load columns: {}",
                labels.join(", ")
            )));
        }
        report
    }

    /// Records `task` as the card being dragged, replacing any earlier drag.
    pub fn begin_drag(&self, task: &Task) {
        let mut state = self.lock();
        state.next_drag_token += 1;
        let token = state.next_drag_token;
        state.drag = Some(DragMarker {
            token,
            task: task.clone(),
            dropped: false,
        });
        debug!(task_id = %task.id(), "drag started");
    }

    /// Clears the drag marker without moving anything.
    pub fn end_drag(&self) {
        self.lock().drag = None;
    }

    /// Applies a drop on `target` locally, without contacting the server.
    ///
    /// On success the card already sits at the end of the target column and
    /// the returned [`PendingMove`] must be passed to
    /// [`Self::confirm_move`].
    ///
    /// # Errors
    ///
    /// Returns the [`SkipReason`] when the drop is a no-op; the board is
    /// left unchanged. [`SkipReason::SprintRequired`] is also reported to
    /// the notifier.
    pub fn apply_drop(&self, target: &StatusKey) -> Result<PendingMove, SkipReason> {
        let result = self.apply_drop_locked(&mut self.lock(), target);
        if matches!(result, Err(SkipReason::SprintRequired)) {
            self.notifier.notify(Notification::error(
                "Start a sprint before moving tasks out of the backlog",
            ));
        }
        result
    }

    fn apply_drop_locked(
        &self,
        state: &mut BoardState,
        target: &StatusKey,
    ) -> Result<PendingMove, SkipReason> {
        let layout = self.settings.layout();
        let marker = state.drag.as_ref().ok_or(SkipReason::NoActiveDrag)?;
        let drag_token = marker.token;
        let dragged = state
            .snapshot
            .get(marker.task.id())
            .unwrap_or(&marker.task)
            .clone();

        if dragged.status() == target {
            return Err(SkipReason::SameColumn);
        }
        if !layout.contains(target) {
            return Err(SkipReason::UnknownColumn(target.clone()));
        }

        let active_sprint = state.context.active_sprint_id();
        let local_sprint = if layout.is_default(target) {
            None
        } else if let Some(sprint_id) = active_sprint {
            Some(sprint_id)
        } else if self.settings.sprint_scoped() {
            return Err(SkipReason::SprintRequired);
        } else {
            dragged.sprint_id()
        };

        let origin = state.snapshot.remove(dragged.id()).map(|(location, _)| location);
        let mut moved = dragged.clone();
        moved.relocate(target.clone(), local_sprint);
        state
            .snapshot
            .insert(moved)
            .map_err(|_| SkipReason::UnknownColumn(target.clone()))?;

        state.next_generation += 1;
        let generation = state.next_generation;
        state
            .cards
            .insert(dragged.id(), CardSync::Pending { generation });
        if let Some(marker) = state.drag.as_mut() {
            marker.dropped = true;
        }

        debug!(
            task_id = %dragged.id(),
            from = %dragged.status(),
            to = %target,
            generation,
            "card moved optimistically"
        );
        Ok(PendingMove {
            task_id: dragged.id(),
            title: dragged.title().to_owned(),
            origin,
            previous_sprint: dragged.sprint_id(),
            target: target.clone(),
            sprint_id: active_sprint,
            generation,
            drag_token,
        })
    }

    /// Sends a pending move to the server and reconciles the reply.
    ///
    /// The drag marker is cleared unless a newer drag has started. A
    /// rejection is reported to the notifier and handled according to the
    /// configured [`ReconcilePolicy`].
    pub async fn confirm_move(&self, pending: PendingMove) -> DropOutcome {
        let result = self
            .api
            .update_task_status(pending.task_id, &pending.target, pending.sprint_id)
            .await;

        let mut state = self.lock();
        state.release_drag(pending.drag_token);
        match result {
            Ok(()) => {
                if matches!(
                    state.cards.get(&pending.task_id),
                    Some(CardSync::Pending { generation }) if *generation == pending.generation
                ) {
                    state.cards.remove(&pending.task_id);
                }
                drop(state);
                info!(task_id = %pending.task_id, status = %pending.target, "move confirmed");
                DropOutcome::Confirmed {
                    task_id: pending.task_id,
                }
            }
            Err(source) => {
                let reconciliation = self.reconcile_failure(&mut state, &pending, &source);
                drop(state);
                warn!(
                    task_id = %pending.task_id,
                    status = %pending.target,
                    error = %source,
                    ?reconciliation,
                    "move rejected"
                );
                let label = self
                    .settings
                    .layout()
                    .column(&pending.target)
                    .map_or_else(|| pending.target.to_string(), |column| column.label().to_owned());
                self.notifier.notify(Notification::error(format!(
                    "Could not move \"{}\" to {label}: {source}",
                    pending.title
                )));
                DropOutcome::Failed {
                    task_id: pending.task_id,
                    error: BoardSyncError::StatusUpdate {
                        task_id: pending.task_id,
                        status: pending.target,
                        source,
                    },
                    reconciliation,
                }
            }
        }
    }

    fn reconcile_failure(
        &self,
        state: &mut BoardState,
        pending: &PendingMove,
        source: &ApiError,
    ) -> Reconciliation {
        if !state.is_current(pending.task_id, pending.generation) {
            return Reconciliation::Superseded;
        }
        match self.settings.reconcile() {
            ReconcilePolicy::MarkUnsynced => {
                state.cards.insert(
                    pending.task_id,
                    CardSync::Unsynced {
                        generation: pending.generation,
                        status: pending.target.clone(),
                        sprint_id: pending.sprint_id,
                        since: self.clock.utc(),
                        reason: source.to_string(),
                    },
                );
                Reconciliation::KeptUnsynced
            }
            ReconcilePolicy::Revert => {
                state.cards.remove(&pending.task_id);
                let removed = state.snapshot.remove(pending.task_id);
                if let (Some((_, mut task)), Some(origin)) = (removed, pending.origin.as_ref()) {
                    task.relocate(origin.status.clone(), pending.previous_sprint);
                    if let Err(err) = state.snapshot.insert_at(task, origin.index) {
                        warn!(task_id = %pending.task_id, error = %err, "could not restore card");
                    }
                }
                Reconciliation::Reverted
            }
        }
    }

    /// Drops the dragged card on `target`: applies the move locally, then
    /// waits for the server.
    pub async fn drop_on_column(&self, target: &StatusKey) -> DropOutcome {
        match self.apply_drop(target) {
            Ok(pending) => self.confirm_move(pending).await,
            Err(reason) => {
                debug!(?reason, column = %target, "drop skipped");
                DropOutcome::Skipped(reason)
            }
        }
    }

    /// Resends the status change of every unsynced card.
    pub async fn retry_unsynced(&self) -> RetryReport {
        let candidates: Vec<(TaskId, u64, StatusKey, Option<SprintId>)> = {
            let state = self.lock();
            let mut candidates: Vec<_> = state
                .cards
                .iter()
                .filter_map(|(task_id, entry)| match entry {
                    CardSync::Unsynced {
                        generation,
                        status,
                        sprint_id,
                        ..
                    } => Some((*task_id, *generation, status.clone(), *sprint_id)),
                    CardSync::Pending { .. } => None,
                })
                .collect();
            candidates.sort_by_key(|(task_id, ..)| *task_id);
            candidates
        };

        let mut report = RetryReport::default();
        for (task_id, generation, status, sprint_id) in candidates {
            let result = self.api.update_task_status(task_id, &status, sprint_id).await;
            let mut state = self.lock();
            if !state.is_current(task_id, generation) {
                continue;
            }
            match result {
                Ok(()) => {
                    state.cards.remove(&task_id);
                    report.confirmed.push(task_id);
                }
                Err(err) => {
                    if let Some(CardSync::Unsynced { reason, .. }) = state.cards.get_mut(&task_id) {
                        *reason = err.to_string();
                    }
                    report.still_unsynced.push(task_id);
                }
            }
        }

        if !report.confirmed.is_empty() {
            self.notifier.notify(Notification::success(format!(
                "Synced {} task(s)",
                report.confirmed.len()
            )));
        }
        if !report.still_unsynced.is_empty() {
            self.notifier.notify(Notification::error(format!(
                "{} task(s) are still out of sync",
                report.still_unsynced.len()
            )));
        }
        report
    }

    /// Returns a copy of the current board.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.lock().snapshot.clone()
    }

    /// Returns the cards in one column, in order.
    #[must_use]
    pub fn tasks_in(&self, status: &StatusKey) -> Vec<Task> {
        self.lock().snapshot.tasks_in(status).to_vec()
    }

    /// Returns the card being dragged, if any.
    #[must_use]
    pub fn dragged_task(&self) -> Option<Task> {
        self.lock().drag.as_ref().map(|marker| marker.task.clone())
    }

    /// Returns the sync phase of one card.
    ///
    /// A card is `Dragging` only until it is dropped; from the local move
    /// until the server answers it is `OptimisticMoved`.
    #[must_use]
    pub fn phase_of(&self, task_id: TaskId) -> SyncPhase {
        let state = self.lock();
        if state
            .drag
            .as_ref()
            .is_some_and(|marker| !marker.dropped && marker.task.id() == task_id)
        {
            return SyncPhase::Dragging;
        }
        match state.cards.get(&task_id) {
            None => SyncPhase::Idle,
            Some(CardSync::Pending { .. }) => SyncPhase::OptimisticMoved,
            Some(CardSync::Unsynced { .. }) => SyncPhase::Unsynced,
        }
    }

    /// Returns every card flagged unsynced, ordered by task id.
    #[must_use]
    pub fn unsynced_tasks(&self) -> Vec<UnsyncedCard> {
        let state = self.lock();
        let mut cards: Vec<UnsyncedCard> = state
            .cards
            .iter()
            .filter_map(|(task_id, entry)| match entry {
                CardSync::Unsynced {
                    status,
                    sprint_id,
                    since,
                    reason,
                    ..
                } => Some(UnsyncedCard {
                    task_id: *task_id,
                    status: status.clone(),
                    sprint_id: *sprint_id,
                    since: *since,
                    reason: reason.clone(),
                }),
                CardSync::Pending { .. } => None,
            })
            .collect();
        cards.sort_by_key(|card| card.task_id);
        cards
    }

    /// Returns the project, user, and active sprint the board is bound to.
    #[must_use]
    pub fn context(&self) -> BoardContext {
        self.lock().context.clone()
    }

    /// Returns when `status` was last loaded successfully.
    #[must_use]
    pub fn loaded_at(&self, status: &StatusKey) -> Option<DateTime<Utc>> {
        self.lock().loaded_at.get(status).copied()
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reports `err` to the notifier and returns it.
    pub(super) fn report<T>(&self, err: BoardSyncError) -> BoardSyncResult<T> {
        self.notifier.notify(Notification::error(err.to_string()));
        Err(err)
    }
}
