//! Shared world state for board synchronization BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use sprintboard::board::{
    adapters::memory::{InMemoryBoardApi, RecordingNotifier},
    domain::{BoardContext, ProjectId, SessionUser, SprintRef, StatusKey, Task, UserId},
    services::{BoardSettings, BoardSyncController, BoardSyncError, DropOutcome, RetryReport},
};

/// Controller type used by the BDD world.
pub type WorldBoard = BoardSyncController<InMemoryBoardApi, RecordingNotifier, DefaultClock>;

/// Project every scenario works in.
pub const PROJECT: ProjectId = ProjectId::new(1);

/// Scenario world for board synchronization behaviour tests.
pub struct BoardWorld {
    pub api: Arc<InMemoryBoardApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub settings: BoardSettings,
    pub sprint: Option<SprintRef>,
    pub board: Option<WorldBoard>,
    pub last_outcome: Option<DropOutcome>,
    pub last_create: Option<Result<Task, BoardSyncError>>,
    pub last_retry: Option<RetryReport>,
}

impl BoardWorld {
    /// Creates a world with an empty server and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api: Arc::new(InMemoryBoardApi::new()),
            notifier: Arc::new(RecordingNotifier::new()),
            settings: BoardSettings::default(),
            sprint: None,
            board: None,
            last_outcome: None,
            last_create: None,
            last_retry: None,
        }
    }

    /// Returns the board, building it from the current setup on first use.
    pub fn board(&mut self) -> WorldBoard {
        self.board
            .get_or_insert_with(|| {
                let mut context = BoardContext::new(PROJECT, SessionUser::new(UserId::new(7), "Dana"));
                if let Some(sprint) = self.sprint.clone() {
                    context = context.with_active_sprint(sprint);
                }
                BoardSyncController::new(
                    Arc::clone(&self.api),
                    Arc::clone(&self.notifier),
                    Arc::new(DefaultClock),
                    context,
                    self.settings.clone(),
                )
            })
            .clone()
    }

    /// Returns the board built by an earlier step.
    pub fn built_board(&self) -> Result<&WorldBoard, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("board has not been built in this scenario"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Parses a status key written in a feature file.
pub fn column(raw: &str) -> Result<StatusKey, eyre::Report> {
    StatusKey::new(raw).map_err(|err| eyre::eyre!("invalid column in scenario: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
