//! Shared fixtures for board tests.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::fixture;
use tokio::sync::{Notify, Semaphore};

use crate::board::{
    adapters::memory::{InMemoryBoardApi, RecordingNotifier},
    domain::{
        Activity, BoardContext, Comment, NewComment, NewTask, ProjectId, SessionUser, SprintId,
        SprintRef, StatusKey, Task, TaskId, TaskUpdate, UserId,
    },
    ports::{ApiResult, FeedApi, SprintApi, TaskApi},
    services::{BoardSettings, BoardSyncController},
};

pub(super) const PROJECT: ProjectId = ProjectId::new(1);
pub(super) const ACTIVE_SPRINT: SprintId = SprintId::new(900);
pub(super) const SESSION_USER: UserId = UserId::new(7);

pub(super) type TestBoard = BoardSyncController<InMemoryBoardApi, RecordingNotifier, DefaultClock>;

pub(super) fn status(raw: &str) -> StatusKey {
    StatusKey::new(raw).expect("valid status key")
}

pub(super) fn active_sprint() -> SprintRef {
    SprintRef::active(ACTIVE_SPRINT, "Sprint 9")
}

pub(super) struct Harness {
    pub(super) api: Arc<InMemoryBoardApi>,
    pub(super) notifier: Arc<RecordingNotifier>,
    pub(super) board: TestBoard,
}

impl Harness {
    pub(super) fn new(settings: BoardSettings, sprint: Option<SprintRef>) -> Self {
        let api = Arc::new(InMemoryBoardApi::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let mut context = BoardContext::new(PROJECT, SessionUser::new(SESSION_USER, "Dana"));
        if let Some(active) = sprint {
            api.seed_sprint(PROJECT, active.clone());
            context = context.with_active_sprint(active);
        }
        let board = BoardSyncController::new(
            Arc::clone(&api),
            Arc::clone(&notifier),
            Arc::new(DefaultClock),
            context,
            settings,
        );
        Self {
            api,
            notifier,
            board,
        }
    }

    /// Stores a task on the server side only.
    pub(super) fn seed(&self, id: u64, title: &str, column: &str) -> Task {
        let task = Task::new(TaskId::new(id), title, status(column));
        self.api.seed_task(PROJECT, task.clone());
        task
    }

    /// Loads every column, failing the test when any column fails.
    pub(super) async fn load(&self) {
        let report = self.board.load_board().await;
        assert!(report.is_complete(), "board should load: {:?}", report.failed);
    }

    pub(super) fn ids_in(&self, column: &str) -> Vec<u64> {
        self.board
            .tasks_in(&status(column))
            .iter()
            .map(|task| task.id().value())
            .collect()
    }

    pub(super) fn card(&self, id: u64) -> Task {
        self.board
            .snapshot()
            .get(TaskId::new(id))
            .cloned()
            .expect("task should be on the board")
    }
}

#[fixture]
pub(super) fn harness() -> Harness {
    Harness::new(BoardSettings::default(), Some(active_sprint()))
}

/// In-memory API whose status updates wait until the test releases them.
pub(super) struct GatedBoardApi {
    pub(super) inner: InMemoryBoardApi,
    arrived: Notify,
    release: Semaphore,
}

impl GatedBoardApi {
    pub(super) fn new() -> Self {
        Self {
            inner: InMemoryBoardApi::new(),
            arrived: Notify::new(),
            release: Semaphore::new(0),
        }
    }

    /// Waits until a status update has reached the server.
    pub(super) async fn wait_for_status_update(&self) {
        self.arrived.notified().await;
    }

    /// Lets one held status update through.
    pub(super) fn release_one(&self) {
        self.release.add_permits(1);
    }
}

#[async_trait]
impl TaskApi for GatedBoardApi {
    async fn list_tasks_by_status(
        &self,
        project_id: ProjectId,
        status: &StatusKey,
    ) -> ApiResult<Vec<Task>> {
        self.inner.list_tasks_by_status(project_id, status).await
    }

    async fn update_task_status(
        &self,
        task_id: TaskId,
        status: &StatusKey,
        sprint_id: Option<SprintId>,
    ) -> ApiResult<()> {
        self.arrived.notify_one();
        self.release
            .acquire()
            .await
            .expect("gate stays open")
            .forget();
        self.inner.update_task_status(task_id, status, sprint_id).await
    }

    async fn create_task(&self, task: &NewTask) -> ApiResult<Task> {
        self.inner.create_task(task).await
    }

    async fn get_task_detail(&self, task_id: TaskId) -> ApiResult<Task> {
        self.inner.get_task_detail(task_id).await
    }

    async fn update_task(&self, task_id: TaskId, update: &TaskUpdate) -> ApiResult<Task> {
        self.inner.update_task(task_id, update).await
    }
}

#[async_trait]
impl FeedApi for GatedBoardApi {
    async fn list_comments(&self, task_id: TaskId) -> ApiResult<Vec<Comment>> {
        self.inner.list_comments(task_id).await
    }

    async fn list_activities(&self, task_id: TaskId) -> ApiResult<Vec<Activity>> {
        self.inner.list_activities(task_id).await
    }

    async fn add_comment(&self, comment: &NewComment) -> ApiResult<Comment> {
        self.inner.add_comment(comment).await
    }
}

#[async_trait]
impl SprintApi for GatedBoardApi {
    async fn find_active_sprint(&self, project_id: ProjectId) -> ApiResult<Option<SprintRef>> {
        self.inner.find_active_sprint(project_id).await
    }
}
