//! In-memory stand-in for the sprint-planning REST API.
//!
//! Mirrors the server's observable behaviour closely enough for board
//! tests: status updates into the backlog drop the sprint association, every
//! mutation appends an activity entry, and failures can be injected per
//! endpoint.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{
        Activity, ActivityId, ActivityKind, Comment, CommentId, NewComment, NewTask, ProjectId,
        SprintId, SprintRef, SprintStatus, StatusKey, Task, TaskId, TaskUpdate, UserId,
    },
    ports::{ApiError, ApiResult, FeedApi, SprintApi, TaskApi},
};

/// A recorded call to [`TaskApi::update_task_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdateCall {
    /// Task being moved.
    pub task_id: TaskId,
    /// Requested status.
    pub status: StatusKey,
    /// Sprint sent with the request.
    pub sprint_id: Option<SprintId>,
}

/// Thread-safe in-memory implementation of every board API port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardApi {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    tasks: BTreeMap<TaskId, StoredTask>,
    comments: Vec<Comment>,
    activities: Vec<Activity>,
    sprints: Vec<(ProjectId, SprintRef)>,
    last_id: u64,
    failures: FailurePlan,
    status_updates: Vec<StatusUpdateCall>,
    list_calls: usize,
    create_calls: usize,
}

#[derive(Debug, Clone)]
struct StoredTask {
    project_id: ProjectId,
    task: Task,
}

#[derive(Debug, Default)]
struct FailurePlan {
    status_updates: bool,
    creates: bool,
    details: bool,
    listings: HashSet<StatusKey>,
}

impl InMemoryBoardState {
    fn allocate_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn record_activity(
        &mut self,
        task_id: TaskId,
        kind: ActivityKind,
        description: String,
        actor: Option<UserId>,
    ) {
        let id = ActivityId::new(self.allocate_id());
        self.activities.push(Activity {
            id,
            task_id,
            kind,
            description,
            actor,
            created_at: None,
        });
    }
}

fn simulated_failure(endpoint: &str) -> ApiError {
    ApiError::Status {
        code: 503,
        message: format!("simulated {endpoint} failure"),
    }
}

impl InMemoryBoardApi {
    /// Creates an empty fake API.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a task for `project_id` as if it had been created earlier.
    pub fn seed_task(&self, project_id: ProjectId, task: Task) {
        let mut state = self.write();
        state.last_id = state.last_id.max(task.id().value());
        state
            .tasks
            .insert(task.id(), StoredTask { project_id, task });
    }

    /// Registers a sprint for `project_id`.
    pub fn seed_sprint(&self, project_id: ProjectId, sprint: SprintRef) {
        let mut state = self.write();
        state.last_id = state.last_id.max(sprint.id.value());
        state.sprints.push((project_id, sprint));
    }

    /// Makes every subsequent status update fail (or succeed again).
    pub fn fail_status_updates(&self, fail: bool) {
        self.write().failures.status_updates = fail;
    }

    /// Makes every subsequent task creation fail (or succeed again).
    pub fn fail_creates(&self, fail: bool) {
        self.write().failures.creates = fail;
    }

    /// Makes every subsequent detail lookup fail (or succeed again).
    pub fn fail_details(&self, fail: bool) {
        self.write().failures.details = fail;
    }

    /// Makes listing `status` fail until [`Self::restore_listing`] is called.
    pub fn fail_listing(&self, status: StatusKey) {
        self.write().failures.listings.insert(status);
    }

    /// Lets listing `status` succeed again.
    pub fn restore_listing(&self, status: &StatusKey) {
        self.write().failures.listings.remove(status);
    }

    /// Returns every status update received, including failed ones.
    #[must_use]
    pub fn status_updates(&self) -> Vec<StatusUpdateCall> {
        self.read().status_updates.clone()
    }

    /// Returns how many column listings were requested.
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.read().list_calls
    }

    /// Returns how many task creations were requested.
    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.read().create_calls
    }

    /// Returns the server-side copy of a task.
    #[must_use]
    pub fn stored_task(&self, task_id: TaskId) -> Option<Task> {
        self.read()
            .tasks
            .get(&task_id)
            .map(|stored| stored.task.clone())
    }

    fn read(&self) -> RwLockReadGuard<'_, InMemoryBoardState> {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryBoardState> {
        self.state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl TaskApi for InMemoryBoardApi {
    async fn list_tasks_by_status(
        &self,
        project_id: ProjectId,
        status: &StatusKey,
    ) -> ApiResult<Vec<Task>> {
        let mut state = self.write();
        state.list_calls += 1;
        if state.failures.listings.contains(status) {
            return Err(simulated_failure("listing"));
        }
        Ok(state
            .tasks
            .values()
            .filter(|stored| stored.project_id == project_id && stored.task.status() == status)
            .map(|stored| stored.task.clone())
            .collect())
    }

    async fn update_task_status(
        &self,
        task_id: TaskId,
        status: &StatusKey,
        sprint_id: Option<SprintId>,
    ) -> ApiResult<()> {
        let mut state = self.write();
        state.status_updates.push(StatusUpdateCall {
            task_id,
            status: status.clone(),
            sprint_id,
        });
        if state.failures.status_updates {
            return Err(simulated_failure("status update"));
        }

        let stored = state
            .tasks
            .get_mut(&task_id)
            .ok_or_else(|| ApiError::NotFound(format!("task {task_id}")))?;
        let previous = stored.task.status().clone();
        let sprint = if status.as_str() == StatusKey::BACKLOG {
            None
        } else {
            sprint_id.or_else(|| stored.task.sprint_id())
        };
        stored.task.relocate(status.clone(), sprint);

        state.record_activity(
            task_id,
            ActivityKind::StatusChanged {
                from: Some(previous.clone()),
                to: status.clone(),
            },
            format!("Task moved from {previous} to {status}."),
            None,
        );
        Ok(())
    }

    async fn create_task(&self, task: &NewTask) -> ApiResult<Task> {
        let mut state = self.write();
        state.create_calls += 1;
        if state.failures.creates {
            return Err(simulated_failure("create"));
        }

        let id = TaskId::new(state.allocate_id());
        let mut created = Task::new(id, task.title.clone(), task.status.clone())
            .with_key(format!("TASK-{id}"))
            .with_priority(task.priority)
            .with_assignee(task.assignee)
            .with_estimate(task.estimate)
            .with_tags(task.tags.iter().cloned());
        if let Some(description) = &task.description {
            created = created.with_description(description.clone());
        }
        if let Some(due_date) = task.due_date {
            created = created.with_due_date(due_date);
        }

        state.tasks.insert(
            id,
            StoredTask {
                project_id: task.project_id,
                task: created.clone(),
            },
        );
        state.record_activity(
            id,
            ActivityKind::Created,
            format!("Task {} created.", task.title),
            Some(task.assignee),
        );
        Ok(created)
    }

    async fn get_task_detail(&self, task_id: TaskId) -> ApiResult<Task> {
        let state = self.read();
        if state.failures.details {
            return Err(simulated_failure("detail"));
        }
        state
            .tasks
            .get(&task_id)
            .map(|stored| stored.task.clone())
            .ok_or_else(|| ApiError::NotFound(format!("task {task_id}")))
    }

    async fn update_task(&self, task_id: TaskId, update: &TaskUpdate) -> ApiResult<Task> {
        let mut state = self.write();
        let stored = state
            .tasks
            .get_mut(&task_id)
            .ok_or_else(|| ApiError::NotFound(format!("task {task_id}")))?;
        let previous = stored.task.status().clone();
        stored.task.apply(update);
        let updated = stored.task.clone();

        if updated.status() != &previous {
            state.record_activity(
                task_id,
                ActivityKind::StatusChanged {
                    from: Some(previous.clone()),
                    to: updated.status().clone(),
                },
                format!("Task moved from {previous} to {}.", updated.status()),
                None,
            );
        }
        Ok(updated)
    }
}

#[async_trait]
impl FeedApi for InMemoryBoardApi {
    async fn list_comments(&self, task_id: TaskId) -> ApiResult<Vec<Comment>> {
        Ok(self
            .read()
            .comments
            .iter()
            .filter(|comment| comment.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn list_activities(&self, task_id: TaskId) -> ApiResult<Vec<Activity>> {
        Ok(self
            .read()
            .activities
            .iter()
            .filter(|activity| activity.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn add_comment(&self, comment: &NewComment) -> ApiResult<Comment> {
        let mut state = self.write();
        if !state.tasks.contains_key(&comment.task_id) {
            return Err(ApiError::NotFound(format!("task {}", comment.task_id)));
        }
        let created = Comment {
            id: CommentId::new(state.allocate_id()),
            task_id: comment.task_id,
            content: comment.content.clone(),
            author: Some(comment.author),
            created_at: None,
        };
        state.comments.push(created.clone());
        state.record_activity(
            comment.task_id,
            ActivityKind::CommentAdded,
            "Comment added.".to_owned(),
            Some(comment.author),
        );
        Ok(created)
    }
}

#[async_trait]
impl SprintApi for InMemoryBoardApi {
    async fn find_active_sprint(&self, project_id: ProjectId) -> ApiResult<Option<SprintRef>> {
        Ok(self
            .read()
            .sprints
            .iter()
            .find(|(owner, sprint)| *owner == project_id && sprint.status == SprintStatus::Active)
            .map(|(_, sprint)| sprint.clone()))
    }
}
