//! Task endpoints of the REST API.

use super::ApiResult;
use crate::board::domain::{NewTask, ProjectId, SprintId, StatusKey, Task, TaskId, TaskUpdate};
use async_trait::async_trait;

/// Remote task collaborator.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Lists the tasks of a project in one status, in server order.
    ///
    /// # Errors
    ///
    /// Returns [`super::ApiError`] when the request fails.
    async fn list_tasks_by_status(
        &self,
        project_id: ProjectId,
        status: &StatusKey,
    ) -> ApiResult<Vec<Task>>;

    /// Moves a task to `status`, associating it with `sprint_id` when given.
    ///
    /// The response body is ignored; the board does not re-derive its state
    /// from confirmations.
    ///
    /// # Errors
    ///
    /// Returns [`super::ApiError`] when the server does not acknowledge the
    /// update.
    async fn update_task_status(
        &self,
        task_id: TaskId,
        status: &StatusKey,
        sprint_id: Option<SprintId>,
    ) -> ApiResult<()>;

    /// Creates a task and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`super::ApiError`] when the server rejects the task.
    async fn create_task(&self, task: &NewTask) -> ApiResult<Task>;

    /// Fetches a single task.
    ///
    /// # Errors
    ///
    /// Returns [`super::ApiError::NotFound`] for unknown tasks and other
    /// variants when the request fails.
    async fn get_task_detail(&self, task_id: TaskId) -> ApiResult<Task>;

    /// Applies a partial field edit and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`super::ApiError`] when the server rejects the edit.
    async fn update_task(&self, task_id: TaskId, update: &TaskUpdate) -> ApiResult<Task>;
}
