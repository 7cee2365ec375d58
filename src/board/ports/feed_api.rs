//! Comment and activity endpoints of the REST API.

use super::ApiResult;
use crate::board::domain::{Activity, Comment, NewComment, TaskId};
use async_trait::async_trait;

/// Remote comment and activity collaborator.
///
/// Both feeds are append-only; the board only reads them and posts new
/// comments.
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// Lists the comments of a task.
    ///
    /// # Errors
    ///
    /// Returns [`super::ApiError`] when the request fails.
    async fn list_comments(&self, task_id: TaskId) -> ApiResult<Vec<Comment>>;

    /// Lists the activity entries of a task.
    ///
    /// # Errors
    ///
    /// Returns [`super::ApiError`] when the request fails or an entry cannot
    /// be decoded.
    async fn list_activities(&self, task_id: TaskId) -> ApiResult<Vec<Activity>>;

    /// Posts a comment and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`super::ApiError`] when the server rejects the comment.
    async fn add_comment(&self, comment: &NewComment) -> ApiResult<Comment>;
}
