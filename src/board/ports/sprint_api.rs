//! Sprint endpoints of the REST API.

use super::ApiResult;
use crate::board::domain::{ProjectId, SprintRef};
use async_trait::async_trait;

/// Remote sprint collaborator.
#[async_trait]
pub trait SprintApi: Send + Sync {
    /// Returns the project's active sprint, or `None` when no sprint is in
    /// progress.
    ///
    /// # Errors
    ///
    /// Returns [`super::ApiError`] when the request fails.
    async fn find_active_sprint(&self, project_id: ProjectId) -> ApiResult<Option<SprintRef>>;
}
