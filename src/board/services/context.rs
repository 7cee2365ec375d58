//! Construction of a board context from the server.

use tracing::debug;

use crate::board::{
    domain::{BoardContext, ProjectId, SessionUser},
    ports::{ApiResult, SprintApi},
};

impl BoardContext {
    /// Builds the context for `project_id`, looking up its active sprint.
    ///
    /// # Errors
    ///
    /// Returns the API error when the sprint lookup fails.
    pub async fn resolve<S>(
        sprint_api: &S,
        project_id: ProjectId,
        user: SessionUser,
    ) -> ApiResult<Self>
    where
        S: SprintApi + ?Sized,
    {
        let context = Self::new(project_id, user);
        let Some(sprint) = sprint_api.find_active_sprint(project_id).await? else {
            debug!(%project_id, "project has no active sprint");
            return Ok(context);
        };
        debug!(%project_id, sprint_id = %sprint.id, "resolved active sprint");
        Ok(context.with_active_sprint(sprint))
    }
}
