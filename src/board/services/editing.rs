//! Task creation, editing, comments, and detail loading.

use mockable::Clock;
use tracing::{info, warn};

use super::{
    BoardSyncController, BoardSyncError, BoardSyncResult, CreateTaskRequest, validate_comment,
    validate_update,
};
use crate::board::{
    domain::{Comment, NewComment, SprintRef, Task, TaskDetail, TaskId, TaskUpdate},
    ports::{BoardApi, Notification, Notifier},
};

impl<A, N, C> BoardSyncController<A, N, C>
where
    A: BoardApi,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Validates and creates a task, then appends it to its column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Validation`] before any network call when
    /// the form is invalid, and [`BoardSyncError::Api`] when the server
    /// rejects the task. Both are reported to the notifier.
    pub async fn create_task(&self, request: CreateTaskRequest) -> BoardSyncResult<Task> {
        let project_id = self.lock().context.project_id();
        let new_task = request
            .validate(self.settings.layout(), project_id)
            .map_err(BoardSyncError::from)
            .or_else(|err| self.report(err))?;

        let created = self
            .api
            .create_task(&new_task)
            .await
            .map_err(|source| BoardSyncError::Api {
                operation: "create task",
                source,
            })
            .or_else(|err| self.report(err))?;

        let inserted = self.lock().snapshot.insert(created.clone());
        if let Err(err) = inserted {
            warn!(task_id = %created.id(), error = %err, "created task has no column");
        }
        info!(task_id = %created.id(), status = %created.status(), "task created");
        self.notifier.notify(Notification::success(format!(
            "Task \"{}\" created",
            created.title()
        )));
        Ok(created)
    }

    /// Applies a field edit and moves the card if its status changed.
    ///
    /// A card that stays in its column keeps its position. Any pending or
    /// unsynced marker on the card is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Validation`] for an empty edit, a blank
    /// title, or an unknown status, and [`BoardSyncError::Api`] when the
    /// server rejects the edit. Both are reported to the notifier.
    pub async fn update_task(
        &self,
        task_id: TaskId,
        update: &TaskUpdate,
    ) -> BoardSyncResult<Task> {
        validate_update(update, self.settings.layout())
            .map_err(BoardSyncError::from)
            .or_else(|err| self.report(err))?;

        let updated = self
            .api
            .update_task(task_id, update)
            .await
            .map_err(|source| BoardSyncError::Api {
                operation: "update task",
                source,
            })
            .or_else(|err| self.report(err))?;

        {
            let mut state = self.lock();
            state.cards.remove(&task_id);
            let placed = match state.snapshot.locate(task_id) {
                Some(location) if &location.status == updated.status() => state
                    .snapshot
                    .insert_at(updated.clone(), location.index),
                _ => state.snapshot.insert(updated.clone()),
            };
            if let Err(err) = placed {
                state.snapshot.remove(task_id);
                warn!(%task_id, error = %err, "updated task left the board");
            }
        }
        info!(%task_id, "task updated");
        self.notifier.notify(Notification::success(format!(
            "Task \"{}\" updated",
            updated.title()
        )));
        Ok(updated)
    }

    /// Posts a comment on a task as the session user.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Validation`] for blank content and
    /// [`BoardSyncError::Api`] when the server rejects the comment. Both
    /// are reported to the notifier.
    pub async fn add_comment(&self, task_id: TaskId, content: &str) -> BoardSyncResult<Comment> {
        let content = validate_comment(content)
            .map_err(BoardSyncError::from)
            .or_else(|err| self.report(err))?;
        let author = self.lock().context.user().id;
        let comment = NewComment {
            task_id,
            content,
            author,
        };

        let created = self
            .api
            .add_comment(&comment)
            .await
            .map_err(|source| BoardSyncError::Api {
                operation: "add comment",
                source,
            })
            .or_else(|err| self.report(err))?;
        self.notifier.notify(Notification::success("Comment added"));
        Ok(created)
    }

    /// Loads a task with its comments and activity feed, concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Fetch`] when any of the three requests
    /// fails; the failure is reported to the notifier.
    pub async fn open_detail(&self, task_id: TaskId) -> BoardSyncResult<TaskDetail> {
        let (task, comments, activities) = tokio::try_join!(
            self.api.get_task_detail(task_id),
            self.api.list_comments(task_id),
            self.api.list_activities(task_id),
        )
        .map_err(|source| BoardSyncError::Fetch {
            what: format!("task {task_id}"),
            source,
        })
        .or_else(|err| self.report(err))?;

        Ok(TaskDetail {
            task,
            comments,
            activities,
        })
    }

    /// Looks up the project's active sprint and stores it in the context.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Fetch`] when the lookup fails; the context
    /// keeps its previous sprint and the failure is reported to the
    /// notifier.
    pub async fn refresh_active_sprint(&self) -> BoardSyncResult<Option<SprintRef>> {
        let project_id = self.lock().context.project_id();
        let sprint = self
            .api
            .find_active_sprint(project_id)
            .await
            .map_err(|source| BoardSyncError::Fetch {
                what: "active sprint".to_owned(),
                source,
            })
            .or_else(|err| self.report(err))?;

        self.lock().context.set_active_sprint(sprint.clone());
        info!(
            %project_id,
            sprint = sprint.as_ref().map_or("none", |active| active.name.as_str()),
            "active sprint refreshed"
        );
        Ok(sprint)
    }
}
