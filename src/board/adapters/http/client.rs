//! `reqwest` implementation of the board API ports.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use super::models::{
    ActivityRecord, CommentRecord, CreateCommentBody, CreateTaskBody, OneOrMany, Payload,
    SprintRecord, TaskRecord, UpdateTaskBody,
};
use crate::board::{
    domain::{
        Activity, Comment, NewComment, NewTask, ProjectId, SprintId, SprintRef, SprintStatus,
        StatusKey, Task, TaskId, TaskUpdate,
    },
    ports::{ApiError, ApiResult, FeedApi, SprintApi, TaskApi},
};
use crate::config::ApiConfig;

/// Header carrying the per-request correlation identifier.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest response excerpt kept in error messages.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP client for the sprint-planning REST API.
#[derive(Debug, Clone)]
pub struct HttpBoardApi {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpBoardApi {
    /// Creates a client for `base_url` with the transport's default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::build(base_url.into(), None, None)
    }

    /// Creates a client from API configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        Self::build(
            config.base_url.clone(),
            config.timeout_secs.map(Duration::from_secs),
            config.bearer_token.clone(),
        )
    }

    fn build(
        base_url: String,
        timeout: Option<Duration>,
        bearer_token: Option<String>,
    ) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ApiError::transport)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            bearer_token,
        })
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let request_id = Uuid::new_v4();
        debug!(%request_id, %method, %url, "sending API request");
        let builder = self
            .client
            .request(method, url)
            .header(REQUEST_ID_HEADER, request_id.to_string());
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request and returns the raw body of a successful response.
    async fn send(&self, request: RequestBuilder, path: &str) -> ApiResult<Vec<u8>> {
        let response = request.send().await.map_err(ApiError::transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::transport)?;

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_owned()));
        }
        if !status.is_success() {
            let message = excerpt(&body);
            warn!(code = status.as_u16(), %path, %message, "API request failed");
            return Err(ApiError::Status {
                code: status.as_u16(),
                message,
            });
        }
        Ok(body.to_vec())
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> ApiResult<T> {
        let body = self.send(request, path).await?;
        decode(&body)
    }
}

/// Decodes a bare or envelope-wrapped body.
fn decode<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    match serde_json::from_slice::<Payload<T>>(body).map_err(ApiError::decode)? {
        Payload::Bare(value) => Ok(value),
        Payload::Envelope(envelope) if envelope.success => envelope
            .data
            .ok_or_else(|| ApiError::Decode("successful envelope without data".to_owned())),
        Payload::Envelope(envelope) => Err(ApiError::Rejected {
            message: envelope
                .error
                .unwrap_or_else(|| "request failed".to_owned()),
        }),
    }
}

/// Checks an acknowledgement body, which may be empty.
fn decode_ack(body: &[u8]) -> ApiResult<()> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }
    match serde_json::from_slice::<Payload<serde_json::Value>>(body) {
        Ok(Payload::Envelope(envelope)) if !envelope.success => Err(ApiError::Rejected {
            message: envelope
                .error
                .unwrap_or_else(|| "request failed".to_owned()),
        }),
        _ => Ok(()),
    }
}

fn excerpt(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(MAX_ERROR_BODY_CHARS)
        .collect()
}

fn into_tasks(records: Vec<TaskRecord>) -> ApiResult<Vec<Task>> {
    records
        .into_iter()
        .map(|record| Task::try_from(record).map_err(ApiError::decode))
        .collect()
}

#[async_trait]
impl TaskApi for HttpBoardApi {
    async fn list_tasks_by_status(
        &self,
        project_id: ProjectId,
        status: &StatusKey,
    ) -> ApiResult<Vec<Task>> {
        let path = "/tasks";
        let request = self.request(Method::GET, path).query(&[
            ("projectId", project_id.to_string()),
            ("status", status.to_string()),
        ]);
        let records: Vec<TaskRecord> = self.fetch(request, path).await?;
        into_tasks(records)
    }

    async fn update_task_status(
        &self,
        task_id: TaskId,
        status: &StatusKey,
        sprint_id: Option<SprintId>,
    ) -> ApiResult<()> {
        let path = format!("/tasks/{task_id}/status/{status}");
        let mut request = self.request(Method::PUT, &path);
        if let Some(sprint_id) = sprint_id {
            request = request.query(&[("sprintId", sprint_id.value())]);
        }
        let body = self.send(request, &path).await?;
        decode_ack(&body)
    }

    async fn create_task(&self, task: &NewTask) -> ApiResult<Task> {
        let path = "/tasks";
        let request = self
            .request(Method::POST, path)
            .json(&CreateTaskBody::from(task));
        let record: TaskRecord = self.fetch(request, path).await?;
        Task::try_from(record).map_err(ApiError::decode)
    }

    async fn get_task_detail(&self, task_id: TaskId) -> ApiResult<Task> {
        let path = format!("/tasks/{task_id}");
        let request = self.request(Method::GET, &path);
        let record: TaskRecord = self.fetch(request, &path).await?;
        Task::try_from(record).map_err(ApiError::decode)
    }

    async fn update_task(&self, task_id: TaskId, update: &TaskUpdate) -> ApiResult<Task> {
        let path = format!("/tasks/{task_id}");
        let request = self
            .request(Method::PUT, &path)
            .json(&UpdateTaskBody::from(update));
        let record: TaskRecord = self.fetch(request, &path).await?;
        Task::try_from(record).map_err(ApiError::decode)
    }
}

#[async_trait]
impl FeedApi for HttpBoardApi {
    async fn list_comments(&self, task_id: TaskId) -> ApiResult<Vec<Comment>> {
        let path = format!("/comments/task/{task_id}");
        let request = self.request(Method::GET, &path);
        let records: Vec<CommentRecord> = self.fetch(request, &path).await?;
        Ok(records.into_iter().map(Comment::from).collect())
    }

    async fn list_activities(&self, task_id: TaskId) -> ApiResult<Vec<Activity>> {
        let path = format!("/activities/task/{task_id}");
        let request = self.request(Method::GET, &path);
        let records: Vec<ActivityRecord> = self.fetch(request, &path).await?;
        records
            .into_iter()
            .map(|record| Activity::try_from(record).map_err(ApiError::decode))
            .collect()
    }

    async fn add_comment(&self, comment: &NewComment) -> ApiResult<Comment> {
        let path = "/comments";
        let request = self
            .request(Method::POST, path)
            .json(&CreateCommentBody::from(comment));
        let record: CommentRecord = self.fetch(request, path).await?;
        Ok(Comment::from(record))
    }
}

#[async_trait]
impl SprintApi for HttpBoardApi {
    async fn find_active_sprint(&self, project_id: ProjectId) -> ApiResult<Option<SprintRef>> {
        let path = format!(
            "/sprints/project/{project_id}/status/{}",
            SprintStatus::Active.as_str()
        );
        let request = self.request(Method::GET, &path);
        let body = match self.send(request, &path).await {
            Ok(body) => body,
            Err(ApiError::NotFound(_)) => return Ok(None),
            Err(err) => return Err(err),
        };
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let records: OneOrMany<SprintRecord> = decode(&body)?;
        Ok(records
            .into_vec()
            .into_iter()
            .map(SprintRef::from)
            .find(|sprint| sprint.status == SprintStatus::Active))
    }
}
