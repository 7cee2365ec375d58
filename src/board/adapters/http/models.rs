//! JSON wire records exchanged with the REST API.
//!
//! Records mirror the server's camelCase DTOs and are converted into domain
//! types at the adapter boundary.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::board::domain::{
    Activity, ActivityId, ActivityKind, ApiEnvelope, BoardDomainError, Comment, CommentId,
    NewComment, NewTask, Priority, SprintId, SprintRef, SprintStatus, StatusKey, Task, TaskId,
    TaskUpdate, UserId,
};

/// Task as returned by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub sprint_id: Option<u64>,
    #[serde(default)]
    pub assignee: Option<u64>,
    #[serde(default)]
    pub tags: Option<BTreeSet<String>>,
    #[serde(default)]
    pub priority: Option<Priority>,
    pub status: String,
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub story_points: Option<u32>,
    #[serde(default)]
    pub estimate: Option<u32>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = BoardDomainError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let mut task = Self::new(
            TaskId::new(record.id),
            record.title,
            StatusKey::new(record.status)?,
        )
        .with_priority(record.priority.unwrap_or_default())
        .with_estimate(record.estimate.unwrap_or_default())
        .with_story_points(record.story_points.unwrap_or_default())
        .with_tags(record.tags.unwrap_or_default());
        if let Some(key) = record.key {
            task = task.with_key(key);
        }
        if let Some(description) = record.description {
            task = task.with_description(description);
        }
        if let Some(assignee) = record.assignee {
            task = task.with_assignee(UserId::new(assignee));
        }
        if let Some(due_date) = record.due_date {
            task = task.with_due_date(due_date);
        }
        if let Some(sprint_id) = record.sprint_id {
            task = task.with_sprint(SprintId::new(sprint_id));
        }
        Ok(task)
    }
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub priority: Priority,
    pub assignee: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    pub estimate: u32,
    pub project_id: u64,
    pub status: &'a str,
    pub tags: &'a BTreeSet<String>,
}

impl<'a> From<&'a NewTask> for CreateTaskBody<'a> {
    fn from(task: &'a NewTask) -> Self {
        Self {
            title: &task.title,
            description: task.description.as_deref().unwrap_or_default(),
            priority: task.priority,
            assignee: task.assignee.value(),
            due_date: task.due_date,
            estimate: task.estimate,
            project_id: task.project_id.value(),
            status: task.status.as_str(),
            tags: &task.tags,
        }
    }
}

/// Body of `PUT /tasks/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<&'a BTreeSet<String>>,
}

impl<'a> From<&'a TaskUpdate> for UpdateTaskBody<'a> {
    fn from(update: &'a TaskUpdate) -> Self {
        Self {
            title: update.title.as_deref(),
            description: update.description.as_deref(),
            status: update.status.as_ref().map(StatusKey::as_str),
            priority: update.priority,
            assignee: update.assignee.map(UserId::value),
            due_date: update.due_date,
            sprint_id: update.sprint_id.map(SprintId::value),
            estimate: update.estimate,
            story_points: update.story_points,
            tags: update.tags.as_ref(),
        }
    }
}

/// Comment as returned by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub id: u64,
    pub content: String,
    pub task_id: u64,
    #[serde(default)]
    pub author: Option<u64>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: CommentId::new(record.id),
            task_id: TaskId::new(record.task_id),
            content: record.content,
            author: record.author.map(UserId::new),
            created_at: record.created_at,
        }
    }
}

/// Body of `POST /comments`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentBody<'a> {
    pub task_id: u64,
    pub content: &'a str,
    pub author: u64,
}

impl<'a> From<&'a NewComment> for CreateCommentBody<'a> {
    fn from(comment: &'a NewComment) -> Self {
        Self {
            task_id: comment.task_id.value(),
            content: &comment.content,
            author: comment.author.value(),
        }
    }
}

/// Flat activity record as returned by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub actor: Option<u64>,
    pub task_id: u64,
    #[serde(default)]
    pub old_value: Option<String>,
    #[serde(default)]
    pub new_value: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl TryFrom<ActivityRecord> for Activity {
    type Error = BoardDomainError;

    fn try_from(record: ActivityRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ActivityId::new(record.id),
            task_id: TaskId::new(record.task_id),
            kind: ActivityKind::from_wire(&record.kind, record.old_value, record.new_value)?,
            description: record.description,
            actor: record.actor.map(UserId::new),
            created_at: record.created_at,
        })
    }
}

/// Sprint as returned by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintRecord {
    pub id: u64,
    pub name: String,
    pub status: SprintStatus,
}

impl From<SprintRecord> for SprintRef {
    fn from(record: SprintRecord) -> Self {
        Self {
            id: SprintId::new(record.id),
            name: record.name,
            status: record.status,
        }
    }
}

/// Endpoints that may answer with a single record or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

/// A body that is either wrapped in the result envelope or bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Envelope(ApiEnvelope<T>),
    Bare(T),
}
