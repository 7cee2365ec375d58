//! Comment and activity feed records attached to a task.

use super::{ActivityId, BoardDomainError, CommentId, StatusKey, TaskId, UserId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A comment posted on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment identifier.
    pub id: CommentId,
    /// Task the comment belongs to.
    pub task_id: TaskId,
    /// Comment body.
    pub content: String,
    /// Author, when known.
    pub author: Option<UserId>,
    /// Creation time reported by the server.
    pub created_at: Option<NaiveDateTime>,
}

/// Payload for posting a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Task to comment on.
    pub task_id: TaskId,
    /// Non-blank comment body.
    pub content: String,
    /// Posting user.
    pub author: UserId,
}

/// Old and new value of a changed task attribute, as rendered by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueChange {
    /// Previous value.
    pub from: Option<String>,
    /// New value.
    pub to: Option<String>,
}

impl ValueChange {
    /// Creates a change record.
    #[must_use]
    pub const fn new(from: Option<String>, to: Option<String>) -> Self {
        Self { from, to }
    }
}

/// What happened to a task, discriminated by the activity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityKind {
    /// The task was created.
    Created,
    /// The task moved between columns.
    StatusChanged {
        /// Previous status, when recorded.
        from: Option<StatusKey>,
        /// New status.
        to: StatusKey,
    },
    /// The assignee changed.
    AssigneeChanged(ValueChange),
    /// The priority changed.
    PriorityChanged(ValueChange),
    /// The sprint association changed.
    SprintChanged(ValueChange),
    /// The description was edited.
    DescriptionUpdated,
    /// A comment was posted.
    CommentAdded,
    /// The estimate changed.
    EstimateUpdated(ValueChange),
    /// The story points changed.
    StoryPointsUpdated(ValueChange),
    /// The due date changed.
    DueDateChanged(ValueChange),
    /// The tag set changed.
    TagsUpdated,
}

impl ActivityKind {
    /// Returns the wire discriminant.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::StatusChanged { .. } => "STATUS_CHANGED",
            Self::AssigneeChanged(_) => "ASSIGNEE_CHANGED",
            Self::PriorityChanged(_) => "PRIORITY_CHANGED",
            Self::SprintChanged(_) => "SPRINT_CHANGED",
            Self::DescriptionUpdated => "DESCRIPTION_UPDATED",
            Self::CommentAdded => "COMMENT_ADDED",
            Self::EstimateUpdated(_) => "ESTIMATE_UPDATED",
            Self::StoryPointsUpdated(_) => "STORY_POINTS_UPDATED",
            Self::DueDateChanged(_) => "DUE_DATE_CHANGED",
            Self::TagsUpdated => "TAGS_UPDATED",
        }
    }

    /// Rebuilds a typed kind from the flat `{type, oldValue, newValue}` wire
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownActivityType`] for an unsupported
    /// discriminant, [`BoardDomainError::MissingActivityValue`] when a status
    /// change has no new value, and [`BoardDomainError::InvalidStatus`] when
    /// a status value cannot be parsed.
    pub fn from_wire(
        kind: &str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Result<Self, BoardDomainError> {
        let change = || ValueChange::new(old_value.clone(), new_value.clone());
        let parsed = match kind.trim().to_ascii_uppercase().as_str() {
            "CREATED" => Self::Created,
            "STATUS_CHANGED" => {
                let to = new_value
                    .clone()
                    .ok_or_else(|| BoardDomainError::MissingActivityValue {
                        kind: kind.to_owned(),
                        field: "newValue",
                    })?;
                Self::StatusChanged {
                    from: old_value.clone().map(StatusKey::new).transpose()?,
                    to: StatusKey::new(to)?,
                }
            }
            "ASSIGNEE_CHANGED" => Self::AssigneeChanged(change()),
            "PRIORITY_CHANGED" => Self::PriorityChanged(change()),
            "SPRINT_CHANGED" => Self::SprintChanged(change()),
            "DESCRIPTION_UPDATED" => Self::DescriptionUpdated,
            "COMMENT_ADDED" => Self::CommentAdded,
            "ESTIMATE_UPDATED" => Self::EstimateUpdated(change()),
            "STORY_POINTS_UPDATED" => Self::StoryPointsUpdated(change()),
            "DUE_DATE_CHANGED" => Self::DueDateChanged(change()),
            "TAGS_UPDATED" => Self::TagsUpdated,
            _ => return Err(BoardDomainError::UnknownActivityType(kind.to_owned())),
        };
        Ok(parsed)
    }
}

/// Append-only activity feed entry for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Entry identifier.
    pub id: ActivityId,
    /// Task the entry belongs to.
    pub task_id: TaskId,
    /// Typed activity payload.
    pub kind: ActivityKind,
    /// Server-rendered description.
    pub description: String,
    /// Acting user, when known.
    pub actor: Option<UserId>,
    /// Creation time reported by the server.
    pub created_at: Option<NaiveDateTime>,
}
