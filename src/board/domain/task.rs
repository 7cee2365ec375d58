//! Task card, creation payload, and partial update types.

use super::{ProjectId, SprintId, StatusKey, TaskId, UserId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Task priority as displayed on a card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Highest priority.
    Highest,
    /// High priority.
    High,
    /// Medium priority.
    #[default]
    Medium,
    /// Low priority.
    Low,
    /// Lowest priority.
    Lowest,
}

impl Priority {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Highest => "HIGHEST",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Lowest => "LOWEST",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task card as held on the board.
///
/// Only `id`, `status`, and `sprint_id` are interpreted by the board; every
/// other attribute is carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    key: Option<String>,
    title: String,
    description: Option<String>,
    status: StatusKey,
    priority: Priority,
    assignee: Option<UserId>,
    due_date: Option<NaiveDateTime>,
    sprint_id: Option<SprintId>,
    estimate: u32,
    story_points: u32,
    tags: BTreeSet<String>,
}

impl Task {
    /// Creates a task with the given identity, title, and status.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>, status: StatusKey) -> Self {
        Self {
            id,
            key: None,
            title: title.into(),
            description: None,
            status,
            priority: Priority::default(),
            assignee: None,
            due_date: None,
            sprint_id: None,
            estimate: 0,
            story_points: 0,
            tags: BTreeSet::new(),
        }
    }

    /// Sets the human-readable task key (for example `PRJ-12`).
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDateTime) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Associates the task with a sprint.
    #[must_use]
    pub const fn with_sprint(mut self, sprint_id: SprintId) -> Self {
        self.sprint_id = Some(sprint_id);
        self
    }

    /// Sets the estimate in hours.
    #[must_use]
    pub const fn with_estimate(mut self, estimate: u32) -> Self {
        self.estimate = estimate;
        self
    }

    /// Sets the story points.
    #[must_use]
    pub const fn with_story_points(mut self, story_points: u32) -> Self {
        self.story_points = story_points;
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the human-readable key, if the server assigned one.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status the task is believed to be in.
    #[must_use]
    pub const fn status(&self) -> &StatusKey {
        &self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDateTime> {
        self.due_date
    }

    /// Returns the associated sprint, if any.
    #[must_use]
    pub const fn sprint_id(&self) -> Option<SprintId> {
        self.sprint_id
    }

    /// Returns the estimate in hours.
    #[must_use]
    pub const fn estimate(&self) -> u32 {
        self.estimate
    }

    /// Returns the story points.
    #[must_use]
    pub const fn story_points(&self) -> u32 {
        self.story_points
    }

    /// Returns the tags.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Moves the task to `status` with the given sprint association.
    pub fn relocate(&mut self, status: StatusKey, sprint_id: Option<SprintId>) {
        self.status = status;
        self.sprint_id = sprint_id;
    }

    /// Applies the populated fields of `update`.
    pub fn apply(&mut self, update: &TaskUpdate) {
        if let Some(title) = &update.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        if let Some(status) = &update.status {
            self.status = status.clone();
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(assignee) = update.assignee {
            self.assignee = Some(assignee);
        }
        if let Some(due_date) = update.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(sprint_id) = update.sprint_id {
            self.sprint_id = Some(sprint_id);
        }
        if let Some(estimate) = update.estimate {
            self.estimate = estimate;
        }
        if let Some(story_points) = update.story_points {
            self.story_points = story_points;
        }
        if let Some(tags) = &update.tags {
            self.tags.clone_from(tags);
        }
    }
}

/// Validated payload for creating a task on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Project the task belongs to.
    pub project_id: ProjectId,
    /// Non-blank title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority.
    pub priority: Priority,
    /// Assignee.
    pub assignee: UserId,
    /// Optional due date.
    pub due_date: Option<NaiveDateTime>,
    /// Estimate in hours.
    pub estimate: u32,
    /// Initial status, a configured board column.
    pub status: StatusKey,
    /// Initial tags.
    pub tags: BTreeSet<String>,
}

/// Partial field edit of an existing task; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New status.
    pub status: Option<StatusKey>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New assignee.
    pub assignee: Option<UserId>,
    /// New due date.
    pub due_date: Option<NaiveDateTime>,
    /// New sprint association.
    pub sprint_id: Option<SprintId>,
    /// New estimate in hours.
    pub estimate: Option<u32>,
    /// New story points.
    pub story_points: Option<u32>,
    /// Replacement tag set.
    pub tags: Option<BTreeSet<String>>,
}

impl TaskUpdate {
    /// Returns whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
