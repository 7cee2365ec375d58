//! Client-side validation of task and comment input.
//!
//! Obviously invalid input is rejected before any network round trip.
//! Every issue is collected rather than stopping at the first one.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::board::domain::{
    BoardLayout, NewTask, Priority, ProjectId, StatusKey, TaskUpdate, UserId,
};

/// One problem with a submitted field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldIssue {
    /// A required field was empty or absent.
    #[error("{0} is required")]
    Missing(&'static str),
    /// A field was present but unusable.
    #[error("{field} {reason}")]
    Invalid {
        /// Field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl FieldIssue {
    /// Returns the name of the affected field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Missing(field) | Self::Invalid { field, .. } => field,
        }
    }
}

/// Input rejected before reaching the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {}", format_issues(.issues))]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Returns every issue found.
    #[must_use]
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Returns whether `field` has an issue.
    #[must_use]
    pub fn has_issue_for(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field() == field)
    }

    fn check(issues: Vec<FieldIssue>) -> Result<(), Self> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(Self { issues })
        }
    }
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Request payload for creating a task from the new-task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    assignee: String,
    description: Option<String>,
    priority: Priority,
    due_date: Option<NaiveDateTime>,
    estimate: u32,
    status: Option<String>,
    tags: Vec<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required form fields, as typed.
    #[must_use]
    pub fn new(title: impl Into<String>, assignee: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            assignee: assignee.into(),
            description: None,
            priority: Priority::default(),
            due_date: None,
            estimate: 0,
            status: None,
            tags: Vec::new(),
        }
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

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDateTime) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the estimate in hours.
    #[must_use]
    pub const fn with_estimate(mut self, estimate: u32) -> Self {
        self.estimate = estimate;
        self
    }

    /// Overrides the initial status, which otherwise is the layout default.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Validates the request into a creation payload for `project_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing a blank title, a blank or
    /// non-numeric assignee, and a status that is not a layout column.
    pub fn validate(
        self,
        layout: &BoardLayout,
        project_id: ProjectId,
    ) -> Result<NewTask, ValidationError> {
        let mut issues = Vec::new();

        let title = self.title.trim().to_owned();
        if title.is_empty() {
            issues.push(FieldIssue::Missing("title"));
        }

        let assignee = match self.assignee.trim() {
            "" => {
                issues.push(FieldIssue::Missing("assignee"));
                None
            }
            raw => raw.parse::<UserId>().map_or_else(
                |_| {
                    issues.push(FieldIssue::Invalid {
                        field: "assignee",
                        reason: format!("must be a user id, got {raw:?}"),
                    });
                    None
                },
                Some,
            ),
        };

        let status = match self.status {
            None => Some(layout.default_status().clone()),
            Some(raw) => column_status(layout, &raw, &mut issues),
        };

        match (assignee, status) {
            (Some(assignee), Some(status)) if issues.is_empty() => Ok(NewTask {
                project_id,
                title,
                description: self
                    .description
                    .map(|text| text.trim().to_owned())
                    .filter(|text| !text.is_empty()),
                priority: self.priority,
                assignee,
                due_date: self.due_date,
                estimate: self.estimate,
                status,
                tags: self.tags.into_iter().collect(),
            }),
            _ => Err(ValidationError { issues }),
        }
    }
}

/// Parses `raw` as a status that names a layout column.
fn column_status(layout: &BoardLayout, raw: &str, issues: &mut Vec<FieldIssue>) -> Option<StatusKey> {
    match StatusKey::new(raw) {
        Ok(status) if layout.contains(&status) => Some(status),
        Ok(status) => {
            issues.push(FieldIssue::Invalid {
                field: "status",
                reason: format!("{status} is not a board column"),
            });
            None
        }
        Err(err) => {
            issues.push(FieldIssue::Invalid {
                field: "status",
                reason: err.to_string(),
            });
            None
        }
    }
}

/// Validates a task field edit against `layout`.
///
/// # Errors
///
/// Returns [`ValidationError`] for an edit that changes nothing, a blank
/// title, or a status that is not a layout column.
pub fn validate_update(update: &TaskUpdate, layout: &BoardLayout) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    if update.is_empty() {
        issues.push(FieldIssue::Invalid {
            field: "update",
            reason: "must change at least one field".to_owned(),
        });
    }
    if update
        .title
        .as_deref()
        .is_some_and(|title| title.trim().is_empty())
    {
        issues.push(FieldIssue::Missing("title"));
    }
    if let Some(status) = &update.status {
        if !layout.contains(status) {
            issues.push(FieldIssue::Invalid {
                field: "status",
                reason: format!("{status} is not a board column"),
            });
        }
    }
    ValidationError::check(issues)
}

/// Validates comment text, returning it trimmed.
///
/// # Errors
///
/// Returns [`ValidationError`] when the content is blank.
pub fn validate_comment(content: &str) -> Result<String, ValidationError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ValidationError {
            issues: vec![FieldIssue::Missing("content")],
        });
    }
    Ok(trimmed.to_owned())
}
