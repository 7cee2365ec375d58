//! Sprint references and the injected session context of a board view.

use super::{ProjectId, SprintId, UserId};
use serde::{Deserialize, Serialize};

/// Sprint lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SprintStatus {
    /// Sprint has not started.
    Planned,
    /// Sprint is in progress.
    Active,
    /// Sprint has finished.
    Completed,
}

impl SprintStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "PLANNED",
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
        }
    }
}

/// Minimal sprint information needed to scope status transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintRef {
    /// Sprint identifier.
    pub id: SprintId,
    /// Sprint name.
    pub name: String,
    /// Sprint status.
    pub status: SprintStatus,
}

impl SprintRef {
    /// Creates an active sprint reference.
    #[must_use]
    pub fn active(id: SprintId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: SprintStatus::Active,
        }
    }
}

/// The signed-in user a board acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub display_name: String,
}

impl SessionUser {
    /// Creates a session user.
    #[must_use]
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// Session and sprint context handed to a board at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardContext {
    project_id: ProjectId,
    user: SessionUser,
    active_sprint: Option<SprintRef>,
}

impl BoardContext {
    /// Creates a context with no active sprint.
    #[must_use]
    pub const fn new(project_id: ProjectId, user: SessionUser) -> Self {
        Self {
            project_id,
            user,
            active_sprint: None,
        }
    }

    /// Sets the active sprint.
    #[must_use]
    pub fn with_active_sprint(mut self, sprint: SprintRef) -> Self {
        self.active_sprint = Some(sprint);
        self
    }

    /// Returns the project the board shows.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the session user.
    #[must_use]
    pub const fn user(&self) -> &SessionUser {
        &self.user
    }

    /// Returns the active sprint, if one is known.
    #[must_use]
    pub const fn active_sprint(&self) -> Option<&SprintRef> {
        self.active_sprint.as_ref()
    }

    /// Returns the active sprint identifier, if one is known.
    #[must_use]
    pub fn active_sprint_id(&self) -> Option<SprintId> {
        self.active_sprint.as_ref().map(|sprint| sprint.id)
    }

    /// Replaces the active sprint.
    pub fn set_active_sprint(&mut self, sprint: Option<SprintRef>) {
        self.active_sprint = sprint;
    }
}
