//! Server-assigned identifier newtypes for the board domain.
//!
//! Identifiers are opaque numeric keys handed out by the REST API. Wrapping
//! them keeps task, sprint, and user identifiers from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw server-assigned value.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the raw numeric value.
            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Stable identifier of a task.
    TaskId
);

numeric_id!(
    /// Identifier of the project a board belongs to.
    ProjectId
);

numeric_id!(
    /// Identifier of a sprint.
    SprintId
);

numeric_id!(
    /// Identifier of a user (assignee, comment author, activity actor).
    UserId
);

numeric_id!(
    /// Identifier of a task comment.
    CommentId
);

numeric_id!(
    /// Identifier of an activity feed entry.
    ActivityId
);

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse::<u64>().map(Self)
    }
}
