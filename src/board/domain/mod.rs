//! Domain model for the task board.
//!
//! The board domain models tasks, configurable status columns, the
//! client-side board snapshot, and the comment and activity feeds, while
//! keeping all network concerns outside of the domain boundary.

mod detail;
mod envelope;
mod error;
mod feed;
mod ids;
mod snapshot;
mod sprint;
mod status;
mod task;

pub use detail::TaskDetail;
pub use envelope::ApiEnvelope;
pub use error::{BoardDomainError, ParseStatusKeyError};
pub use feed::{Activity, ActivityKind, Comment, NewComment, ValueChange};
pub use ids::{ActivityId, CommentId, ProjectId, SprintId, TaskId, UserId};
pub use snapshot::{BoardSnapshot, Bucket, TaskLocation};
pub use sprint::{BoardContext, SessionUser, SprintRef, SprintStatus};
pub use status::{BoardLayout, Column, StatusKey};
pub use task::{NewTask, Priority, Task, TaskUpdate};
