//! Full task detail shown when a card is opened.

use super::{Activity, Comment, Task};
use serde::{Deserialize, Serialize};

/// A task together with its comment and activity feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetail {
    /// The task as currently stored on the server.
    pub task: Task,
    /// Comments, in server order.
    pub comments: Vec<Comment>,
    /// Activity entries, in server order.
    pub activities: Vec<Activity>,
}
