//! Port contracts for the board's collaborators.
//!
//! Ports define transport-agnostic interfaces used by board services: the
//! task, feed, and sprint endpoints of the REST API and the notification
//! surface.

pub mod error;
pub mod feed_api;
pub mod notifier;
pub mod sprint_api;
pub mod task_api;

pub use error::{ApiError, ApiResult};
pub use feed_api::FeedApi;
pub use notifier::{Notification, NotificationLevel, Notifier};
pub use sprint_api::SprintApi;
pub use task_api::TaskApi;

/// The full set of REST endpoints a board talks to.
///
/// Implemented automatically for any type providing all three API ports.
pub trait BoardApi: TaskApi + FeedApi + SprintApi {}

impl<T> BoardApi for T where T: TaskApi + FeedApi + SprintApi {}
