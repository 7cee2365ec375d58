//! In-memory adapters for board ports.

mod board_api;
mod notifier;

pub use board_api::{InMemoryBoardApi, StatusUpdateCall};
pub use notifier::RecordingNotifier;
