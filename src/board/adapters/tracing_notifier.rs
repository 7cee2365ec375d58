//! Notifier that writes notifications to the tracing pipeline.

use tracing::{info, warn};

use crate::board::ports::{Notification, NotificationLevel, Notifier};

/// Renders notifications as structured log events.
///
/// Used when no interactive notification surface is attached, for example
/// by the command-line client.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let Notification { level, message } = notification;
        match level {
            NotificationLevel::Success | NotificationLevel::Info => {
                info!(target: "sprintboard::notify", %level, "{message}");
            }
            NotificationLevel::Error => {
                warn!(target: "sprintboard::notify", %level, "{message}");
            }
        }
    }
}
