//! Notifier that records notifications for later inspection.

use std::sync::{Arc, Mutex, PoisonError};

use crate::board::ports::{Notification, NotificationLevel, Notifier};

/// Thread-safe notifier keeping every notification in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every notification received so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the messages of notifications at `level`.
    #[must_use]
    pub fn messages_at(&self, level: NotificationLevel) -> Vec<String> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|notification| notification.level == level)
            .map(|notification| notification.message.clone())
            .collect()
    }

    /// Returns the messages of error notifications.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.messages_at(NotificationLevel::Error)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
