use std::sync::{Mutex, PoisonError};

use fd_core::ports::NotificationPort;
use fd_core::Notification;

/// Keeps every notification shown, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    shown: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Notification> {
        self.shown.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.shown().into_iter().filter(Notification::is_error).collect()
    }
}

impl NotificationPort for RecordingNotifier {
    fn show(&self, notification: Notification) {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
