use fd_core::ports::NotificationPort;
use fd_core::Notification;
use tracing::{info, warn};

/// Emits notifications as log events, for headless runs.
pub struct TracingNotifier;

impl NotificationPort for TracingNotifier {
    fn show(&self, notification: Notification) {
        if notification.is_error() {
            warn!(title = %notification.title, message = %notification.message, "notification");
        } else {
            info!(title = %notification.title, message = %notification.message, "notification");
        }
    }
}
