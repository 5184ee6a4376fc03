use crate::notification::Notification;

/// Notification sink (toasts). Fire-and-forget.
pub trait NotificationPort: Send + Sync {
    fn show(&self, notification: Notification);
}
