//! Notification port
//!
//! Where the gateway and use cases send user-facing notifications.

use llmdesk_domain::Notification;

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// No-op sink for when nobody is listening
pub struct NoNotifications;

impl NotificationSink for NoNotifications {
    fn notify(&self, _notification: Notification) {}
}
