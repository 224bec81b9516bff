use crate::entities::Notification;

/// Trait for surfacing transient messages to the user
pub trait Notifier: Send + Sync {
    /// Show a notification
    fn notify(&self, notification: Notification);

    /// Dismiss every visible notification
    fn dismiss(&self);
}
