use std::sync::{Mutex, MutexGuard};

use crate::entities::Notification;
use crate::use_cases::ports::Notifier;

#[derive(Debug, Default)]
struct Inner {
    visible: Vec<Notification>,
    history: Vec<Notification>,
}

/// In-memory notifier keeping the visible notifications and everything ever
/// raised. An identical notification that is already visible is not shown
/// twice.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    inner: Mutex<Inner>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Notifications currently shown, oldest first
    pub fn visible(&self) -> Vec<Notification> {
        self.lock().visible.clone()
    }

    /// Every notification shown since creation, oldest first
    pub fn history(&self) -> Vec<Notification> {
        self.lock().history.clone()
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, notification: Notification) {
        let mut inner = self.lock();
        if inner.visible.contains(&notification) {
            return;
        }
        inner.history.push(notification.clone());
        inner.visible.push(notification);
    }

    fn dismiss(&self) {
        self.lock().visible.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_notifications_do_not_stack() {
        let center = NotificationCenter::new();
        center.notify(Notification::error("boom"));
        center.notify(Notification::error("boom"));
        center.notify(Notification::success("boom"));

        assert_eq!(center.visible().len(), 2);
        assert_eq!(center.history().len(), 2);
    }

    #[test]
    fn test_dismiss_keeps_history() {
        let center = NotificationCenter::new();
        center.notify(Notification::error("boom"));
        center.dismiss();
        center.notify(Notification::error("boom"));

        assert_eq!(center.visible(), vec![Notification::error("boom")]);
        assert_eq!(center.history().len(), 2);
    }
}
