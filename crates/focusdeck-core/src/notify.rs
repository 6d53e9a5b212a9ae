//! Completion notifications.
//!
//! Widgets hold an injected [`NotificationSink`] and call it when a countdown
//! reaches zero. Delivery is fire-and-forget: a sink that cannot deliver
//! drops the notification and the widget never learns about it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};

/// A system-style notification with a title and a body line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Destination for completion notifications.
pub trait NotificationSink: Send + Sync + fmt::Debug {
    fn notify(&self, notification: &Notification);
}

impl<S: NotificationSink + ?Sized> NotificationSink for Arc<S> {
    fn notify(&self, notification: &Notification) {
        (**self).notify(notification)
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, notification: &Notification) {
        tracing::trace!(title = %notification.title, "notification discarded");
    }
}

/// Whether the user allowed notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
    /// Never asked.
    Default,
}

/// Forwards to `inner` only while permission is [`Permission::Granted`].
#[derive(Debug)]
pub struct PermissionGated<S> {
    inner: S,
    permission: Permission,
}

impl<S: NotificationSink> PermissionGated<S> {
    pub fn new(inner: S, permission: Permission) -> Self {
        Self { inner, permission }
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }
}

impl<S: NotificationSink> NotificationSink for PermissionGated<S> {
    fn notify(&self, notification: &Notification) {
        match self.permission {
            Permission::Granted => self.inner.notify(notification),
            Permission::Denied | Permission::Default => {
                tracing::debug!(
                    permission = ?self.permission,
                    title = %notification.title,
                    "notification suppressed"
                );
            }
        }
    }
}

/// Keeps every delivered notification in memory. Clones share the buffer.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    delivered: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: &Notification) {
        self.delivered
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notification.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gated_sink_forwards_only_when_granted() {
        let recorder = RecordingSink::new();
        let note = Notification::new("Timer Complete!", "Your focus session is finished.");

        PermissionGated::new(recorder.clone(), Permission::Denied).notify(&note);
        PermissionGated::new(recorder.clone(), Permission::Default).notify(&note);
        assert!(recorder.delivered().is_empty());

        PermissionGated::new(recorder.clone(), Permission::Granted).notify(&note);
        assert_eq!(recorder.delivered(), vec![note]);
    }

    #[test]
    fn gated_sink_reports_its_permission() {
        let gated = PermissionGated::new(NullSink, Permission::Default);
        assert_eq!(gated.permission(), Permission::Default);
    }

    #[test]
    fn arc_sink_delegates() {
        let recorder = RecordingSink::new();
        let shared: Arc<dyn NotificationSink> = Arc::new(recorder.clone());
        shared.notify(&Notification::new("a", "b"));
        assert_eq!(recorder.delivered().len(), 1);
    }
}
