//! Transient operator notifications
//!
//! Holds at most one notification. A new notification replaces the previous one
//! and each is visible for `timeout` after it was shown.

use std::time::Duration;

use tokio::time::Instant;

use crate::models::{Notification, NotificationKind};

pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_millis(3000);

pub struct Notifier {
    timeout: Duration,
    current: Option<(Notification, Instant)>,
}

impl Notifier {
    pub fn new(timeout: Duration) -> Self {
        Notifier {
            timeout,
            current: None,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) {
        let notification = Notification {
            message: message.into(),
            kind,
        };
        self.current = Some((notification, Instant::now()));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, NotificationKind::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, NotificationKind::Error);
    }

    /// The visible notification, if it has not expired yet
    pub fn current(&self) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|(_, shown_at)| shown_at.elapsed() < self.timeout)
            .map(|(notification, _)| notification)
    }

    /// Take the visible notification so it is printed only once
    pub fn take(&mut self) -> Option<Notification> {
        let visible = self.current().is_some();
        let taken = self.current.take();
        if visible {
            taken.map(|(notification, _)| notification)
        } else {
            None
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Notifier::new(DEFAULT_NOTIFICATION_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn notification_expires_after_timeout() {
        let mut notifier = Notifier::default();
        notifier.success("Successfully deposited $10.00");

        tokio::time::advance(Duration::from_millis(2999)).await;
        assert_eq!(
            notifier.current().map(|n| n.kind),
            Some(NotificationKind::Success)
        );

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(notifier.current().is_none());
        assert!(notifier.take().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_notification_replaces_older() {
        let mut notifier = Notifier::new(Duration::from_secs(1));
        notifier.error("Failed to fetch operations");
        tokio::time::advance(Duration::from_millis(900)).await;
        notifier.show("Reloaded", NotificationKind::Info);
        tokio::time::advance(Duration::from_millis(900)).await;

        let shown = notifier.take().unwrap();
        assert_eq!(shown.message, "Reloaded");
        assert_eq!(shown.to_string(), "ℹ️ Reloaded");
        assert!(notifier.take().is_none());
    }
}
