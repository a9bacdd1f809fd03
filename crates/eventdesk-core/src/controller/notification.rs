use std::time::{Duration, Instant};

use tracing::debug;

/// How long a notification stays visible unless configured otherwise.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A transient message raised by a terminal request state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub raised_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            raised_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Single-slot notification channel.
///
/// A new notification replaces the current one; nothing is queued. Expiry is
/// driven by the caller's clock so the UI loop decides when to check.
#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Notification>,
    duration: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_DURATION)
    }
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn push(&mut self, notification: Notification) {
        debug!(severity = %notification.severity, message = %notification.message, "Notification raised");
        self.current = Some(notification);
    }

    /// The notification still visible at `now`, if any.
    pub fn visible(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.raised_at) < self.duration)
    }

    /// Drop the current notification once it has outlived its duration.
    /// Returns true if something was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.current.is_some() && self.visible(now).is_none() {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_auto_dismisses() {
        let mut notifier = Notifier::default();
        let n = Notification::success("Saved");
        let raised = n.raised_at;
        notifier.push(n);

        assert!(notifier.visible(raised).is_some());
        assert!(notifier.visible(raised + Duration::from_millis(5999)).is_some());
        assert!(notifier.visible(raised + Duration::from_secs(6)).is_none());

        assert!(!notifier.expire(raised + Duration::from_secs(1)));
        assert!(notifier.expire(raised + Duration::from_secs(7)));
        assert!(notifier.visible(raised).is_none());
    }

    #[test]
    fn test_newest_notification_replaces_previous() {
        let mut notifier = Notifier::new(Duration::from_secs(2));
        notifier.push(Notification::error("first"));
        notifier.push(Notification::success("second"));

        let visible = notifier.visible(Instant::now()).expect("visible");
        assert_eq!(visible.message, "second");
        assert_eq!(visible.severity, Severity::Success);
        assert!(!visible.is_error());
    }

    #[test]
    fn test_dismiss() {
        let mut notifier = Notifier::default();
        notifier.push(Notification::error("gone"));
        notifier.dismiss();
        assert!(notifier.visible(Instant::now()).is_none());
        assert!(!notifier.expire(Instant::now()));
    }
}
