//! Transient, non-blocking notifications shown in the status line.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notification stays visible.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3);

/// Maximum number of notifications kept at once.
const MAX_ACTIVE: usize = 4;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Informational.
    Info,
    /// Something the user should act on.
    Warning,
}

/// A user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub kind: NotificationKind,
    /// Message text.
    pub message: String,
}

impl Notification {
    /// Creates an informational notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    /// Creates a warning notification.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            message: message.into(),
        }
    }
}

/// Notifications currently on screen, each with its own expiry.
#[derive(Debug)]
pub struct Toasts {
    ttl: Duration,
    active: VecDeque<(Notification, Instant)>,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl Toasts {
    /// Creates an empty queue whose entries live for `ttl`.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            active: VecDeque::new(),
        }
    }

    /// Shows a notification starting at `now`.
    pub fn push(&mut self, notification: Notification, now: Instant) {
        if self.active.len() >= MAX_ACTIVE {
            self.active.pop_front();
        }
        let expires_at = now.checked_add(self.ttl).unwrap_or(now);
        self.active.push_back((notification, expires_at));
    }

    /// Drops every notification that has expired at `now`.
    pub fn prune(&mut self, now: Instant) {
        self.active.retain(|(_, expires_at)| *expires_at > now);
    }

    /// Returns the most recent visible notification.
    #[must_use]
    pub fn latest(&self) -> Option<&Notification> {
        self.active.back().map(|(n, _)| n)
    }

    /// Returns the number of visible notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Returns `true` if nothing is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
