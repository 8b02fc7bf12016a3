//! Notification — a transient, user-facing message about a mutation attempt.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HomeError;

/// When a notification was published.
pub type Timestamp = DateTime<Utc>;

/// Whether the attempt succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A message describing the outcome of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub timestamp: Timestamp,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Build an error notification carrying the error's display text.
    #[must_use]
    pub fn error(err: &HomeError) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: err.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }

    /// Whether the notification is younger than `window`.
    #[must_use]
    pub fn is_displayed(&self, window: Duration) -> bool {
        self.age(Utc::now()) < window
    }

    /// Time elapsed between publication and `at`, zero if `at` is earlier.
    #[must_use]
    pub fn age(&self, at: Timestamp) -> Duration {
        (at - self.timestamp).to_std().unwrap_or(Duration::ZERO)
    }
}
