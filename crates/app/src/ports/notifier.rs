//! Notifier port — publish the outcome of every mutation attempt.

use std::future::Future;

use homedash_domain::error::HomeError;
use homedash_domain::notification::Notification;

/// Publishes notifications to interested subscribers.
pub trait NotificationPublisher {
    /// Publish a notification to all current subscribers.
    fn publish(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), HomeError>> + Send;
}

impl<T: NotificationPublisher + Send + Sync> NotificationPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), HomeError>> + Send {
        (**self).publish(notification)
    }
}
