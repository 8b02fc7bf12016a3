//! In-process notification bus.
//!
//! Notifications behave like toasts: every subscriber sees each one once, a
//! subscriber that falls too far behind silently skips the oldest, and the
//! most recent notification stays "on display" for a short while so a client
//! that connects late can still show it.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::{Stream, StreamExt};

use homedash_domain::error::HomeError;
use homedash_domain::notification::{Notification, NotificationLevel};

use crate::ports::NotificationPublisher;

/// How long the latest notification is reported by [`InProcessNotificationBus::current`].
pub const DEFAULT_DISPLAY_FOR: Duration = Duration::from_secs(3);

/// Broadcasts notifications to every live [`NotificationFeed`].
///
/// Publishing succeeds even when nobody listens.
pub struct InProcessNotificationBus {
    sender: broadcast::Sender<Notification>,
    latest: watch::Sender<Option<Notification>>,
    display_for: Duration,
}

impl InProcessNotificationBus {
    /// Create a bus buffering up to `capacity` notifications per feed.
    ///
    /// `capacity` must be non-zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        let (latest, _) = watch::channel(None);
        Self {
            sender,
            latest,
            display_for: DEFAULT_DISPLAY_FOR,
        }
    }

    #[must_use]
    pub fn with_display_for(mut self, display_for: Duration) -> Self {
        self.display_for = display_for;
        self
    }

    /// Feed of every notification published after this call.
    #[must_use]
    pub fn subscribe(&self) -> NotificationFeed {
        NotificationFeed {
            receiver: self.sender.subscribe(),
            level: None,
        }
    }

    /// Feed restricted to one level.
    #[must_use]
    pub fn subscribe_to(&self, level: NotificationLevel) -> NotificationFeed {
        NotificationFeed {
            receiver: self.sender.subscribe(),
            level: Some(level),
        }
    }

    /// The latest notification, if it was published less than the display
    /// window ago.
    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.latest
            .borrow()
            .as_ref()
            .filter(|notification| notification.is_displayed(self.display_for))
            .cloned()
    }

    /// Number of live feeds.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl NotificationPublisher for InProcessNotificationBus {
    fn publish(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), HomeError>> + Send {
        self.latest.send_replace(Some(notification.clone()));
        // send only fails when nobody listens
        let _ = self.sender.send(notification);
        async { Ok(()) }
    }
}

/// One subscriber's view of the bus.
pub struct NotificationFeed {
    receiver: broadcast::Receiver<Notification>,
    level: Option<NotificationLevel>,
}

impl NotificationFeed {
    fn accepts(&self, notification: &Notification) -> bool {
        self.level.is_none_or(|level| level == notification.level)
    }

    /// Wait for the next notification. Returns `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<Notification> {
        loop {
            match self.receiver.recv().await {
                Ok(notification) if self.accepts(&notification) => return Some(notification),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => lagged(skipped),
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next already-buffered notification, without waiting.
    pub fn try_recv(&mut self) -> Option<Notification> {
        loop {
            match self.receiver.try_recv() {
                Ok(notification) if self.accepts(&notification) => return Some(notification),
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => lagged(skipped),
                Err(_) => return None,
            }
        }
    }

    /// Turn the feed into a stream, for SSE and similar push transports.
    pub fn into_stream(self) -> impl Stream<Item = Notification> + Send + 'static {
        let level = self.level;
        BroadcastStream::new(self.receiver).filter_map(move |result| match result {
            Ok(notification) if level.is_none_or(|level| level == notification.level) => {
                Some(notification)
            }
            Ok(_) => None,
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                lagged(skipped);
                None
            }
        })
    }
}

fn lagged(skipped: u64) {
    tracing::warn!(skipped, "notification feed lagged, oldest notifications dropped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_deliver_notification_to_every_feed() {
        let bus = InProcessNotificationBus::new(16);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(Notification::success("Home reset to defaults"))
            .await
            .unwrap();

        assert_eq!(first.recv().await.unwrap().message, "Home reset to defaults");
        assert_eq!(second.recv().await.unwrap().message, "Home reset to defaults");
    }

    #[tokio::test]
    async fn should_succeed_when_no_subscribers() {
        let bus = InProcessNotificationBus::new(16);
        let result = bus.publish(Notification::success("Fan in Dormitorio: off")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_only_deliver_requested_level() {
        let bus = InProcessNotificationBus::new(16);
        let mut errors = bus.subscribe_to(NotificationLevel::Error);
        let rejection = HomeError::from(homedash_domain::error::ValidationError::EmptyRoomId);

        bus.publish(Notification::success("TV in Sala de Estar: off"))
            .await
            .unwrap();
        bus.publish(Notification::error(&rejection)).await.unwrap();

        let received = errors.try_recv().unwrap();
        assert!(received.is_error());
        assert!(errors.try_recv().is_none());
    }

    #[tokio::test]
    async fn should_skip_oldest_when_feed_lags() {
        let bus = InProcessNotificationBus::new(2);
        let mut feed = bus.subscribe();
        for message in ["one", "two", "three"] {
            bus.publish(Notification::success(message)).await.unwrap();
        }

        assert_eq!(feed.recv().await.unwrap().message, "two");
        assert_eq!(feed.recv().await.unwrap().message, "three");
    }

    #[tokio::test]
    async fn should_end_stream_when_bus_dropped() {
        let bus = InProcessNotificationBus::new(4);
        let stream = bus.subscribe().into_stream();
        bus.publish(Notification::success("Light in Baño: on"))
            .await
            .unwrap();
        drop(bus);

        let messages: Vec<String> = stream.map(|n| n.message).collect().await;
        assert_eq!(messages, vec!["Light in Baño: on".to_string()]);
    }

    #[tokio::test]
    async fn should_report_current_within_display_window() {
        let bus = InProcessNotificationBus::new(4);
        assert!(bus.current().is_none());

        bus.publish(Notification::success("Oven in Comedor: on (180°C)"))
            .await
            .unwrap();

        assert_eq!(
            bus.current().map(|n| n.message).as_deref(),
            Some("Oven in Comedor: on (180°C)")
        );
    }

    #[tokio::test]
    async fn should_hide_current_once_display_window_elapsed() {
        let bus = InProcessNotificationBus::new(4).with_display_for(Duration::ZERO);
        bus.publish(Notification::success("Light in Comedor: off"))
            .await
            .unwrap();
        assert!(bus.current().is_none());
    }

    #[test]
    fn should_count_live_feeds() {
        let bus = InProcessNotificationBus::new(4);
        let feed = bus.subscribe();
        assert_eq!(bus.receiver_count(), 1);
        drop(feed);
        assert_eq!(bus.receiver_count(), 0);
    }
}
