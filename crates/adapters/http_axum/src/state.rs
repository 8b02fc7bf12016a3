//! Shared application state for axum handlers.

use std::sync::Arc;

use homedash_app::notification_bus::InProcessNotificationBus;
use homedash_app::ports::{StateStorage, StatusClient};
use homedash_app::services::home_store::HomeStore;
use homedash_app::services::status_service::StatusService;

/// Store type served over HTTP: notifications always go through the bus so
/// the SSE endpoint can subscribe to them.
pub type SharedHomeStore<S> = HomeStore<S, Arc<InProcessNotificationBus>>;

/// Application state shared across all axum handlers.
///
/// Generic over the storage and status client to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<S, C> {
    /// Local home state.
    pub home_store: Arc<SharedHomeStore<S>>,
    /// Remote status views.
    pub status_service: Arc<StatusService<C>>,
    /// Notification bus for SSE subscribers.
    pub notification_bus: Arc<InProcessNotificationBus>,
}

impl<S, C> Clone for AppState<S, C> {
    fn clone(&self) -> Self {
        Self {
            home_store: Arc::clone(&self.home_store),
            status_service: Arc::clone(&self.status_service),
            notification_bus: Arc::clone(&self.notification_bus),
        }
    }
}

impl<S, C> AppState<S, C>
where
    S: StateStorage + Send + Sync + 'static,
    C: StatusClient + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        home_store: SharedHomeStore<S>,
        status_service: StatusService<C>,
        notification_bus: Arc<InProcessNotificationBus>,
    ) -> Self {
        Self {
            home_store: Arc::new(home_store),
            status_service: Arc::new(status_service),
            notification_bus,
        }
    }
}
