//! Home store — the single writer of the home state.
//!
//! Every mutation goes through [`HomeStore::dispatch`], which reduces the
//! action against the current snapshot, persists the result and publishes a
//! notification describing the outcome.

use std::sync::Arc;

use tokio::sync::Mutex;

use homedash_domain::action::{ActionRequest, HomeAction, Transition, reduce};
use homedash_domain::error::HomeError;
use homedash_domain::home::HomeState;
use homedash_domain::id::RoomId;
use homedash_domain::notification::Notification;

use crate::ports::{NotificationPublisher, StateStorage};
use crate::services::persistence::HomePersistence;

/// Application service owning the current [`HomeState`].
pub struct HomeStore<S, N> {
    persistence: HomePersistence<S>,
    notifier: N,
    current: Mutex<Arc<HomeState>>,
}

impl<S, N> HomeStore<S, N>
where
    S: StateStorage + Send + Sync,
    N: NotificationPublisher + Send + Sync,
{
    /// Open a store persisting under the default entry name.
    pub async fn open(storage: S, notifier: N) -> Self {
        Self::open_with(HomePersistence::new(storage), notifier).await
    }

    /// Load the stored state (or defaults) and write it back once, so a
    /// missing or corrupt entry is replaced by a valid one.
    #[tracing::instrument(skip_all, fields(key = %persistence.key()))]
    pub async fn open_with(persistence: HomePersistence<S>, notifier: N) -> Self {
        let state = persistence.load().await;
        if let Err(err) = persistence.save(&state).await {
            tracing::error!(error = %err, "failed to persist initial home state");
        }
        Self {
            persistence,
            notifier,
            current: Mutex::new(Arc::new(state)),
        }
    }

    /// Current snapshot.
    pub async fn state(&self) -> Arc<HomeState> {
        Arc::clone(&*self.current.lock().await)
    }

    /// Apply `action`, persist and notify.
    ///
    /// Dispatches are serialized: a second call waits until the first one has
    /// been reduced and persisted.
    ///
    /// # Errors
    ///
    /// Returns the reducer's [`HomeError`] when the action is rejected; the
    /// state is left untouched and an error notification is published.
    #[tracing::instrument(
        skip(self, action),
        fields(action = %action.kind(), room = action.room().map(RoomId::as_str))
    )]
    pub async fn dispatch(&self, action: HomeAction) -> Result<Arc<HomeState>, HomeError> {
        let mut current = self.current.lock().await;
        match reduce(&current, &action) {
            Ok(Transition { state, message }) => {
                let next = Arc::new(state);
                if let Err(err) = self.persistence.save(&next).await {
                    tracing::error!(error = %err, "failed to persist home state");
                }
                *current = Arc::clone(&next);
                drop(current);
                tracing::debug!(%message, "action applied");
                self.notify(Notification::success(message)).await;
                Ok(next)
            }
            Err(err) => {
                drop(current);
                self.reject(err).await
            }
        }
    }

    /// Parse an untyped request, then [`dispatch`](Self::dispatch) it.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] when the request is malformed (for
    /// instance an unknown fan speed), or any error from `dispatch`. Both are
    /// published as error notifications.
    #[tracing::instrument(skip(self), fields(action = %request.kind))]
    pub async fn dispatch_request(
        &self,
        request: ActionRequest,
    ) -> Result<Arc<HomeState>, HomeError> {
        match HomeAction::try_from(request) {
            Ok(action) => self.dispatch(action).await,
            Err(err) => self.reject(err.into()).await,
        }
    }

    /// Restore the factory configuration.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches [`dispatch`](Self::dispatch).
    pub async fn reset(&self) -> Result<Arc<HomeState>, HomeError> {
        self.dispatch(HomeAction::ResetHome).await
    }

    async fn reject(&self, err: HomeError) -> Result<Arc<HomeState>, HomeError> {
        tracing::debug!(error = %err, "action rejected");
        self.notify(Notification::error(&err)).await;
        Err(err)
    }

    async fn notify(&self, notification: Notification) {
        if let Err(err) = self.notifier.publish(notification).await {
            tracing::warn!(error = %err, "failed to publish notification");
        }
    }
}
