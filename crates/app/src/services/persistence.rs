//! Home persistence — the serialized home state in a single named entry.

use homedash_domain::error::HomeError;
use homedash_domain::home::HomeState;

use crate::ports::StateStorage;

/// Name of the entry holding the home state unless configured otherwise.
pub const DEFAULT_ENTRY_KEY: &str = "homeState";

/// Saves and restores a [`HomeState`] through a [`StateStorage`].
pub struct HomePersistence<S> {
    storage: S,
    key: String,
}

impl<S: StateStorage> HomePersistence<S> {
    /// Persist under [`DEFAULT_ENTRY_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_ENTRY_KEY)
    }

    /// Persist under a custom entry name.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Name of the entry this persistence writes to.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serialize `state` to JSON and write it.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Storage`] if serialization or the write fails.
    #[tracing::instrument(skip_all, fields(key = %self.key))]
    pub async fn save(&self, state: &HomeState) -> Result<(), HomeError> {
        let json = serde_json::to_string(state).map_err(|err| HomeError::Storage(Box::new(err)))?;
        self.storage.write(&self.key, &json).await
    }

    /// Read the stored state, falling back to the factory configuration.
    ///
    /// A missing entry, unreadable JSON, a tree that breaks a device
    /// invariant or a failing storage all yield [`HomeState::default`].
    #[tracing::instrument(skip_all, fields(key = %self.key))]
    pub async fn load(&self) -> HomeState {
        let raw = match self.storage.read(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!("no stored home state, using defaults");
                return HomeState::default();
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to read home state, using defaults");
                return HomeState::default();
            }
        };

        let state: HomeState = match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(error = %err, "stored home state is malformed, using defaults");
                return HomeState::default();
            }
        };

        if let Err(err) = state.validate() {
            tracing::warn!(error = %err, "stored home state is inconsistent, using defaults");
            return HomeState::default();
        }

        tracing::info!(rooms = state.rooms.len(), "loaded home state");
        state
    }

    /// Remove the stored entry.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Storage`] if the storage fails.
    #[tracing::instrument(skip_all, fields(key = %self.key))]
    pub async fn clear(&self) -> Result<(), HomeError> {
        self.storage.remove(&self.key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedash_domain::action::{HomeAction, reduce};
    use homedash_domain::id::RoomId;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryStorage {
        entries: Mutex<HashMap<String, String>>,
        broken: bool,
    }

    impl InMemoryStorage {
        fn with_entry(key: &str, value: &str) -> Self {
            let storage = Self::default();
            storage
                .entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            storage
        }

        fn broken() -> Self {
            Self {
                broken: true,
                ..Self::default()
            }
        }

        fn failure(&self) -> Option<HomeError> {
            self.broken
                .then(|| HomeError::Storage("disk unavailable".into()))
        }
    }

    impl StateStorage for InMemoryStorage {
        fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, HomeError>> + Send {
            let result = match self.failure() {
                Some(err) => Err(err),
                None => Ok(self.entries.lock().unwrap().get(key).cloned()),
            };
            async { result }
        }

        fn write(&self, key: &str, value: &str) -> impl Future<Output = Result<(), HomeError>> + Send {
            let result = match self.failure() {
                Some(err) => Err(err),
                None => {
                    self.entries
                        .lock()
                        .unwrap()
                        .insert(key.to_string(), value.to_string());
                    Ok(())
                }
            };
            async { result }
        }

        fn remove(&self, key: &str) -> impl Future<Output = Result<(), HomeError>> + Send {
            self.entries.lock().unwrap().remove(key);
            async { Ok(()) }
        }
    }

    fn modified_state() -> HomeState {
        let action = HomeAction::SetTemperature {
            room: RoomId::new("sala").unwrap(),
            temperature: 25,
        };
        reduce(&HomeState::default(), &action).unwrap().state
    }

    #[tokio::test]
    async fn should_load_what_was_saved() {
        let persistence = HomePersistence::new(InMemoryStorage::default());
        let state = modified_state();

        persistence.save(&state).await.unwrap();

        assert_eq!(persistence.load().await, state);
    }

    #[tokio::test]
    async fn should_load_defaults_when_entry_missing() {
        let persistence = HomePersistence::new(InMemoryStorage::default());
        assert_eq!(persistence.load().await, HomeState::default());
    }

    #[tokio::test]
    async fn should_load_defaults_after_clear() {
        let persistence = HomePersistence::new(InMemoryStorage::default());
        persistence.save(&modified_state()).await.unwrap();

        persistence.clear().await.unwrap();

        assert_eq!(persistence.load().await, HomeState::default());
    }

    #[tokio::test]
    async fn should_load_defaults_when_entry_is_not_json() {
        let storage = InMemoryStorage::with_entry(DEFAULT_ENTRY_KEY, "{not json");
        let persistence = HomePersistence::new(storage);
        assert_eq!(persistence.load().await, HomeState::default());
    }

    #[tokio::test]
    async fn should_load_defaults_when_entry_breaks_invariants() {
        let raw = serde_json::json!({
            "rooms": {
                "sala": {
                    "name": "Sala",
                    "devices": {
                        "tv": { "type": "tv", "isOn": true, "channel": 5000 }
                    }
                }
            }
        })
        .to_string();
        let storage = InMemoryStorage::with_entry(DEFAULT_ENTRY_KEY, &raw);
        let persistence = HomePersistence::new(storage);
        assert_eq!(persistence.load().await, HomeState::default());
    }

    #[tokio::test]
    async fn should_load_defaults_when_entry_has_blank_keys() {
        let raw = r#"{"rooms":{"  ":{"name":"X","devices":{"":{"type":"light","isOn":false}}}}}"#;
        let persistence = HomePersistence::new(InMemoryStorage::with_entry(DEFAULT_ENTRY_KEY, raw));
        assert_eq!(persistence.load().await, HomeState::default());
    }

    #[tokio::test]
    async fn should_load_defaults_when_storage_fails() {
        let persistence = HomePersistence::new(InMemoryStorage::broken());
        assert_eq!(persistence.load().await, HomeState::default());
    }

    #[tokio::test]
    async fn should_use_custom_key_when_configured() {
        let persistence = HomePersistence::with_key(InMemoryStorage::default(), "otherHome");
        let state = modified_state();
        persistence.save(&state).await.unwrap();

        let entries = persistence.storage.entries.lock().unwrap().clone();
        assert!(entries.contains_key("otherHome"));
        assert!(!entries.contains_key(DEFAULT_ENTRY_KEY));
    }
}
