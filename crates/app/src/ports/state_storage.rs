//! State storage port — a durable store of named text entries.

use std::future::Future;

use homedash_domain::error::HomeError;

/// Key/value store holding serialized state under a name.
pub trait StateStorage {
    /// Read the entry stored under `key`, or `None` when it does not exist.
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, HomeError>> + Send;

    /// Create or replace the entry stored under `key`.
    fn write(&self, key: &str, value: &str) -> impl Future<Output = Result<(), HomeError>> + Send;

    /// Remove the entry stored under `key`. Removing a missing entry succeeds.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), HomeError>> + Send;
}

impl<T: StateStorage + Send + Sync> StateStorage for std::sync::Arc<T> {
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, HomeError>> + Send {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> impl Future<Output = Result<(), HomeError>> + Send {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> impl Future<Output = Result<(), HomeError>> + Send {
        (**self).remove(key)
    }
}
