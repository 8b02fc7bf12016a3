//! Errors raised while opening the database or touching a stored entry.

use homedash_domain::error::HomeError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The database URL could not be turned into connect options.
    #[error("invalid database url `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to open database")]
    Connect(#[source] sqlx::Error),

    #[error("failed to migrate database")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A read, write or removal of a single entry failed.
    #[error("failed to {operation} entry `{key}`")]
    Entry {
        operation: &'static str,
        key: String,
        #[source]
        source: sqlx::Error,
    },
}

impl StorageError {
    pub(crate) fn entry(operation: &'static str, key: &str, source: sqlx::Error) -> Self {
        Self::Entry {
            operation,
            key: key.to_string(),
            source,
        }
    }
}

impl From<StorageError> for HomeError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
