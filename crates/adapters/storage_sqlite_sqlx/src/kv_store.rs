//! `SQLite` implementation of [`StateStorage`].

use std::future::Future;

use sqlx::SqlitePool;

use homedash_app::ports::StateStorage;
use homedash_domain::error::HomeError;

use crate::error::StorageError;

const SELECT_BY_KEY: &str = "SELECT value FROM kv_entries WHERE key = ?";
const UPSERT: &str = "INSERT INTO kv_entries (key, value, updated_at) VALUES (?, ?, ?) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_BY_KEY: &str = "DELETE FROM kv_entries WHERE key = ?";

/// `SQLite`-backed store of named text entries.
#[derive(Clone)]
pub struct SqliteStateStorage {
    pool: SqlitePool,
}

impl SqliteStateStorage {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl StateStorage for SqliteStateStorage {
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, HomeError>> + Send {
        let pool = self.pool.clone();
        let key = key.to_string();
        async move {
            let row: Option<(String,)> = sqlx::query_as(SELECT_BY_KEY)
                .bind(key.as_str())
                .fetch_optional(&pool)
                .await
                .map_err(|source| StorageError::entry("read", &key, source))?;

            Ok(row.map(|(value,)| value))
        }
    }

    fn write(&self, key: &str, value: &str) -> impl Future<Output = Result<(), HomeError>> + Send {
        let pool = self.pool.clone();
        let key = key.to_string();
        let value = value.to_string();
        async move {
            sqlx::query(UPSERT)
                .bind(key.as_str())
                .bind(value)
                .bind(chrono::Utc::now().to_rfc3339())
                .execute(&pool)
                .await
                .map_err(|source| StorageError::entry("write", &key, source))?;
            tracing::debug!(%key, "entry written");

            Ok(())
        }
    }

    fn remove(&self, key: &str) -> impl Future<Output = Result<(), HomeError>> + Send {
        let pool = self.pool.clone();
        let key = key.to_string();
        async move {
            sqlx::query(DELETE_BY_KEY)
                .bind(key.as_str())
                .execute(&pool)
                .await
                .map_err(|source| StorageError::entry("remove", &key, source))?;

            Ok(())
        }
    }
}
