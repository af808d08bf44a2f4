//! services/api/src/adapters/storage.rs
//!
//! This module contains the storage adapter, which is the concrete implementation
//! of the `KeyValueStore` port from the `core` crate. Every device gets its own
//! slice of a single SQLite table.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tongue_balance_core::ports::{KeyValueStore, PortError, PortResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A storage adapter that implements the `KeyValueStore` port.
#[derive(Clone)]
pub struct SqliteStorageAdapter {
    pool: SqlitePool,
}

impl SqliteStorageAdapter {
    /// Creates a new `SqliteStorageAdapter`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `database_url`, creating the database file if needed.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// `KeyValueStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl KeyValueStore for SqliteStorageAdapter {
    async fn get_item(&self, scope: &str, key: &str) -> PortResult<Option<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT value FROM local_storage WHERE device_id = ?1 AND key = ?2",
        )
        .bind(scope)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))
    }

    async fn set_item(&self, scope: &str, key: &str, value: &str) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO local_storage (device_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT (device_id, key)
             DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        )
        .bind(scope)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn remove_item(&self, scope: &str, key: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM local_storage WHERE device_id = ?1 AND key = ?2")
            .bind(scope)
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn adapter() -> SqliteStorageAdapter {
        // A single connection, so every query sees the same in-memory database.
        let pool = SqliteStorageAdapter::connect("sqlite::memory:", 1).await.unwrap();
        let adapter = SqliteStorageAdapter::new(pool);
        adapter.run_migrations().await.unwrap();
        adapter
    }

    #[tokio::test]
    async fn set_overwrites_and_remove_deletes() {
        let store = adapter().await;

        assert_eq!(store.get_item("device-a", "k").await.unwrap(), None);

        store.set_item("device-a", "k", "one").await.unwrap();
        store.set_item("device-a", "k", "two").await.unwrap();
        assert_eq!(store.get_item("device-a", "k").await.unwrap().as_deref(), Some("two"));

        store.remove_item("device-a", "k").await.unwrap();
        assert_eq!(store.get_item("device-a", "k").await.unwrap(), None);

        // Removing a missing key is not an error.
        store.remove_item("device-a", "k").await.unwrap();
    }

    #[tokio::test]
    async fn devices_are_isolated() {
        let store = adapter().await;

        store.set_item("device-a", "shang_yi_current_user", "alice").await.unwrap();

        assert_eq!(store.get_item("device-b", "shang_yi_current_user").await.unwrap(), None);
    }

    #[tokio::test]
    async fn data_survives_a_new_pool() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("storage.db").display());

        {
            let pool = SqliteStorageAdapter::connect(&url, 2).await.unwrap();
            let store = SqliteStorageAdapter::new(pool.clone());
            store.run_migrations().await.unwrap();
            store.set_item("device-a", "k", "kept").await.unwrap();
            pool.close().await;
        }

        let pool = SqliteStorageAdapter::connect(&url, 2).await.unwrap();
        let store = SqliteStorageAdapter::new(pool);
        store.run_migrations().await.unwrap();
        assert_eq!(store.get_item("device-a", "k").await.unwrap().as_deref(), Some("kept"));
    }
}
