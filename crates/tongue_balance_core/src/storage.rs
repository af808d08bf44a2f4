//! crates/tongue_balance_core/src/storage.rs
//!
//! A device's view of local storage, plus an in-memory `KeyValueStore`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::ports::{KeyValueStore, PortError, PortResult};

/// The local storage of one device: a `KeyValueStore` bound to a scope.
#[derive(Clone)]
pub struct LocalStorage {
    store: Arc<dyn KeyValueStore>,
    scope: String,
}

impl LocalStorage {
    pub fn new(store: Arc<dyn KeyValueStore>, scope: impl Into<String>) -> Self {
        Self {
            store,
            scope: scope.into(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub async fn get_item(&self, key: &str) -> PortResult<Option<String>> {
        self.store.get_item(&self.scope, key).await
    }

    pub async fn set_item(&self, key: &str, value: &str) -> PortResult<()> {
        self.store.set_item(&self.scope, key, value).await
    }

    pub async fn remove_item(&self, key: &str) -> PortResult<()> {
        self.store.remove_item(&self.scope, key).await
    }
}

/// A `KeyValueStore` that lives only as long as the process.
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<(String, String), String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> PortResult<std::sync::MutexGuard<'_, HashMap<(String, String), String>>> {
        self.items
            .lock()
            .map_err(|_| PortError::Unexpected("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, scope: &str, key: &str) -> PortResult<Option<String>> {
        Ok(self.lock()?.get(&(scope.to_string(), key.to_string())).cloned())
    }

    async fn set_item(&self, scope: &str, key: &str, value: &str) -> PortResult<()> {
        self.lock()?
            .insert((scope.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, scope: &str, key: &str) -> PortResult<()> {
        self.lock()?.remove(&(scope.to_string(), key.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scopes_do_not_share_keys() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let phone = LocalStorage::new(store.clone(), "phone");
        let laptop = LocalStorage::new(store, "laptop");

        phone.set_item("k", "v").await.unwrap();

        assert_eq!(phone.get_item("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(laptop.get_item("k").await.unwrap(), None);

        phone.remove_item("k").await.unwrap();
        assert_eq!(phone.get_item("k").await.unwrap(), None);
    }
}
