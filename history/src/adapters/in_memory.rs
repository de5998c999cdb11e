use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::debug;

use crate::store::{HistoryError, KeyValueStore};

/// In-memory implementation of KeyValueStore; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    /// Thread-safe storage of slot values
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Create a new empty InMemoryKeyValueStore
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, HistoryError> {
        let items = self.items.read().map_err(|e| {
            HistoryError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), HistoryError> {
        let mut items = self.items.write().map_err(|e| {
            HistoryError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        items.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), HistoryError> {
        let mut items = self.items.write().map_err(|e| {
            HistoryError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if items.remove(key).is_some() {
            debug!("Removed item: {}", key);
        }
        Ok(())
    }
}
