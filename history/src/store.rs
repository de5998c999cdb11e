use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use thiserror::Error;

/// Slot the history lives in, kept from the browser version for compatibility
pub const HISTORY_SLOT: &str = "lavenderLabHistory";

/// Error type for history operations
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Error occurred inside the persistence backend
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key-value persistence, shaped like `window.localStorage`.
///
/// Implementations make no atomicity promise across instances: two stores
/// writing the same slot concurrently can lose an update.
#[async_trait]
pub trait KeyValueStore: Send + Sync + Debug {
    async fn get_item(&self, key: &str) -> Result<Option<String>, HistoryError>;

    async fn set_item(&self, key: &str, value: String) -> Result<(), HistoryError>;

    async fn remove_item(&self, key: &str) -> Result<(), HistoryError>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get_item(&self, key: &str) -> Result<Option<String>, HistoryError> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), HistoryError> {
        (**self).set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), HistoryError> {
        (**self).remove_item(key).await
    }
}

/// Newest-first list of saved ideas, unique by exact text.
///
/// Ideas have no identifier: two ideas with the same text are one entry.
/// Nothing is cached, every call re-reads the slot.
#[derive(Debug, Clone)]
pub struct HistoryStore<S> {
    storage: S,
    slot: String,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_slot(storage, HISTORY_SLOT)
    }

    pub fn with_slot(storage: S, slot: impl Into<String>) -> Self {
        Self {
            storage,
            slot: slot.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Saved ideas, newest first. Unset or unreadable data reads as empty.
    pub async fn list(&self) -> Result<Vec<String>, HistoryError> {
        let raw = self.storage.get_item(&self.slot).await?;
        Ok(parse_history(raw.as_deref()))
    }

    pub async fn contains(&self, text: &str) -> Result<bool, HistoryError> {
        Ok(self.list().await?.iter().any(|idea| idea == text))
    }

    /// Insert `text` at the front unless it is already saved.
    ///
    /// Returns `true` when the idea was inserted.
    pub async fn save(&self, text: &str) -> Result<bool, HistoryError> {
        let mut ideas = self.list().await?;
        if ideas.iter().any(|idea| idea == text) {
            debug!("Idea already saved, skipping");
            return Ok(false);
        }
        ideas.insert(0, text.to_string());
        self.write(&ideas).await?;
        debug!("Saved idea, history now has {} entries", ideas.len());
        Ok(true)
    }

    /// Delete every entry equal to `text`, returning how many were removed.
    pub async fn remove(&self, text: &str) -> Result<usize, HistoryError> {
        let mut ideas = self.list().await?;
        let before = ideas.len();
        ideas.retain(|idea| idea != text);
        self.write(&ideas).await?;
        Ok(before - ideas.len())
    }

    /// Delete all saved ideas.
    pub async fn clear(&self) -> Result<(), HistoryError> {
        self.storage.remove_item(&self.slot).await?;
        debug!("Cleared history slot {}", self.slot);
        Ok(())
    }

    async fn write(&self, ideas: &[String]) -> Result<(), HistoryError> {
        let encoded = serde_json::to_string(ideas)?;
        self.storage.set_item(&self.slot, encoded).await
    }
}

fn parse_history(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(ideas) => ideas,
        Err(e) => {
            warn!("Ignoring unreadable history data: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryKeyValueStore;

    fn store() -> HistoryStore<InMemoryKeyValueStore> {
        HistoryStore::new(InMemoryKeyValueStore::new())
    }

    #[tokio::test]
    async fn test_empty_when_unset() {
        assert!(store().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_is_newest_first() {
        let history = store();
        assert!(history.save("a").await.unwrap());
        assert!(history.save("b").await.unwrap());
        assert_eq!(history.list().await.unwrap(), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_save_is_idempotent() {
        let history = store();
        history.save("a").await.unwrap();
        assert!(!history.save("a").await.unwrap());
        assert_eq!(history.list().await.unwrap(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_duplicate_does_not_move_to_front() {
        let history = store();
        history.save("a").await.unwrap();
        history.save("b").await.unwrap();
        history.save("a").await.unwrap();
        assert_eq!(history.list().await.unwrap(), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_save_then_remove() {
        let history = store();
        history.save("a").await.unwrap();
        assert_eq!(history.remove("a").await.unwrap(), 1);
        assert!(history.list().await.unwrap().is_empty());
        assert_eq!(history.remove("a").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_remove_keeps_others_in_order() {
        let history = store();
        for idea in ["a", "b", "c"] {
            history.save(idea).await.unwrap();
        }
        history.remove("b").await.unwrap();
        assert_eq!(history.list().await.unwrap(), vec!["c", "a"]);
    }

    #[tokio::test]
    async fn test_clear() {
        let history = store();
        history.clear().await.unwrap();
        assert!(history.list().await.unwrap().is_empty());

        history.save("a").await.unwrap();
        history.save("b").await.unwrap();
        history.clear().await.unwrap();
        assert!(history.list().await.unwrap().is_empty());
        assert_eq!(history.storage().get_item(HISTORY_SLOT).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_contains_uses_exact_text() {
        let history = store();
        history.save("Idea").await.unwrap();
        assert!(history.contains("Idea").await.unwrap());
        assert!(!history.contains("idea").await.unwrap());
        assert!(!history.contains("Idea ").await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_data_reads_as_empty() {
        let history = store();
        for raw in ["not json", "{\"a\":1}", "[1,2,3]", "\"text\"", "null"] {
            history
                .storage()
                .set_item(HISTORY_SLOT, raw.to_string())
                .await
                .unwrap();
            assert!(history.list().await.unwrap().is_empty(), "raw value {raw}");
        }

        // Saving over corrupt data starts a fresh list
        history.save("fresh").await.unwrap();
        assert_eq!(history.list().await.unwrap(), vec!["fresh"]);
    }

    #[tokio::test]
    async fn test_persisted_form_is_json_array() {
        let history = store();
        history.save("first \"quoted\"").await.unwrap();
        history.save("second\nline").await.unwrap();

        let raw = history.storage().get_item(HISTORY_SLOT).await.unwrap().unwrap();
        let decoded: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(decoded, vec!["second\nline", "first \"quoted\""]);
    }

    #[tokio::test]
    async fn test_stores_share_storage_without_cache() {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let first = HistoryStore::new(storage.clone());
        let second = HistoryStore::new(storage);

        first.save("a").await.unwrap();
        assert_eq!(second.list().await.unwrap(), vec!["a"]);
        second.remove("a").await.unwrap();
        assert!(first.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_custom_slot_is_isolated() {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let default_slot = HistoryStore::new(storage.clone());
        let other_slot = HistoryStore::with_slot(storage, "otherHistory");

        default_slot.save("a").await.unwrap();
        assert!(other_slot.list().await.unwrap().is_empty());
    }
}
