use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::fs;

use crate::store::{HistoryError, KeyValueStore};

const STORAGE_FILE_NAME: &str = "storage.json";
const APP_DIR_NAME: &str = "lavender-lab";

/// KeyValueStore backed by one JSON object file of slot name to value.
///
/// A missing file is an empty store. A file that is not a JSON object of
/// strings is also read as empty and replaced on the next write.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `{data_dir}/lavender-lab/storage.json`
    pub fn default_path() -> Result<PathBuf, HistoryError> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            HistoryError::Storage("Could not determine data directory".to_string())
        })?;
        Ok(data_dir.join(APP_DIR_NAME).join(STORAGE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, HistoryError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(
                    "Storage file {} is unreadable, treating it as empty: {}",
                    self.path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
        }
    }

    async fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, content).await?;
        debug!("Wrote {} slots to {}", items.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, HistoryError> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), HistoryError> {
        let mut items = self.read_all().await?;
        items.insert(key.to_string(), value);
        self.write_all(&items).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), HistoryError> {
        let mut items = self.read_all().await?;
        if items.remove(key).is_some() {
            self.write_all(&items).await?;
        }
        Ok(())
    }
}
