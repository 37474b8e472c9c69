//! File-backed key-value store standing in for browser local storage.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt local storage: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Every write rewrites the whole file; the map is tiny.
#[derive(Debug)]
pub struct LocalStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Value>>,
}

impl LocalStorage {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        info!(
            "Local storage at {} holds {} keys",
            path.display(),
            entries.len()
        );
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub async fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let entries = self.entries.lock().await;
        match entries.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Persists first; the in-memory map only changes once the file is written.
    pub async fn set_item<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let value = serde_json::to_value(value)?;
        let mut entries = self.entries.lock().await;
        let mut next = entries.clone();
        next.insert(key.to_string(), value);
        self.write(&next).await?;
        *entries = next;
        debug!("local storage: set {key}");
        Ok(())
    }

    pub async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().await;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.write(&next).await?;
        *entries = next;
        debug!("local storage: removed {key}");
        Ok(())
    }

    async fn write(&self, entries: &BTreeMap<String, Value>) -> Result<(), StorageError> {
        let body = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::open(dir.path().join("storage.json"))
            .await
            .unwrap();
        assert_eq!(storage.get_item::<String>("theme").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        {
            let storage = LocalStorage::open(&path).await.unwrap();
            storage.set_item("theme", &"dark").await.unwrap();
            storage.set_item("count", &3).await.unwrap();
            storage.remove_item("count").await.unwrap();
        }
        let reopened = LocalStorage::open(&path).await.unwrap();
        assert_eq!(
            reopened.get_item::<String>("theme").await.unwrap().as_deref(),
            Some("dark")
        );
        assert_eq!(reopened.get_item::<u32>("count").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            LocalStorage::open(&path).await,
            Err(StorageError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_state_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the file should be makes every write fail
        let path = dir.path().join("blocked");
        std::fs::create_dir(&path).unwrap();
        let storage = LocalStorage {
            path,
            entries: Mutex::new(BTreeMap::new()),
        };
        assert!(storage.set_item("theme", &"dark").await.is_err());
        assert_eq!(storage.get_item::<String>("theme").await.unwrap(), None);
    }
}
