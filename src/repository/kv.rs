//! Key-Value Backends
//!
//! In-memory and JSON-file implementations of the durable key-value
//! medium. The file store rewrites the whole map on every set, so the
//! on-disk record is always a complete snapshot.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

use super::traits::KeyValueStore;

/// In-memory store for tests and first-boot defaults
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the whole namespace, for equality checks in tests
    pub async fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> DomainResult<Vec<String>> {
        Ok(self.entries.lock().await.keys().cloned().collect())
    }
}

/// JSON-file-backed store
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the backing file, creating state for a missing or empty one.
    /// A corrupt file surfaces as a recoverable `Parse` error.
    pub fn open(path: impl Into<PathBuf>) -> DomainResult<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) if !text.trim().is_empty() => {
                serde_json::from_str(&text).map_err(|e| DomainError::Parse(e.to_string()))?
            }
            _ => BTreeMap::new(),
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> DomainResult<()> {
        let text = serde_json::to_string_pretty(entries)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        std::fs::write(&self.path, text).map_err(|e| DomainError::Internal(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        let mut entries = self.entries.lock().await;
        entries.remove(key);
        self.flush(&entries)
    }

    async fn keys(&self) -> DomainResult<Vec<String>> {
        Ok(self.entries.lock().await.keys().cloned().collect())
    }
}
