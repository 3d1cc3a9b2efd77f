//! Save-Data Transfer
//!
//! Bulk export/import of the whole persisted namespace as a JSON object
//! mapping every durable key to its serialized value. Consuming state
//! must be reloaded after an import.

use std::collections::BTreeMap;

use crate::domain::{DomainError, DomainResult};

use super::traits::KeyValueStore;

/// Serialize every durable key to a portable JSON object.
pub async fn export_all(store: &dyn KeyValueStore) -> DomainResult<String> {
    let mut namespace = BTreeMap::new();
    for key in store.keys().await? {
        if let Some(value) = store.get(&key).await? {
            namespace.insert(key, value);
        }
    }
    serde_json::to_string_pretty(&namespace).map_err(|e| DomainError::Internal(e.to_string()))
}

/// Write every key of a previously exported namespace object.
pub async fn import_all(store: &dyn KeyValueStore, data: &str) -> DomainResult<()> {
    let namespace: BTreeMap<String, String> =
        serde_json::from_str(data).map_err(|e| DomainError::Parse(e.to_string()))?;
    for (key, value) in &namespace {
        store.set(key, value).await?;
    }
    Ok(())
}
