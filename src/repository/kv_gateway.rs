//! Collection Gateway over Key-Value Storage
//!
//! Two logical keys per collection: the serialized array and the next-id
//! counter.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{DomainError, DomainResult, Entity};

use super::traits::{CollectionGateway, KeyValueStore};

pub struct KvGateway<T> {
    store: Arc<dyn KeyValueStore>,
    collection_key: String,
    counter_key: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> KvGateway<T> {
    pub fn new(store: Arc<dyn KeyValueStore>, collection_key: &str, counter_key: &str) -> Self {
        Self {
            store,
            collection_key: collection_key.to_string(),
            counter_key: counter_key.to_string(),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<T> CollectionGateway<T> for KvGateway<T>
where
    T: Entity + Serialize + DeserializeOwned + 'static,
{
    async fn save(&self, items: &[T], next_id: u32) -> DomainResult<()> {
        let json =
            serde_json::to_string(items).map_err(|e| DomainError::Internal(e.to_string()))?;
        self.store.set(&self.collection_key, &json).await?;
        self.store.set(&self.counter_key, &next_id.to_string()).await
    }

    async fn load(&self) -> DomainResult<Option<(Vec<T>, u32)>> {
        let Some(json) = self.store.get(&self.collection_key).await? else {
            return Ok(None);
        };
        let items: Vec<T> =
            serde_json::from_str(&json).map_err(|e| DomainError::Parse(e.to_string()))?;
        // A missing or garbage counter loads as 1
        let next_id = match self.store.get(&self.counter_key).await? {
            Some(text) => text.trim().parse::<u32>().ok().filter(|n| *n > 0).unwrap_or(1),
            None => 1,
        };
        Ok(Some((items, next_id)))
    }
}
