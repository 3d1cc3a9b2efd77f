//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use a key-value medium, SQLite, in-memory, etc.

use async_trait::async_trait;

use crate::domain::{DomainResult, Entity};

/// Durable key-value medium (the local-storage analog).
///
/// Writes are whole-value replacements; a durable record is only ever a
/// complete snapshot, never a partial patch.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;
    async fn remove(&self, key: &str) -> DomainResult<()>;
    /// Every key currently stored, for namespace export
    async fn keys(&self) -> DomainResult<Vec<String>>;
}

/// Durable save/restore of one collection and its id counter.
#[async_trait]
pub trait CollectionGateway<T: Entity>: Send + Sync {
    /// Serialize the collection and counter. Safe to call redundantly:
    /// saving the same state twice produces the same durable record.
    async fn save(&self, items: &[T], next_id: u32) -> DomainResult<()>;

    /// Restore the collection and counter. `None` when nothing was ever
    /// saved; a parse failure comes back as `DomainError::Parse` without
    /// mutating anything.
    async fn load(&self) -> DomainResult<Option<(Vec<T>, u32)>>;
}
