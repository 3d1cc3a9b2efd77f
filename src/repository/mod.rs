//! Repository Layer
//!
//! Persistence gateways and the abstract interfaces for data access.
//! Implementations cover a key-value medium (the local-storage analog,
//! in-memory or JSON-file backed) and an embedded SQLite document table.

mod card_table;
mod db;
mod kv;
mod kv_gateway;
mod traits;
mod transfer;


use std::sync::Arc;

use crate::domain::{Board, Card};

pub use card_table::DbGateway;
pub use db::{init_db, init_memory_db};
pub use kv::{FileStore, MemoryStore};
pub use kv_gateway::KvGateway;
pub use traits::{CollectionGateway, KeyValueStore};
pub use transfer::{export_all, import_all};

/// Durable keys: two logical keys per collection type
pub const CARDS_KEY: &str = "citrine.cards";
pub const CARDS_NEXT_ID_KEY: &str = "citrine.cards.next-id";
pub const BOARDS_KEY: &str = "citrine.boards";
pub const BOARDS_NEXT_ID_KEY: &str = "citrine.boards.next-id";

/// Card gateway over a key-value medium, under the standard keys.
pub fn card_gateway(store: Arc<dyn KeyValueStore>) -> KvGateway<Card> {
    KvGateway::new(store, CARDS_KEY, CARDS_NEXT_ID_KEY)
}

/// Board gateway over a key-value medium, under the standard keys.
pub fn board_gateway(store: Arc<dyn KeyValueStore>) -> KvGateway<Board> {
    KvGateway::new(store, BOARDS_KEY, BOARDS_NEXT_ID_KEY)
}
