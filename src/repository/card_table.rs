//! Card Document Table
//!
//! SQLite-backed gateway for the card collection. A save replaces the
//! whole table inside one transaction, so the durable record is always a
//! complete snapshot and redundant saves are harmless.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;

use crate::domain::{Card, DomainError, DomainResult};

use super::traits::CollectionGateway;

const NEXT_ID_META_KEY: &str = "cards.next-id";

pub struct DbGateway {
    conn: Arc<Mutex<Connection>>,
}

impl DbGateway {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CollectionGateway<Card> for DbGateway {
    async fn save(&self, items: &[Card], next_id: u32) -> DomainResult<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        tx.execute("DELETE FROM cards", [])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO cards (id, lane_id, board_id, title, description, notes, \
                     show_notes, position, seq, created_at, updated_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                )
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            for (seq, card) in items.iter().enumerate() {
                stmt.execute(params![
                    card.id,
                    card.lane,
                    card.board,
                    card.title,
                    card.description,
                    card.notes,
                    card.show_notes as i32,
                    card.position,
                    seq as i64,
                    card.created_at,
                    card.updated_at,
                ])
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            }
        }
        tx.execute(
            "INSERT OR REPLACE INTO meta (key, value) VALUES (?1, ?2)",
            params![NEXT_ID_META_KEY, next_id.to_string()],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;
        tx.commit().map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn load(&self) -> DomainResult<Option<(Vec<Card>, u32)>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare(
                "SELECT id, lane_id, board_id, title, description, notes, show_notes, \
                 position, created_at, updated_at FROM cards ORDER BY seq, id",
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let rows = stmt
            .query_map([], row_to_card)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let mut cards = Vec::new();
        for row in rows {
            cards.push(row.map_err(|e| DomainError::Internal(e.to_string()))?);
        }

        let counter: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = ?1",
                params![NEXT_ID_META_KEY],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if cards.is_empty() && counter.is_none() {
            return Ok(None);
        }
        let next_id = counter
            .and_then(|text| text.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(1);
        Ok(Some((cards, next_id)))
    }
}

/// Convert a database row to Card
fn row_to_card(row: &rusqlite::Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        lane: row.get(1)?,
        board: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        notes: row.get(5)?,
        show_notes: row.get::<_, i32>(6)? != 0,
        position: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}
