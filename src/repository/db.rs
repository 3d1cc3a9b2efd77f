//! Database Connection and Setup
//!
//! Manages the embedded SQLite database and migrations.

use std::path::Path;

use rusqlite::Connection;

use crate::domain::{DomainError, DomainResult};

/// Open (or create) the database at `path` and run migrations.
pub fn init_db(path: &Path) -> DomainResult<Connection> {
    let conn = Connection::open(path).map_err(|e| DomainError::Internal(e.to_string()))?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// In-memory database for tests.
pub fn init_memory_db() -> DomainResult<Connection> {
    let conn = Connection::open_in_memory().map_err(|e| DomainError::Internal(e.to_string()))?;
    run_migrations(&conn)?;
    Ok(conn)
}

fn run_migrations(conn: &Connection) -> DomainResult<()> {
    // position is the per-lane ordinal; seq preserves the flat backing
    // sequence so a load restores the exact pre-save order
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY,
            lane_id INTEGER NOT NULL,
            board_id INTEGER,
            title TEXT,
            description TEXT,
            notes TEXT,
            show_notes INTEGER NOT NULL DEFAULT 0,
            position INTEGER NOT NULL DEFAULT 0,
            seq INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER,
            updated_at INTEGER
        );
        CREATE INDEX IF NOT EXISTS idx_cards_lane ON cards(lane_id);
        CREATE TABLE IF NOT EXISTS meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )
    .map_err(|e| DomainError::Internal(e.to_string()))
}
