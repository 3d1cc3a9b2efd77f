//! Store Layer
//!
//! In-memory single sources of truth for the card and board collections
//! and their id counters. Persistence is explicit and lives in the
//! repository layer.

mod board_store;
mod card_store;

pub use board_store::BoardStore;
pub use card_store::CardStore;
