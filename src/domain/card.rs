//! Card Entity
//!
//! The draggable unit of content on a board.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// A card inside a lane
///
/// The relative order of cards within one lane is their order in the flat
/// backing collection filtered by `lane`; `position` mirrors that order for
/// storage engines that do not preserve insertion order and is re-sequenced
/// after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier, assigned at creation, never reused
    pub id: u32,
    /// Owning lane
    pub lane: u32,
    /// Owning board (when boards are in use)
    pub board: Option<u32>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Markdown notes
    pub notes: Option<String>,
    /// Always show notes under the description
    #[serde(default)]
    pub show_notes: bool,
    /// Ordinal within the lane (0-based, no gaps once persisted)
    #[serde(default)]
    pub position: i32,
    pub created_at: Option<i64>,
    /// Stamped on lane/board reassignment, not on in-lane reordering
    pub updated_at: Option<i64>,
}

impl Card {
    /// Create a new card in a lane with default values
    pub fn new(id: u32, lane: u32) -> Self {
        Self {
            id,
            lane,
            board: None,
            title: None,
            description: None,
            notes: None,
            show_notes: false,
            position: 0,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Entity for Card {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation() {
        let card = Card::new(1, 10);
        assert_eq!(card.id(), 1);
        assert_eq!(card.lane, 10);
        assert!(card.board.is_none());
        assert_eq!(card.position, 0);
    }

    #[test]
    fn test_card_serialization_defaults() {
        // Older save data predates show_notes and position
        let card: Card = serde_json::from_str(
            r#"{"id":3,"lane":1,"board":null,"title":"a","description":null,"notes":null,"created_at":null,"updated_at":null}"#,
        )
        .unwrap();
        assert!(!card.show_notes);
        assert_eq!(card.position, 0);
    }
}
