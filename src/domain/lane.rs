//! Lane Entity

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// An ordered grouping of cards within one board
///
/// Lanes do not store a member list; membership is derived by filtering
/// the card collection on its `lane` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub id: u32,
    /// Owning board
    pub board: u32,
    pub title: Option<String>,
}

impl Lane {
    pub fn new(id: u32, board: u32) -> Self {
        Self {
            id,
            board,
            title: None,
        }
    }
}

impl Entity for Lane {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
