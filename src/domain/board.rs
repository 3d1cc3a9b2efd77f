//! Board Entity

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::lane::Lane;

/// An ordered grouping of lanes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: u32,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Markdown notes
    pub notes: Option<String>,
    #[serde(default)]
    pub show_notes: bool,
    /// Lanes in display order
    #[serde(default)]
    pub lanes: Vec<Lane>,
}

impl Board {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            title: None,
            description: None,
            notes: None,
            show_notes: false,
            lanes: Vec::new(),
        }
    }

    pub fn find_lane(&self, lane_id: u32) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.id == lane_id)
    }
}

impl Entity for Board {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_lane() {
        let mut board = Board::new(1);
        board.lanes.push(Lane::new(10, 1));
        board.lanes.push(Lane::new(11, 1));
        assert_eq!(board.find_lane(11).map(|l| l.id), Some(11));
        assert!(board.find_lane(12).is_none());
    }
}
