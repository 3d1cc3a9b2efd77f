//! Board Store
//!
//! Owns the board collection (boards with their ordered lanes) and one
//! shared id counter for boards and lanes, so a card's lane reference is
//! unambiguous across boards.

use crate::domain::{Board, DomainError, DomainResult, Lane};
use crate::reconcile;

#[derive(Debug)]
pub struct BoardStore {
    boards: Vec<Board>,
    next_id: u32,
    revision: u64,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardStore {
    pub fn new() -> Self {
        Self {
            boards: Vec::new(),
            next_id: 1,
            revision: 0,
        }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: u32) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    pub fn find_lane(&self, lane_id: u32) -> Option<&Lane> {
        self.boards.iter().find_map(|b| b.find_lane(lane_id))
    }

    pub fn lane_exists(&self, lane_id: u32) -> bool {
        self.find_lane(lane_id).is_some()
    }

    /// Replace in-memory state from persisted data. The counter is clamped
    /// above every restored board and lane id.
    pub fn restore(&mut self, boards: Vec<Board>, next_id: u32) {
        let max_id = boards
            .iter()
            .flat_map(|b| std::iter::once(b.id).chain(b.lanes.iter().map(|l| l.id)))
            .max()
            .unwrap_or(0);
        self.boards = boards;
        self.next_id = next_id.max(max_id + 1);
        self.revision += 1;
    }

    pub fn add_board(&mut self, mut board: Board) -> u32 {
        let id = self.next_id;
        board.id = id;
        self.next_id += 1;
        // Lanes created together with the board also need real ids
        for lane in &mut board.lanes {
            lane.id = self.next_id;
            lane.board = id;
            self.next_id += 1;
        }
        self.boards.push(board);
        self.revision += 1;
        id
    }

    pub fn update_board(&mut self, board: Board) -> DomainResult<Board> {
        match self.boards.iter_mut().find(|b| b.id == board.id) {
            Some(slot) => {
                if *slot != board {
                    *slot = board.clone();
                    self.revision += 1;
                }
                Ok(board)
            }
            None => Err(DomainError::NotFound(format!(
                "board {} not found",
                board.id
            ))),
        }
    }

    pub fn remove_board(&mut self, id: u32) -> DomainResult<()> {
        let len = self.boards.len();
        self.boards.retain(|b| b.id != id);
        if self.boards.len() == len {
            return Err(DomainError::NotFound(format!("board {} not found", id)));
        }
        self.revision += 1;
        Ok(())
    }

    /// Append a lane to a board, drawing its id from the shared counter.
    pub fn add_lane(&mut self, board_id: u32, title: Option<String>) -> DomainResult<u32> {
        let id = self.next_id;
        let board = self
            .boards
            .iter_mut()
            .find(|b| b.id == board_id)
            .ok_or_else(|| DomainError::NotFound(format!("board {} not found", board_id)))?;
        let mut lane = Lane::new(id, board_id);
        lane.title = title;
        board.lanes.push(lane);
        self.next_id += 1;
        self.revision += 1;
        Ok(id)
    }

    /// Replace a lane in place. Lanes do not move between boards.
    pub fn update_lane(&mut self, lane: Lane) -> DomainResult<Lane> {
        let slot = self
            .boards
            .iter_mut()
            .flat_map(|b| b.lanes.iter_mut())
            .find(|l| l.id == lane.id)
            .ok_or_else(|| DomainError::NotFound(format!("lane {} not found", lane.id)))?;
        if slot.board != lane.board {
            return Err(DomainError::InvalidInput(format!(
                "lane {} cannot change boards",
                lane.id
            )));
        }
        if *slot != lane {
            *slot = lane.clone();
            self.revision += 1;
        }
        Ok(lane)
    }

    pub fn remove_lane(&mut self, lane_id: u32) -> DomainResult<()> {
        for board in &mut self.boards {
            let len = board.lanes.len();
            board.lanes.retain(|l| l.id != lane_id);
            if board.lanes.len() != len {
                self.revision += 1;
                return Ok(());
            }
        }
        Err(DomainError::NotFound(format!("lane {} not found", lane_id)))
    }

    /// Reorder a lane within its board (a drag of the lane itself).
    pub fn move_lane(&mut self, board_id: u32, lane_id: u32, to: usize) -> DomainResult<bool> {
        let board = self
            .boards
            .iter_mut()
            .find(|b| b.id == board_id)
            .ok_or_else(|| DomainError::NotFound(format!("board {} not found", board_id)))?;
        let from = board
            .lanes
            .iter()
            .position(|l| l.id == lane_id)
            .ok_or_else(|| DomainError::NotFound(format!("lane {} not found", lane_id)))?;
        let to = to.min(board.lanes.len().saturating_sub(1));
        if from == to {
            return Ok(false);
        }
        reconcile::array_move(&mut board.lanes, from, to);
        self.revision += 1;
        Ok(true)
    }

    /// Apply a whole-collection transform with no-op detection.
    pub fn replace<F>(&mut self, transform: F) -> bool
    where
        F: FnOnce(&[Board]) -> Vec<Board>,
    {
        let next = transform(&self.boards);
        if next == self.boards {
            return false;
        }
        self.boards = next;
        self.revision += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_board() -> (BoardStore, u32) {
        let mut store = BoardStore::new();
        let board = store.add_board(Board::new(0));
        (store, board)
    }

    #[test]
    fn boards_and_lanes_share_the_counter() {
        let (mut store, board) = store_with_board();
        let lane_a = store.add_lane(board, Some("todo".to_string())).unwrap();
        let lane_b = store.add_lane(board, Some("done".to_string())).unwrap();
        assert_eq!((board, lane_a, lane_b), (1, 2, 3));
        assert!(store.lane_exists(lane_a));
    }

    #[test]
    fn add_board_assigns_ids_to_embedded_lanes() {
        let mut store = BoardStore::new();
        let mut board = Board::new(0);
        board.lanes.push(Lane::new(0, 0));
        board.lanes.push(Lane::new(0, 0));
        let id = store.add_board(board);
        let stored = store.get(id).unwrap();
        assert_eq!(stored.lanes[0].id, 2);
        assert_eq!(stored.lanes[1].id, 3);
        assert!(stored.lanes.iter().all(|l| l.board == id));
    }

    #[test]
    fn move_lane_reorders_within_board() {
        let (mut store, board) = store_with_board();
        let a = store.add_lane(board, None).unwrap();
        let b = store.add_lane(board, None).unwrap();
        let c = store.add_lane(board, None).unwrap();

        assert!(store.move_lane(board, c, 0).unwrap());
        let order: Vec<u32> = store.get(board).unwrap().lanes.iter().map(|l| l.id).collect();
        assert_eq!(order, vec![c, a, b]);

        // Moving to the current index is a no-op
        assert!(!store.move_lane(board, c, 0).unwrap());
    }

    #[test]
    fn lane_cannot_change_boards_via_update() {
        let (mut store, board) = store_with_board();
        let lane_id = store.add_lane(board, None).unwrap();
        let mut lane = store.find_lane(lane_id).unwrap().clone();
        lane.board = 99;
        assert!(matches!(
            store.update_lane(lane),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn restore_clamps_counter_above_lane_ids() {
        let mut store = BoardStore::new();
        let mut board = Board::new(4);
        board.lanes.push(Lane::new(9, 4));
        store.restore(vec![board], 2);
        assert_eq!(store.next_id(), 10);
    }
}
