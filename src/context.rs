//! Application Context
//!
//! Explicitly constructed engine state: the stores, the drag session, and
//! the persistence gateways. Lifecycle is init -> mutate* -> teardown;
//! nothing here is a process-wide singleton, so the whole engine can be
//! driven and tested without any UI framework.

use std::sync::Arc;

use dragdrop_core::DropTarget;

use crate::domain::{Board, Card, DomainError, DomainResult};
use crate::reconcile;
use crate::repository::CollectionGateway;
use crate::session::DragSession;
use crate::store::{BoardStore, CardStore};

pub struct AppContext {
    pub cards: CardStore,
    pub boards: BoardStore,
    session: DragSession,
    card_gateway: Arc<dyn CollectionGateway<Card>>,
    board_gateway: Arc<dyn CollectionGateway<Board>>,
}

impl AppContext {
    pub fn new(
        card_gateway: Arc<dyn CollectionGateway<Card>>,
        board_gateway: Arc<dyn CollectionGateway<Board>>,
    ) -> Self {
        Self {
            cards: CardStore::new(),
            boards: BoardStore::new(),
            session: DragSession::new(),
            card_gateway,
            board_gateway,
        }
    }

    /// Restore both collections from the gateways.
    ///
    /// Malformed stored data leaves the in-memory state untouched and
    /// comes back as a single recoverable error for the caller to surface.
    pub async fn load(&mut self) -> DomainResult<()> {
        match self.card_gateway.load().await {
            Ok(Some((cards, next_id))) => self.cards.restore(cards, next_id),
            Ok(None) => {}
            Err(e) => {
                log::warn!("failed to load cards: {}", e);
                return Err(e);
            }
        }
        match self.board_gateway.load().await {
            Ok(Some((boards, next_id))) => self.boards.restore(boards, next_id),
            Ok(None) => {}
            Err(e) => {
                log::warn!("failed to load boards: {}", e);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Persist the card collection. Always reads the store's current state
    /// at call time, never a snapshot captured earlier in the gesture.
    pub async fn save_cards(&self) -> DomainResult<()> {
        self.card_gateway
            .save(self.cards.cards(), self.cards.next_id())
            .await
    }

    pub async fn save_boards(&self) -> DomainResult<()> {
        self.board_gateway
            .save(self.boards.boards(), self.boards.next_id())
            .await
    }

    // ---- card CRUD (forms/dialogs boundary) ----

    /// Add a card. The lane must exist; the owning board is derived from
    /// it, so the store never receives a dangling reference silently.
    pub fn add_card(&mut self, mut card: Card) -> DomainResult<u32> {
        let lane = self
            .boards
            .find_lane(card.lane)
            .ok_or_else(|| DomainError::InvalidInput(format!("lane {} does not exist", card.lane)))?;
        card.board = Some(lane.board);
        card.created_at.get_or_insert_with(now_ms);
        Ok(self.cards.add(card))
    }

    pub fn update_card(&mut self, mut card: Card) -> DomainResult<Card> {
        let lane = self
            .boards
            .find_lane(card.lane)
            .ok_or_else(|| DomainError::InvalidInput(format!("lane {} does not exist", card.lane)))?;
        card.board = Some(lane.board);
        card.updated_at = Some(now_ms());
        self.cards.update(card)
    }

    pub fn remove_card(&mut self, id: u32) -> DomainResult<()> {
        self.cards.remove(id)
    }

    // ---- board and lane CRUD ----

    pub fn add_board(&mut self, board: Board) -> u32 {
        self.boards.add_board(board)
    }

    pub fn update_board(&mut self, board: Board) -> DomainResult<Board> {
        self.boards.update_board(board)
    }

    /// Remove a board. Refused while any of its lanes still has cards;
    /// orphaned cards are a defect, not a valid state.
    pub fn remove_board(&mut self, id: u32) -> DomainResult<()> {
        let lane_ids: Vec<u32> = self
            .boards
            .get(id)
            .ok_or_else(|| DomainError::NotFound(format!("board {} not found", id)))?
            .lanes
            .iter()
            .map(|l| l.id)
            .collect();
        for lane in lane_ids {
            let resident = self.cards.in_lane(lane).count();
            if resident > 0 {
                return Err(DomainError::Conflict(format!(
                    "lane {} still has {} cards",
                    lane, resident
                )));
            }
        }
        self.boards.remove_board(id)
    }

    pub fn add_lane(&mut self, board_id: u32, title: Option<String>) -> DomainResult<u32> {
        self.boards.add_lane(board_id, title)
    }

    /// Remove a lane. Refused while cards still live in it.
    pub fn remove_lane(&mut self, lane_id: u32) -> DomainResult<()> {
        let resident = self.cards.in_lane(lane_id).count();
        if resident > 0 {
            return Err(DomainError::Conflict(format!(
                "lane {} still has {} cards",
                lane_id, resident
            )));
        }
        self.boards.remove_lane(lane_id)
    }

    pub fn move_lane(&mut self, board_id: u32, lane_id: u32, to: usize) -> DomainResult<bool> {
        self.boards.move_lane(board_id, lane_id, to)
    }

    // ---- drag gesture boundary ----

    /// Drag started on `id`. Snapshots the committed collection for
    /// cancel and marks the card active for overlay rendering.
    pub fn on_drag_start(&mut self, id: u32) {
        if self.cards.get(id).is_none() {
            log::warn!("drag started on unknown card {}", id);
            return;
        }
        self.session.begin(id, self.cards.cards().to_vec());
        self.cards.set_active(Some(id));
    }

    /// Hover over a target. Queues a preview; repeat targets coalesce.
    pub fn on_drag_over(&mut self, active: u32, target: DropTarget) {
        self.session.hover(active, target);
    }

    /// Apply the queued preview through the reconciliation engine.
    /// Interim hover state is eventually-applied; callers pump this at
    /// whatever cadence suits their renderer.
    pub fn apply_preview(&mut self) -> bool {
        let Some(active) = self.session.active() else {
            return false;
        };
        let Some(target) = self.session.take_pending() else {
            return false;
        };
        match reconcile::reconcile(self.cards.cards(), active, &target, now_ms()) {
            Some(next) => self.cards.replace(|_| next),
            None => false,
        }
    }

    /// Terminal gesture event. `Some(target)` commits the final order
    /// synchronously, then persists; `None` cancels, restoring the last
    /// committed state, then persists. Either way the active card is
    /// cleared and at most one save is issued; a gesture that changed
    /// nothing issues none.
    pub async fn on_drag_end(
        &mut self,
        active: u32,
        target: Option<DropTarget>,
    ) -> DomainResult<()> {
        if self.session.active() != Some(active) {
            // Stale or duplicate terminal event
            self.cards.set_active(None);
            return Ok(());
        }
        match target {
            Some(target) => {
                // Drain the preview queue so the final commit starts from
                // the collection the user last saw
                self.apply_preview();
                if let Some(next) =
                    reconcile::reconcile(self.cards.cards(), active, &target, now_ms())
                {
                    self.cards.replace(|_| next);
                }
                let committed = self.session.finish();
                self.cards.set_active(None);
                if self.cards.cards() != committed.as_slice() {
                    log::debug!("drop committed for card {}", active);
                    self.save_cards().await?;
                }
            }
            None => {
                let committed = self.session.finish();
                self.cards.set_active(None);
                self.cards.replace(|_| committed);
                self.save_cards().await?;
            }
        }
        Ok(())
    }

    /// Escape-key cancel. No-op outside a gesture.
    pub async fn cancel_drag(&mut self) -> DomainResult<()> {
        match self.session.active() {
            Some(active) => self.on_drag_end(active, None).await,
            None => Ok(()),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    pub fn active_card(&self) -> Option<&Card> {
        self.cards.active_card()
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
