//! Drag Session
//!
//! Transient state for a single drag gesture: the active card, the
//! committed snapshot restored on cancel, and the coalesced preview
//! target. Created on drag-start, destroyed on drag-end or drag-cancel;
//! never persisted and never outliving one gesture.

use dragdrop_core::DropTarget;

use crate::domain::Card;

#[derive(Debug, Default)]
pub struct DragSession {
    active: Option<u32>,
    /// Collection as of drag-start; cancel restores this
    committed: Vec<Card>,
    /// Latest hover target not yet applied as a preview
    pending: Option<DropTarget>,
    /// Last target a preview was applied for, to drop repeat hovers
    last_applied: Option<DropTarget>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<u32> {
        self.active
    }

    pub fn committed(&self) -> &[Card] {
        &self.committed
    }

    /// Idle -> Dragging: record the active card and snapshot the committed
    /// collection.
    pub fn begin(&mut self, id: u32, committed: Vec<Card>) {
        self.active = Some(id);
        self.committed = committed;
        self.pending = None;
        self.last_applied = None;
    }

    /// Queue a hover target. Hovers for a target already queued or already
    /// applied are dropped here, so a rapid hover stream coalesces to at
    /// most one pending preview.
    pub fn hover(&mut self, active: u32, target: DropTarget) -> bool {
        if self.active != Some(active) {
            return false;
        }
        if self.pending == Some(target) || self.last_applied == Some(target) {
            return false;
        }
        self.pending = Some(target);
        true
    }

    /// Take the queued preview target, marking it applied.
    pub fn take_pending(&mut self) -> Option<DropTarget> {
        let target = self.pending.take()?;
        self.last_applied = Some(target);
        Some(target)
    }

    /// Dragging -> Idle. Clears every field and hands back the committed
    /// snapshot; a session left active here would keep a stale drag
    /// overlay rendered indefinitely.
    pub fn finish(&mut self) -> Vec<Card> {
        self.active = None;
        self.pending = None;
        self.last_applied = None;
        std::mem::take(&mut self.committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane(id: u32) -> DropTarget {
        DropTarget::Lane { id, board: None }
    }

    #[test]
    fn hover_coalesces_repeat_targets() {
        let mut session = DragSession::new();
        session.begin(1, Vec::new());
        assert!(session.hover(1, lane(2)));
        assert!(!session.hover(1, lane(2)));
        // Newer target overwrites the queued one
        assert!(session.hover(1, lane(3)));
        assert_eq!(session.take_pending(), Some(lane(3)));
        assert_eq!(session.take_pending(), None);
        // Applied target is also suppressed
        assert!(!session.hover(1, lane(3)));
    }

    #[test]
    fn hover_for_wrong_active_card_is_ignored() {
        let mut session = DragSession::new();
        session.begin(1, Vec::new());
        assert!(!session.hover(2, lane(5)));
    }

    #[test]
    fn finish_clears_all_state() {
        let mut session = DragSession::new();
        session.begin(1, vec![Card::new(1, 1)]);
        session.hover(1, lane(2));
        let committed = session.finish();
        assert_eq!(committed.len(), 1);
        assert!(!session.is_dragging());
        assert_eq!(session.take_pending(), None);
        assert!(session.committed().is_empty());
    }
}
