//! DragDrop Core
//!
//! Framework-agnostic drag-and-drop gesture tracking for pointer input.
//! Uses a movement threshold to distinguish click from drag.

use serde::{Deserialize, Serialize};

/// Drop target types, tagged once at the input boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DropTarget {
    /// Drop on a lane body (append to that lane)
    Lane { id: u32, board: Option<u32> },
    /// Drop on a sibling card; `lane` is the lane that owns that card
    Card { id: u32, lane: u32 },
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// A pressed card that has not yet crossed the drag threshold
#[derive(Clone, Copy, Debug)]
struct PendingDrag {
    id: u32,
    start_x: i32,
    start_y: i32,
}

/// Pointer-level gesture state.
///
/// Translates raw pointer events into the three-phase gesture stream
/// (start, hover, drop/cancel) consumed by the board engine.
#[derive(Debug, Default)]
pub struct PointerTracker {
    /// Pending card (pointer down but not yet dragging)
    pending: Option<PendingDrag>,
    dragging: Option<u32>,
    target: Option<DropTarget>,
    just_ended: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Card being dragged, once the threshold has been crossed
    pub fn dragging(&self) -> Option<u32> {
        self.dragging
    }

    /// Drop target currently under the pointer
    pub fn target(&self) -> Option<DropTarget> {
        self.target
    }

    /// True right after a gesture ends, until cleared. Callers use this to
    /// suppress the click that fires on the same pointer-up.
    pub fn just_ended(&self) -> bool {
        self.just_ended
    }

    pub fn clear_just_ended(&mut self) {
        self.just_ended = false;
    }

    /// Record a primary-button press on a card with its start position.
    pub fn on_pointer_down(&mut self, id: u32, x: i32, y: i32) {
        self.pending = Some(PendingDrag {
            id,
            start_x: x,
            start_y: y,
        });
    }

    /// Pointer movement. Returns the card id when this movement crosses the
    /// threshold and starts a drag.
    pub fn on_pointer_move(&mut self, x: i32, y: i32) -> Option<u32> {
        let pending = self.pending?;
        if self.dragging.is_some() {
            return None;
        }
        let dx = (x - pending.start_x).abs();
        let dy = (y - pending.start_y).abs();
        if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
            self.dragging = Some(pending.id);
            return self.dragging;
        }
        None
    }

    /// Pointer entered a card. Dropping on itself is not a target.
    pub fn on_card_enter(&mut self, id: u32, lane: u32) {
        if let Some(dragging) = self.dragging {
            if dragging != id {
                self.target = Some(DropTarget::Card { id, lane });
            }
        }
    }

    /// Pointer entered a lane body (empty-region drop).
    pub fn on_lane_enter(&mut self, id: u32, board: Option<u32>) {
        if self.dragging.is_some() {
            self.target = Some(DropTarget::Lane { id, board });
        }
    }

    /// Pointer left the current target.
    pub fn on_leave(&mut self) {
        if self.dragging.is_some() {
            self.target = None;
        }
    }

    /// Pointer released. Returns the completed gesture when an actual drag
    /// was in progress over a target; a plain click returns `None`. All
    /// transient state is cleared either way.
    pub fn on_pointer_up(&mut self) -> Option<(u32, DropTarget)> {
        let gesture = match (self.dragging, self.target) {
            (Some(dragged), Some(target)) => Some((dragged, target)),
            _ => None,
        };
        self.end();
        gesture
    }

    /// Abort the gesture (escape key or drop outside any target).
    pub fn cancel(&mut self) {
        log::debug!("drag gesture cancelled");
        self.end();
    }

    fn end(&mut self) {
        self.pending = None;
        self.dragging = None;
        self.target = None;
        self.just_ended = true;
    }
}
