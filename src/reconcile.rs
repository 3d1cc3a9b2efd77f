//! Drag Reconciliation
//!
//! Pure computation of the next card collection from the current
//! collection, the moving card, and the drop target. No I/O and no store
//! access; callers feed the result back into the store.

use std::collections::HashMap;

use dragdrop_core::DropTarget;

use crate::domain::Card;

/// Destination resolved from a drop target
#[derive(Debug, Clone, Copy, PartialEq)]
struct Destination {
    lane: u32,
    board: Option<u32>,
    /// Sibling whose index the moved card takes, when the target was a card
    sibling: Option<u32>,
}

fn resolve(cards: &[Card], target: &DropTarget) -> Option<Destination> {
    match *target {
        DropTarget::Lane { id, board } => Some(Destination {
            lane: id,
            board,
            sibling: None,
        }),
        DropTarget::Card { id, lane } => {
            // The sibling must still exist; a stale target is not an error,
            // just not a move.
            let owner = cards.iter().find(|c| c.id == id)?;
            Some(Destination {
                lane,
                board: owner.board,
                sibling: Some(id),
            })
        }
    }
}

/// Compute the next collection for a drop of `moving_id` on `target`.
///
/// Returns `None` when the drop changes nothing (self-drop, unknown ids,
/// already in place) so callers can skip the store write and the save.
///
/// Semantics:
/// - lane target: the card is removed from the flat sequence and appended
///   to its end with the new lane/board, making it last in the new lane
/// - card target: the card takes the sibling's index in the flat sequence,
///   landing immediately before it; the relative order of all other cards
///   is unchanged
/// - `updated_at` is stamped with `now_ms` only when lane or board
///   membership changes, never for in-lane reordering
pub fn reconcile(
    cards: &[Card],
    moving_id: u32,
    target: &DropTarget,
    now_ms: i64,
) -> Option<Vec<Card>> {
    let from = cards.iter().position(|c| c.id == moving_id)?;
    let dest = resolve(cards, target)?;

    if dest.sibling == Some(moving_id) {
        // Dropped on itself
        return None;
    }

    let reassigned = cards[from].lane != dest.lane || cards[from].board != dest.board;

    if dest.sibling.is_none() && !reassigned {
        // Lane-region drop on the lane the card already lives in
        return None;
    }

    let mut next = cards.to_vec();
    let mut card = next.remove(from);

    let insert_at = match dest.sibling {
        Some(sibling) => next.iter().position(|c| c.id == sibling)?,
        None => next.len(),
    };

    card.lane = dest.lane;
    card.board = dest.board;
    if reassigned {
        card.updated_at = Some(now_ms);
    }
    next.insert(insert_at, card);
    resequence(&mut next);

    if next == cards {
        return None;
    }
    Some(next)
}

/// Re-number `position` within each lane to 0..k-1 in sequence order.
///
/// Run after any mutation that changes membership or order; storage engines
/// that do not preserve insertion order sort by this field on load.
pub fn resequence(cards: &mut [Card]) {
    let mut counters: HashMap<u32, i32> = HashMap::new();
    for card in cards.iter_mut() {
        let counter = counters.entry(card.lane).or_insert(0);
        card.position = *counter;
        *counter += 1;
    }
}

/// Move one element of `items` from `from` to `to`, preserving the relative
/// order of all others.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: u32, lane: u32) -> Card {
        Card::new(id, lane)
    }

    fn lane_target(id: u32) -> DropTarget {
        DropTarget::Lane { id, board: None }
    }

    fn sequenced(mut cards: Vec<Card>) -> Vec<Card> {
        resequence(&mut cards);
        cards
    }

    fn ids(cards: &[Card]) -> Vec<u32> {
        cards.iter().map(|c| c.id).collect()
    }

    #[test]
    fn empty_region_drop_appends_to_new_lane() {
        // [{1,A},{2,A},{3,B}], drop 1 onto lane B
        let cards = sequenced(vec![card(1, 1), card(2, 1), card(3, 2)]);
        let next = reconcile(&cards, 1, &lane_target(2), 99).unwrap();
        assert_eq!(ids(&next), vec![2, 3, 1]);
        assert_eq!(next[2].lane, 2);
        // Untouched cards keep their relative order
        assert_eq!(next[0].lane, 1);
        assert_eq!(next[1].lane, 2);
    }

    #[test]
    fn sibling_drop_reinserts_before_the_sibling() {
        // [{1,A},{2,A},{3,B}], drop 3 onto card 2
        let cards = sequenced(vec![card(1, 1), card(2, 1), card(3, 2)]);
        let next = reconcile(&cards, 3, &DropTarget::Card { id: 2, lane: 1 }, 99).unwrap();
        assert_eq!(ids(&next), vec![1, 3, 2]);
        assert_eq!(next[1].lane, 1);
    }

    #[test]
    fn sibling_drop_from_before_also_lands_before() {
        // Same convention in both directions: the moved card takes the
        // sibling's index after removal.
        let cards = sequenced(vec![card(1, 1), card(2, 1), card(3, 1)]);
        let next = reconcile(&cards, 1, &DropTarget::Card { id: 3, lane: 1 }, 99).unwrap();
        assert_eq!(ids(&next), vec![2, 1, 3]);
    }

    #[test]
    fn in_lane_reorder_preserves_other_lanes() {
        let cards = sequenced(vec![
            card(1, 1),
            card(4, 2),
            card(2, 1),
            card(5, 2),
            card(3, 1),
        ]);
        let next = reconcile(&cards, 3, &DropTarget::Card { id: 1, lane: 1 }, 99).unwrap();
        assert_eq!(ids(&next), vec![3, 1, 4, 2, 5]);
        let lane2: Vec<u32> = next.iter().filter(|c| c.lane == 2).map(|c| c.id).collect();
        assert_eq!(lane2, vec![4, 5]);
    }

    #[test]
    fn drop_on_self_is_a_no_op() {
        let cards = sequenced(vec![card(1, 1), card(2, 1)]);
        assert!(reconcile(&cards, 1, &DropTarget::Card { id: 1, lane: 1 }, 99).is_none());
    }

    #[test]
    fn drop_on_own_lane_in_last_place_is_a_no_op() {
        let cards = sequenced(vec![card(1, 1), card(2, 1), card(3, 2)]);
        assert!(reconcile(&cards, 2, &lane_target(1), 99).is_none());
    }

    #[test]
    fn unknown_moving_id_is_a_no_op() {
        let cards = sequenced(vec![card(1, 1)]);
        assert!(reconcile(&cards, 42, &lane_target(1), 99).is_none());
    }

    #[test]
    fn stale_sibling_target_is_a_no_op() {
        let cards = sequenced(vec![card(1, 1), card(2, 1)]);
        assert!(reconcile(&cards, 1, &DropTarget::Card { id: 42, lane: 1 }, 99).is_none());
    }

    #[test]
    fn positions_are_resequenced_per_lane() {
        let cards = sequenced(vec![card(1, 1), card(2, 1), card(3, 2)]);
        let next = reconcile(&cards, 1, &lane_target(2), 99).unwrap();
        for lane in [1, 2] {
            let positions: Vec<i32> = next
                .iter()
                .filter(|c| c.lane == lane)
                .map(|c| c.position)
                .collect();
            let expected: Vec<i32> = (0..positions.len() as i32).collect();
            assert_eq!(positions, expected, "lane {lane}");
        }
    }

    #[test]
    fn reassignment_stamps_updated_at_but_reorder_does_not() {
        let cards = sequenced(vec![card(1, 1), card(2, 1), card(3, 2)]);
        let moved = reconcile(&cards, 1, &lane_target(2), 1234).unwrap();
        assert_eq!(moved.iter().find(|c| c.id == 1).unwrap().updated_at, Some(1234));

        let reordered = reconcile(&cards, 2, &DropTarget::Card { id: 1, lane: 1 }, 1234).unwrap();
        assert_eq!(reordered.iter().find(|c| c.id == 2).unwrap().updated_at, None);
    }

    #[test]
    fn cross_board_drop_updates_board() {
        let mut a = card(1, 1);
        a.board = Some(1);
        let mut b = card(2, 2);
        b.board = Some(2);
        let cards = sequenced(vec![a, b]);

        let next = reconcile(
            &cards,
            1,
            &DropTarget::Lane {
                id: 2,
                board: Some(2),
            },
            99,
        )
        .unwrap();
        let moved = next.iter().find(|c| c.id == 1).unwrap();
        assert_eq!(moved.lane, 2);
        assert_eq!(moved.board, Some(2));
    }

    #[test]
    fn array_move_preserves_relative_order() {
        let mut items = vec![1, 2, 3, 4, 5];
        array_move(&mut items, 0, 3);
        assert_eq!(items, vec![2, 3, 4, 1, 5]);
        array_move(&mut items, 3, 0);
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        // Out-of-range source is ignored
        array_move(&mut items, 9, 0);
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }
}
