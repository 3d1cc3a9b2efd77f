//! Card Store
//!
//! Owns the canonical ordered card collection and the id counter.
//! Mutations here never persist by themselves; several logical changes
//! batch into one explicit save at the context layer.

use crate::domain::{Card, DomainError, DomainResult};
use crate::reconcile;

#[derive(Debug)]
pub struct CardStore {
    cards: Vec<Card>,
    /// Monotonically increasing, persisted alongside the collection
    next_id: u32,
    /// Card currently mid-drag, for overlay rendering only
    active: Option<u32>,
    /// Bumped on every real change; render layers key off it
    revision: u64,
}

impl Default for CardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CardStore {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            next_id: 1,
            active: None,
            revision: 0,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: u32) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Cards of one lane, in lane order
    pub fn in_lane(&self, lane: u32) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter().filter(move |c| c.lane == lane)
    }

    /// Replace in-memory state from persisted data.
    ///
    /// The counter is clamped above the highest restored id so ids are
    /// never reused even when the persisted counter is missing or stale.
    pub fn restore(&mut self, cards: Vec<Card>, next_id: u32) {
        let max_id = cards.iter().map(|c| c.id).max().unwrap_or(0);
        self.cards = cards;
        self.next_id = next_id.max(max_id + 1);
        self.revision += 1;
    }

    /// Assign the next available id and append.
    pub fn add(&mut self, mut card: Card) -> u32 {
        let id = self.next_id;
        card.id = id;
        self.next_id += 1;
        self.cards.push(card);
        reconcile::resequence(&mut self.cards);
        self.revision += 1;
        id
    }

    /// Replace the card with the same id.
    pub fn update(&mut self, card: Card) -> DomainResult<Card> {
        match self.cards.iter_mut().find(|c| c.id == card.id) {
            Some(slot) => {
                if *slot != card {
                    *slot = card.clone();
                    self.revision += 1;
                }
                Ok(card)
            }
            None => Err(DomainError::NotFound(format!("card {} not found", card.id))),
        }
    }

    /// Delete the card with that id. Does not cascade.
    pub fn remove(&mut self, id: u32) -> DomainResult<()> {
        let len = self.cards.len();
        self.cards.retain(|c| c.id != id);
        if self.cards.len() == len {
            return Err(DomainError::NotFound(format!("card {} not found", id)));
        }
        reconcile::resequence(&mut self.cards);
        self.revision += 1;
        Ok(())
    }

    /// Apply a whole-collection transform. A structurally equal result
    /// registers no change: no revision bump, so no redundant re-render
    /// and no redundant save downstream.
    pub fn replace<F>(&mut self, transform: F) -> bool
    where
        F: FnOnce(&[Card]) -> Vec<Card>,
    {
        let next = transform(&self.cards);
        if next == self.cards {
            return false;
        }
        self.cards = next;
        self.revision += 1;
        true
    }

    pub fn set_active(&mut self, id: Option<u32>) {
        self.active = id;
    }

    /// The card currently mid-drag, derived by lookup. Presentation only;
    /// reconciliation never reads this.
    pub fn active_card(&self) -> Option<&Card> {
        self.active.and_then(|id| self.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_assigns_sequential_ids() {
        let mut store = CardStore::new();
        assert_eq!(store.add(Card::new(0, 1)), 1);
        assert_eq!(store.add(Card::new(0, 1)), 2);
        assert_eq!(store.next_id(), 3);
        let positions: Vec<i32> = store.in_lane(1).map(|c| c.position).collect();
        assert_eq!(positions, vec![0, 1]);
    }

    #[test]
    fn noop_replace_registers_no_change() {
        let mut store = CardStore::new();
        store.add(Card::new(0, 1));
        let before = store.revision();
        let changed = store.replace(|cards| cards.to_vec());
        assert!(!changed);
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn real_replace_bumps_revision() {
        let mut store = CardStore::new();
        store.add(Card::new(0, 1));
        let before = store.revision();
        let changed = store.replace(|cards| {
            let mut next = cards.to_vec();
            next[0].title = Some("renamed".to_string());
            next
        });
        assert!(changed);
        assert_eq!(store.revision(), before + 1);
    }

    #[test]
    fn restore_clamps_counter_above_existing_ids() {
        let mut store = CardStore::new();
        store.restore(vec![Card::new(7, 1)], 1);
        assert_eq!(store.next_id(), 8);
        assert_eq!(store.add(Card::new(0, 1)), 8);
    }

    #[test]
    fn remove_missing_card_is_not_found() {
        let mut store = CardStore::new();
        assert!(matches!(
            store.remove(9),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn active_card_is_derived_by_lookup() {
        let mut store = CardStore::new();
        let id = store.add(Card::new(0, 1));
        store.set_active(Some(id));
        assert_eq!(store.active_card().map(|c| c.id), Some(id));
        store.set_active(None);
        assert!(store.active_card().is_none());
    }
}
