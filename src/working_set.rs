//! The card working set for the active canvas.
//!
//! Holds the immutable card snapshots handed over by the CRUD layer, keyed by
//! id, together with the spatial index used for hit testing. The working set
//! is rebuilt wholesale on canvas switch and patched incrementally as the
//! CRUD layer pushes refreshed snapshots.

use std::collections::HashMap;

use tracing::debug;

use crate::profile_scope;
use crate::spatial_index::SpatialIndex;
use crate::types::{Card, CardId};

/// Id-keyed card collection plus spatial index.
///
/// Hidden cards stay in the map (they still belong to the canvas) but are
/// excluded from the spatial index, so they are never hit targets.
#[derive(Default)]
pub struct CardWorkingSet {
    cards: HashMap<CardId, Card>,
    index: SpatialIndex,
}

impl CardWorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the working set from a full canvas load.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let index = SpatialIndex::from_cards(
            cards
                .iter()
                .filter(|c| !c.hidden)
                .map(|c| (c.id, c.z, c.position, c.size)),
        );
        let cards = cards.into_iter().map(|c| (c.id, c)).collect();
        Self { cards, index }
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Insert or replace a card snapshot from the CRUD layer.
    pub fn upsert(&mut self, card: Card) {
        if card.hidden {
            self.index.remove(card.id);
        } else {
            self.index.insert(card.id, card.z, card.position, card.size);
        }
        self.cards.insert(card.id, card);
    }

    /// Remove a card, yielding it to the caller. The session layer pairs
    /// this with clearing every interaction-state reference to the id.
    pub fn remove(&mut self, id: CardId) -> Option<Card> {
        self.index.remove(id);
        self.cards.remove(&id)
    }

    /// The topmost visible card under a point in canvas coordinates.
    pub fn card_at_point(&self, x: f32, y: f32) -> Option<CardId> {
        profile_scope!("card_at_point");
        self.index.topmost_at(x, y)
    }

    /// Visible cards intersecting a rectangular region, for marquee-style
    /// multi-select.
    pub fn cards_in_rect(&self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Vec<CardId> {
        self.index.query_rect(min_x, min_y, max_x, max_y)
    }

    /// Apply final drag positions, O(k log n) for k moved cards. This is the
    /// one place the engine writes through to card snapshots: the optimistic
    /// position commit at drag end.
    pub fn apply_moves(&mut self, moves: &[(CardId, (f32, f32))]) {
        profile_scope!("apply_moves");
        for &(id, position) in moves {
            let Some(card) = self.cards.get_mut(&id) else {
                debug!(card_id = id, "skipping move for stale card");
                continue;
            };
            card.position = position;
            if !card.hidden {
                self.index.insert(card.id, card.z, card.position, card.size);
            }
        }
    }

    /// Apply a committed resize, refreshing the spatial index.
    pub fn apply_resize(&mut self, id: CardId, size: (f32, f32)) {
        let Some(card) = self.cards.get_mut(&id) else {
            debug!(card_id = id, "skipping resize for stale card");
            return;
        };
        card.size = size;
        if !card.hidden {
            self.index.insert(card.id, card.z, card.position, card.size);
        }
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.index.clear();
    }
}
