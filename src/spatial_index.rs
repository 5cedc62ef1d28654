//! R-tree based spatial indexing for efficient hit testing on the canvas.
//!
//! Hover and drag targeting fire every animation frame, so point queries must
//! never walk the full card collection. The index reduces hit testing from
//! O(n) to O(log n) and keeps enough per-entry data (z order) to answer
//! "topmost card under the pointer" without consulting the card map.

use rstar::{RTree, RTreeObject, AABB};
use std::collections::HashMap;

use crate::types::CardId;

/// A spatial entry representing a card's bounding box.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub card_id: CardId,
    pub z: i32,
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl SpatialEntry {
    pub fn new(card_id: CardId, z: i32, position: (f32, f32), size: (f32, f32)) -> Self {
        Self {
            card_id,
            z,
            min_x: position.0,
            min_y: position.1,
            max_x: position.0 + size.0,
            max_y: position.1 + size.1,
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.card_id == other.card_id
    }
}

/// Spatial index over the active canvas's cards.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<CardId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Bulk-build an index from an iterator of (id, z, position, size).
    pub fn from_cards<I>(cards: I) -> Self
    where
        I: Iterator<Item = (CardId, i32, (f32, f32), (f32, f32))>,
    {
        let entries: Vec<SpatialEntry> = cards
            .map(|(id, z, pos, size)| SpatialEntry::new(id, z, pos, size))
            .collect();

        let entries_map: HashMap<CardId, SpatialEntry> =
            entries.iter().map(|e| (e.card_id, *e)).collect();

        Self {
            tree: RTree::bulk_load(entries),
            entries: entries_map,
        }
    }

    /// Insert or replace the entry for a card.
    pub fn insert(&mut self, card_id: CardId, z: i32, position: (f32, f32), size: (f32, f32)) {
        if let Some(old_entry) = self.entries.remove(&card_id) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(card_id, z, position, size);
        self.tree.insert(entry);
        self.entries.insert(card_id, entry);
    }

    pub fn remove(&mut self, card_id: CardId) -> bool {
        if let Some(entry) = self.entries.remove(&card_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// All cards containing the given point, topmost first (z descending,
    /// id descending as a deterministic tiebreak).
    pub fn query_point(&self, x: f32, y: f32) -> Vec<CardId> {
        let point_envelope = AABB::from_point([x, y]);

        let mut hits: Vec<&SpatialEntry> = self
            .tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(x, y))
            .collect();
        hits.sort_by(|a, b| b.z.cmp(&a.z).then(b.card_id.cmp(&a.card_id)));
        hits.into_iter().map(|entry| entry.card_id).collect()
    }

    /// The topmost card containing the given point, if any.
    pub fn topmost_at(&self, x: f32, y: f32) -> Option<CardId> {
        self.query_point(x, y).into_iter().next()
    }

    /// All cards whose bounds intersect a rectangular region.
    pub fn query_rect(&self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Vec<CardId> {
        let envelope = AABB::from_corners([min_x, min_y], [max_x, max_y]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.card_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}
