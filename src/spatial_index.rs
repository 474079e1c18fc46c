//! Spatial Index Module
//!
//! R-tree over item bounds. Hit testing and marquee selection ask it for
//! candidates and then apply z-order and eligibility rules themselves, which
//! keeps point queries at O(log n) on large boards.

use crate::geometry::{Point, Rect};
use crate::types::ItemId;
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub item_id: ItemId,
    pub bounds: Rect,
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.x, self.bounds.y],
            [self.bounds.right(), self.bounds.bottom()],
        )
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.item_id == other.item_id
    }
}

#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<ItemId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or move an item's bounds.
    pub fn upsert(&mut self, item_id: ItemId, bounds: Rect) {
        if let Some(old) = self.entries.get(&item_id) {
            if old.bounds == bounds {
                return;
            }
            let old = *old;
            self.tree.remove(&old);
        }

        let entry = SpatialEntry { item_id, bounds };
        self.tree.insert(entry);
        self.entries.insert(item_id, entry);
    }

    pub fn remove(&mut self, item_id: ItemId) -> bool {
        match self.entries.remove(&item_id) {
            Some(entry) => {
                self.tree.remove(&entry);
                true
            }
            None => false,
        }
    }

    /// Items whose bounds contain `point` (edges inclusive). Unordered.
    pub fn query_point(&self, point: Point) -> Vec<ItemId> {
        let envelope = AABB::from_point([point.x, point.y]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.bounds.contains(point))
            .map(|entry| entry.item_id)
            .collect()
    }

    /// Items whose bounds strictly overlap `rect`. Unordered.
    pub fn query_rect(&self, rect: &Rect) -> Vec<ItemId> {
        let envelope = AABB::from_corners([rect.x, rect.y], [rect.right(), rect.bottom()]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.bounds.overlaps(rect))
            .map(|entry| entry.item_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
