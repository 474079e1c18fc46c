//! Selected item ids.
//!
//! Kept as an ordered list rather than a set: the most recent pick anchors
//! layer-list range selection, and property panels show the first item.
//! Selection is view state only and never enters history.

use crate::types::ItemId;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionManager {
    ids: Vec<ItemId>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    /// Most recently added id.
    pub fn last(&self) -> Option<ItemId> {
        self.ids.last().copied()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selection becomes exactly `[id]`.
    pub fn select_only(&mut self, id: ItemId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Replace the selection, dropping duplicates but keeping order.
    pub fn set(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        self.ids.clear();
        self.extend(ids);
    }

    pub fn extend(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    /// Flip membership of `id`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if let Some(pos) = self.ids.iter().position(|&s| s == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }
}
