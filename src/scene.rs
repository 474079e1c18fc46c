//! Scene model: the ordered item store of one page.
//!
//! Position in `items` is z-order (later is drawn on top and hit first).
//! Every structural edit goes through this type so that `parent_id` and the
//! parent's `child_ids` never disagree and the spatial index tracks geometry.
//! Operations either apply fully or return an error without touching state.

use crate::error::{SceneError, SceneResult};
use crate::geometry::{Point, Rect};
use crate::spatial_index::SpatialIndex;
use crate::types::{Item, ItemId, ItemPatch};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// An item together with the z-order slot it occupied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexedItem {
    pub index: usize,
    pub item: Item,
}

#[derive(Default)]
pub struct Scene {
    items: Vec<Item>,
    positions: HashMap<ItemId, usize>,
    spatial: SpatialIndex,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from items already in z-order.
    pub fn from_items(items: Vec<Item>) -> SceneResult<Self> {
        let mut scene = Self::new();
        scene.add_items(items)?;
        Ok(scene)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items that are visible themselves and through all their ancestors.
    pub fn visible_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items
            .iter()
            .filter(move |item| !self.is_effectively_hidden(item.id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.positions.get(&id).map(|&index| &self.items[index])
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn z_index(&self, id: ItemId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Current z-order as ids, bottom first.
    pub fn order(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    /// Clones of the listed items that exist, in the order given.
    pub fn snapshot(&self, ids: &[ItemId]) -> Vec<Item> {
        ids.iter().filter_map(|&id| self.get(id)).cloned().collect()
    }

    /// Candidate ids whose bounds contain `point`, unordered.
    pub fn candidates_at(&self, point: Point) -> Vec<ItemId> {
        self.spatial.query_point(point)
    }

    /// Candidate ids whose bounds strictly overlap `rect`, unordered.
    pub fn candidates_in(&self, rect: &Rect) -> Vec<ItemId> {
        self.spatial.query_rect(rect)
    }

    // ------------------------------------------------------------------------
    // Hierarchy
    // ------------------------------------------------------------------------

    pub fn parent(&self, id: ItemId) -> Option<ItemId> {
        self.get(id).and_then(|item| item.parent_id)
    }

    /// Ancestor chain, nearest first. Bounded by the item count so malformed
    /// data cannot loop forever.
    pub fn ancestors(&self, id: ItemId) -> Vec<ItemId> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if chain.len() > self.items.len() || chain.contains(&parent) {
                break;
            }
            chain.push(parent);
            current = self.parent(parent);
        }
        chain
    }

    pub fn is_descendant_of(&self, id: ItemId, ancestor: ItemId) -> bool {
        self.ancestors(id).contains(&ancestor)
    }

    /// Every item below `id` in the container tree, depth-first.
    pub fn descendants(&self, id: ItemId) -> Vec<ItemId> {
        let mut out = Vec::new();
        let mut seen = HashSet::from([id]);
        let mut stack: Vec<ItemId> = self
            .get(id)
            .map(|item| item.child_ids.iter().rev().copied().collect())
            .unwrap_or_default();

        while let Some(child) = stack.pop() {
            if !seen.insert(child) {
                continue;
            }
            if let Some(item) = self.get(child) {
                out.push(child);
                stack.extend(item.child_ids.iter().rev().copied());
            }
        }
        out
    }

    /// Items sharing `parent` (root items when `None`), in z-order.
    pub fn siblings(&self, parent: Option<ItemId>) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|item| item.parent_id == parent)
            .map(|item| item.id)
            .collect()
    }

    /// Locked itself or inside a locked container.
    pub fn is_effectively_locked(&self, id: ItemId) -> bool {
        self.get(id).is_some_and(|item| item.is_locked)
            || self
                .ancestors(id)
                .iter()
                .any(|&a| self.get(a).is_some_and(|item| item.is_locked))
    }

    /// Hidden itself or inside a hidden container.
    pub fn is_effectively_hidden(&self, id: ItemId) -> bool {
        self.get(id).is_some_and(|item| !item.is_visible)
            || self
                .ancestors(id)
                .iter()
                .any(|&a| self.get(a).is_some_and(|item| !item.is_visible))
    }

    /// The listed ids plus all their descendants, existing only, in z-order.
    pub fn with_descendants(&self, ids: &[ItemId]) -> Vec<ItemId> {
        let mut set: HashSet<ItemId> = HashSet::new();
        for &id in ids {
            if self.contains(id) {
                set.insert(id);
                set.extend(self.descendants(id));
            }
        }
        self.items
            .iter()
            .filter(|item| set.contains(&item.id))
            .map(|item| item.id)
            .collect()
    }

    // ------------------------------------------------------------------------
    // Insertion & removal
    // ------------------------------------------------------------------------

    /// Append items on top of the z-order. Nothing is added if any id is
    /// already present.
    pub fn add_items(&mut self, items: Vec<Item>) -> SceneResult<()> {
        self.check_new_ids(items.iter())?;
        for item in items {
            self.spatial.upsert(item.id, item.rect());
            self.positions.insert(item.id, self.items.len());
            self.items.push(item);
        }
        Ok(())
    }

    /// Put items back at their recorded z slots. Entries must be sorted by
    /// ascending index, which is how [`Scene::remove_items`] returns them.
    pub fn restore(&mut self, entries: &[IndexedItem]) -> SceneResult<()> {
        self.check_new_ids(entries.iter().map(|e| &e.item))?;
        for entry in entries {
            let index = entry.index.min(self.items.len());
            self.spatial.upsert(entry.item.id, entry.item.rect());
            self.items.insert(index, entry.item.clone());
        }
        self.reindex();
        Ok(())
    }

    /// Remove a single item without touching its children or its parent.
    /// Callers are responsible for relinking.
    pub fn take(&mut self, id: ItemId) -> SceneResult<IndexedItem> {
        let index = self.z_index(id).ok_or(SceneError::UnknownItem(id))?;
        let item = self.items.remove(index);
        self.spatial.remove(id);
        self.reindex();
        Ok(IndexedItem { index, item })
    }

    /// Remove items and, for containers, everything inside them. Surviving
    /// parents drop the removed ids from `child_ids`. Returns the removed
    /// items with their original slots, ascending.
    pub fn remove_items(&mut self, ids: &[ItemId]) -> Vec<IndexedItem> {
        let doomed: HashSet<ItemId> = self.with_descendants(ids).into_iter().collect();
        if doomed.is_empty() {
            return Vec::new();
        }

        let removed: Vec<IndexedItem> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| doomed.contains(&item.id))
            .map(|(index, item)| IndexedItem {
                index,
                item: item.clone(),
            })
            .collect();

        for item in &mut self.items {
            if !doomed.contains(&item.id) {
                item.child_ids.retain(|child| !doomed.contains(child));
            }
        }
        self.items.retain(|item| !doomed.contains(&item.id));
        for id in &doomed {
            self.spatial.remove(*id);
        }
        self.reindex();
        removed
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    /// Apply `patch` to each listed item. Returns the ids that changed.
    pub fn update_items(&mut self, ids: &[ItemId], patch: &ItemPatch) -> Vec<ItemId> {
        let mut changed = Vec::new();
        for &id in ids {
            let Some(&index) = self.positions.get(&id) else {
                continue;
            };
            let item = &mut self.items[index];
            let before = item.clone();
            patch.apply_to(item);
            if *item != before {
                self.spatial.upsert(id, item.rect());
                changed.push(id);
            }
        }
        changed
    }

    /// Overwrite an item with a full snapshot of itself. The snapshot's
    /// hierarchy fields are taken as-is.
    pub fn replace(&mut self, item: Item) -> SceneResult<()> {
        let index = self.z_index(item.id).ok_or(SceneError::UnknownItem(item.id))?;
        self.spatial.upsert(item.id, item.rect());
        self.items[index] = item;
        Ok(())
    }

    pub fn set_rect(&mut self, id: ItemId, rect: Rect) -> SceneResult<()> {
        self.modify(id, |item| item.set_rect(rect))
    }

    pub fn set_position(&mut self, id: ItemId, position: Point) -> SceneResult<()> {
        self.modify(id, |item| item.set_position(position))
    }

    pub fn set_text(&mut self, id: ItemId, text: &str) -> SceneResult<()> {
        self.modify(id, |item| {
            item.text.clear();
            item.text.push_str(text);
        })
    }

    /// Move `child` into `new_parent` (or to the root), updating both the old
    /// and the new parent's `child_ids`. Refuses anything that would make a
    /// container its own ancestor.
    pub fn reparent(&mut self, child: ItemId, new_parent: Option<ItemId>) -> SceneResult<()> {
        let old_parent = self.get(child).ok_or(SceneError::UnknownItem(child))?.parent_id;

        if let Some(parent) = new_parent {
            if parent == child {
                return Err(SceneError::SelfParent(child));
            }
            let target = self.get(parent).ok_or(SceneError::UnknownItem(parent))?;
            if !target.is_container() {
                return Err(SceneError::NotAContainer(parent));
            }
            if self.is_descendant_of(parent, child) {
                return Err(SceneError::Cycle { child, parent });
            }
        }

        if old_parent == new_parent {
            return Ok(());
        }

        if let Some(old) = old_parent {
            // A dangling back-reference is simply dropped.
            let _ = self.modify(old, |item| item.child_ids.retain(|&c| c != child));
        }
        if let Some(parent) = new_parent {
            self.modify(parent, |item| {
                if !item.child_ids.contains(&child) {
                    item.child_ids.push(child);
                }
            })?;
        }
        self.modify(child, |item| item.parent_id = new_parent)
    }

    /// Replace the z-order with a permutation of the current ids.
    pub fn set_order(&mut self, order: &[ItemId]) -> SceneResult<()> {
        let unique: HashSet<ItemId> = order.iter().copied().collect();
        if order.len() != self.items.len() || unique.len() != order.len() {
            return Err(SceneError::InvalidOrder {
                expected: self.items.len(),
                actual: order.len(),
            });
        }
        if let Some(&missing) = order.iter().find(|id| !self.contains(**id)) {
            return Err(SceneError::UnknownItem(missing));
        }

        let mut by_id: HashMap<ItemId, Item> =
            self.items.drain(..).map(|item| (item.id, item)).collect();
        self.items = order.iter().filter_map(|id| by_id.remove(id)).collect();
        self.reindex();
        Ok(())
    }

    pub(crate) fn modify<F>(&mut self, id: ItemId, f: F) -> SceneResult<()>
    where
        F: FnOnce(&mut Item),
    {
        let index = self.z_index(id).ok_or(SceneError::UnknownItem(id))?;
        let item = &mut self.items[index];
        f(item);
        self.spatial.upsert(id, item.rect());
        Ok(())
    }

    fn check_new_ids<'a>(&self, items: impl Iterator<Item = &'a Item>) -> SceneResult<()> {
        let mut incoming = HashSet::new();
        for item in items {
            if self.contains(item.id) || !incoming.insert(item.id) {
                return Err(SceneError::DuplicateItem(item.id));
            }
        }
        Ok(())
    }

    fn reindex(&mut self) {
        self.positions = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| (item.id, index))
            .collect();
    }
}
