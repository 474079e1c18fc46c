//! Atomic item edits invoked by toolbars, property panels and shortcuts.
//!
//! Every edit here builds its command first and runs it through
//! [`Editor::execute`], so the forward path is the same code undo/redo use.

use super::{ChangeSet, Editor};
use crate::command::{Command, RectChange};
use crate::geometry::{Point, Rect};
use crate::hit_testing::layer_range;
use crate::input::Modifiers;
use crate::resize::scale_into;
use crate::scene::IndexedItem;
use crate::types::{Item, ItemId, ItemPatch, ItemType, NumericField, ReorderAction, Tool};
use std::collections::HashSet;
use tracing::debug;

impl Editor {
    // ========================================================================
    // Creation
    // ========================================================================

    /// Add an item with explicit bounds on top of the z-order and select it.
    pub fn add_item(&mut self, item_type: ItemType, rect: Rect) -> Option<ItemId> {
        if !rect.is_finite() {
            debug!(?item_type, ?rect, "Rejected item with non-finite bounds");
            return None;
        }
        let rect = Rect::new(
            rect.x,
            rect.y,
            rect.width.max(self.settings.min_item_width),
            rect.height.max(self.settings.min_item_height),
        );
        let item = self.new_item(item_type, rect);
        self.add_new_item(item)
    }

    /// Toolbar placement: a default-sized item for `tool`, centered in the
    /// viewport.
    pub fn place_item(&mut self, tool: Tool) -> Option<ItemId> {
        let item_type = tool.item_type()?;
        let defaults = &self.settings.item_defaults;
        let (width, height) = match item_type {
            ItemType::StickyNote => defaults.sticky_note_size,
            ItemType::Text => defaults.text_size,
            ItemType::Frame => defaults.frame_size,
            _ => defaults.item_size,
        };
        let center = self.camera.screen_to_world(self.camera.viewport_center());
        let rect = Rect::new(center.x - width / 2.0, center.y - height / 2.0, width, height);

        let mut item = self.new_item(item_type, rect);
        if let Tool::Shape(shape_type) = tool {
            item.shape_type = shape_type;
        }
        self.add_new_item(item)
    }

    /// Place an already-decoded image under the last pointer position,
    /// scaled so its longer side fits the configured maximum.
    pub fn paste_image(
        &mut self,
        url: impl Into<String>,
        natural_width: f32,
        natural_height: f32,
    ) -> Option<ItemId> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(natural_width) || !valid(natural_height) {
            debug!(natural_width, natural_height, "Rejected image with invalid size");
            return None;
        }

        let longest = natural_width.max(natural_height);
        let scale = (self.settings.max_image_dimension / longest).min(1.0);
        let (width, height) = (natural_width * scale, natural_height * scale);

        let anchor = self
            .last_pointer
            .unwrap_or_else(|| self.camera.viewport_center());
        let center = self.camera.screen_to_world(anchor);
        let rect = Rect::new(center.x - width / 2.0, center.y - height / 2.0, width, height);

        let mut item = self.new_item(ItemType::Image, rect);
        item.image_url = Some(url.into());
        self.add_new_item(item)
    }

    pub(crate) fn add_new_item(&mut self, item: Item) -> Option<ItemId> {
        let id = item.id;
        if self.execute(Command::Add { items: vec![item] }) {
            self.selection.select_only(id);
            Some(id)
        } else {
            None
        }
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Property-panel edit of one or more items, recorded as a single batch.
    /// Sizes are floored at the minimum; non-finite numbers reject the patch.
    pub fn update_items(&mut self, ids: &[ItemId], patch: &ItemPatch) -> bool {
        let numbers = [
            patch.x,
            patch.y,
            patch.width,
            patch.height,
            patch.stroke_width,
            patch.opacity,
        ];
        if patch.is_empty() || numbers.iter().flatten().any(|v| !v.is_finite()) {
            return false;
        }

        let mut patch = patch.clone();
        patch.width = patch.width.map(|w| w.max(self.settings.min_item_width));
        patch.height = patch.height.map(|h| h.max(self.settings.min_item_height));

        let mut changes = ChangeSet::new();
        for &id in ids {
            changes.edit(self.scene(), id, |item| patch.apply_to(item));
        }
        let changes = changes.into_changes();
        if changes.is_empty() {
            return false;
        }
        self.execute(Command::UpdateBatch { changes })
    }

    /// Parse typed input for a numeric field. Anything that is not a finite
    /// number is rejected and nothing changes, so the field shows the last
    /// valid value again.
    pub fn set_numeric_field(&mut self, ids: &[ItemId], field: NumericField, input: &str) -> bool {
        match input.trim().parse::<f32>() {
            Ok(value) if value.is_finite() => self.update_items(ids, &field.patch(value)),
            _ => {
                debug!(?field, input, "Rejected numeric input");
                false
            }
        }
    }

    pub fn toggle_visibility(&mut self, id: ItemId) -> bool {
        self.toggle_flag(id, |item| item.is_visible = !item.is_visible)
    }

    pub fn toggle_lock(&mut self, id: ItemId) -> bool {
        self.toggle_flag(id, |item| item.is_locked = !item.is_locked)
    }

    fn toggle_flag(&mut self, id: ItemId, flip: impl FnOnce(&mut Item)) -> bool {
        let mut changes = ChangeSet::new();
        if !changes.edit(self.scene(), id, flip) {
            return false;
        }
        self.execute(Command::UpdateBatch {
            changes: changes.into_changes(),
        })
    }

    /// Text typed while an inline editor is open. Not recorded; call
    /// [`Editor::commit_text`] when editing ends.
    pub fn set_text_live(&mut self, id: ItemId, text: &str) -> bool {
        self.ctx_mut().scene.set_text(id, text).is_ok()
    }

    /// Record one `UpdateText` for a whole editing session, if the text
    /// differs from `original`.
    pub fn commit_text(&mut self, id: ItemId, original: &str) -> bool {
        let Some(current) = self.scene().get(id).map(|item| item.text.clone()) else {
            return false;
        };
        if current == original {
            return false;
        }
        self.commit(Command::UpdateText {
            id,
            from: original.to_string(),
            to: current,
        });
        true
    }

    /// Set an item's bounds directly, scaling a container's members along.
    pub fn set_item_rect(&mut self, id: ItemId, rect: Rect) -> bool {
        if !rect.is_finite() {
            debug!(item_id = id, ?rect, "Rejected non-finite bounds");
            return false;
        }
        let scene = self.scene();
        let Some(item) = scene.get(id) else {
            return false;
        };
        let from = item.rect();
        let to = Rect::new(
            rect.x,
            rect.y,
            rect.width.max(self.settings.min_item_width),
            rect.height.max(self.settings.min_item_height),
        );
        if from == to {
            return false;
        }
        let children = if item.is_container() {
            scene
                .descendants(id)
                .into_iter()
                .filter_map(|child| scene.get(child))
                .map(|child| RectChange {
                    id: child.id,
                    from: child.rect(),
                    to: scale_into(&from, &to, &child.rect()),
                })
                .collect()
        } else {
            Vec::new()
        };
        self.execute(Command::Resize {
            item: RectChange { id, from, to },
            children,
        })
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Delete the selection and everything inside selected containers.
    pub fn delete_selection(&mut self) -> bool {
        let roots = self.selection_roots();
        if roots.is_empty() {
            return false;
        }

        let scene = self.scene();
        let doomed_ids = scene.with_descendants(&roots);
        let doomed: HashSet<ItemId> = doomed_ids.iter().copied().collect();

        let items: Vec<IndexedItem> = doomed_ids
            .iter()
            .filter_map(|&id| {
                Some(IndexedItem {
                    index: scene.z_index(id)?,
                    item: scene.get(id)?.clone(),
                })
            })
            .collect();

        let mut parents = ChangeSet::new();
        for entry in &items {
            if let Some(parent) = entry.item.parent_id.filter(|p| !doomed.contains(p)) {
                parents.edit(scene, parent, |p| p.child_ids.retain(|c| !doomed.contains(c)));
            }
        }

        let deleted = self.execute(Command::Delete {
            items,
            parents: parents.into_changes(),
        });
        if deleted {
            self.selection.clear();
        }
        deleted
    }

    /// Wrap the selection (two or more items) in a new group sized to their
    /// exact union.
    pub fn group(&mut self) -> Option<ItemId> {
        self.wrap_selection(ItemType::Group, 0.0, 2)
    }

    /// Wrap the selection in a new frame, padded around the members.
    pub fn frame_selection(&mut self) -> Option<ItemId> {
        let padding = self.settings.frame_padding;
        self.wrap_selection(ItemType::Frame, padding, 1)
    }

    fn wrap_selection(
        &mut self,
        kind: ItemType,
        padding: f32,
        min_members: usize,
    ) -> Option<ItemId> {
        let members = self.selection_roots();
        if members.len() < min_members {
            debug!(?kind, selected = members.len(), "Not enough items to wrap");
            return None;
        }

        let scene = self.scene();
        let member_rects = members.iter().filter_map(|&id| scene.get(id)).map(Item::rect);
        let bounds = Rect::union_all(member_rects)?.inflate(padding);
        let index = members.iter().filter_map(|&id| scene.z_index(id)).min()?;

        // Members that share a parent keep it: the new container takes their
        // place inside it. Otherwise the container is top-level.
        let first_parent = scene.parent(members[0]);
        let common_parent =
            first_parent.filter(|_| members.iter().all(|&m| scene.parent(m) == first_parent));
        let old_parents: Vec<ItemId> = {
            let mut seen = Vec::new();
            for &m in &members {
                if let Some(p) = scene.parent(m).filter(|p| !seen.contains(p)) {
                    seen.push(p);
                }
            }
            seen
        };

        let mut container = self.new_item(kind, bounds);
        container.child_ids = members.clone();
        container.parent_id = common_parent;
        let container_id = container.id;

        let scene = self.scene();
        let mut changes = ChangeSet::new();
        for &m in &members {
            changes.edit(scene, m, |item| item.parent_id = Some(container_id));
        }
        for parent in old_parents {
            changes.edit(scene, parent, |item| {
                item.child_ids.retain(|c| !members.contains(c));
                if Some(parent) == common_parent {
                    item.child_ids.push(container_id);
                }
            });
        }

        let command = Command::Group {
            group: IndexedItem {
                index,
                item: container,
            },
            affected: changes.into_changes(),
        };
        if !self.execute(command) {
            return None;
        }
        self.selection.select_only(container_id);
        Some(container_id)
    }

    /// Dissolve selected groups and frames. Their members move up to the
    /// dissolved container's parent and become the selection.
    pub fn ungroup(&mut self) -> bool {
        let scene = self.scene();
        let containers: Vec<ItemId> = self
            .selection_roots()
            .into_iter()
            .filter(|&id| scene.get(id).is_some_and(Item::is_container))
            .collect();
        if containers.is_empty() {
            return false;
        }

        let mut changes = ChangeSet::new();
        let mut groups = Vec::new();
        let mut lifted = Vec::new();
        for &id in &containers {
            let (Some(container), Some(index)) = (scene.get(id), scene.z_index(id)) else {
                continue;
            };
            let new_parent = container.parent_id;
            for &child in &container.child_ids {
                changes.edit(scene, child, |item| item.parent_id = new_parent);
                lifted.push(child);
            }
            if let Some(parent) = new_parent {
                let members = container.child_ids.clone();
                changes.edit(scene, parent, |item| {
                    if let Some(pos) = item.child_ids.iter().position(|&c| c == id) {
                        item.child_ids.splice(pos..=pos, members);
                    }
                });
            }
            groups.push(IndexedItem {
                index,
                item: container.clone(),
            });
        }
        groups.sort_by_key(|entry| entry.index);

        let ungrouped = self.execute(Command::Ungroup {
            groups,
            affected: changes.into_changes(),
        });
        if ungrouped {
            self.selection.set(lifted);
        }
        ungrouped
    }

    /// Move the selection in z-order.
    pub fn reorder(&mut self, action: ReorderAction) -> bool {
        // Containers carry their members so nothing ends up behind a frame.
        let selected: HashSet<ItemId> = self
            .scene()
            .with_descendants(&self.selection_roots())
            .into_iter()
            .collect();
        let from = self.scene().order();
        if !from.iter().any(|id| selected.contains(id)) {
            return false;
        }

        let is_selected = |id: &ItemId| selected.contains(id);
        let (picked, rest): (Vec<ItemId>, Vec<ItemId>) =
            from.iter().partition(|&id| is_selected(id));
        let to: Vec<ItemId> = match action {
            ReorderAction::BringToFront => rest.into_iter().chain(picked).collect(),
            ReorderAction::SendToBack => picked.into_iter().chain(rest).collect(),
            ReorderAction::BringForward => {
                let mut order = from.clone();
                for i in (0..order.len().saturating_sub(1)).rev() {
                    if is_selected(&order[i]) && !is_selected(&order[i + 1]) {
                        order.swap(i, i + 1);
                    }
                }
                order
            }
            ReorderAction::SendBackward => {
                let mut order = from.clone();
                for i in 1..order.len() {
                    if is_selected(&order[i]) && !is_selected(&order[i - 1]) {
                        order.swap(i, i - 1);
                    }
                }
                order
            }
        };

        if to == from {
            return false;
        }
        self.execute(Command::Reorder { from, to })
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Replace the selection with the listed ids that exist.
    pub fn select_items(&mut self, ids: &[ItemId]) {
        let scene = &self.pages[self.active].scene;
        self.selection
            .set(ids.iter().copied().filter(|&id| scene.contains(id)));
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Layer-list click: plain click selects only `id`, ctrl/cmd toggles it,
    /// shift selects the sibling run from the last selected item.
    pub fn select_layer(&mut self, id: ItemId, modifiers: Modifiers) -> bool {
        if !self.scene().contains(id) {
            return false;
        }

        if modifiers.shift {
            let range = self
                .selection
                .last()
                .and_then(|anchor| layer_range(self.scene(), anchor, id));
            match range {
                Some(range) => self.selection.set(range),
                None => self.selection.select_only(id),
            }
        } else if modifiers.command() {
            self.selection.toggle(id);
        } else {
            self.selection.select_only(id);
        }
        true
    }

    /// Escape: cancel any gesture, drop the selection and return to the
    /// select tool.
    pub fn escape(&mut self) {
        self.cancel_gesture();
        self.selection.clear();
        self.set_tool(Tool::Select);
    }

    /// World point at the center of the viewport.
    pub fn viewport_center_world(&self) -> Point {
        self.camera.screen_to_world(self.camera.viewport_center())
    }
}
