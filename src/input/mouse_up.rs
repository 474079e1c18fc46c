//! Pointer-up handling: finalize or discard the gesture, record its command.

use crate::command::{Command, ItemMove, RectChange};
use crate::editor::{ChangeSet, Editor};
use crate::geometry::{Point, Rect};
use crate::hit_testing::{frame_under, marquee_members};
use crate::input::{InteractionState, PointerEvent};
use crate::profile_scope;
use crate::types::{Item, ItemId, ItemType, Tool};
use tracing::{debug, warn};

impl Editor {
    pub fn on_pointer_up(&mut self, event: &PointerEvent) {
        profile_scope!("on_pointer_up");

        self.last_pointer = Some(event.position);
        let screen = event.position;
        let world = self.camera.screen_to_world(screen);

        match std::mem::take(&mut self.input_state) {
            InteractionState::Idle | InteractionState::Panning { .. } => {}

            InteractionState::MarqueeSelect {
                start_screen,
                start,
                additive,
                ..
            } => self.finish_marquee(start_screen, start, screen, world, additive),

            InteractionState::DraggingItems {
                snapshot,
                collapse_to,
                started,
                ..
            } => self.finish_drag(snapshot, collapse_to, started),

            InteractionState::ResizingItem {
                item_id,
                original,
                descendants,
                started,
                ..
            } => self.finish_resize(item_id, original, descendants, started),

            InteractionState::Drawing { tool, start, .. } => {
                self.finish_drawing(tool, start, world)
            }
        }
    }

    fn finish_marquee(
        &mut self,
        start_screen: Point,
        start: Point,
        screen: Point,
        world: Point,
        additive: bool,
    ) {
        if start_screen.distance(screen) < self.settings.drag_threshold {
            // A click on empty canvas
            if !additive {
                self.selection.clear();
            }
            return;
        }

        let members = marquee_members(self.scene(), &Rect::from_corners(start, world));
        debug!(count = members.len(), additive, "Marquee selection");
        if additive {
            self.selection.extend(members);
        } else {
            self.selection.set(members);
        }
    }

    fn finish_drag(&mut self, snapshot: Vec<Item>, collapse_to: Option<ItemId>, started: bool) {
        let scene = self.scene();
        let moves: Vec<ItemMove> = snapshot
            .iter()
            .filter_map(|before| {
                let to = scene.get(before.id)?.position();
                Some(ItemMove {
                    id: before.id,
                    from: before.position(),
                    to,
                })
            })
            .collect();

        if !started || moves.iter().all(|m| m.from == m.to) {
            // A click, not a move
            if let Some(id) = collapse_to {
                self.selection.select_only(id);
            }
            return;
        }

        let reparents = self.frame_membership_changes(&snapshot);
        if reparents.is_empty() {
            self.commit(Command::Move { moves });
            return;
        }

        // Position changes and membership changes go into one batch so a
        // single undo restores both.
        let mut changes = ChangeSet::new();
        for item in &snapshot {
            changes.track(item.clone());
        }
        let scene = self.scene();
        for &(child, new_parent) in &reparents {
            for parent in scene.parent(child).into_iter().chain(new_parent) {
                if let Some(item) = scene.get(parent) {
                    changes.track(item.clone());
                }
            }
        }

        let ctx = self.ctx_mut();
        for (child, new_parent) in reparents {
            if let Err(e) = ctx.scene.reparent(child, new_parent) {
                warn!(item_id = child, error = %e, "Frame membership change rejected");
            }
        }
        changes.refresh(&ctx.scene);

        let changes = changes.into_changes();
        debug!(changed = changes.len(), "Drag changed frame membership");
        self.commit(Command::UpdateBatch { changes });
    }

    /// Frame adoption after a drag. Top-level items and frame members that
    /// land on a frame join the topmost one; frame members dragged clear of
    /// every frame become top-level. Group members stay with their group.
    fn frame_membership_changes(&self, moved: &[Item]) -> Vec<(ItemId, Option<ItemId>)> {
        let scene = self.scene();
        let moved_ids: Vec<ItemId> = moved.iter().map(|item| item.id).collect();

        moved
            .iter()
            .filter(|item| item.parent_id.is_none_or(|p| !moved_ids.contains(&p)))
            .filter_map(|item| {
                let current = scene.get(item.id)?;
                let parent = current.parent_id;
                let parent_is_frame = parent
                    .and_then(|p| scene.get(p))
                    .is_some_and(|p| p.item_type == ItemType::Frame);
                if parent.is_some() && !parent_is_frame {
                    return None;
                }

                let target = frame_under(scene, &current.rect(), &moved_ids);
                (target != parent).then_some((item.id, target))
            })
            .collect()
    }

    fn finish_resize(
        &mut self,
        item_id: ItemId,
        original: Rect,
        descendants: Vec<(ItemId, Rect)>,
        started: bool,
    ) {
        if !started {
            return;
        }
        let scene = self.scene();
        let Some(rect) = scene.get(item_id).map(Item::rect) else {
            return;
        };
        if rect == original {
            return;
        }

        let children = descendants
            .into_iter()
            .filter_map(|(id, from)| {
                let to = scene.get(id)?.rect();
                Some(RectChange { id, from, to })
            })
            .collect();
        self.commit(Command::Resize {
            item: RectChange {
                id: item_id,
                from: original,
                to: rect,
            },
            children,
        });
    }

    fn finish_drawing(&mut self, tool: Tool, start: Point, end: Point) {
        self.set_tool(Tool::Select);

        let rect = Rect::from_corners(start, end);
        let min = self.settings.min_draw_size;
        if rect.width < min || rect.height < min {
            debug!(width = rect.width, height = rect.height, "Drawing too small, discarded");
            return;
        }
        let Some(item_type) = tool.item_type() else {
            return;
        };

        let rect = Rect::new(
            rect.x,
            rect.y,
            rect.width.max(self.settings.min_item_width),
            rect.height.max(self.settings.min_item_height),
        );
        let mut item = self.new_item(item_type, rect);
        if let Tool::Shape(shape_type) = tool {
            item.shape_type = shape_type;
        }
        self.add_new_item(item);
    }
}
