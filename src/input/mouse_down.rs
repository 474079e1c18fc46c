//! Pointer-down handling: picks the gesture and records its starting state.
//!
//! ## Performance Notes
//!
//! Pointer down is a hot path during interaction. Hit testing goes through
//! the R-tree so only items under the pointer are examined.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::editor::Editor;
use crate::geometry::Point;
use crate::hit_testing::{hit_handle, hit_target};
use crate::input::{InteractionState, PointerButton, PointerEvent};
use crate::profile_scope;
use crate::types::{Handle, ItemId, Tool};
use tracing::{debug, trace};

impl Editor {
    pub fn on_pointer_down(&mut self, event: &PointerEvent) {
        profile_scope!("on_pointer_down");

        self.last_pointer = Some(event.position);
        if !self.input_state.is_idle() {
            trace!(mode = ?self.input_state.mode(), "Pointer down during active gesture ignored");
            return;
        }

        let screen = event.position;
        let world = self.camera.screen_to_world(screen);

        if event.button == PointerButton::Middle || self.space_pressed || self.tool == Tool::Pan {
            self.input_state = InteractionState::Panning { last: screen };
            return;
        }
        if event.button != PointerButton::Primary {
            return;
        }

        if self.tool.is_drawing() {
            self.selection.clear();
            self.input_state = InteractionState::Drawing {
                tool: self.tool,
                start: world,
                current: world,
            };
            return;
        }

        let handle = hit_handle(
            self.scene(),
            self.selection.ids(),
            &self.camera,
            screen,
            self.settings.handle_hit_radius,
        );
        if let Some((item_id, handle)) = handle {
            self.start_resize(item_id, handle, screen, world);
            return;
        }

        let target = {
            profile_scope!("hit_test_items");
            hit_target(self.scene(), world)
        };
        match target {
            Some(item_id) => self.press_item(item_id, event, world),
            None => {
                // Empty canvas
                if !event.modifiers.shift {
                    self.selection.clear();
                }
                self.input_state = InteractionState::MarqueeSelect {
                    start_screen: screen,
                    start: world,
                    current: world,
                    additive: event.modifiers.shift,
                };
            }
        }
    }

    fn press_item(&mut self, item_id: ItemId, event: &PointerEvent, world: Point) {
        let mut collapse_to = None;
        if event.modifiers.shift {
            if !self.selection.toggle(item_id) {
                // Shift-click removed it; nothing to drag
                return;
            }
        } else if self.selection.contains(item_id) {
            // Keep the multi-selection for a group move; a plain click
            // without movement narrows it on release.
            if self.selection.len() > 1 {
                collapse_to = Some(item_id);
            }
        } else {
            self.selection.select_only(item_id);
        }

        let scene = self.scene();
        let roots: Vec<ItemId> = self
            .selection_roots()
            .into_iter()
            .filter(|&id| !scene.is_effectively_locked(id))
            .collect();
        let snapshot = scene.snapshot(&scene.with_descendants(&roots));
        debug!(item_id, moving = snapshot.len(), "Drag armed");

        self.input_state = InteractionState::DraggingItems {
            start_screen: event.position,
            start: world,
            snapshot,
            collapse_to,
            started: false,
        };
    }

    fn start_resize(&mut self, item_id: ItemId, handle: Handle, screen: Point, world: Point) {
        let scene = self.scene();
        let Some(item) = scene.get(item_id) else {
            return;
        };
        let original = item.rect();
        let descendants = if item.is_container() {
            scene
                .descendants(item_id)
                .into_iter()
                .filter_map(|id| scene.get(id).map(|child| (id, child.rect())))
                .collect()
        } else {
            Vec::new()
        };
        debug!(item_id, ?handle, "Resize armed");

        self.input_state = InteractionState::ResizingItem {
            item_id,
            handle,
            start_screen: screen,
            start: world,
            original,
            descendants,
            started: false,
        };
    }
}
