//! Pointer-move handling: live updates for the active gesture.
//!
//! ## Performance Notes
//!
//! Pointer move fires for every frame of a gesture. Key points:
//! - Early exit when idle
//! - Item geometry is recomputed from the gesture-start snapshot each tick,
//!   so cost is proportional to the moving subtree, not the scene
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::editor::Editor;
use crate::input::{InteractionState, PointerEvent};
use crate::profile_scope;
use crate::resize::{ResizeOptions, resize_rect, scale_into};
use tracing::warn;

impl Editor {
    pub fn on_pointer_move(&mut self, event: &PointerEvent) {
        self.last_pointer = Some(event.position);
        if self.input_state.is_idle() {
            return;
        }
        profile_scope!("on_pointer_move");

        let screen = event.position;
        let world = self.camera.screen_to_world(screen);
        let threshold = self.settings.drag_threshold;
        let scene = &mut self.pages[self.active].scene;

        match &mut self.input_state {
            InteractionState::Idle => {}

            InteractionState::Panning { last } => {
                self.camera.pan(screen - *last);
                *last = screen;
            }

            InteractionState::MarqueeSelect { current, .. }
            | InteractionState::Drawing { current, .. } => {
                *current = world;
            }

            InteractionState::DraggingItems {
                start_screen,
                start,
                snapshot,
                started,
                ..
            } => {
                if !*started {
                    if start_screen.distance(screen) < threshold {
                        return;
                    }
                    *started = true;
                }

                profile_scope!("drag_items");
                let delta = world - *start;
                for item in snapshot.iter() {
                    if let Err(e) = scene.set_position(item.id, item.position() + delta) {
                        warn!(item_id = item.id, error = %e, "Dragged item vanished");
                    }
                }
            }

            InteractionState::ResizingItem {
                item_id,
                handle,
                start_screen,
                start,
                original,
                descendants,
                started,
            } => {
                if !*started {
                    if start_screen.distance(screen) < threshold {
                        return;
                    }
                    *started = true;
                }

                let opts = ResizeOptions {
                    aspect_lock: event.modifiers.shift,
                    from_center: event.modifiers.alt,
                    min_width: self.settings.min_item_width,
                    min_height: self.settings.min_item_height,
                };
                let rect = resize_rect(*original, *handle, world - *start, opts);
                if let Err(e) = scene.set_rect(*item_id, rect) {
                    warn!(item_id = *item_id, error = %e, "Resized item vanished");
                    return;
                }

                profile_scope!("scale_descendants");
                for (child_id, child_rect) in descendants.iter() {
                    let scaled = scale_into(original, &rect, child_rect);
                    if let Err(e) = scene.set_rect(*child_id, scaled) {
                        warn!(item_id = *child_id, error = %e, "Scaled child vanished");
                    }
                }
            }
        }
    }
}
