//! Canvas transformations: wheel zoom/pan and the zoom actions.

use crate::constants::{DEFAULT_ZOOM, WHEEL_LINE_HEIGHT};
use crate::editor::Editor;
use crate::geometry::Point;
use crate::input::WheelEvent;
use tracing::trace;

impl Editor {
    /// Wheel input. Zooms about the pointer by default; with `wheel_pans`
    /// set, plain wheel pans and ctrl/cmd+wheel zooms.
    pub fn on_wheel(&mut self, event: &WheelEvent) -> bool {
        self.last_pointer = Some(event.position);
        let delta = event.delta.pixels(WHEEL_LINE_HEIGHT);

        if self.settings.wheel_pans && !event.modifiers.command() {
            if delta == Point::ZERO {
                return false;
            }
            self.camera.pan(delta);
            return true;
        }

        let changed = self.camera.zoom_by(
            -delta.y * self.settings.wheel_zoom_sensitivity,
            event.position,
            self.settings.zoom_limits(),
        );
        if changed {
            trace!(zoom = self.camera.zoom, "Wheel zoom");
        }
        changed
    }

    pub fn zoom_in(&mut self) -> bool {
        self.step_zoom(self.settings.zoom_step)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.step_zoom(-self.settings.zoom_step)
    }

    /// Back to 100%, keeping the viewport center fixed.
    pub fn zoom_reset(&mut self) -> bool {
        let center = self.camera.viewport_center();
        self.camera
            .zoom_to(DEFAULT_ZOOM, center, self.settings.zoom_limits())
    }

    fn step_zoom(&mut self, delta: f32) -> bool {
        let center = self.camera.viewport_center();
        self.camera
            .zoom_by(delta, center, self.settings.zoom_limits())
    }
}
