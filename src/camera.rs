//! Camera: the view transform between screen and world space.
//!
//! A screen point maps to world space as `(screen - origin - offset) / zoom`,
//! where `origin` is the canvas viewport's own top-left on screen. Keeping the
//! viewport origin separate from the pan offset means the conversion stays
//! correct when the surrounding layout moves the canvas around.

use crate::constants::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Inclusive zoom bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
}

impl ZoomLimits {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min, self.max)
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self::new(MIN_ZOOM, MAX_ZOOM)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Screen-space offset of the world origin, relative to the viewport.
    pub offset: Point,
    pub zoom: f32,
    /// Screen-space top-left of the canvas viewport.
    pub origin: Point,
    /// Viewport size in screen pixels, used for zooming about the center.
    pub viewport: (f32, f32),
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Point::ZERO,
            zoom: DEFAULT_ZOOM,
            origin: Point::ZERO,
            viewport: (0.0, 0.0),
        }
    }
}

impl Camera {
    #[inline]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        (screen - self.origin - self.offset) / self.zoom
    }

    #[inline]
    pub fn world_to_screen(&self, world: Point) -> Point {
        world * self.zoom + self.offset + self.origin
    }

    /// Convert a screen-space delta to world space (for drag operations).
    #[inline]
    pub fn screen_delta_to_world(&self, delta: Point) -> Point {
        delta / self.zoom
    }

    /// Screen-space center of the viewport.
    pub fn viewport_center(&self) -> Point {
        self.origin + Point::new(self.viewport.0 / 2.0, self.viewport.1 / 2.0)
    }

    pub fn pan(&mut self, screen_delta: Point) {
        self.offset = self.offset + screen_delta;
    }

    /// Set the zoom level, keeping the world point under `pivot` fixed on
    /// screen. Returns false when clamping leaves the zoom unchanged.
    pub fn zoom_to(&mut self, zoom: f32, pivot: Point, limits: ZoomLimits) -> bool {
        let new_zoom = limits.clamp(zoom);
        if new_zoom == self.zoom {
            return false;
        }

        let world_under_pivot = self.screen_to_world(pivot);
        self.zoom = new_zoom;
        self.offset = pivot - self.origin - world_under_pivot * new_zoom;
        true
    }

    /// Relative form of [`Camera::zoom_to`].
    pub fn zoom_by(&mut self, delta: f32, pivot: Point, limits: ZoomLimits) -> bool {
        self.zoom_to(self.zoom + delta, pivot, limits)
    }

    /// Re-apply limits after they change; the viewport center stays fixed.
    pub fn clamp_zoom(&mut self, limits: ZoomLimits) -> bool {
        let pivot = self.viewport_center();
        self.zoom_to(self.zoom, pivot, limits)
    }
}
