//! Resize and container-scale math.
//!
//! Everything here is computed from gesture-start geometry. The interaction
//! layer calls these on every pointer move with the total delta so far,
//! never with incremental deltas, so repeated ticks cannot drift.

use crate::geometry::{Point, Rect};
use crate::types::Handle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeOptions {
    /// Keep the original aspect ratio (corner handles only).
    pub aspect_lock: bool,
    /// Grow or shrink symmetrically about the original center.
    pub from_center: bool,
    pub min_width: f32,
    pub min_height: f32,
}

/// New bounds for `original` after dragging `handle` by `delta` world units.
///
/// Sides the handle does not touch stay put. Sizes are floored at the
/// minimums, and the anchored edge (or the center) holds still while
/// clamping.
pub fn resize_rect(original: Rect, handle: Handle, delta: Point, opts: ResizeOptions) -> Rect {
    let mut width = if handle.moves_left() {
        original.width - delta.x
    } else if handle.moves_right() {
        original.width + delta.x
    } else {
        original.width
    };
    let mut height = if handle.moves_top() {
        original.height - delta.y
    } else if handle.moves_bottom() {
        original.height + delta.y
    } else {
        original.height
    };

    if opts.from_center {
        width = original.width + (width - original.width) * 2.0;
        height = original.height + (height - original.height) * 2.0;
    }

    width = width.max(opts.min_width);
    height = height.max(opts.min_height);

    if opts.aspect_lock && handle.is_corner() && original.width > 0.0 && original.height > 0.0 {
        let ratio = original.width / original.height;
        width = width.max(height * ratio);
        height = width / ratio;

        // Scale back up if the locked ratio pushed one side under its floor.
        let grow = (opts.min_width / width).max(opts.min_height / height).max(1.0);
        width *= grow;
        height *= grow;
    }

    let center = original.center();
    let x = if opts.from_center {
        center.x - width / 2.0
    } else if handle.moves_left() {
        original.right() - width
    } else {
        original.x
    };
    let y = if opts.from_center {
        center.y - height / 2.0
    } else if handle.moves_top() {
        original.bottom() - height
    } else {
        original.y
    };

    Rect::new(x, y, width, height)
}

/// Map `child` from `old_container`'s local fractional coordinates into
/// `new_container`. A degenerate old axis keeps the child's offset and size
/// on that axis.
pub fn scale_into(old_container: &Rect, new_container: &Rect, child: &Rect) -> Rect {
    let (x, width) = scale_axis(
        old_container.x,
        old_container.width,
        new_container.x,
        new_container.width,
        child.x,
        child.width,
    );
    let (y, height) = scale_axis(
        old_container.y,
        old_container.height,
        new_container.y,
        new_container.height,
        child.y,
        child.height,
    );
    Rect::new(x, y, width, height)
}

fn scale_axis(
    old_start: f32,
    old_len: f32,
    new_start: f32,
    new_len: f32,
    pos: f32,
    len: f32,
) -> (f32, f32) {
    if old_len <= f32::EPSILON {
        return (new_start + (pos - old_start), len);
    }
    let k = new_len / old_len;
    (new_start + (pos - old_start) * k, len * k)
}
