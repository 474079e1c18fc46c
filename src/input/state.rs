//! Interaction state machine: one explicit state per gesture.
//!
//! Each variant carries only the data its gesture needs, so there is no way
//! to be "resizing" without a handle or "drawing" without a tool.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Panning         (space held, pan tool, or middle button)
//! Idle -> ResizingItem    (press on a handle of the single selected item)
//! Idle -> DraggingItems   (press on an eligible item)
//! Idle -> MarqueeSelect   (press on empty canvas with the select tool)
//! Idle -> Drawing         (press with a shape/sticky/text/frame tool)
//!
//! Any -> Idle             (pointer up finalizes or discards the gesture)
//! ```

use crate::geometry::{Point, Rect};
use crate::types::{Handle, Item, ItemId, Tool};

/// Payload-free view of [`InteractionState`] for hosts (cursor choice etc.).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionMode {
    Idle,
    Panning,
    MarqueeSelect,
    DraggingItems,
    ResizingItem,
    Drawing,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,

    Panning {
        /// Last pointer position, screen space
        last: Point,
    },

    MarqueeSelect {
        start_screen: Point,
        /// World-space corners
        start: Point,
        current: Point,
        /// Shift held: add to the existing selection instead of replacing it
        additive: bool,
    },

    DraggingItems {
        start_screen: Point,
        start: Point,
        /// Every moving item (selection plus container subtrees) as it was
        /// when the gesture began
        snapshot: Vec<Item>,
        /// Selection to fall back to if this turns out to be a click
        collapse_to: Option<ItemId>,
        /// Whether the pointer has passed the drag threshold
        started: bool,
    },

    ResizingItem {
        item_id: ItemId,
        handle: Handle,
        start_screen: Point,
        start: Point,
        original: Rect,
        /// Descendant bounds at gesture start, for proportional scaling
        descendants: Vec<(ItemId, Rect)>,
        started: bool,
    },

    Drawing {
        tool: Tool,
        start: Point,
        current: Point,
    },
}

impl InteractionState {
    pub fn mode(&self) -> InteractionMode {
        match self {
            Self::Idle => InteractionMode::Idle,
            Self::Panning { .. } => InteractionMode::Panning,
            Self::MarqueeSelect { .. } => InteractionMode::MarqueeSelect,
            Self::DraggingItems { .. } => InteractionMode::DraggingItems,
            Self::ResizingItem { .. } => InteractionMode::ResizingItem,
            Self::Drawing { .. } => InteractionMode::Drawing,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true for gestures that move the camera or items
    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            Self::Panning { .. } | Self::DraggingItems { .. } | Self::ResizingItem { .. }
        )
    }

    /// World-space marquee rectangle while marquee selecting.
    pub fn marquee_rect(&self) -> Option<Rect> {
        match self {
            Self::MarqueeSelect { start, current, .. } => {
                Some(Rect::from_corners(*start, *current))
            }
            _ => None,
        }
    }

    /// World-space rectangle being drawn.
    pub fn drawing_rect(&self) -> Option<Rect> {
        match self {
            Self::Drawing { start, current, .. } => Some(Rect::from_corners(*start, *current)),
            _ => None,
        }
    }

    pub fn resized_item_id(&self) -> Option<ItemId> {
        match self {
            Self::ResizingItem { item_id, .. } => Some(*item_id),
            _ => None,
        }
    }

    /// Ids moving with the current drag.
    pub fn dragged_ids(&self) -> Vec<ItemId> {
        match self {
            Self::DraggingItems { snapshot, .. } => snapshot.iter().map(|item| item.id).collect(),
            _ => Vec::new(),
        }
    }
}
