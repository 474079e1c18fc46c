//! Core types for the scene.
//!
//! Items, pages and the small enums the interaction layer is expressed in
//! (tools, resize handles, editable numeric fields).

use crate::constants::{
    DEFAULT_FRAME_COLOR, DEFAULT_PAGE_BACKGROUND, DEFAULT_SHAPE_FILL, DEFAULT_SHAPE_STROKE,
    DEFAULT_STICKY_NOTE_COLOR, DEFAULT_STROKE_WIDTH, DEFAULT_TEXT_BACKGROUND,
};
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Stable item identifier, unique within the editor for the item's lifetime.
pub type ItemId = u64;

// ============================================================================
// Items
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    Image,
    Shape,
    StickyNote,
    Text,
    Group,
    Frame,
}

impl ItemType {
    /// Groups and frames own members through `child_ids`.
    pub fn is_container(self) -> bool {
        matches!(self, ItemType::Group | ItemType::Frame)
    }
}

/// Outline drawn for a `Shape` item. Rendering is external; the scene only
/// stores the choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeType {
    #[default]
    Rectangle,
    Ellipse,
    Cylinder,
    Terminator,
    Decision,
    Star,
}

/// An item placed on the infinite canvas.
///
/// Geometry is in world units. `parent_id` is a back-reference to the one
/// container holding this item; the container's `child_ids` is the forward
/// list. The scene keeps the two in agreement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub item_type: ItemType,
    pub text: String,
    pub image_url: Option<String>,
    pub shape_type: ShapeType,
    pub background_color: String,
    pub stroke_color: String,
    pub stroke_width: f32,
    pub opacity: f32,
    pub is_visible: bool,
    pub is_locked: bool,
    pub parent_id: Option<ItemId>,
    pub child_ids: Vec<ItemId>,
}

impl Item {
    /// A new, unparented item with the per-type default styling.
    pub fn new(id: ItemId, item_type: ItemType, rect: Rect) -> Self {
        let (background_color, stroke_width, text) = match item_type {
            ItemType::StickyNote => (DEFAULT_STICKY_NOTE_COLOR, 0.0, ""),
            ItemType::Shape => (DEFAULT_SHAPE_FILL, DEFAULT_STROKE_WIDTH, ""),
            ItemType::Frame => (DEFAULT_FRAME_COLOR, 0.0, "Frame"),
            ItemType::Text | ItemType::Image | ItemType::Group => {
                (DEFAULT_TEXT_BACKGROUND, 0.0, "")
            }
        };

        Self {
            id,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            item_type,
            text: text.to_string(),
            image_url: None,
            shape_type: ShapeType::default(),
            background_color: background_color.to_string(),
            stroke_color: DEFAULT_SHAPE_STROKE.to_string(),
            stroke_width,
            opacity: 1.0,
            is_visible: true,
            is_locked: false,
            parent_id: None,
            child_ids: Vec::new(),
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        self.item_type.is_container()
    }
}

/// Partial update applied by property edits. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub text: Option<String>,
    pub image_url: Option<String>,
    pub shape_type: Option<ShapeType>,
    pub background_color: Option<String>,
    pub stroke_color: Option<String>,
    pub stroke_width: Option<f32>,
    pub opacity: Option<f32>,
    pub is_visible: Option<bool>,
    pub is_locked: Option<bool>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        *self == ItemPatch::default()
    }

    /// Write the set fields into `item`.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(x) = self.x {
            item.x = x;
        }
        if let Some(y) = self.y {
            item.y = y;
        }
        if let Some(width) = self.width {
            item.width = width;
        }
        if let Some(height) = self.height {
            item.height = height;
        }
        if let Some(text) = &self.text {
            item.text.clone_from(text);
        }
        if let Some(url) = &self.image_url {
            item.image_url = Some(url.clone());
        }
        if let Some(shape_type) = self.shape_type {
            item.shape_type = shape_type;
        }
        if let Some(color) = &self.background_color {
            item.background_color.clone_from(color);
        }
        if let Some(color) = &self.stroke_color {
            item.stroke_color.clone_from(color);
        }
        if let Some(width) = self.stroke_width {
            item.stroke_width = width;
        }
        if let Some(opacity) = self.opacity {
            item.opacity = opacity;
        }
        if let Some(visible) = self.is_visible {
            item.is_visible = visible;
        }
        if let Some(locked) = self.is_locked {
            item.is_locked = locked;
        }
    }
}

/// Property-panel fields that accept typed numeric input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    X,
    Y,
    Width,
    Height,
    StrokeWidth,
    Opacity,
}

impl NumericField {
    /// A patch setting only this field.
    pub fn patch(self, value: f32) -> ItemPatch {
        let mut patch = ItemPatch::default();
        match self {
            NumericField::X => patch.x = Some(value),
            NumericField::Y => patch.y = Some(value),
            NumericField::Width => patch.width = Some(value),
            NumericField::Height => patch.height = Some(value),
            NumericField::StrokeWidth => patch.stroke_width = Some(value.max(0.0)),
            NumericField::Opacity => patch.opacity = Some(value.clamp(0.0, 1.0)),
        }
        patch
    }
}

/// Z-order moves for the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderAction {
    BringToFront,
    SendToBack,
    BringForward,
    SendBackward,
}

// ============================================================================
// Pages
// ============================================================================

/// One independent canvas workspace. Its items and history live in the
/// editor's per-page context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub name: String,
    pub background_color: String,
}

impl Page {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            background_color: DEFAULT_PAGE_BACKGROUND.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl PagePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.background_color.is_none()
    }

    pub fn apply_to(&self, page: &mut Page) {
        if let Some(name) = &self.name {
            page.name.clone_from(name);
        }
        if let Some(color) = &self.background_color {
            page.background_color.clone_from(color);
        }
    }

    /// The current values of `page` for the fields this patch sets.
    pub fn capture(&self, page: &Page) -> PagePatch {
        PagePatch {
            name: self.name.as_ref().map(|_| page.name.clone()),
            background_color: self
                .background_color
                .as_ref()
                .map(|_| page.background_color.clone()),
        }
    }
}

// ============================================================================
// Tools & Handles
// ============================================================================

/// Active tool in the tool dock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    #[default]
    Select,
    Pan,
    Shape(ShapeType),
    StickyNote,
    Text,
    Frame,
}

impl Tool {
    /// Item type created by a drawing tool, `None` for select/pan.
    pub fn item_type(self) -> Option<ItemType> {
        match self {
            Tool::Select | Tool::Pan => None,
            Tool::Shape(_) => Some(ItemType::Shape),
            Tool::StickyNote => Some(ItemType::StickyNote),
            Tool::Text => Some(ItemType::Text),
            Tool::Frame => Some(ItemType::Frame),
        }
    }

    #[inline]
    pub fn is_drawing(self) -> bool {
        self.item_type().is_some()
    }
}

/// One of the eight resize grips on a selected item's bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::Top,
        Handle::TopRight,
        Handle::Right,
        Handle::BottomRight,
        Handle::Bottom,
        Handle::BottomLeft,
        Handle::Left,
    ];

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Handle::TopLeft | Handle::TopRight | Handle::BottomRight | Handle::BottomLeft
        )
    }

    pub fn moves_left(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::Left | Handle::BottomLeft)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Handle::TopRight | Handle::Right | Handle::BottomRight)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::Top | Handle::TopRight)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Handle::BottomLeft | Handle::Bottom | Handle::BottomRight)
    }

    /// Where the grip sits on `rect`.
    pub fn position(self, rect: &Rect) -> Point {
        let x = if self.moves_left() {
            rect.x
        } else if self.moves_right() {
            rect.right()
        } else {
            rect.center().x
        };
        let y = if self.moves_top() {
            rect.y
        } else if self.moves_bottom() {
            rect.bottom()
        } else {
            rect.center().y
        };
        Point::new(x, y)
    }
}
