//! Editor-wide constants.
//!
//! Centralizes magic numbers so the interaction code reads in terms of
//! named thresholds. Most of these are the defaults for [`EditorSettings`],
//! which can override them at runtime.
//!
//! [`EditorSettings`]: crate::settings::EditorSettings

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level
pub const MIN_ZOOM: f32 = 0.1;

/// Maximum zoom level
pub const MAX_ZOOM: f32 = 5.0;

/// Default zoom level
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Zoom step for zoom in/out commands
pub const ZOOM_STEP: f32 = 0.1;

/// Zoom change per unit of wheel delta
pub const WHEEL_ZOOM_SENSITIVITY: f32 = 0.001;

/// Pan distance per wheel line when the wheel reports lines instead of pixels
pub const WHEEL_LINE_HEIGHT: f32 = 20.0;

// ============================================================================
// Input Handling
// ============================================================================

/// Screen-space distance a pointer must travel before a press becomes a drag
pub const DRAG_THRESHOLD: f32 = 5.0;

/// Minimum world-space width and height for a drawn rectangle to create an item
pub const MIN_DRAW_SIZE: f32 = 5.0;

/// Screen-space radius around a resize handle that still grabs it
pub const HANDLE_HIT_RADIUS: f32 = 6.0;

// ============================================================================
// Item Defaults
// ============================================================================

/// Minimum item width after any resize or property edit
pub const MIN_ITEM_WIDTH: f32 = 10.0;

/// Minimum item height after any resize or property edit
pub const MIN_ITEM_HEIGHT: f32 = 10.0;

/// Padding added around members when wrapping them in a frame
pub const FRAME_PADDING: f32 = 10.0;

/// Pasted images are scaled down so their longer side fits this
pub const MAX_IMAGE_DIMENSION: f32 = 800.0;

pub const DEFAULT_ITEM_SIZE: (f32, f32) = (150.0, 150.0);
pub const DEFAULT_STICKY_NOTE_SIZE: (f32, f32) = (150.0, 150.0);
pub const DEFAULT_TEXT_SIZE: (f32, f32) = (150.0, 40.0);
pub const DEFAULT_FRAME_SIZE: (f32, f32) = (500.0, 300.0);

/// Default stroke width for shapes
pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;

// ============================================================================
// Colors (default hex values)
// ============================================================================

pub const DEFAULT_STICKY_NOTE_COLOR: &str = "#FFF9C4";
pub const DEFAULT_SHAPE_FILL: &str = "#FFFFFF";
pub const DEFAULT_SHAPE_STROKE: &str = "#000000";
pub const DEFAULT_FRAME_COLOR: &str = "#FFFFFF";
pub const DEFAULT_TEXT_BACKGROUND: &str = "transparent";
pub const DEFAULT_PAGE_BACKGROUND: &str = "#2d2d2d";

// ============================================================================
// History
// ============================================================================

/// Maximum number of commands kept per page (oldest are dropped first)
pub const MAX_HISTORY_COMMANDS: usize = 500;
