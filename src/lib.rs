//! Scene and interaction engine for an infinite-canvas editor.
//!
//! The crate owns the editable model behind a moodboard/whiteboard style
//! canvas: items on a pannable, zoomable surface, organized into frames and
//! groups, spread across pages, with every edit undoable. Rendering and
//! persistence belong to the host; it feeds in pointer, wheel and key events
//! and reads back items, selection and camera.
//!
//! ```ignore
//! use scratchpad::{Editor, PointerEvent, geometry::Point};
//!
//! let mut editor = Editor::default();
//! editor.set_viewport(Point::ZERO, 1280.0, 800.0);
//! editor.on_pointer_down(&PointerEvent::new(Point::new(40.0, 40.0)));
//! ```

pub mod camera;
pub mod command;
pub mod constants;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod hit_testing;
pub mod history;
pub mod input;
pub mod logging;
pub mod perf;
pub mod resize;
pub mod scene;
pub mod selection;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod types;

pub use camera::Camera;
pub use command::Command;
pub use editor::Editor;
pub use error::{PageError, SceneError};
pub use input::{
    InteractionMode, InteractionState, Key, KeyEvent, Modifiers, PointerButton, PointerEvent,
    ScrollDelta, WheelEvent,
};
pub use scene::Scene;
pub use settings::EditorSettings;
pub use types::{Item, ItemId, ItemPatch, ItemType, Page, ShapeType, Tool};
