//! Pointer, wheel and keyboard handling for the canvas.
//!
//! Hosts feed platform-neutral events (see `events`) into the editor's
//! `on_*` handlers. Every handler works in screen space and converts through
//! the camera.
//!
//! ## Architecture
//!
//! The current gesture is an explicit state machine ([`InteractionState`]),
//! one variant per gesture, each carrying only its own payload. Pointer down
//! picks the variant, pointer move applies live edits, pointer up turns the
//! net change into a single history command (or discards it).
//!
//! ## Modules
//!
//! - `events` - input event types
//! - `state` - interaction state machine enum and helper methods
//! - `mouse_down` - gesture selection (pan, resize, drag, marquee, draw)
//! - `drag` - pointer move handling (live drag, resize, pan)
//! - `mouse_up` - gesture finalization and command recording
//! - `transform` - wheel zoom/pan and zoom actions
//! - `keyboard` - shortcuts

mod drag;
mod events;
mod keyboard;
mod mouse_down;
mod mouse_up;
mod state;
mod transform;

pub use events::{KeyEvent, Key, Modifiers, PointerButton, PointerEvent, ScrollDelta, WheelEvent};
pub use state::{InteractionMode, InteractionState};
