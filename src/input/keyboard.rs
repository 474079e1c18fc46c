//! Keyboard shortcuts for the canvas.
//!
//! | Key                | Action                      |
//! |--------------------|-----------------------------|
//! | Space (held)       | Pan with the primary button |
//! | Delete / Backspace | Delete selection            |
//! | Escape             | Clear selection, select tool|
//! | Cmd+Z / Cmd+Shift+Z| Undo / redo                 |
//! | Cmd+G / Cmd+Shift+G| Group / ungroup             |
//! | Cmd+= / Cmd+- / Cmd+0 | Zoom in / out / reset    |

use crate::editor::Editor;
use crate::input::{Key, KeyEvent};
use tracing::trace;

impl Editor {
    /// Returns true when the key was consumed.
    pub fn on_key_down(&mut self, event: &KeyEvent) -> bool {
        let modifiers = event.modifiers;
        match event.key {
            Key::Space => {
                self.space_pressed = true;
                true
            }
            Key::Delete | Key::Backspace => self.delete_selection(),
            Key::Escape => {
                self.escape();
                true
            }
            Key::Character(c) if modifiers.command() => match c.to_ascii_lowercase() {
                'z' if modifiers.shift => self.redo(),
                'z' => self.undo(),
                'y' => self.redo(),
                'g' if modifiers.shift => self.ungroup(),
                'g' => self.group().is_some(),
                '=' | '+' => self.zoom_in(),
                '-' => self.zoom_out(),
                '0' => self.zoom_reset(),
                _ => {
                    trace!(key = %c, "Unbound shortcut");
                    false
                }
            },
            Key::Character(_) => false,
        }
    }

    pub fn on_key_up(&mut self, event: &KeyEvent) -> bool {
        if event.key == Key::Space {
            self.space_pressed = false;
            return true;
        }
        false
    }
}
