//! Linear undo/redo history for one page.
//!
//! Commands before the cursor are undoable, commands at or after it are
//! redoable. Committing after an undo discards the redo tail.

use crate::command::Command;
use tracing::trace;

#[derive(Clone, Debug, Default)]
pub struct History {
    commands: Vec<Command>,
    cursor: usize,
    /// Oldest commands are dropped beyond this many. `None` keeps everything.
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Record a completed command.
    pub fn commit(&mut self, command: Command) {
        self.commands.truncate(self.cursor);
        self.commands.push(command);

        if let Some(limit) = self.limit {
            let excess = self.commands.len().saturating_sub(limit.max(1));
            if excess > 0 {
                self.commands.drain(..excess);
                trace!(dropped = excess, "History limit reached");
            }
        }
        self.cursor = self.commands.len();
    }

    /// Step back. Returns the command to apply in reverse, `None` at the start.
    pub fn undo(&mut self) -> Option<&Command> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.commands.get(self.cursor)
    }

    /// Step forward. Returns the command to apply again, `None` at the end.
    pub fn redo(&mut self) -> Option<&Command> {
        let command = self.commands.get(self.cursor)?;
        self.cursor += 1;
        Some(command)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Change the depth limit, trimming the oldest commands if needed.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
        if let Some(limit) = limit {
            let excess = self.commands.len().saturating_sub(limit.max(1));
            if excess > 0 {
                self.commands.drain(..excess);
                self.cursor = self.cursor.saturating_sub(excess);
            }
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.cursor = 0;
    }
}
