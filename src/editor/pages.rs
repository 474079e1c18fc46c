//! Page management. Each page owns its scene and history; the camera and
//! tool are shared.

use super::{Editor, PageContext};
use crate::command::{Command, Direction};
use crate::error::{PageError, PageResult};
use crate::types::{Page, PagePatch};
use tracing::{debug, info, warn};

impl Editor {
    pub fn pages(&self) -> impl Iterator<Item = &Page> + '_ {
        self.pages.iter().map(|ctx| &ctx.page)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn active_page(&self) -> &Page {
        &self.ctx().page
    }

    pub fn active_page_id(&self) -> &str {
        &self.ctx().page.id
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.page_index(id).map(|index| &self.pages[index].page)
    }

    /// Append an empty page and switch to it.
    pub fn add_page(&mut self) -> String {
        let page = Page::new(format!("Page {}", self.pages.len() + 1));
        let id = page.id.clone();
        self.pages
            .push(PageContext::new(page, self.settings.history_limit));
        self.activate(self.pages.len() - 1);
        info!(page = %id, "Page added");
        id
    }

    pub fn switch_page(&mut self, id: &str) -> PageResult<()> {
        let index = self
            .page_index(id)
            .ok_or_else(|| PageError::UnknownPage(id.to_string()))?;
        if index != self.active {
            self.activate(index);
            debug!(page = id, "Switched page");
        }
        Ok(())
    }

    /// Remove a page with its items and history. The last page cannot be
    /// deleted.
    pub fn delete_page(&mut self, id: &str) -> PageResult<()> {
        let index = self
            .page_index(id)
            .ok_or_else(|| PageError::UnknownPage(id.to_string()))?;
        if self.pages.len() == 1 {
            return Err(PageError::LastPage);
        }

        if index == self.active {
            self.cancel_gesture();
        }
        self.pages.remove(index);
        if index == self.active {
            self.activate(0);
        } else if index < self.active {
            self.active -= 1;
        }
        info!(page = id, remaining = self.pages.len(), "Page deleted");
        Ok(())
    }

    pub fn rename_page(&mut self, id: &str, name: &str) -> PageResult<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PageError::EmptyName);
        }
        self.update_page(
            id,
            PagePatch {
                name: Some(name.to_string()),
                ..PagePatch::default()
            },
        )
    }

    /// Edit page properties. Recorded in that page's own history, so the
    /// change is undone from that page and never from another.
    pub fn update_page(&mut self, id: &str, patch: PagePatch) -> PageResult<bool> {
        let index = self
            .page_index(id)
            .ok_or_else(|| PageError::UnknownPage(id.to_string()))?;
        if matches!(&patch.name, Some(name) if name.trim().is_empty()) {
            return Err(PageError::EmptyName);
        }

        let ctx = &mut self.pages[index];
        let from = patch.capture(&ctx.page);
        if patch.is_empty() || from == patch {
            return Ok(false);
        }

        let command = Command::UpdatePage {
            page_id: id.to_string(),
            from,
            to: patch,
        };
        if let Err(e) = command.apply(&mut ctx.scene, &mut ctx.page, Direction::Forward) {
            warn!(page = id, error = %e, "Page update failed");
            return Ok(false);
        }
        ctx.history.commit(command);
        debug!(page = id, "Page updated");
        Ok(true)
    }

    fn page_index(&self, id: &str) -> Option<usize> {
        self.pages.iter().position(|ctx| ctx.page.id == id)
    }

    /// Make a page current. Selection and gesture state belong to the page
    /// being left: a gesture in progress is cancelled and its live edits
    /// reverted before the switch.
    fn activate(&mut self, index: usize) {
        self.cancel_gesture();
        self.active = index;
        self.selection.clear();
    }
}
