//! The editor context: everything the UI layer talks to.
//!
//! An [`Editor`] owns the pages, each with its own scene and history, plus
//! the view state shared across pages (camera, selection, active tool,
//! current gesture). Handlers receive the context explicitly through
//! `&mut self`; nothing lives in globals.
//!
//! ## Modules
//!
//! - `actions` - atomic item edits (property patches, delete, group, reorder, ...)
//! - `pages` - page CRUD and page property edits
//! - `changes` - before/after snapshot collection for multi-item commands
//!
//! Pointer, wheel and keyboard handling live in [`crate::input`].

mod actions;
mod changes;
mod pages;

pub(crate) use changes::ChangeSet;

use crate::camera::Camera;
use crate::command::{Command, Direction};
use crate::geometry::{Point, Rect};
use crate::history::History;
use crate::input::{InteractionMode, InteractionState};
use crate::perf::{INTERACTION_BUDGET_MS, measure_and_log};
use crate::scene::Scene;
use crate::selection::SelectionManager;
use crate::settings::EditorSettings;
use crate::types::{Item, ItemId, ItemType, Page, Tool};
use tracing::{debug, info, warn};

/// A page with its own item store and undo stack.
pub(crate) struct PageContext {
    pub(crate) page: Page,
    pub(crate) scene: Scene,
    pub(crate) history: History,
}

impl PageContext {
    fn new(page: Page, history_limit: Option<usize>) -> Self {
        Self {
            page,
            scene: Scene::new(),
            history: History::with_limit(history_limit),
        }
    }
}

pub struct Editor {
    pub(crate) pages: Vec<PageContext>,
    pub(crate) active: usize,
    pub(crate) camera: Camera,
    pub(crate) selection: SelectionManager,
    pub(crate) tool: Tool,
    pub(crate) input_state: InteractionState,
    pub(crate) space_pressed: bool,
    /// Last pointer position seen, screen space. Paste lands here.
    pub(crate) last_pointer: Option<Point>,
    pub(crate) settings: EditorSettings,
    next_item_id: ItemId,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl Editor {
    /// A fresh editor with one empty page.
    pub fn new(settings: EditorSettings) -> Self {
        let settings = settings.sanitized();
        let first = PageContext::new(Page::new("Page 1"), settings.history_limit);
        info!(page = %first.page.id, "Editor created");

        Self {
            pages: vec![first],
            active: 0,
            camera: Camera::default(),
            selection: SelectionManager::new(),
            tool: Tool::Select,
            input_state: InteractionState::Idle,
            space_pressed: false,
            last_pointer: None,
            settings,
            next_item_id: 1,
        }
    }

    // ========================================================================
    // Settings
    // ========================================================================

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Swap settings at runtime (e.g. after a hot reload). History limits
    /// apply immediately and the current zoom is re-clamped.
    pub fn apply_settings(&mut self, settings: EditorSettings) {
        let settings = settings.sanitized();
        for ctx in &mut self.pages {
            ctx.history.set_limit(settings.history_limit);
        }
        self.camera.clamp_zoom(settings.zoom_limits());
        self.settings = settings;
        debug!("Settings applied");
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Place the canvas viewport on screen. Screen/world conversion is
    /// relative to this origin, not the window's.
    pub fn set_viewport(&mut self, origin: Point, width: f32, height: f32) {
        self.camera.origin = origin;
        self.camera.viewport = (width, height);
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.camera.screen_to_world(screen)
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        self.camera.world_to_screen(world)
    }

    pub fn scene(&self) -> &Scene {
        &self.ctx().scene
    }

    pub fn items(&self) -> &[Item] {
        self.scene().items()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.scene().get(id)
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.scene().visible_items()
    }

    pub fn selection(&self) -> &[ItemId] {
        self.selection.ids()
    }

    pub fn selected_items(&self) -> Vec<&Item> {
        self.selection
            .ids()
            .iter()
            .filter_map(|&id| self.scene().get(id))
            .collect()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools. A gesture in progress keeps the tool it started with.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            debug!(?tool, "Tool changed");
            self.tool = tool;
        }
    }

    pub fn interaction_state(&self) -> &InteractionState {
        &self.input_state
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        self.input_state.mode()
    }

    pub fn marquee_rect(&self) -> Option<Rect> {
        self.input_state.marquee_rect()
    }

    pub fn drawing_rect(&self) -> Option<Rect> {
        self.input_state.drawing_rect()
    }

    pub fn is_space_pressed(&self) -> bool {
        self.space_pressed
    }

    pub fn history(&self) -> &History {
        &self.ctx().history
    }

    pub fn can_undo(&self) -> bool {
        self.history().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history().can_redo()
    }

    // ========================================================================
    // Undo / Redo
    // ========================================================================

    /// Revert the last command on the active page. Selection is cleared so
    /// it never points at items the undo removed. Ignored mid-gesture.
    pub fn undo(&mut self) -> bool {
        self.step_history(Direction::Backward)
    }

    /// Re-apply the next command on the active page.
    pub fn redo(&mut self) -> bool {
        self.step_history(Direction::Forward)
    }

    /// Forget the active page's undo stack, e.g. after loading a document.
    pub fn clear_history(&mut self) {
        self.ctx_mut().history.clear();
    }

    fn step_history(&mut self, direction: Direction) -> bool {
        if !self.input_state.is_idle() {
            debug!(?direction, "History step ignored during active gesture");
            return false;
        }

        let ctx = &mut self.pages[self.active];
        let command = match direction {
            Direction::Backward => ctx.history.undo(),
            Direction::Forward => ctx.history.redo(),
        };
        let Some(command) = command else {
            return false;
        };

        let name = command.name();
        let result = measure_and_log(name, INTERACTION_BUDGET_MS, || {
            command.apply(&mut ctx.scene, &mut ctx.page, direction)
        });
        if let Err(e) = result {
            // Put the cursor back so the failed command stays where it was.
            match direction {
                Direction::Backward => ctx.history.redo(),
                Direction::Forward => ctx.history.undo(),
            };
            warn!(command = name, ?direction, error = %e, "History step failed");
            return false;
        }
        debug!(command = name, ?direction, "History step");

        self.selection.clear();
        true
    }

    /// Abandon the gesture in progress, putting back any item geometry it
    /// changed live. Nothing is recorded.
    pub fn cancel_gesture(&mut self) {
        let scene = &mut self.pages[self.active].scene;
        match std::mem::take(&mut self.input_state) {
            InteractionState::DraggingItems { snapshot, .. } => {
                for item in &snapshot {
                    // Items are only ever moved, so position is all there is to undo.
                    let _ = scene.set_position(item.id, item.position());
                }
                debug!(items = snapshot.len(), "Drag cancelled");
            }
            InteractionState::ResizingItem {
                item_id,
                original,
                descendants,
                ..
            } => {
                let _ = scene.set_rect(item_id, original);
                for (id, rect) in descendants {
                    let _ = scene.set_rect(id, rect);
                }
                debug!(item_id, "Resize cancelled");
            }
            InteractionState::Idle
            | InteractionState::Panning { .. }
            | InteractionState::MarqueeSelect { .. }
            | InteractionState::Drawing { .. } => {}
        }
    }

    // ========================================================================
    // Internals shared by actions and input handlers
    // ========================================================================

    pub(crate) fn ctx(&self) -> &PageContext {
        &self.pages[self.active]
    }

    pub(crate) fn ctx_mut(&mut self) -> &mut PageContext {
        &mut self.pages[self.active]
    }

    /// Apply an atomic edit and record it. Returns false (and records
    /// nothing) if the scene rejects it.
    pub(crate) fn execute(&mut self, command: Command) -> bool {
        let ctx = &mut self.pages[self.active];
        match command.apply(&mut ctx.scene, &mut ctx.page, Direction::Forward) {
            Ok(()) => {
                debug!(
                    command = command.name(),
                    items = command.affected_ids().len(),
                    "Command executed"
                );
                ctx.history.commit(command);
                true
            }
            Err(e) => {
                debug!(command = command.name(), error = %e, "Command rejected");
                false
            }
        }
    }

    /// Record a command whose effect is already live in the scene.
    pub(crate) fn commit(&mut self, command: Command) {
        debug!(command = command.name(), items = command.affected_ids().len(), "Command committed");
        self.ctx_mut().history.commit(command);
    }

    pub(crate) fn alloc_id(&mut self) -> ItemId {
        let id = self.next_item_id;
        self.next_item_id += 1;
        id
    }

    /// A new item styled from the configured defaults.
    pub(crate) fn new_item(&mut self, item_type: ItemType, rect: Rect) -> Item {
        let mut item = Item::new(self.alloc_id(), item_type, rect);
        let defaults = &self.settings.item_defaults;
        match item_type {
            ItemType::StickyNote => item.background_color.clone_from(&defaults.sticky_note_color),
            ItemType::Shape => {
                item.background_color.clone_from(&defaults.shape_fill);
                item.stroke_color.clone_from(&defaults.shape_stroke);
                item.stroke_width = defaults.stroke_width;
            }
            ItemType::Frame => item.background_color.clone_from(&defaults.frame_color),
            ItemType::Text | ItemType::Image | ItemType::Group => {}
        }
        item
    }

    /// Selected ids that exist, minus any whose ancestor is also selected,
    /// in z-order.
    pub(crate) fn selection_roots(&self) -> Vec<ItemId> {
        let scene = self.scene();
        let selected = self.selection.ids();
        let mut roots: Vec<(usize, ItemId)> = selected
            .iter()
            .copied()
            .filter(|&id| {
                !scene
                    .ancestors(id)
                    .iter()
                    .any(|ancestor| selected.contains(ancestor))
            })
            .filter_map(|id| scene.z_index(id).map(|z| (z, id)))
            .collect();
        roots.sort_unstable_by_key(|&(z, _)| z);
        roots.into_iter().map(|(_, id)| id).collect()
    }
}
