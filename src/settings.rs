//! Editor configuration.
//!
//! Stored as JSON. Every field has a default, so partial files (or files
//! written by older versions) load cleanly.

use crate::camera::ZoomLimits;
use crate::constants::*;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Colors and sizes for newly created items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDefaults {
    pub sticky_note_color: String,
    pub shape_fill: String,
    pub shape_stroke: String,
    pub stroke_width: f32,
    pub frame_color: String,
    pub item_size: (f32, f32),
    pub sticky_note_size: (f32, f32),
    pub text_size: (f32, f32),
    pub frame_size: (f32, f32),
}

impl Default for ItemDefaults {
    fn default() -> Self {
        Self {
            sticky_note_color: DEFAULT_STICKY_NOTE_COLOR.to_string(),
            shape_fill: DEFAULT_SHAPE_FILL.to_string(),
            shape_stroke: DEFAULT_SHAPE_STROKE.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            frame_color: DEFAULT_FRAME_COLOR.to_string(),
            item_size: DEFAULT_ITEM_SIZE,
            sticky_note_size: DEFAULT_STICKY_NOTE_SIZE,
            text_size: DEFAULT_TEXT_SIZE,
            frame_size: DEFAULT_FRAME_SIZE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Zoom change for the zoom in/out actions
    pub zoom_step: f32,
    /// Zoom change per unit of vertical wheel delta
    pub wheel_zoom_sensitivity: f32,
    /// Wheel pans the canvas unless ctrl/cmd is held
    pub wheel_pans: bool,
    /// Screen pixels before a press counts as a drag
    pub drag_threshold: f32,
    /// World units a drawn rectangle needs on both sides
    pub min_draw_size: f32,
    pub min_item_width: f32,
    pub min_item_height: f32,
    /// Screen pixels around a resize handle that still grab it
    pub handle_hit_radius: f32,
    pub frame_padding: f32,
    pub max_image_dimension: f32,
    /// Per-page undo depth, `None` for unlimited
    pub history_limit: Option<usize>,
    pub item_defaults: ItemDefaults,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            wheel_zoom_sensitivity: WHEEL_ZOOM_SENSITIVITY,
            wheel_pans: false,
            drag_threshold: DRAG_THRESHOLD,
            min_draw_size: MIN_DRAW_SIZE,
            min_item_width: MIN_ITEM_WIDTH,
            min_item_height: MIN_ITEM_HEIGHT,
            handle_hit_radius: HANDLE_HIT_RADIUS,
            frame_padding: FRAME_PADDING,
            max_image_dimension: MAX_IMAGE_DIMENSION,
            history_limit: Some(MAX_HISTORY_COMMANDS),
            item_defaults: ItemDefaults::default(),
        }
    }
}

impl EditorSettings {
    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits::new(self.min_zoom, self.max_zoom)
    }

    /// Load from `path`. Missing fields take their defaults; out-of-range
    /// values are corrected.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings: EditorSettings = serde_json::from_str(&contents)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        Ok(settings.sanitized())
    }

    /// Load from `path`, falling back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serializing settings")?;
        fs::write(path, json).with_context(|| format!("writing settings to {}", path.display()))
    }

    /// Copy with nonsensical values replaced by defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            self.min_zoom = defaults.min_zoom;
        }
        if !self.max_zoom.is_finite() || self.max_zoom < self.min_zoom {
            self.max_zoom = self.min_zoom.max(defaults.max_zoom);
        }
        for (value, default) in [
            (&mut self.zoom_step, defaults.zoom_step),
            (&mut self.wheel_zoom_sensitivity, defaults.wheel_zoom_sensitivity),
            (&mut self.min_item_width, defaults.min_item_width),
            (&mut self.min_item_height, defaults.min_item_height),
            (&mut self.max_image_dimension, defaults.max_image_dimension),
        ] {
            if !(value.is_finite() && *value > 0.0) {
                *value = default;
            }
        }
        for (value, default) in [
            (&mut self.drag_threshold, defaults.drag_threshold),
            (&mut self.min_draw_size, defaults.min_draw_size),
            (&mut self.handle_hit_radius, defaults.handle_hit_radius),
            (&mut self.frame_padding, defaults.frame_padding),
        ] {
            if !(value.is_finite() && *value >= 0.0) {
                *value = default;
            }
        }
        self
    }
}

/// `<config dir>/scratchpad/settings.json`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scratchpad").join("settings.json"))
}
