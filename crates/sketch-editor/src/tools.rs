//! Tool selection state: brush settings, the active tool, and the sticker
//! palette.
//!
//! Brush drawing and sticker placement are mutually exclusive. Selecting a
//! brush width leaves sticker mode; selecting a sticker leaves brush mode.
//! Color and sticker size persist across tool switches.

use crate::config::{PadConfig, is_positive};
use serde::Serialize;
use sketch_core::Color;

/// The tool a pointer-down will use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tool", content = "glyph", rename_all = "snake_case")]
pub enum ActiveTool {
    Brush,
    Sticker(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolState {
    active: ActiveTool,
    brush_width: f64,
    color: Color,
    sticker_size: f64,
    palette: Vec<String>,
}

impl ToolState {
    pub fn from_config(config: &PadConfig) -> Self {
        Self {
            active: ActiveTool::Brush,
            brush_width: config.initial_width,
            color: config.initial_color,
            sticker_size: config.sticker_size,
            palette: config.stickers.clone(),
        }
    }

    pub fn active(&self) -> &ActiveTool {
        &self.active
    }

    /// The selected sticker glyph, if sticker mode is active.
    pub fn sticker(&self) -> Option<&str> {
        match &self.active {
            ActiveTool::Sticker(glyph) => Some(glyph),
            ActiveTool::Brush => None,
        }
    }

    pub fn brush_width(&self) -> f64 {
        self.brush_width
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn sticker_size(&self) -> f64 {
        self.sticker_size
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    /// Switch to brush mode with `width`. Rejects non-positive widths.
    pub fn select_brush(&mut self, width: f64) -> bool {
        if !is_positive(width) {
            log::warn!("ignoring brush width {width}");
            return false;
        }
        let changed = self.active != ActiveTool::Brush || self.brush_width != width;
        self.active = ActiveTool::Brush;
        self.brush_width = width;
        changed
    }

    pub fn set_color(&mut self, color: Color) -> bool {
        if self.color == color {
            return false;
        }
        self.color = color;
        true
    }

    /// Switch to sticker mode with `glyph`. Rejects blank glyphs.
    pub fn select_sticker(&mut self, glyph: &str) -> bool {
        let glyph = glyph.trim();
        if glyph.is_empty() {
            log::warn!("ignoring empty sticker selection");
            return false;
        }
        self.active = ActiveTool::Sticker(glyph.to_string());
        true
    }

    /// Append a glyph to the palette. Blank and duplicate glyphs are rejected.
    pub fn add_sticker(&mut self, glyph: &str) -> bool {
        let glyph = glyph.trim();
        if glyph.is_empty() {
            log::warn!("ignoring empty custom sticker");
            return false;
        }
        if self.palette.iter().any(|existing| existing == glyph) {
            log::debug!("sticker {glyph:?} already in palette");
            return false;
        }
        self.palette.push(glyph.to_string());
        true
    }

    pub fn set_sticker_size(&mut self, size: f64) -> bool {
        if !is_positive(size) {
            log::warn!("ignoring sticker size {size}");
            return false;
        }
        if self.sticker_size == size {
            return false;
        }
        self.sticker_size = size;
        true
    }
}
