//! Hover previews: where the next stroke or sticker would land.
//!
//! Previews are never committed. They follow the pointer while no stroke
//! is in progress and reuse the committed objects' rendering logic.

use crate::command::render_glyph;
use crate::model::{Color, Point};
use crate::surface::Surface;
use serde::{Deserialize, Serialize};

/// How the brush preview circle is painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewStyle {
    /// Filled with the current brush color.
    #[default]
    Filled,
    /// Hairline outline in the current brush color.
    Outline,
}

/// Brush preview: a circle the size of the brush tip.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolPreview {
    position: Point,
    radius: f64,
    color: Color,
    style: PreviewStyle,
}

impl ToolPreview {
    pub fn new(position: Point, width: f64, color: Color, style: PreviewStyle) -> Self {
        Self {
            position,
            radius: width / 2.0,
            color,
            style,
        }
    }

    pub fn reposition(&mut self, position: Point) {
        self.position = position;
    }

    pub fn set_width(&mut self, width: f64) {
        self.radius = width / 2.0;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        match self.style {
            PreviewStyle::Filled => {
                surface.set_fill_color(self.color);
                surface.fill_circle(self.position, self.radius);
            }
            PreviewStyle::Outline => {
                surface.set_line_width(1.0);
                surface.set_stroke_color(self.color);
                surface.stroke_circle(self.position, self.radius);
            }
        }
    }
}

/// Sticker preview: the pending glyph with the rotation it was given when
/// the sticker was selected.
#[derive(Debug, Clone, PartialEq)]
pub struct StickerPreview {
    position: Point,
    glyph: String,
    rotation: f64,
    size: f64,
}

impl StickerPreview {
    pub fn new(position: Point, glyph: impl Into<String>, rotation: f64, size: f64) -> Self {
        Self {
            position,
            glyph: glyph.into(),
            rotation,
            size,
        }
    }

    pub fn reposition(&mut self, position: Point) {
        self.position = position;
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        render_glyph(surface, self.position, &self.glyph, self.rotation, self.size);
    }
}
