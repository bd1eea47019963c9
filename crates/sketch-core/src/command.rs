//! Drawable commands: the units of undoable history.
//!
//! The command set is closed (freehand strokes and stickers), so it is an
//! enum with an exhaustive render dispatch rather than a trait object.

use crate::model::{Color, Point};
use crate::surface::Surface;
use serde::Serialize;
use smallvec::SmallVec;

/// Anything placed on the pad that can paint itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Stroke(Stroke),
    Sticker(Sticker),
}

impl DrawCommand {
    pub fn render(&self, surface: &mut dyn Surface) {
        match self {
            DrawCommand::Stroke(stroke) => stroke.render(surface),
            DrawCommand::Sticker(sticker) => sticker.render(surface),
        }
    }
}

impl From<Stroke> for DrawCommand {
    fn from(stroke: Stroke) -> Self {
        DrawCommand::Stroke(stroke)
    }
}

impl From<Sticker> for DrawCommand {
    fn from(sticker: Sticker) -> Self {
        DrawCommand::Sticker(sticker)
    }
}

// ─── Stroke ──────────────────────────────────────────────────────────────

/// A freehand marker line.
///
/// Always holds at least one point. Points are only ever appended; width
/// and color are fixed when the stroke is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    points: SmallVec<[Point; 16]>,
    width: f64,
    color: Color,
}

impl Stroke {
    pub fn new(start: Point, width: f64, color: Color) -> Self {
        let mut points = SmallVec::new();
        points.push(start);
        Self {
            points,
            width,
            color,
        }
    }

    /// Append a point. Only the controller's in-progress stroke is extended.
    pub fn extend(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether the pointer moved after the initial press.
    pub fn has_drag(&self) -> bool {
        self.points.len() > 1
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if self.points.is_empty() {
            return;
        }
        surface.set_line_width(self.width);
        surface.set_stroke_color(self.color);
        surface.stroke_polyline(&self.points);
    }
}

// ─── Sticker ─────────────────────────────────────────────────────────────

/// A glyph placed at a position with a fixed rotation and size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sticker {
    position: Point,
    glyph: String,
    /// Degrees, drawn once at placement.
    rotation: f64,
    /// Font size in pixels, captured at placement.
    size: f64,
}

impl Sticker {
    pub fn new(position: Point, glyph: impl Into<String>, rotation: f64, size: f64) -> Self {
        Self {
            position,
            glyph: glyph.into(),
            rotation,
            size,
        }
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

/// Draw a rotated glyph whose baseline origin sits at `position`.
///
/// Shared by placed stickers and the sticker preview. The transform is
/// saved and restored so rotation never leaks into later render calls.
pub fn render_glyph(
    surface: &mut dyn Surface,
    position: Point,
    glyph: &str,
    rotation_degrees: f64,
    size: f64,
) {
    surface.save();
    surface.translate(position.x, position.y);
    surface.rotate(rotation_degrees.to_radians());
    surface.set_font_size(size);
    surface.set_fill_color(Color::BLACK);
    surface.fill_text(glyph, Point::ORIGIN);
    surface.restore();
}
