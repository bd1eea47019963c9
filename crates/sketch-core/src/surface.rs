//! The drawing-surface capability every drawable renders through.
//!
//! `Surface` mirrors the subset of an HTML canvas 2D context the pad needs:
//! ambient paint style (line width, stroke/fill color, font size), a
//! save/restore transform stack, polylines, circles, and text. Implementors
//! live in `sketch-render` (software raster) and `sketch-wasm` (browser canvas).
//!
//! Paint style is ambient: each render call must set every style attribute
//! it depends on, because render calls run back-to-back within one pass.

use crate::model::{Color, Point};
use serde::Serialize;

/// A 2D drawing target.
pub trait Surface {
    /// Erase the whole surface to transparent.
    fn clear(&mut self);

    fn set_line_width(&mut self, width: f64);
    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_font_size(&mut self, px: f64);

    /// Push the current transform (and paint style) onto the state stack.
    fn save(&mut self);
    /// Pop the state stack. Unbalanced restores are ignored.
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, radians: f64);

    /// Stroke a connected polyline through `points` in order, with round
    /// caps and joins.
    fn stroke_polyline(&mut self, points: &[Point]);
    fn stroke_circle(&mut self, center: Point, radius: f64);
    fn fill_circle(&mut self, center: Point, radius: f64);
    /// Draw `text` with its alphabetic baseline starting at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point);
}

// ─── Recording surface ───────────────────────────────────────────────────

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    Clear,
    LineWidth(f64),
    StrokeColor(Color),
    FillColor(Color),
    FontSize(f64),
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    Polyline(Vec<Point>),
    StrokeCircle { center: Point, radius: f64 },
    FillCircle { center: Point, radius: f64 },
    Text { text: String, origin: Point },
}

/// A `Surface` that records every call as a `DrawOp`.
///
/// Two render passes over the same state produce equal op lists, which is
/// how pass-to-pass determinism is asserted without a rasterizer.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded ops, leaving the surface empty.
    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Ops recorded since the most recent `Clear`.
    pub fn last_frame(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| *op == DrawOp::Clear)
            .map_or(0, |i| i + 1);
        &self.ops[start..]
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(DrawOp::LineWidth(width));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.ops.push(DrawOp::StrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.ops.push(DrawOp::FillColor(color));
    }

    fn set_font_size(&mut self, px: f64) {
        self.ops.push(DrawOp::FontSize(px));
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.ops.push(DrawOp::Translate(dx, dy));
    }

    fn rotate(&mut self, radians: f64) {
        self.ops.push(DrawOp::Rotate(radians));
    }

    fn stroke_polyline(&mut self, points: &[Point]) {
        self.ops.push(DrawOp::Polyline(points.to_vec()));
    }

    fn stroke_circle(&mut self, center: Point, radius: f64) {
        self.ops.push(DrawOp::StrokeCircle { center, radius });
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        self.ops.push(DrawOp::FillCircle { center, radius });
    }

    fn fill_text(&mut self, text: &str, origin: Point) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            origin,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_frame_starts_after_latest_clear() {
        let mut surface = RecordingSurface::new();
        surface.set_line_width(1.0);
        surface.clear();
        surface.set_line_width(2.0);
        surface.clear();
        surface.set_line_width(3.0);
        assert_eq!(surface.last_frame(), &[DrawOp::LineWidth(3.0)]);
    }

    #[test]
    fn last_frame_without_clear_is_everything() {
        let mut surface = RecordingSurface::new();
        surface.save();
        surface.restore();
        assert_eq!(surface.last_frame().len(), 2);
    }
}
