//! Software raster surface.
//!
//! `RasterSurface` implements `Surface` on a `tiny_skia::Pixmap` so the
//! same render calls that drive the browser canvas can produce pixels
//! headlessly. A base scale maps display coordinates onto a larger pixmap,
//! which is how the hi-res export is produced.
//!
//! Sticker glyphs are drawn from `ab_glyph` outlines when a font is set.
//! Without a font, or for glyphs the font has no outline for (color emoji),
//! a square outline of the glyph's font size stands in, drawn under the same
//! transform.

use ab_glyph::{Font, FontArc, ScaleFont};
use kurbo::{Affine, Vec2};
use sketch_core::{Color, Point, Surface};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Transform};

use crate::export::ExportError;

/// Transform and ambient paint style, saved and restored as a unit.
#[derive(Debug, Clone, Copy)]
struct State {
    transform: Affine,
    line_width: f64,
    stroke: Color,
    fill: Color,
    font_size: f64,
}

pub struct RasterSurface {
    pixmap: Pixmap,
    state: State,
    stack: Vec<State>,
    font: Option<FontArc>,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("depth", &self.stack.len())
            .field("font", &self.font.is_some())
            .finish()
    }
}

impl RasterSurface {
    /// A transparent surface of `width`×`height` display units rendered at
    /// `scale` device pixels per unit.
    ///
    /// # Errors
    /// Fails when the scale is not a positive finite number or the scaled
    /// size is zero or too large to allocate.
    pub fn new(width: u32, height: u32, scale: f64) -> Result<Self, ExportError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ExportError::InvalidScale(scale));
        }
        let px_width = (f64::from(width) * scale).round() as u32;
        let px_height = (f64::from(height) * scale).round() as u32;
        let pixmap = Pixmap::new(px_width, px_height).ok_or(ExportError::Allocation {
            width: px_width,
            height: px_height,
        })?;
        Ok(Self {
            pixmap,
            state: State {
                transform: Affine::scale(scale),
                line_width: 1.0,
                stroke: Color::BLACK,
                fill: Color::BLACK,
                font_size: 10.0,
            },
            stack: Vec::new(),
            font: None,
        })
    }

    /// Use `font` for `fill_text`.
    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    // ─── Helpers ─────────────────────────────────────────────────────────

    fn transform(&self) -> Transform {
        let [a, b, c, d, e, f] = self.state.transform.as_coeffs();
        Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
    }

    fn paint(color: Color) -> Paint<'static> {
        let [r, g, b, a] = color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint
    }

    fn stroke_style(&self) -> tiny_skia::Stroke {
        tiny_skia::Stroke {
            width: self.state.line_width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..tiny_skia::Stroke::default()
        }
    }

    fn stroke_path(&mut self, path: &tiny_skia::Path) {
        let paint = Self::paint(self.state.stroke);
        let stroke = self.stroke_style();
        let transform = self.transform();
        self.pixmap
            .stroke_path(path, &paint, &stroke, transform, None);
    }

    fn fill_path(&mut self, path: &tiny_skia::Path) {
        let paint = Self::paint(self.state.fill);
        let transform = self.transform();
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, transform, None);
    }

    /// Build the filled outline of `text` laid out along the baseline at
    /// `origin`. `None` if the font has no outline for any of its glyphs.
    fn glyph_path(font: &FontArc, text: &str, origin: Point, px: f64) -> Option<tiny_skia::Path> {
        let scaled = font.as_scaled(px as f32);
        let (hs, vs) = (scaled.h_scale_factor(), scaled.v_scale_factor());
        let (ox, oy) = (origin.x as f32, origin.y as f32);

        let mut pb = PathBuilder::new();
        let mut cursor = 0.0f32;
        let mut prev = None;
        let mut last_end: Option<ab_glyph::Point> = None;

        for ch in text.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = prev {
                cursor += scaled.kern(prev, id);
            }
            if let Some(outline) = font.outline(id) {
                // Font units are y-up; the surface is y-down.
                let map = |p: ab_glyph::Point| (ox + cursor + p.x * hs, oy - p.y * vs);
                for curve in &outline.curves {
                    let (start, end) = match curve {
                        ab_glyph::OutlineCurve::Line(p0, p1) => (*p0, *p1),
                        ab_glyph::OutlineCurve::Quad(p0, _, p2) => (*p0, *p2),
                        ab_glyph::OutlineCurve::Cubic(p0, _, _, p3) => (*p0, *p3),
                    };
                    if last_end != Some(start) {
                        if last_end.is_some() {
                            pb.close();
                        }
                        let (x, y) = map(start);
                        pb.move_to(x, y);
                    }
                    match curve {
                        ab_glyph::OutlineCurve::Line(_, p1) => {
                            let (x, y) = map(*p1);
                            pb.line_to(x, y);
                        }
                        ab_glyph::OutlineCurve::Quad(_, p1, p2) => {
                            let (x1, y1) = map(*p1);
                            let (x, y) = map(*p2);
                            pb.quad_to(x1, y1, x, y);
                        }
                        ab_glyph::OutlineCurve::Cubic(_, p1, p2, p3) => {
                            let (x1, y1) = map(*p1);
                            let (x2, y2) = map(*p2);
                            let (x, y) = map(*p3);
                            pb.cubic_to(x1, y1, x2, y2, x, y);
                        }
                    }
                    last_end = Some(end);
                }
            }
            cursor += scaled.h_advance(id);
            prev = Some(id);
        }
        if last_end.is_some() {
            pb.close();
        }
        pb.finish()
    }

    /// Square outline one font size wide, sitting on the baseline.
    fn placeholder(&mut self, origin: Point, px: f64) {
        let (x, y, s) = (origin.x as f32, origin.y as f32, px as f32);
        let mut pb = PathBuilder::new();
        pb.move_to(x, y - s);
        pb.line_to(x + s, y - s);
        pb.line_to(x + s, y);
        pb.line_to(x, y);
        pb.close();
        if let Some(path) = pb.finish() {
            let paint = Self::paint(self.state.fill);
            let stroke = tiny_skia::Stroke {
                width: (px / 16.0).max(1.0) as f32,
                line_join: LineJoin::Round,
                ..tiny_skia::Stroke::default()
            };
            let transform = self.transform();
            self.pixmap
                .stroke_path(&path, &paint, &stroke, transform, None);
        }
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_font_size(&mut self, px: f64) {
        self.state.font_size = px;
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform = self.state.transform * Affine::translate(Vec2::new(dx, dy));
    }

    fn rotate(&mut self, radians: f64) {
        self.state.transform = self.state.transform * Affine::rotate(radians);
    }

    fn stroke_polyline(&mut self, points: &[Point]) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.is_empty() {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        if let Some(path) = pb.finish() {
            self.stroke_path(&path);
        }
    }

    fn stroke_circle(&mut self, center: Point, radius: f64) {
        if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32) {
            self.stroke_path(&path);
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32) {
            self.fill_path(&path);
        }
    }

    fn fill_text(&mut self, text: &str, origin: Point) {
        let px = self.state.font_size;
        let path = self
            .font
            .as_ref()
            .and_then(|font| Self::glyph_path(font, text, origin, px));
        match path {
            Some(path) => self.fill_path(&path),
            None => {
                log::trace!("no outline for {text:?}, drawing placeholder");
                self.placeholder(origin, px);
            }
        }
    }
}
