//! Canvas2D surface.
//!
//! Forwards `Surface` calls to an HTML `<canvas>` through
//! `CanvasRenderingContext2d`. Strokes use round caps and joins; text is
//! drawn on the alphabetic baseline in the browser's sans-serif face, so
//! emoji come from the platform's color font.

use sketch_core::{Color, Point, Surface};
use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;

pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Canvas2dSurface {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        Self { ctx, width, height }
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    fn circle(&self, center: Point, radius: f64) -> bool {
        self.ctx.begin_path();
        match self.ctx.arc(center.x, center.y, radius, 0.0, TAU) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("canvas arc failed: {e:?}");
                false
            }
        }
    }
}

impl Surface for Canvas2dSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
    }

    fn set_fill_color(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn set_font_size(&mut self, px: f64) {
        self.ctx.set_font(&format!("{px}px sans-serif"));
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let _ = self.ctx.translate(dx, dy);
    }

    fn rotate(&mut self, radians: f64) {
        let _ = self.ctx.rotate(radians);
    }

    fn stroke_polyline(&mut self, points: &[Point]) {
        let [first, rest @ ..] = points else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.stroke();
    }

    fn stroke_circle(&mut self, center: Point, radius: f64) {
        if self.circle(center, radius) {
            self.ctx.stroke();
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        if self.circle(center, radius) {
            self.ctx.fill();
        }
    }

    fn fill_text(&mut self, text: &str, origin: Point) {
        if let Err(e) = self.ctx.fill_text(text, origin.x, origin.y) {
            log::warn!("canvas fill_text failed: {e:?}");
        }
    }
}
