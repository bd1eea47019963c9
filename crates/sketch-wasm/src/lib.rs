//! WASM bridge for the sketchpad: exposes `SketchPad` to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards pointer
//! events and toolbar clicks to `SketchCanvas`; the canvas repaints itself
//! from the change notification, and button state is read back through
//! `status_json`.

mod canvas2d;

pub use canvas2d::Canvas2dSurface;

use ab_glyph::FontArc;
use sketch_core::Point;
use sketch_editor::{EXPORT_FILE_NAME, PadConfig, SketchPad, redraw};
use sketch_render::{ExportOptions, export_pad_png};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing sketchpad controller.
#[wasm_bindgen]
pub struct SketchCanvas {
    pad: SketchPad,
    /// Font used for sticker glyphs in exports.
    font: Option<FontArc>,
}

#[wasm_bindgen]
impl SketchCanvas {
    /// Create a controller drawing into `ctx`. `config_json` may be empty
    /// for the stock configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(ctx: CanvasRenderingContext2d, config_json: &str) -> Result<SketchCanvas, JsValue> {
        console_error_panic_hook_setup();

        let mut config = if config_json.trim().is_empty() {
            PadConfig::default()
        } else {
            PadConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e))?
        };
        // No clock on wasm32; seed rotations from the JS PRNG.
        if config.seed.is_none() {
            config.seed = Some((js_sys::Math::random() * u64::MAX as f64) as u64);
        }

        let mut surface =
            Canvas2dSurface::new(ctx, f64::from(config.width), f64::from(config.height));
        let mut pad = SketchPad::new(config);
        pad.redraw(&mut surface);
        pad.subscribe(move |scene| redraw(&mut surface, scene));

        Ok(Self { pad, font: None })
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.pad.pointer_down(Point::new(x, y))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.pad.pointer_move(Point::new(x, y))
    }

    pub fn pointer_up(&mut self) -> bool {
        self.pad.pointer_up()
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.pad.pointer_leave()
    }

    // ─── Toolbar ─────────────────────────────────────────────────────────

    pub fn select_thin(&mut self) -> bool {
        self.pad.select_thin()
    }

    pub fn select_thick(&mut self) -> bool {
        self.pad.select_thick()
    }

    /// Select a CSS color (`#rgb`, `#rrggbb`, `rgb(...)`, `rgba(...)`).
    pub fn select_color(&mut self, css: &str) -> bool {
        self.pad.select_color_str(css)
    }

    pub fn select_sticker(&mut self, glyph: &str) -> bool {
        self.pad.select_sticker(glyph)
    }

    pub fn add_custom_sticker(&mut self, glyph: &str) -> bool {
        self.pad.add_custom_sticker(glyph)
    }

    pub fn set_sticker_size(&mut self, size: f64) -> bool {
        self.pad.set_sticker_size(size)
    }

    pub fn undo(&mut self) -> bool {
        self.pad.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.pad.redo()
    }

    pub fn clear(&mut self) -> bool {
        self.pad.clear()
    }

    pub fn can_undo(&self) -> bool {
        self.pad.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.pad.can_redo()
    }

    /// Pad state as JSON: counts, active tool, palette, and button
    /// availability.
    pub fn status_json(&self) -> String {
        serde_json::to_string(&self.pad.status()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Palette glyphs as a JSON array.
    pub fn stickers_json(&self) -> String {
        serde_json::to_string(self.pad.stickers()).unwrap_or_else(|_| "[]".to_string())
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Load a TrueType/OpenType font for sticker glyphs in exports.
    /// Returns `false` if the bytes are not a usable font.
    pub fn load_font(&mut self, bytes: Vec<u8>) -> bool {
        match FontArc::try_from_vec(bytes) {
            Ok(font) => {
                self.font = Some(font);
                true
            }
            Err(e) => {
                log::warn!("font rejected: {e}");
                false
            }
        }
    }

    /// Committed drawing as PNG bytes at `scale`, or at the configured
    /// export scale when omitted.
    pub fn export_png(&self, scale: Option<f64>) -> Result<Vec<u8>, JsValue> {
        let mut options = match scale {
            Some(scale) => ExportOptions::scaled(scale),
            None => ExportOptions::from_config(self.pad.config()),
        };
        if let Some(font) = &self.font {
            options = options.with_font(font.clone());
        }
        export_pad_png(&self.pad, &options).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn export_file_name(&self) -> String {
        EXPORT_FILE_NAME.to_string()
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Sketchpad WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone helpers (no canvas needed) ───────────────────────────────

/// Validate a config. Returns JSON: `{"ok":true}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_config(json: &str) -> String {
    let result = match PadConfig::from_json(json) {
        Ok(_) => serde_json::json!({ "ok": true }),
        Err(e) => serde_json::json!({ "ok": false, "error": e }),
    };
    result.to_string()
}

/// Normalize a CSS color to `#RRGGBB` / `#RRGGBBAA`, or return an empty
/// string if it does not parse.
#[wasm_bindgen]
pub fn normalize_color(css: &str) -> String {
    sketch_core::parse_color(css)
        .map(|c| c.to_hex())
        .unwrap_or_default()
}
