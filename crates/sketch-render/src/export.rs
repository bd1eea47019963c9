//! Hi-res PNG export.
//!
//! Export renders committed commands only, in order, onto a fresh
//! transparent raster scaled up from the display size. The in-progress
//! stroke and both previews never reach the file.

use ab_glyph::FontArc;
use image::{ImageFormat, RgbaImage};
use sketch_editor::{Entry, PadConfig, SketchPad, render_commands};
use std::io::Cursor;
use thiserror::Error;

use crate::raster::RasterSurface;

/// Errors that can occur while exporting.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid export scale {0}")]
    InvalidScale(f64),
    #[error("Cannot allocate a {width}x{height} raster")]
    Allocation { width: u32, height: u32 },
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
}

/// Options for one export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Device pixels per display unit.
    pub scale: f64,
    /// Font for sticker glyphs; placeholders are drawn without one.
    pub font: Option<FontArc>,
}

impl ExportOptions {
    /// The configured export scale, no font.
    pub fn from_config(config: &PadConfig) -> Self {
        Self::scaled(f64::from(config.export_scale))
    }

    pub fn scaled(scale: f64) -> Self {
        Self { scale, font: None }
    }

    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }
}

/// Rasterize `entries` onto a `width`×`height` display area at `options.scale`.
///
/// # Errors
/// Propagates `RasterSurface::new` failures.
pub fn rasterize(
    entries: &[Entry],
    width: u32,
    height: u32,
    options: &ExportOptions,
) -> Result<RasterSurface, ExportError> {
    let mut surface = RasterSurface::new(width, height, options.scale)?;
    if let Some(font) = &options.font {
        surface = surface.with_font(font.clone());
    }
    render_commands(&mut surface, entries);
    log::debug!(
        "rasterized {} commands at {}x{}",
        entries.len(),
        surface.width(),
        surface.height()
    );
    Ok(surface)
}

/// Encode a raster as PNG bytes with straight (non-premultiplied) alpha.
///
/// # Errors
/// Returns `ExportError::Encode` if the encoder fails.
pub fn encode_png(surface: &RasterSurface) -> Result<Vec<u8>, ExportError> {
    let pixmap = surface.pixmap();
    let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let image = RgbaImage::from_raw(pixmap.width(), pixmap.height(), rgba).ok_or(
        ExportError::Allocation {
            width: pixmap.width(),
            height: pixmap.height(),
        },
    )?;

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Render `entries` and encode them as PNG.
///
/// # Errors
/// See `rasterize` and `encode_png`.
pub fn export_png(
    entries: &[Entry],
    width: u32,
    height: u32,
    options: &ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let surface = rasterize(entries, width, height, options)?;
    encode_png(&surface)
}

/// Export the committed drawing of `pad` at its configured size.
///
/// # Errors
/// See `export_png`.
pub fn export_pad_png(pad: &SketchPad, options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let config = pad.config();
    let bytes = export_png(pad.committed(), config.width, config.height, options)?;
    log::info!(
        "exported {} commands ({} bytes) at {}x",
        pad.committed().len(),
        bytes.len(),
        options.scale
    );
    Ok(bytes)
}
