//! Headless rendering for the sketchpad: a `tiny-skia` implementation of
//! `Surface` and the scaled PNG export built on it.

pub mod export;
pub mod raster;

pub use export::{ExportError, ExportOptions, encode_png, export_pad_png, export_png, rasterize};
pub use raster::RasterSurface;
