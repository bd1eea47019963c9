pub mod color;
pub mod command;
pub mod model;
pub mod preview;
pub mod rotation;
pub mod surface;

pub use color::parse_color;
pub use command::{DrawCommand, Sticker, Stroke, render_glyph};
pub use model::{Color, Point};
pub use preview::{PreviewStyle, StickerPreview, ToolPreview};
pub use rotation::RotationSource;
pub use surface::{DrawOp, RecordingSurface, Surface};
