//! Pad configuration.
//!
//! Every field has a default matching the stock sketchpad, so a JSON config
//! only needs the keys it overrides.

use serde::{Deserialize, Serialize};
use sketch_core::{Color, PreviewStyle};

/// What happens to an in-progress stroke when the pointer leaves the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeavePolicy {
    /// Treat leaving like pointer-up: commit what was drawn so far.
    #[default]
    Commit,
    /// Drop the unfinished stroke.
    Discard,
}

/// Suggested file name for exported images.
pub const EXPORT_FILE_NAME: &str = "sketchpad_hi_res.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    /// Logical surface width in pixels. Default: **256**.
    pub width: u32,
    /// Logical surface height in pixels. Default: **256**.
    pub height: u32,

    /// Brush width of the "thin" preset. Default: **3**.
    pub thin_width: f64,
    /// Brush width of the "thick" preset. Default: **10**.
    pub thick_width: f64,
    /// Brush width before any preset is chosen. Default: **2**.
    pub initial_width: f64,
    /// Default: **#000000**.
    #[serde(with = "css_color")]
    pub initial_color: Color,

    /// Sticker font size in pixels. Default: **40**.
    pub sticker_size: f64,
    /// Initial sticker palette.
    pub stickers: Vec<String>,

    pub preview_style: PreviewStyle,
    pub leave_policy: LeavePolicy,

    /// Export scale factor. Default: **4** (256 → 1024).
    pub export_scale: u32,
    /// Seed for sticker rotations. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            thin_width: 3.0,
            thick_width: 10.0,
            initial_width: 2.0,
            initial_color: Color::BLACK,
            sticker_size: 40.0,
            stickers: vec!["🖌️".to_string(), "🎨".to_string(), "🎲".to_string()],
            preview_style: PreviewStyle::Filled,
            leave_policy: LeavePolicy::Commit,
            export_scale: 4,
            seed: None,
        }
    }
}

impl PadConfig {
    /// Parse and validate a JSON config. Missing keys take their defaults.
    ///
    /// # Errors
    /// Returns a message if the JSON is malformed or a value is out of range.
    pub fn from_json(text: &str) -> Result<Self, String> {
        let config: PadConfig =
            serde_json::from_str(text).map_err(|e| format!("Config parse error: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "surface size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }
        for (name, value) in [
            ("thin_width", self.thin_width),
            ("thick_width", self.thick_width),
            ("initial_width", self.initial_width),
            ("sticker_size", self.sticker_size),
        ] {
            if !is_positive(value) {
                return Err(format!("{name} must be a positive number, got {value}"));
            }
        }
        if self.export_scale == 0 {
            return Err("export_scale must be at least 1".to_string());
        }
        if let Some(blank) = self.stickers.iter().position(|s| s.trim().is_empty()) {
            return Err(format!("sticker #{blank} is empty"));
        }
        Ok(())
    }
}

pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Serialize colors as CSS strings rather than channel structs.
mod css_color {
    use serde::{Deserialize, Deserializer, Serializer};
    use sketch_core::Color;

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let text = String::deserialize(deserializer)?;
        Color::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_json_is_default() {
        assert_eq!(PadConfig::from_json("{}"), Ok(PadConfig::default()));
    }

    #[test]
    fn overrides_merge_with_defaults() {
        let config = PadConfig::from_json(
            r##"{ "initial_color": "#ff0000", "leave_policy": "discard", "seed": 9 }"##,
        )
        .unwrap();
        assert_eq!(config.initial_color, Color::from_rgba8(255, 0, 0, 255));
        assert_eq!(config.leave_policy, LeavePolicy::Discard);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.thick_width, 10.0);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(PadConfig::from_json(r#"{ "thin_width": 0 }"#).is_err());
        assert!(PadConfig::from_json(r#"{ "export_scale": 0 }"#).is_err());
        assert!(PadConfig::from_json(r#"{ "stickers": ["ok", " "] }"#).is_err());
        assert!(PadConfig::from_json(r#"{ "initial_color": "nope" }"#).is_err());
        assert!(PadConfig::from_json("not json").is_err());
    }

    #[test]
    fn color_round_trips_as_css() {
        let json = serde_json::to_string(&PadConfig::default()).unwrap();
        assert!(json.contains(r##""initial_color":"#000000""##));
    }
}
