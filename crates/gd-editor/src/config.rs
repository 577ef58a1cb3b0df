//! Editor configuration.
//!
//! Every field has a default so hosts only override what they care about.
//! Colors are written as hex strings in the JSON form.

use gd_core::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Drawing surface size in unzoomed units.
    pub surface_width: f32,
    pub surface_height: f32,
    #[serde(with = "color_hex")]
    pub background: Color,

    /// Maximum retained history snapshots.
    pub history_depth: usize,
    /// Quiet period before a burst of changes becomes one snapshot.
    pub history_debounce_ms: f64,

    pub autosave: bool,
    pub autosave_ms: f64,

    /// Zoom limits and step, in percent.
    pub zoom_min: u16,
    pub zoom_max: u16,
    pub zoom_step: u16,
    pub zoom_initial: u16,

    #[serde(with = "color_hex")]
    pub brush_color: Color,
    pub brush_width: f32,

    #[serde(with = "color_hex")]
    pub shape_stroke: Color,
    pub shape_stroke_width: f32,

    pub text_content: String,
    pub text_font_family: String,
    pub text_font_size: f32,
    pub text_width: f32,
    #[serde(with = "color_hex")]
    pub text_fill: Color,

    /// Size of the recently-used color palette.
    pub recent_colors: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            surface_width: 1600.0,
            surface_height: 900.0,
            background: Color::WHITE,
            history_depth: 50,
            history_debounce_ms: 300.0,
            autosave: true,
            autosave_ms: 2000.0,
            zoom_min: 10,
            zoom_max: 200,
            zoom_step: 10,
            zoom_initial: 100,
            brush_color: Color::BLACK,
            brush_width: 5.0,
            shape_stroke: Color::BLACK,
            shape_stroke_width: 2.0,
            text_content: "Click to edit text".into(),
            text_font_family: "Arial".into(),
            text_font_size: 18.0,
            text_width: 200.0,
            text_fill: Color::BLACK,
            recent_colors: 5,
        }
    }
}

impl EditorConfig {
    /// Load a host-supplied JSON config blob; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: EditorConfig = serde_json::from_str(json)?;
        if config.zoom_min > config.zoom_max {
            log::warn!(
                "zoomMin {} exceeds zoomMax {}, swapping",
                config.zoom_min,
                config.zoom_max
            );
            std::mem::swap(&mut config.zoom_min, &mut config.zoom_max);
        }
        config.zoom_step = config.zoom_step.max(1);
        Ok(config)
    }
}

mod color_hex {
    use gd_core::Color;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).ok_or_else(|| D::Error::custom(format!("invalid color `{s}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            EditorConfig::from_json(r##"{"historyDepth": 10, "background": "#222"}"##).unwrap();
        assert_eq!(config.history_depth, 10);
        assert_eq!(config.background.to_hex(), "#222222");
        assert_eq!(config.zoom_max, 200);
        assert_eq!(config.text_content, "Click to edit text");
    }

    #[test]
    fn bad_color_is_rejected() {
        assert!(EditorConfig::from_json(r#"{"brushColor": "red"}"#).is_err());
    }

    #[test]
    fn inverted_zoom_range_is_swapped() {
        let config = EditorConfig::from_json(r#"{"zoomMin": 300, "zoomMax": 50}"#).unwrap();
        assert_eq!((config.zoom_min, config.zoom_max), (50, 300));
    }
}
