//! Display preferences persisted in the key-value store

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::color::HexColor;
use crate::constants::defaults;

/// Flat display-preference record
///
/// Missing keys take their default (`#[serde(default)]`), unknown keys are
/// ignored, so older partial records load with newer defaults overlaid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub stacked_mode: bool,
    pub always_on_top: bool,
    pub auto_transparency: bool,
    pub canvas_opacity: f32,
    pub theme_color: String,

    /// Pre-rename name of `stacked_mode`; never written back
    #[serde(rename = "compactMode", skip_serializing)]
    legacy_compact_mode: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stacked_mode: false,
            always_on_top: false,
            auto_transparency: false,
            canvas_opacity: defaults::CANVAS_OPACITY,
            theme_color: defaults::THEME_COLOR.to_string(),
            legacy_compact_mode: None,
        }
    }
}

impl Settings {
    /// Parse a saved record key by key
    ///
    /// A value of the wrong type falls back to that key's default without
    /// discarding the other keys. Fails only if the record is not a JSON object.
    pub fn from_json(raw: &str) -> Result<Self> {
        let saved: Map<String, Value> =
            serde_json::from_str(raw).context("Saved settings are not a JSON object")?;
        let Value::Object(mut merged) =
            serde_json::to_value(Self::default()).context("Failed to serialize default settings")?
        else {
            bail!("Default settings did not serialize to an object");
        };

        for (key, value) in saved {
            let mut candidate = merged.clone();
            candidate.insert(key.clone(), value);
            match serde_json::from_value::<Self>(Value::Object(candidate.clone())) {
                Ok(_) => merged = candidate,
                Err(e) => warn!(key = %key, error = %e, "Ignoring saved setting with invalid value"),
            }
        }

        serde_json::from_value(Value::Object(merged)).context("Failed to build settings from saved record")
    }

    /// Fold the legacy `compactMode` flag into `stackedMode`
    /// Returns true if a rename happened (the record should be re-saved)
    pub fn migrate_legacy(&mut self) -> bool {
        match self.legacy_compact_mode.take() {
            Some(compact) => {
                info!(stacked_mode = compact, "Migrated legacy compactMode setting");
                self.stacked_mode = compact;
                true
            }
            None => false,
        }
    }

    /// Clamp values to safe ranges after loading or editing
    pub fn validate_and_clamp(&mut self) {
        if !self.canvas_opacity.is_finite() {
            warn!(canvas_opacity = self.canvas_opacity, "canvas_opacity is not a number, using default");
            self.canvas_opacity = defaults::CANVAS_OPACITY;
        } else if !(0.0..=1.0).contains(&self.canvas_opacity) {
            warn!(canvas_opacity = self.canvas_opacity, "canvas_opacity outside [0, 1], clamping");
            self.canvas_opacity = self.canvas_opacity.clamp(0.0, 1.0);
        }

        if HexColor::parse(&self.theme_color).is_none() {
            warn!(theme_color = %self.theme_color, "Invalid theme_color hex, using default");
            self.theme_color = defaults::THEME_COLOR.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_record_overlays_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"alwaysOnTop":true,"futureKey":5}"#).unwrap();
        assert!(settings.always_on_top);
        assert!(!settings.stacked_mode);
        assert_eq!(settings.canvas_opacity, 1.0);
        assert_eq!(settings.theme_color, "#5eb5b4");
    }

    #[test]
    fn test_legacy_compact_mode_renamed() {
        let mut settings: Settings = serde_json::from_str(r#"{"compactMode":true}"#).unwrap();
        assert!(settings.migrate_legacy());
        assert!(settings.stacked_mode);
        assert!(!settings.migrate_legacy());

        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"stackedMode\":true"));
        assert!(!json.contains("compactMode"));
    }

    #[test]
    fn test_validate_clamps_opacity_and_color() {
        let mut settings = Settings {
            canvas_opacity: 1.7,
            theme_color: "teal".to_string(),
            ..Default::default()
        };
        settings.validate_and_clamp();
        assert_eq!(settings.canvas_opacity, 1.0);
        assert_eq!(settings.theme_color, "#5eb5b4");

        settings.canvas_opacity = -0.5;
        settings.validate_and_clamp();
        assert_eq!(settings.canvas_opacity, 0.0);
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        for key in ["stackedMode", "alwaysOnTop", "autoTransparency", "canvasOpacity", "themeColor"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_invalid_key_falls_back_alone() {
        let settings = Settings::from_json(
            r##"{"canvasOpacity":"0.5","alwaysOnTop":true,"stackedMode":1,"themeColor":"#112233"}"##,
        )
        .unwrap();
        assert_eq!(settings.canvas_opacity, 1.0);
        assert!(settings.always_on_top);
        assert!(!settings.stacked_mode);
        assert_eq!(settings.theme_color, "#112233");
    }

    #[test]
    fn test_from_json_keeps_legacy_compact_mode() {
        let mut settings = Settings::from_json(r#"{"compactMode":true,"futureKey":[1]}"#).unwrap();
        assert!(settings.migrate_legacy());
        assert!(settings.stacked_mode);
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(Settings::from_json("[1, 2]").is_err());
        assert!(Settings::from_json("not json").is_err());
    }
}
