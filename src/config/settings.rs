//! Crosshair settings model
//!
//! `CrosshairSettings` is the only persisted entity. It is never deserialized
//! directly: both the settings file and panel submissions arrive as a
//! `SettingsPayload` (every field optional) and are turned into a complete value
//! by either the lenient load path or the strict submission path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::constants::{defaults, validation};
use crate::error::SubmissionError;

/// Legacy style name written by older versions
const LEGACY_DOT_CROSS: &str = "dot_cross";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrosshairStyle {
    #[default]
    Dot,
    Cross,
    Circle,
    DotCircle,
}

impl CrosshairStyle {
    pub const ALL: [CrosshairStyle; 4] = [
        CrosshairStyle::Dot,
        CrosshairStyle::Cross,
        CrosshairStyle::Circle,
        CrosshairStyle::DotCircle,
    ];

    /// Name as stored on disk
    pub fn as_str(&self) -> &'static str {
        match self {
            CrosshairStyle::Dot => "dot",
            CrosshairStyle::Cross => "cross",
            CrosshairStyle::Circle => "circle",
            CrosshairStyle::DotCircle => "dot_circle",
        }
    }

    /// Human-readable name for the settings panel
    pub fn label(&self) -> &'static str {
        match self {
            CrosshairStyle::Dot => "Dot",
            CrosshairStyle::Cross => "Cross",
            CrosshairStyle::Circle => "Circle",
            CrosshairStyle::DotCircle => "Dot + Circle",
        }
    }

    /// Parse a stored style name, rewriting legacy names to their current form
    pub fn migrate(raw: &str) -> Option<Self> {
        if raw == LEGACY_DOT_CROSS {
            info!(from = LEGACY_DOT_CROSS, to = "dot_circle", "Migrating legacy crosshair style");
            return Some(CrosshairStyle::DotCircle);
        }
        raw.parse().ok()
    }
}

impl FromStr for CrosshairStyle {
    type Err = SubmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| SubmissionError::UnknownStyle(s.to_string()))
    }
}

impl fmt::Display for CrosshairStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete crosshair configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrosshairSettings {
    pub color: String,
    pub size: u32,
    pub thickness: u32,
    pub style: CrosshairStyle,

    /// `None` means no hotkey is bound. Written as an empty string.
    #[serde(rename = "toggleKey", serialize_with = "serialize_toggle_key")]
    pub toggle_key: Option<String>,
}

fn serialize_toggle_key<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}

impl Default for CrosshairSettings {
    fn default() -> Self {
        Self {
            color: defaults::COLOR.to_string(),
            size: defaults::SIZE,
            thickness: defaults::THICKNESS,
            style: CrosshairStyle::default(),
            toggle_key: Some(defaults::TOGGLE_KEY.to_string()),
        }
    }
}

impl CrosshairSettings {
    /// Toggle key as shown to the user, empty when unbound
    pub fn toggle_key_str(&self) -> &str {
        self.toggle_key.as_deref().unwrap_or("")
    }

    /// Clamp numeric fields into the supported range
    /// Returns true if anything was changed
    pub(crate) fn clamp_ranges(&mut self) -> bool {
        let mut changed = false;

        let size = self.size.clamp(validation::MIN_SIZE, validation::MAX_SIZE);
        if size != self.size {
            warn!(size = self.size, min = validation::MIN_SIZE, max = validation::MAX_SIZE, "size out of range, clamping");
            self.size = size;
            changed = true;
        }

        let thickness = self.thickness.clamp(validation::MIN_THICKNESS, validation::MAX_THICKNESS);
        if thickness != self.thickness {
            warn!(thickness = self.thickness, min = validation::MIN_THICKNESS, max = validation::MAX_THICKNESS, "thickness out of range, clamping");
            self.thickness = thickness;
            changed = true;
        }

        changed
    }
}

/// Settings as they arrive from disk or from the settings panel
///
/// Every field is optional so that partial files still load and so that
/// incomplete submissions can be rejected with a precise reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Absent stays `None`; an explicit `null` reads as `""` (unbound)
    #[serde(
        rename = "toggleKey",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub toggle_key: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Some(Option::<String>::deserialize(deserializer)?.unwrap_or_default()))
}

impl From<&CrosshairSettings> for SettingsPayload {
    fn from(settings: &CrosshairSettings) -> Self {
        Self {
            color: Some(settings.color.clone()),
            size: Some(i64::from(settings.size)),
            thickness: Some(i64::from(settings.thickness)),
            style: Some(settings.style.as_str().to_string()),
            toggle_key: Some(settings.toggle_key_str().to_string()),
        }
    }
}

impl SettingsPayload {
    /// Lenient conversion used when loading from disk
    ///
    /// Missing or unusable fields fall back to the defaults, the legacy style
    /// is migrated and numeric fields are clamped. Never fails.
    pub fn into_loaded(self) -> CrosshairSettings {
        let fallback = CrosshairSettings::default();

        let color = match self.color {
            Some(color) if !color.trim().is_empty() => color,
            Some(_) => {
                warn!(using = %fallback.color, "Stored color is empty, using default");
                fallback.color
            }
            None => fallback.color,
        };

        let style = match self.style.as_deref() {
            Some(raw) => CrosshairStyle::migrate(raw).unwrap_or_else(|| {
                warn!(style = %raw, using = %fallback.style, "Unknown stored style, using default");
                fallback.style
            }),
            None => fallback.style,
        };

        // Missing key fills to the default, an explicit empty string means unbound
        let toggle_key = match self.toggle_key {
            Some(key) => normalize_key(key),
            None => fallback.toggle_key,
        };

        let mut settings = CrosshairSettings {
            color,
            size: clamp_to_u32(self.size, fallback.size),
            thickness: clamp_to_u32(self.thickness, fallback.thickness),
            style,
            toggle_key,
        };
        settings.clamp_ranges();
        settings
    }

    /// Strict conversion used for panel submissions
    ///
    /// A submission is a full replacement, so every field must be present.
    /// The toggle key may be empty (unbound) but not absent.
    pub fn validate(self) -> Result<CrosshairSettings, SubmissionError> {
        let color = self.color.ok_or(SubmissionError::MissingField("color"))?;
        let size = self.size.ok_or(SubmissionError::MissingField("size"))?;
        let thickness = self.thickness.ok_or(SubmissionError::MissingField("thickness"))?;
        let style = self.style.ok_or(SubmissionError::MissingField("style"))?;
        let toggle_key = self.toggle_key.ok_or(SubmissionError::MissingField("toggleKey"))?;

        if color.trim().is_empty() {
            return Err(SubmissionError::EmptyColor);
        }

        Ok(CrosshairSettings {
            color,
            size: in_range(size, "size", validation::MIN_SIZE, validation::MAX_SIZE)?,
            thickness: in_range(
                thickness,
                "thickness",
                validation::MIN_THICKNESS,
                validation::MAX_THICKNESS,
            )?,
            style: style.parse()?,
            toggle_key: normalize_key(toggle_key),
        })
    }
}

fn normalize_key(key: String) -> Option<String> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == key.len() {
        Some(key)
    } else {
        Some(trimmed.to_string())
    }
}

/// Only values the load path keeps as-is are accepted
fn in_range(value: i64, field: &'static str, min: u32, max: u32) -> Result<u32, SubmissionError> {
    match u32::try_from(value) {
        Ok(v) if (min..=max).contains(&v) => Ok(v),
        _ => Err(SubmissionError::OutOfRange { field, min, max }),
    }
}

fn clamp_to_u32(value: Option<i64>, fallback: u32) -> u32 {
    match value {
        Some(v) => u32::try_from(v.max(0)).unwrap_or(u32::MAX),
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> SettingsPayload {
        SettingsPayload {
            color: Some("#FF0000".to_string()),
            size: Some(8),
            thickness: Some(3),
            style: Some("circle".to_string()),
            toggle_key: Some("Ctrl+F3".to_string()),
        }
    }

    #[test]
    fn test_default_matches_documented_values() {
        let settings = CrosshairSettings::default();
        assert_eq!(settings.color, "#FFFFFF");
        assert_eq!(settings.size, 4);
        assert_eq!(settings.thickness, 2);
        assert_eq!(settings.style, CrosshairStyle::Dot);
        assert_eq!(settings.toggle_key.as_deref(), Some("F8"));
    }

    #[test]
    fn test_legacy_dot_cross_migrates() {
        assert_eq!(CrosshairStyle::migrate("dot_cross"), Some(CrosshairStyle::DotCircle));
        assert_eq!(CrosshairStyle::migrate("dot_circle"), Some(CrosshairStyle::DotCircle));
        assert_eq!(CrosshairStyle::migrate("square"), None);
    }

    #[test]
    fn test_style_parse_rejects_legacy_name() {
        // Submissions must use canonical names
        assert_eq!(
            "dot_cross".parse::<CrosshairStyle>(),
            Err(SubmissionError::UnknownStyle("dot_cross".to_string()))
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(CrosshairSettings::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "color": "#FFFFFF",
                "size": 4,
                "thickness": 2,
                "style": "dot",
                "toggleKey": "F8",
            })
        );
    }

    #[test]
    fn test_unbound_key_serializes_as_empty_string() {
        let settings = CrosshairSettings {
            toggle_key: None,
            ..CrosshairSettings::default()
        };
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["toggleKey"], "");
    }

    #[test]
    fn test_partial_payload_fills_defaults() {
        let payload: SettingsPayload = serde_json::from_str(r##"{"color": "#00FF00"}"##).unwrap();
        let settings = payload.into_loaded();
        assert_eq!(settings.color, "#00FF00");
        assert_eq!(settings.size, 4);
        assert_eq!(settings.style, CrosshairStyle::Dot);
        assert_eq!(settings.toggle_key.as_deref(), Some("F8"));
    }

    #[test]
    fn test_empty_toggle_key_loads_as_unbound() {
        let payload: SettingsPayload = serde_json::from_str(r#"{"toggleKey": ""}"#).unwrap();
        assert_eq!(payload.into_loaded().toggle_key, None);
    }

    #[test]
    fn test_null_toggle_key_loads_as_unbound() {
        let payload: SettingsPayload = serde_json::from_str(r#"{"toggleKey": null}"#).unwrap();
        assert_eq!(payload.toggle_key.as_deref(), Some(""));
        assert_eq!(payload.into_loaded().toggle_key, None);

        let absent: SettingsPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.into_loaded().toggle_key.as_deref(), Some("F8"));
    }

    #[test]
    fn test_unknown_stored_style_falls_back() {
        let payload: SettingsPayload = serde_json::from_str(r#"{"style": "hexagon"}"#).unwrap();
        assert_eq!(payload.into_loaded().style, CrosshairStyle::Dot);
    }

    #[test]
    fn test_load_clamps_out_of_range_values() {
        let payload: SettingsPayload =
            serde_json::from_str(r#"{"size": 500, "thickness": -3}"#).unwrap();
        let settings = payload.into_loaded();
        assert_eq!(settings.size, validation::MAX_SIZE);
        assert_eq!(settings.thickness, validation::MIN_THICKNESS);
    }

    #[test]
    fn test_validate_accepts_full_payload() {
        let settings = full_payload().validate().unwrap();
        assert_eq!(
            settings,
            CrosshairSettings {
                color: "#FF0000".to_string(),
                size: 8,
                thickness: 3,
                style: CrosshairStyle::Circle,
                toggle_key: Some("Ctrl+F3".to_string()),
            }
        );
    }

    #[test]
    fn test_validate_reports_missing_field() {
        let payload = SettingsPayload {
            thickness: None,
            ..full_payload()
        };
        assert_eq!(payload.validate(), Err(SubmissionError::MissingField("thickness")));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let empty_color = SettingsPayload {
            color: Some("  ".to_string()),
            ..full_payload()
        };
        assert_eq!(empty_color.validate(), Err(SubmissionError::EmptyColor));

        let zero_size = SettingsPayload {
            size: Some(0),
            ..full_payload()
        };
        assert_eq!(
            zero_size.validate(),
            Err(SubmissionError::OutOfRange {
                field: "size",
                min: validation::MIN_SIZE,
                max: validation::MAX_SIZE,
            })
        );

        let thick = SettingsPayload {
            thickness: Some(i64::from(validation::MAX_THICKNESS) + 1),
            ..full_payload()
        };
        assert!(matches!(
            thick.validate(),
            Err(SubmissionError::OutOfRange { field: "thickness", .. })
        ));

        let bad_style = SettingsPayload {
            style: Some("star".to_string()),
            ..full_payload()
        };
        assert_eq!(
            bad_style.validate(),
            Err(SubmissionError::UnknownStyle("star".to_string()))
        );
    }

    #[test]
    fn test_validate_keeps_unknown_key_strings() {
        // Unknown keys are accepted here; binding them fails later
        let payload = SettingsPayload {
            toggle_key: Some("Hyper+Q".to_string()),
            ..full_payload()
        };
        assert_eq!(payload.validate().unwrap().toggle_key.as_deref(), Some("Hyper+Q"));
    }

    #[test]
    fn test_payload_from_settings_validates_back() {
        let settings = full_payload().validate().unwrap();
        assert_eq!(SettingsPayload::from(&settings).validate().unwrap(), settings);
    }
}
