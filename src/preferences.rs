//! Accessibility preferences
//!
//! A closed set of named options with explicit defaults and a version tag.
//! Stored blobs from older versions are migrated on read by filling missing
//! keys with defaults; an unparsable blob degrades to the full default set.

use serde::{Deserialize, Serialize};

/// Version tag written into every stored blob
pub const CURRENT_VERSION: u32 = 1;

/// Text size options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Contrast mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Contrast {
    #[default]
    Normal,
    High,
}

/// Pacing of guided tutorial content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TutorialSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

/// The full accessibility option mapping for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub version: u32,
    pub font_size: FontSize,
    pub contrast: Contrast,
    pub voice_enabled: bool,
    pub tutorial_speed: TutorialSpeed,
    pub reduced_motion: bool,
    pub simple_layout: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            font_size: FontSize::default(),
            contrast: Contrast::default(),
            voice_enabled: false,
            tutorial_speed: TutorialSpeed::default(),
            reduced_motion: false,
            simple_layout: false,
        }
    }
}

impl Preferences {
    /// Parse a stored blob, filling missing keys with defaults.
    /// A blob that cannot be parsed at all yields the default set.
    pub fn from_json_str(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// Same migration applied to an already-parsed JSON value
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Serialize for storage, stamping the current version
    pub fn to_json_string(&self) -> String {
        let mut stamped = self.clone();
        stamped.version = CURRENT_VERSION;
        // Preferences serialization cannot fail: all fields are plain enums and bools
        serde_json::to_string(&stamped).expect("preferences serialization")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_registration_contract() {
        let prefs = Preferences::default();
        assert_eq!(prefs.font_size, FontSize::Medium);
        assert_eq!(prefs.contrast, Contrast::Normal);
        assert!(!prefs.voice_enabled);
        assert_eq!(prefs.tutorial_speed, TutorialSpeed::Normal);
        assert!(!prefs.reduced_motion);
        assert!(!prefs.simple_layout);
        assert_eq!(prefs.version, CURRENT_VERSION);
    }

    #[test]
    fn missing_keys_are_filled_with_defaults() {
        // An old blob written before tutorialSpeed and the version tag existed
        let prefs = Preferences::from_json_str(r#"{"fontSize":"large","voiceEnabled":true}"#);
        assert_eq!(prefs.font_size, FontSize::Large);
        assert!(prefs.voice_enabled);
        assert_eq!(prefs.tutorial_speed, TutorialSpeed::Normal);
        assert_eq!(prefs.contrast, Contrast::Normal);
    }

    #[test]
    fn unparsable_blob_degrades_to_defaults() {
        assert_eq!(Preferences::from_json_str("not json"), Preferences::default());
        assert_eq!(
            Preferences::from_value(json!({"fontSize": 42})),
            Preferences::default()
        );
    }

    #[test]
    fn storage_roundtrip_stamps_version() {
        let mut prefs = Preferences::default();
        prefs.version = 0;
        let raw = prefs.to_json_string();
        let parsed = Preferences::from_json_str(&raw);
        assert_eq!(parsed.version, CURRENT_VERSION);
    }

    #[test]
    fn wire_names_are_camel_case() {
        let raw = Preferences::default().to_json_string();
        assert!(raw.contains("\"fontSize\""));
        assert!(raw.contains("\"tutorialSpeed\""));
        assert!(raw.contains("\"reducedMotion\""));
    }
}
