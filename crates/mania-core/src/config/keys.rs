use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::play::HitWindows;

/// Key bindings and timing overrides (`keys_pc.json`).
///
/// `lanes` maps logical lane index → key name; its length is the lane count
/// used to validate beatmaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyConfig {
    pub lanes: Vec<String>,
    #[serde(default)]
    pub menu: MenuKeys,
    #[serde(default)]
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuKeys {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub confirm: String,
    pub back: String,
}

impl Default for MenuKeys {
    fn default() -> Self {
        Self {
            up: "up".to_string(),
            down: "down".to_string(),
            left: "left".to_string(),
            right: "right".to_string(),
            confirm: "return".to_string(),
            back: "escape".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default)]
    pub hit_window_ms: HitWindows,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            lanes: ["d", "f", "j", "k"].iter().map(|k| k.to_string()).collect(),
            menu: MenuKeys::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl KeyConfig {
    /// Load and validate a key config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate key config JSON.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| Error::ConfigParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.lanes.is_empty() {
            return Err(Error::ConfigParseError(
                "at least one lane key is required".to_string(),
            ));
        }

        for (i, key) in self.lanes.iter().enumerate() {
            let key = key.trim();
            if key.is_empty() {
                return Err(Error::ConfigParseError(format!("lane {} has an empty key", i + 1)));
            }
            if self.lanes[..i]
                .iter()
                .any(|other| other.trim().eq_ignore_ascii_case(key))
            {
                return Err(Error::ConfigParseError(format!(
                    "key '{}' is bound to more than one lane",
                    key
                )));
            }
        }

        self.timing.hit_window_ms.validate()
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Resolve a key name to its 0-based lane.
    pub fn lane_for_key(&self, key: &str) -> Option<usize> {
        self.lanes
            .iter()
            .position(|k| k.trim().eq_ignore_ascii_case(key))
    }

    pub fn hit_windows(&self) -> HitWindows {
        self.timing.hit_window_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let content = r#"{
            "lanes": ["a", "s", "k", "l"],
            "menu": {"up": "w", "down": "s", "left": "a", "right": "d", "confirm": "return", "back": "escape"},
            "timing": {"hit_window_ms": {"perfect": 40, "good": 90, "bad": 140}}
        }"#;
        let config = KeyConfig::parse(content).unwrap();

        assert_eq!(config.lane_count(), 4);
        assert_eq!(config.lane_for_key("k"), Some(2));
        assert_eq!(config.lane_for_key("K"), Some(2));
        assert_eq!(config.lane_for_key("x"), None);
        assert_eq!(config.menu.up, "w");
        assert_eq!(config.hit_windows(), HitWindows::new(40, 90, 140).unwrap());
    }

    #[test]
    fn test_parse_without_timing_uses_defaults() {
        let config = KeyConfig::parse(r#"{"lanes": ["d", "f", "j", "k"]}"#).unwrap();
        assert_eq!(config.hit_windows(), HitWindows::default());
        assert_eq!(config.menu, MenuKeys::default());
    }

    #[test]
    fn test_partial_hit_window_override() {
        let config =
            KeyConfig::parse(r#"{"lanes": ["d"], "timing": {"hit_window_ms": {"bad": 180}}}"#)
                .unwrap();
        let windows = config.hit_windows();
        assert_eq!(windows.perfect_ms(), 50);
        assert_eq!(windows.good_ms(), 100);
        assert_eq!(windows.bad_ms(), 180);
    }

    #[test]
    fn test_rejects_empty_lanes() {
        assert!(matches!(
            KeyConfig::parse(r#"{"lanes": []}"#),
            Err(Error::ConfigParseError(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        assert!(matches!(
            KeyConfig::parse(r#"{"lanes": ["d", "f", "D"]}"#),
            Err(Error::ConfigParseError(_))
        ));
    }

    #[test]
    fn test_rejects_unordered_windows() {
        let content = r#"{"lanes": ["d"], "timing": {"hit_window_ms": {"perfect": 120, "good": 100, "bad": 150}}}"#;
        assert!(matches!(
            KeyConfig::parse(content),
            Err(Error::InvalidHitWindows(_))
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            KeyConfig::parse("{lanes"),
            Err(Error::ConfigParseError(_))
        ));
    }
}
