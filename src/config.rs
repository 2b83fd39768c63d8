//! Tracker configuration, persisted as JSON.

use crate::ai::sentiment::KeywordTable;
use crate::ai::style_adapter::AdaptationTable;
use crate::error::{EmotionError, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable naming the tracker config file.
pub const CONFIG_ENV: &str = "ONBOARDING_EMOTION_CONFIG";

/// Tunables for one emotion tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Idle time before decay kicks in, and the decay tick period.
    pub decay_interval_secs: u64,
    /// Intensity removed per decay tick.
    pub decay_rate: f32,
    /// Decay never takes intensity below this; reaching it resets to neutral.
    pub decay_floor: f32,
    /// Classifications at or below this intensity leave the label alone.
    pub min_intensity: f32,
    /// Max history entries kept; oldest are evicted first.
    pub history_capacity: usize,
    /// Entries considered by trend detection.
    pub trend_window: usize,
    pub keywords: KeywordTable,
    pub adaptations: AdaptationTable,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            decay_interval_secs: 30,
            decay_rate: 0.1,
            decay_floor: 0.3,
            min_intensity: 0.3,
            history_capacity: 200,
            trend_window: 10,
            keywords: KeywordTable::default(),
            adaptations: AdaptationTable::default(),
        }
    }
}

impl TrackerConfig {
    pub fn decay_interval(&self) -> Duration {
        Duration::from_secs(self.decay_interval_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.decay_interval_secs == 0 {
            return Err(EmotionError::InvalidConfig(
                "decay_interval_secs must be greater than zero".to_string(),
            ));
        }
        for (name, value) in [
            ("decay_rate", self.decay_rate),
            ("decay_floor", self.decay_floor),
            ("min_intensity", self.min_intensity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EmotionError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.history_capacity == 0 {
            return Err(EmotionError::InvalidConfig(
                "history_capacity must be greater than zero".to_string(),
            ));
        }
        if self.trend_window == 0 {
            return Err(EmotionError::InvalidConfig(
                "trend_window must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Read and validate the config at `path`.
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`TrackerConfig::read`], but falls back to defaults when the file
    /// is missing, unparsable or fails validation.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded tracker config");
                config
            }
            Err(EmotionError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "No tracker config, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), "Tracker config unusable ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Load from the file named by [`CONFIG_ENV`], or defaults if unset.
    pub fn from_env() -> Self {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::load(&PathBuf::from(path)),
            _ => Self::default(),
        }
    }

    /// Validate and write the config, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!(path = %path.display(), "Saved tracker config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::emotion::EmotionLabel;
    use crate::ai::sentiment::KeywordRule;

    #[test]
    fn defaults_are_valid() {
        let config = TrackerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.decay_interval(), Duration::from_secs(30));
        assert_eq!(config.history_capacity, 200);
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let bad = [
            TrackerConfig {
                decay_interval_secs: 0,
                ..TrackerConfig::default()
            },
            TrackerConfig {
                decay_floor: -0.1,
                ..TrackerConfig::default()
            },
            TrackerConfig {
                min_intensity: 2.0,
                ..TrackerConfig::default()
            },
            TrackerConfig {
                history_capacity: 0,
                ..TrackerConfig::default()
            },
            TrackerConfig {
                trend_window: 0,
                ..TrackerConfig::default()
            },
        ];
        for config in bad {
            assert!(matches!(
                config.validate(),
                Err(EmotionError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TrackerConfig::load(&dir.path().join("absent.json"));
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn garbage_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(TrackerConfig::load(&path), TrackerConfig::default());
    }

    #[test]
    fn read_reports_why_a_file_is_unusable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(matches!(
            TrackerConfig::read(&missing),
            Err(EmotionError::Io(_))
        ));

        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, "{ not json").unwrap();
        assert!(matches!(
            TrackerConfig::read(&garbage),
            Err(EmotionError::Json(_))
        ));

        let invalid = dir.path().join("invalid.json");
        std::fs::write(&invalid, r#"{ "trend_window": 0 }"#).unwrap();
        assert!(matches!(
            TrackerConfig::read(&invalid),
            Err(EmotionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn invalid_values_on_disk_yield_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.json");
        std::fs::write(&path, r#"{ "decay_rate": 3.0 }"#).unwrap();
        assert_eq!(TrackerConfig::load(&path), TrackerConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.json");
        std::fs::write(
            &path,
            r#"{
                "decay_interval_secs": 10,
                "keywords": [ { "label": "anxious", "keywords": ["deadline"] } ]
            }"#,
        )
        .unwrap();

        let config = TrackerConfig::load(&path);
        assert_eq!(config.decay_interval_secs, 10);
        assert_eq!(config.history_capacity, 200);
        assert_eq!(
            config.keywords.rules(),
            &[KeywordRule {
                label: EmotionLabel::Anxious,
                keywords: vec!["deadline".to_string()],
            }]
        );
        assert_eq!(config.adaptations, AdaptationTable::default());
    }

    #[test]
    fn save_then_load_preserves_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tracker.json");
        let config = TrackerConfig {
            trend_window: 6,
            min_intensity: 0.45,
            ..TrackerConfig::default()
        };

        config.save(&path).unwrap();
        assert_eq!(TrackerConfig::load(&path), config);
    }

    #[test]
    fn save_refuses_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = TrackerConfig {
            decay_rate: -1.0,
            ..TrackerConfig::default()
        };
        assert!(config.save(&dir.path().join("tracker.json")).is_err());
    }
}
