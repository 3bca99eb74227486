//! Sensor Configuration - analysis thresholds as operator-tunable TOML values
//!
//! Each field has a serde default matching `defaults`, so an empty or partial
//! file always yields a complete config.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;

/// Environment variable naming a config file for the binary.
pub const CONFIG_ENV_VAR: &str = "QORSENSE_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "sensor_config.toml";

// ============================================================================
// Sensor Config
// ============================================================================

/// Thresholds for one analysis call. Never mutated during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// |slope| above which a trend is worth reporting (units/sample)
    #[serde(default = "default_slope_warning")]
    pub slope_warning: f64,

    /// |slope| above which a trend is a process change or critical drift
    #[serde(default = "default_slope_critical")]
    pub slope_critical: f64,

    #[serde(default = "default_bias_warning")]
    pub bias_warning: f64,

    /// Also the half-width of the RUL threshold band
    #[serde(default = "default_bias_critical")]
    pub bias_critical: f64,

    #[serde(default = "default_hysteresis_critical")]
    pub hysteresis_critical: f64,

    /// Persistence threshold on the Hurst exponent
    #[serde(default = "default_dfa_critical")]
    pub dfa_critical: f64,

    #[serde(default = "default_min_data_points")]
    pub min_data_points: usize,
}

fn default_slope_warning() -> f64 { defaults::SLOPE_WARNING }
fn default_slope_critical() -> f64 { defaults::SLOPE_CRITICAL }
fn default_bias_warning() -> f64 { defaults::BIAS_WARNING }
fn default_bias_critical() -> f64 { defaults::BIAS_CRITICAL }
fn default_hysteresis_critical() -> f64 { defaults::HYSTERESIS_CRITICAL }
fn default_dfa_critical() -> f64 { defaults::DFA_CRITICAL }
fn default_min_data_points() -> usize { defaults::MIN_DATA_POINTS }

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            slope_warning: default_slope_warning(),
            slope_critical: default_slope_critical(),
            bias_warning: default_bias_warning(),
            bias_critical: default_bias_critical(),
            hysteresis_critical: default_hysteresis_critical(),
            dfa_critical: default_dfa_critical(),
            min_data_points: default_min_data_points(),
        }
    }
}

impl SensorConfig {
    /// Resolve the config for the binary, first usable source wins:
    /// `$QORSENSE_CONFIG`, then `./sensor_config.toml`, then built-in defaults.
    ///
    /// A source that is absent or fails to load is logged and skipped.
    pub fn load() -> Self {
        let candidates = std::env::var_os(CONFIG_ENV_VAR)
            .map(|p| (PathBuf::from(p), CONFIG_ENV_VAR))
            .into_iter()
            .chain(std::iter::once((PathBuf::from(LOCAL_CONFIG_FILE), "working directory")));

        candidates
            .filter_map(|(path, origin)| Self::load_candidate(&path, origin))
            .next()
            .unwrap_or_else(|| {
                info!("No sensor config file usable, thresholds at built-in defaults");
                Self::default()
            })
    }

    fn load_candidate(path: &Path, origin: &str) -> Option<Self> {
        if !path.is_file() {
            if origin == CONFIG_ENV_VAR {
                warn!(path = %path.display(), origin, "Config path does not name a file, skipping");
            }
            return None;
        }
        Self::load_from_file(path)
            .inspect(|_| info!(path = %path.display(), origin, "Sensor config loaded"))
            .inspect_err(|e| warn!(path = %path.display(), origin, error = %e, "Sensor config rejected, skipping"))
            .ok()
    }

    /// Load from a specific TOML file path.
    ///
    /// Unknown keys are logged as warnings (with a suggestion when one is
    /// close); the parsed config must pass [`SensorConfig::validate`].
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;

        for w in super::validation::validate_plausibility(&config) {
            warn!("{}", w);
        }
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Sensor config saved");
        Ok(())
    }

    /// Validate thresholds for internal consistency.
    ///
    /// Rules:
    /// - All thresholds finite and non-negative
    /// - Critical thresholds >= warning thresholds
    /// - `dfa_critical` in (0, 2]
    /// - `min_data_points` > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        Self::check_escalation(self.slope_warning, self.slope_critical, "slope", &mut errors);
        Self::check_escalation(self.bias_warning, self.bias_critical, "bias", &mut errors);

        for (name, value) in [
            ("slope_warning", self.slope_warning),
            ("slope_critical", self.slope_critical),
            ("bias_warning", self.bias_warning),
            ("bias_critical", self.bias_critical),
            ("hysteresis_critical", self.hysteresis_critical),
        ] {
            if !value.is_finite() {
                errors.push(format!("{name} must be finite (got {value})"));
            } else if value < 0.0 {
                errors.push(format!("{name} = {value:.3} cannot be negative"));
            }
        }

        if !(self.dfa_critical.is_finite() && self.dfa_critical > 0.0 && self.dfa_critical <= 2.0) {
            errors.push(format!(
                "dfa_critical = {} must be in (0, 2]",
                self.dfa_critical
            ));
        }

        if self.min_data_points == 0 {
            errors.push("min_data_points must be > 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_escalation(warning: f64, critical: f64, name: &str, errors: &mut Vec<String>) {
        // NaN comparisons silently pass, catch them explicitly
        if !warning.is_finite() || !critical.is_finite() {
            errors.push(format!(
                "{name}: values must be finite (got warning={warning}, critical={critical})"
            ));
            return;
        }
        if critical < warning {
            errors.push(format!(
                "{name}: critical ({critical:.3}) must be >= warning ({warning:.3})"
            ));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = SensorConfig::default();
        assert!(config.validate().is_ok(), "Default config must always validate");
    }

    #[test]
    fn test_empty_toml_produces_defaults() {
        let config: SensorConfig = toml::from_str("").expect("empty TOML should parse");
        assert_eq!(config, SensorConfig::default());
        assert_eq!(config.min_data_points, 50);
        assert_eq!(config.dfa_critical, 0.8);
    }

    #[test]
    fn test_partial_toml_override() {
        let toml_str = r#"
bias_critical = 1.0
min_data_points = 20
"#;
        let config = SensorConfig::from_toml_str(toml_str).expect("partial TOML should parse");
        assert_eq!(config.bias_critical, 1.0);
        assert_eq!(config.min_data_points, 20);
        // Non-overridden values retain defaults
        assert_eq!(config.slope_critical, 0.1);
        assert_eq!(config.bias_warning, 1.0);
    }

    #[test]
    fn test_validation_catches_inverted_thresholds() {
        let config = SensorConfig {
            slope_warning: 0.2,
            slope_critical: 0.1,
            ..SensorConfig::default()
        };
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("slope")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_catches_nan() {
        let config = SensorConfig {
            bias_critical: f64::NAN,
            ..SensorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_catches_zero_min_points() {
        let config = SensorConfig {
            min_data_points: 0,
            ..SensorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_catches_bad_dfa_threshold() {
        let config = SensorConfig {
            dfa_critical: 0.0,
            ..SensorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_roundtrip_toml() {
        let original = SensorConfig {
            hysteresis_critical: 0.35,
            ..SensorConfig::default()
        };
        let toml_str = original.to_toml().expect("serialization should work");
        let roundtripped: SensorConfig =
            toml::from_str(&toml_str).expect("deserialization should work");
        assert_eq!(original, roundtripped);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = SensorConfig::from_toml_str("bias_critical = \"high\"");
        assert!(matches!(result, Err(ConfigError::Parse(_, _))));
    }

    #[test]
    fn test_load_candidate_skips_missing_and_invalid_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let absent = dir.path().join("absent.toml");
        assert!(SensorConfig::load_candidate(&absent, CONFIG_ENV_VAR).is_none());

        let invalid = dir.path().join("invalid.toml");
        std::fs::write(&invalid, "min_data_points = 0\n").expect("write config");
        assert!(SensorConfig::load_candidate(&invalid, "working directory").is_none());

        assert!(SensorConfig::load_candidate(dir.path(), CONFIG_ENV_VAR).is_none());
    }

    #[test]
    fn test_load_candidate_reads_valid_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(LOCAL_CONFIG_FILE);
        std::fs::write(&path, "bias_critical = 3.0\n").expect("write config");
        let config = SensorConfig::load_candidate(&path, "working directory").expect("valid file");
        assert_eq!(config.bias_critical, 3.0);
        assert_eq!(config.min_data_points, 50);
    }

    #[test]
    fn test_validation_error_message_lists_problems() {
        let err = ConfigError::Validation(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Config validation failed:\n  - a\n  - b");
    }
}
