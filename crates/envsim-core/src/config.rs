//! Configuration loading and typed config structures for the envsim simulation.
//!
//! The canonical configuration lives in `envsim-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads and validates the file.
//!
//! Environment component names (layer types, season strategy, transition
//! mode) are kept as strings at this level. They are resolved when the
//! environment is built, so a typo surfaces as a configuration error from
//! the world crate rather than as a YAML parse error.

use std::path::Path;

use envsim_types::{EnvironmentConfig, SessionId};
use serde::Deserialize;

/// Environment variable that overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "ENVSIM_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an impossible world.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What was wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `envsim-config.yaml`. Every section is
/// optional and falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, size, calendar).
    #[serde(default)]
    pub world: WorldConfig,

    /// Season strategy, transition mode, and layers.
    #[serde(default)]
    pub environment: EnvironmentConfig,

    /// Diagnostic tracking settings.
    #[serde(default)]
    pub tracking: TrackingConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Run-loop boundaries.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `ENVSIM_LOG_LEVEL` overrides `logging.level` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty map.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.logging.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants construction relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero-sized world, a zero-tick
    /// year, or an empty layer list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "world dimensions must be positive, got {}x{}",
                    self.world.width, self.world.height
                ),
            });
        }
        if self.world.ticks_per_year == 0 {
            return Err(ConfigError::Invalid {
                reason: "world.ticks_per_year must be at least 1".to_owned(),
            });
        }
        if self.environment.layers.is_empty() {
            return Err(ConfigError::Invalid {
                reason: "environment.layers must name at least one layer".to_owned(),
            });
        }
        Ok(())
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Grid width in cells.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Grid height in cells.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Ticks in one simulated year.
    #[serde(default = "default_ticks_per_year")]
    pub ticks_per_year: u64,

    /// Tick count the time keeper starts from.
    #[serde(default)]
    pub initial_ticks: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            width: default_width(),
            height: default_height(),
            ticks_per_year: default_ticks_per_year(),
            initial_ticks: 0,
        }
    }
}

/// Diagnostic tracking configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackingConfig {
    /// Session identifier. A fresh one is generated when absent.
    #[serde(default)]
    pub session_id: Option<SessionId>,

    /// Quiet period, in milliseconds, before a debounced label is emitted.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            session_id: None,
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl LoggingConfig {
    fn apply_env_overrides(&mut self) {
        let level = std::env::var(LOG_LEVEL_ENV).ok();
        if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
            self.level = level;
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Simulation boundary configuration.
///
/// A value of 0 for `max_ticks` means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of ticks before the run ends (0 = unlimited).
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "envsim".to_owned()
}

const fn default_width() -> u32 {
    40
}

const fn default_height() -> u32 {
    40
}

const fn default_ticks_per_year() -> u64 {
    360
}

const fn default_debounce_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_max_ticks() -> u64 {
    360
}

const fn default_tick_interval_ms() -> u64 {
    0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.world.width, 40);
        assert_eq!(config.world.ticks_per_year, 360);
        assert_eq!(config.environment.layers.len(), 3);
        assert_eq!(config.tracking.debounce_ms, 1000);
        assert_eq!(config.simulation.max_ticks, 360);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
world:
  name: "Test World"
  width: 64
  height: 32
  ticks_per_year: 120
  initial_ticks: 30

environment:
  season_strategy: GLOBAL_UNIFORM
  transition_mode: SMOOTH
  layers:
    - type: temperature
      params:
        baseTemperature: 12.5
    - type: humidity
      params:
        base_humidity: 0.4

tracking:
  session_id: "6f1c2a3e-52b4-4c1f-9d7a-3b2e1f0a9c8d"
  debounce_ms: 250

simulation:
  max_ticks: 500
  tick_interval_ms: 16
"#;

        let config = SimulationConfig::parse(yaml).unwrap();

        assert_eq!(config.world.name, "Test World");
        assert_eq!(config.world.width, 64);
        assert_eq!(config.world.height, 32);
        assert_eq!(config.world.initial_ticks, 30);
        assert_eq!(config.environment.season_strategy, "GLOBAL_UNIFORM");
        assert_eq!(config.environment.transition_mode, "SMOOTH");
        assert_eq!(config.environment.layers.len(), 2);
        assert_eq!(
            config.environment.layers[0].params.base_temperature,
            Some(12.5)
        );
        assert_eq!(config.environment.layers[1].params.base_humidity, Some(0.4));
        assert!(config.tracking.session_id.is_some());
        assert_eq!(config.tracking.debounce_ms, 250);
        assert_eq!(config.simulation.max_ticks, 500);
        assert_eq!(config.simulation.tick_interval_ms, 16);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = SimulationConfig::parse("world:\n  width: 10\n").unwrap();
        assert_eq!(config.world.width, 10);
        // Everything else uses defaults
        assert_eq!(config.world.height, 40);
        assert_eq!(config.environment.season_strategy, "HEMISPHERIC");
    }

    #[test]
    fn parse_empty_yaml() {
        let config = SimulationConfig::parse("").unwrap();
        assert_eq!(config.world, WorldConfig::default());
    }

    #[test]
    fn unknown_layer_names_survive_parsing() {
        let yaml = "environment:\n  layers:\n    - type: pressure\n";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.environment.layers[0].layer_type, "pressure");
    }

    #[test]
    fn invalid_worlds_are_rejected() {
        for yaml in [
            "world:\n  width: 0\n",
            "world:\n  height: 0\n",
            "world:\n  ticks_per_year: 0\n",
            "environment:\n  layers: []\n",
        ] {
            assert!(
                matches!(SimulationConfig::parse(yaml), Err(ConfigError::Invalid { .. })),
                "accepted: {yaml}"
            );
        }
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let result = SimulationConfig::parse("world: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("envsim-config.yaml");
        if path.exists() {
            let config = SimulationConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
