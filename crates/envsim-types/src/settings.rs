//! Environment configuration shapes shared by the loader and the world.
//!
//! Layer types, the season strategy, and the transition mode are kept as raw
//! strings here. They are resolved against the factory registry in
//! `envsim-world` when the environment is constructed, so an unknown name is
//! a construction-time configuration error rather than a parse failure.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Tunable parameters for a single environment layer.
///
/// Every field is optional; a layer ignores parameters it does not use and
/// falls back to its own default for missing ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct LayerParams {
    /// Baseline temperature (default 20).
    #[serde(default, alias = "base_temperature")]
    pub base_temperature: Option<f64>,
    /// Baseline humidity (default 0.5).
    #[serde(default, alias = "base_humidity")]
    pub base_humidity: Option<f64>,
}

/// One configured layer: its type name and parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LayerSpec {
    /// Layer type name, e.g. `temperature`.
    #[serde(rename = "type")]
    pub layer_type: String,
    /// Layer parameters.
    #[serde(default)]
    pub params: LayerParams,
}

impl LayerSpec {
    /// Create a spec for `layer_type` with default parameters.
    pub fn new(layer_type: impl Into<String>) -> Self {
        Self {
            layer_type: layer_type.into(),
            params: LayerParams::default(),
        }
    }

    /// Replace the parameters of this spec.
    #[must_use]
    pub const fn with_params(mut self, params: LayerParams) -> Self {
        self.params = params;
        self
    }
}

/// Environment section of the simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EnvironmentConfig {
    /// Season strategy name (`HEMISPHERIC` or `GLOBAL_UNIFORM`).
    #[serde(default = "default_season_strategy")]
    pub season_strategy: String,
    /// Transition mode name (`SMOOTH` or `DISCRETIZED`).
    #[serde(default = "default_transition_mode")]
    pub transition_mode: String,
    /// Layers to instantiate, in order. Later duplicates replace earlier ones.
    #[serde(default = "default_layers")]
    pub layers: Vec<LayerSpec>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            season_strategy: default_season_strategy(),
            transition_mode: default_transition_mode(),
            layers: default_layers(),
        }
    }
}

fn default_season_strategy() -> String {
    "HEMISPHERIC".to_owned()
}

fn default_transition_mode() -> String {
    "DISCRETIZED".to_owned()
}

fn default_layers() -> Vec<LayerSpec> {
    vec![
        LayerSpec::new("temperature"),
        LayerSpec::new("humidity"),
        LayerSpec::new("luminosity"),
    ]
}
