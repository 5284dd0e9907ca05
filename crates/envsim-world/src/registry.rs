//! Factory table for configurable components.
//!
//! Configuration names layers, the season strategy, and the transition
//! mode by string. Every name is resolved to an enum here, and every enum
//! maps to exactly one constructor; there is no name-based lookup anywhere
//! else. All resolution failures surface as
//! [`WorldError::Configuration`].

use std::sync::Arc;

use envsim_types::{LayerKind, LayerParams, SeasonStrategyKind, TransitionMode};

use crate::context::LayerContext;
use crate::error::WorldError;
use crate::layer::{EnvironmentLayer, HumidityLayer, LuminosityLayer, TemperatureLayer};
use crate::season::{GlobalUniformStrategy, HemisphericStrategy, SeasonStrategy};
use crate::tracker::Tracker;

/// Resolve a layer type name.
///
/// # Errors
///
/// Returns [`WorldError::Configuration`] for an unknown name.
pub fn resolve_layer(name: &str) -> Result<LayerKind, WorldError> {
    name.parse()
        .map_err(|_err| WorldError::configuration(format!("unknown layer type: {name}")))
}

/// Resolve a season strategy name.
///
/// # Errors
///
/// Returns [`WorldError::Configuration`] for an unknown name.
pub fn resolve_strategy(name: &str) -> Result<SeasonStrategyKind, WorldError> {
    name.parse()
        .map_err(|_err| WorldError::configuration(format!("unknown season strategy: {name}")))
}

/// Resolve a transition mode name.
///
/// # Errors
///
/// Returns [`WorldError::Configuration`] for an unknown name.
pub fn resolve_transition_mode(name: &str) -> Result<TransitionMode, WorldError> {
    name.parse()
        .map_err(|_err| WorldError::configuration(format!("unknown transition mode: {name}")))
}

/// Construct the strategy for `kind`.
pub fn build_strategy(
    kind: SeasonStrategyKind,
    grid_height: u32,
    transition_mode: TransitionMode,
    tracker: Arc<dyn Tracker>,
) -> Box<dyn SeasonStrategy> {
    match kind {
        SeasonStrategyKind::Hemispheric => Box::new(HemisphericStrategy::new(
            grid_height,
            transition_mode,
            tracker,
        )),
        SeasonStrategyKind::GlobalUniform => {
            Box::new(GlobalUniformStrategy::new(transition_mode, tracker))
        }
    }
}

/// Construct the layer for `kind` from its parameters and initial context.
pub fn build_layer(
    kind: LayerKind,
    params: &LayerParams,
    ctx: &LayerContext<'_>,
) -> Box<dyn EnvironmentLayer> {
    match kind {
        LayerKind::Temperature => Box::new(TemperatureLayer::new(params, ctx)),
        LayerKind::Humidity => Box::new(HumidityLayer::new(params, ctx)),
        LayerKind::Luminosity => Box::new(LuminosityLayer::new(params, ctx)),
    }
}
