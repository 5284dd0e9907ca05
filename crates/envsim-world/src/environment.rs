//! The composite environment: one season manager plus a set of layers.
//!
//! # Tick ordering
//!
//! [`CompositeEnvironment::update`] always advances the season manager
//! first, so boundary detection for the tick has happened before any layer
//! reads seasonal data. It then builds one live [`LayerContext`] at the grid
//! centre and refreshes every layer from it, in [`LayerKind`] order.
//!
//! # Missing layers
//!
//! Querying a layer type that was not configured is not an error:
//! [`CompositeEnvironment::value_at`] returns `0.0` so speculative probes
//! from the renderer stay cheap.

use std::collections::BTreeMap;
use std::sync::Arc;

use envsim_types::{
    Cell, EnvironmentConfig, EnvironmentState, LayerKind, LayerSpec, SeasonStrategyKind,
    SeasonTransition, TransitionMode, WorldBounds,
};
use serde_json::json;
use tracing::{debug, info};

use crate::context::LayerContext;
use crate::error::WorldError;
use crate::grid::SparseGrid;
use crate::layer::EnvironmentLayer;
use crate::registry;
use crate::season::SeasonManager;
use crate::time::TimeKeeper;
use crate::tracker::Tracker;

/// Top-level environment facade.
pub struct CompositeEnvironment {
    season_manager: SeasonManager,
    layers: BTreeMap<LayerKind, Box<dyn EnvironmentLayer>>,
    tracker: Arc<dyn Tracker>,
    bounds: WorldBounds,
    /// Transitions detected by the most recent update.
    last_transitions: Vec<SeasonTransition>,
}

impl CompositeEnvironment {
    /// Build the environment from typed selectors.
    ///
    /// Each layer receives a context computed at the grid centre for the
    /// time keeper's current year progress. When a layer type appears more
    /// than once, the last spec wins.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidBounds`] if either dimension is 0, or
    /// [`WorldError::Configuration`] if a spec names an unknown layer type.
    pub fn new(
        layer_specs: &[LayerSpec],
        tracker: Arc<dyn Tracker>,
        time_keeper: &TimeKeeper,
        bounds: WorldBounds,
        strategy: SeasonStrategyKind,
        transition_mode: TransitionMode,
    ) -> Result<Self, WorldError> {
        if bounds.width == 0 || bounds.height == 0 {
            return Err(WorldError::InvalidBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }

        let strategy_impl = registry::build_strategy(
            strategy,
            bounds.height,
            transition_mode,
            Arc::clone(&tracker),
        );
        let mut season_manager =
            SeasonManager::new(strategy_impl, Arc::clone(&tracker), transition_mode);

        let center = bounds.center();
        let mut layers: BTreeMap<LayerKind, Box<dyn EnvironmentLayer>> = BTreeMap::new();
        for spec in layer_specs {
            let kind = registry::resolve_layer(&spec.layer_type)?;
            debug!(layer = %kind, "Creating environment layer");
            let ctx = season_manager.create_layer_context(
                time_keeper,
                bounds.width,
                bounds.height,
                time_keeper.year_progress(),
                center.x,
                center.y,
            );
            layers.insert(kind, registry::build_layer(kind, &spec.params, &ctx));
        }

        tracker.track(
            "environment_created",
            json!({
                "provider": "CompositeEnvironment",
                "layerCount": layers.len(),
                "seasonStrategy": strategy.as_str(),
                "seasonTransitionMode": transition_mode.as_str(),
            }),
            false,
        );
        info!(
            layers = layers.len(),
            strategy = %strategy,
            transition_mode = %transition_mode,
            width = bounds.width,
            height = bounds.height,
            "Environment created"
        );

        Ok(Self {
            season_manager,
            layers,
            tracker,
            bounds,
            last_transitions: Vec::new(),
        })
    }

    /// Build the environment from its configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Configuration`] if the strategy, transition
    /// mode, or any layer type is unknown.
    pub fn from_config(
        config: &EnvironmentConfig,
        tracker: Arc<dyn Tracker>,
        time_keeper: &TimeKeeper,
        bounds: WorldBounds,
    ) -> Result<Self, WorldError> {
        let strategy = registry::resolve_strategy(&config.season_strategy)?;
        let transition_mode = registry::resolve_transition_mode(&config.transition_mode)?;
        Self::new(
            &config.layers,
            tracker,
            time_keeper,
            bounds,
            strategy,
            transition_mode,
        )
    }

    /// Advance the environment by one tick.
    ///
    /// Steps the season manager, then refreshes every layer. Returns one
    /// entry per configured layer.
    pub fn update(&mut self, time_keeper: &TimeKeeper, grid: &SparseGrid) -> EnvironmentState {
        let (width, height) = (self.bounds.width, self.bounds.height);
        self.last_transitions = self.season_manager.step(time_keeper, width, height);

        let center = self.bounds.center();
        let ctx: LayerContext<'_> = self.season_manager.create_layer_context(
            time_keeper,
            width,
            height,
            time_keeper.year_progress(),
            center.x,
            center.y,
        );

        let state: EnvironmentState = self
            .layers
            .iter_mut()
            .map(|(kind, layer)| (*kind, layer.update(&ctx, grid)))
            .collect();

        self.tracker.track(
            "environment_updated",
            json!({
                "tick": time_keeper.ticks(),
                "layerCount": self.layers.len(),
            }),
            true,
        );
        debug!(
            tick = time_keeper.ticks(),
            year_progress = time_keeper.year_progress(),
            transitions = self.last_transitions.len(),
            "Environment updated"
        );

        state
    }

    /// The layer of the given kind, if configured.
    pub fn layer(&self, kind: LayerKind) -> Option<&dyn EnvironmentLayer> {
        self.layers.get(&kind).map(AsRef::as_ref)
    }

    /// Field value of layer `kind` at `cell`, or `0.0` if not configured.
    pub fn value_at(&self, kind: LayerKind, cell: Cell) -> f64 {
        self.layer(kind).map_or(0.0, |layer| layer.value_at(cell))
    }

    /// Configured layer kinds, in update order.
    pub fn layer_kinds(&self) -> Vec<LayerKind> {
        self.layers.keys().copied().collect()
    }

    /// The season manager.
    pub const fn season_manager(&self) -> &SeasonManager {
        &self.season_manager
    }

    /// Season transitions detected by the most recent [`Self::update`].
    pub fn last_transitions(&self) -> &[SeasonTransition] {
        &self.last_transitions
    }

    /// World bounds the environment was built for.
    pub const fn bounds(&self) -> WorldBounds {
        self.bounds
    }
}
