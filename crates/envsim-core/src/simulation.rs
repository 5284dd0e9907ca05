//! The simulation facade: one world, one clock, one environment.
//!
//! [`Simulation`] owns the [`TimeKeeper`], the [`SparseGrid`], and the
//! [`CompositeEnvironment`]. Each [`Simulation::step`] runs the same three
//! phases in a fixed order:
//!
//! 1. **Tick** -- advance the time keeper by exactly one tick.
//! 2. **Environment** -- step the season manager and refresh every layer.
//! 3. **Report** -- emit a debounced `simulation_step` diagnostic and return
//!    a [`TickSummary`].
//!
//! Construction already runs one environment update, so
//! [`Simulation::snapshot`] is meaningful before the first step.

use std::sync::Arc;

use envsim_types::{Cell, EnvironmentState, LayerKind, SeasonTransition, WorldBounds};
use envsim_world::{CompositeEnvironment, SparseGrid, TimeKeeper, Tracker, WorldError};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::{ConfigError, SimulationConfig};

/// Errors that can occur while building or stepping a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The configuration failed validation.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// A world operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

/// Summary of a single tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Year progress after the tick, in `[0, 1)`.
    pub year_progress: f64,
    /// Complete years elapsed after the tick.
    pub total_years: u64,
    /// Per-layer snapshot, one entry per configured layer.
    pub environment: EnvironmentState,
    /// Season changes detected during the tick.
    pub transitions: Vec<SeasonTransition>,
}

/// A running environment simulation.
pub struct Simulation {
    name: String,
    time_keeper: TimeKeeper,
    grid: SparseGrid,
    environment: CompositeEnvironment,
    tracker: Arc<dyn Tracker>,
    /// Environment state from the most recent update.
    state: EnvironmentState,
}

impl Simulation {
    /// Build a simulation from configuration.
    ///
    /// Every in-bounds cell is activated. The environment is updated once so
    /// that the initial state is available, then `world_created` is
    /// emitted.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Config`] if the configuration is invalid,
    /// or [`SimulationError::World`] if an environment component name is
    /// unknown.
    pub fn new(
        config: &SimulationConfig,
        tracker: Arc<dyn Tracker>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let world = &config.world;
        let time_keeper = TimeKeeper::new(world.ticks_per_year, world.initial_ticks)?;
        let bounds = WorldBounds::new(world.width, world.height);
        let grid = SparseGrid::filled(bounds)?;
        let mut environment = CompositeEnvironment::from_config(
            &config.environment,
            Arc::clone(&tracker),
            &time_keeper,
            bounds,
        )?;
        let state = environment.update(&time_keeper, &grid);

        tracker.track(
            "world_created",
            json!({
                "name": world.name,
                "width": bounds.width,
                "height": bounds.height,
                "initialTick": time_keeper.ticks(),
                "yearProgress": time_keeper.year_progress(),
            }),
            false,
        );
        info!(
            name = %world.name,
            width = bounds.width,
            height = bounds.height,
            ticks_per_year = world.ticks_per_year,
            initial_tick = time_keeper.ticks(),
            active_cells = grid.len(),
            "World created"
        );

        Ok(Self {
            name: world.name.clone(),
            time_keeper,
            grid,
            environment,
            tracker,
            state,
        })
    }

    /// Advance the simulation by one tick.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::World`] if the tick counter overflows.
    pub fn step(&mut self) -> Result<TickSummary, SimulationError> {
        // --- Tick ---
        let tick = self.time_keeper.tick()?;

        // --- Environment ---
        self.state = self.environment.update(&self.time_keeper, &self.grid);

        // --- Report ---
        let year_progress = self.time_keeper.year_progress();
        let total_years = self.time_keeper.total_years();
        self.tracker.track(
            "simulation_step",
            json!({
                "tick": tick,
                "yearProgress": year_progress,
                "totalYears": total_years,
            }),
            true,
        );
        debug!(tick, year_progress, total_years, "Simulation step");

        Ok(self.snapshot())
    }

    /// Current state as a [`TickSummary`].
    ///
    /// Transitions are those detected by the most recent environment update.
    pub fn snapshot(&self) -> TickSummary {
        TickSummary {
            tick: self.time_keeper.ticks(),
            year_progress: self.time_keeper.year_progress(),
            total_years: self.time_keeper.total_years(),
            environment: self.state.clone(),
            transitions: self.environment.last_transitions().to_vec(),
        }
    }

    /// Field value of layer `kind` at `cell`, or `0.0` if not configured.
    pub fn value_at(&self, kind: LayerKind, cell: Cell) -> f64 {
        self.environment.value_at(kind, cell)
    }

    /// Simulation name from configuration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The time keeper.
    pub const fn time_keeper(&self) -> &TimeKeeper {
        &self.time_keeper
    }

    /// The active-cell grid.
    pub const fn grid(&self) -> &SparseGrid {
        &self.grid
    }

    /// The composite environment.
    pub const fn environment(&self) -> &CompositeEnvironment {
        &self.environment
    }
}
