//! Headless engine binary for the envsim simulation.
//!
//! This is the main entry point that plays the role of the frame driver for
//! local runs. It loads configuration, wires the tracker stack, builds the
//! simulation, and runs the tick loop until a termination condition is met.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from the path given as the first argument, or
//!    from `envsim-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Create the debounced tracker in front of a tracing sink
//! 4. Build the simulation (time keeper, grid, environment)
//! 5. Run the simulation loop
//! 6. Log the result and flush pending diagnostics

mod error;
mod report_callback;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use envsim_core::config::SimulationConfig;
use envsim_core::observability::{DebouncedTracker, TracingSink};
use envsim_core::runner;
use envsim_core::simulation::Simulation;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::report_callback::ReportCallback;

/// Configuration file looked up in the working directory by default.
const DEFAULT_CONFIG_PATH: &str = "envsim-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, construction, or the run fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = load_config(&config_path)?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        world_name = config.world.name,
        width = config.world.width,
        height = config.world.height,
        ticks_per_year = config.world.ticks_per_year,
        season_strategy = config.environment.season_strategy,
        transition_mode = config.environment.transition_mode,
        layers = config.environment.layers.len(),
        "Configuration loaded"
    );

    // 3. Create the tracker stack.
    let session_id = config.tracking.session_id.unwrap_or_default();
    let tracker = Arc::new(DebouncedTracker::new(
        Arc::new(TracingSink),
        session_id,
        Duration::from_millis(config.tracking.debounce_ms),
    ));
    info!(
        session_id = %session_id,
        debounce_ms = config.tracking.debounce_ms,
        "Tracker initialized"
    );

    // 4. Build the simulation.
    let mut simulation =
        Simulation::new(&config, tracker.clone()).map_err(EngineError::from)?;

    // 5. Run the simulation.
    let report_every = config.world.ticks_per_year.checked_div(4).unwrap_or(0);
    let mut callback = ReportCallback::new(simulation.grid().bounds(), report_every);
    let result = runner::run_simulation(
        &mut simulation,
        config.simulation.max_ticks,
        Duration::from_millis(config.simulation.tick_interval_ms),
        &mut callback,
    )
    .map_err(EngineError::from)?;

    // 6. Log results.
    runner::log_simulation_end(&result);
    let flushed = tracker.flush();

    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        reports = callback.reports(),
        flushed,
        "envsim-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration from `path`.
///
/// Falls back to defaults when the file does not exist.
fn load_config(path: &Path) -> Result<SimulationConfig, EngineError> {
    if path.exists() {
        let config = SimulationConfig::from_file(path)?;
        Ok(config)
    } else {
        eprintln!("config file {} not found, using defaults", path.display());
        Ok(SimulationConfig::default())
    }
}
