//! Bounded simulation loop.
//!
//! This module provides [`run_simulation`], the top-level function that
//! drives [`Simulation::step`] with support for:
//!
//! - **Bounded runs**: stop after `max_ticks` ticks (0 = unlimited)
//! - **Fixed tick speed**: optional real-time sleep between ticks
//! - **Caller stop**: a [`TickCallback`] can end the run between ticks
//!
//! The loop is synchronous and single-threaded.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::simulation::{Simulation, SimulationError, TickSummary};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A simulation step failed.
    #[error("simulation error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: SimulationError,
    },
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationEndReason {
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// The tick callback asked the run to stop.
    CallbackStop,
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed by this run.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes.
///
/// Implementations can render, record, or decide to stop. The callback
/// receives the tick summary and the simulation it came from.
pub trait TickCallback {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, simulation: &Simulation);

    /// Checked before every tick; returning `true` ends the run.
    fn stop_requested(&self) -> bool {
        false
    }
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _simulation: &Simulation) {}
}

/// Run the simulation loop until a termination condition is met.
///
/// # Arguments
///
/// * `simulation` - The simulation to advance
/// * `max_ticks` - Ticks to run before stopping (0 = unlimited)
/// * `tick_interval` - Real time to sleep between ticks
/// * `callback` - Called after each tick
///
/// # Errors
///
/// Returns [`RunnerError`] if a step fails.
pub fn run_simulation(
    simulation: &mut Simulation,
    max_ticks: u64,
    tick_interval: Duration,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        name = simulation.name(),
        max_ticks,
        tick_interval_ms = tick_interval.as_millis(),
        start_tick = simulation.time_keeper().ticks(),
        "Simulation starting"
    );

    loop {
        // --- Check stop request (before tick) ---
        if callback.stop_requested() {
            info!(total_ticks, "Callback stop requested");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::CallbackStop,
                final_summary: last_summary,
                total_ticks,
            });
        }

        // --- Execute tick ---
        let summary = simulation.step()?;
        total_ticks = total_ticks.saturating_add(1);

        for transition in &summary.transitions {
            debug!(
                tick = summary.tick,
                hemisphere = %transition.hemisphere,
                to = %transition.to,
                "Season changed"
            );
        }

        // --- Notify callback ---
        callback.on_tick(&summary, simulation);

        // --- Check tick limit (after tick) ---
        if max_ticks > 0 && total_ticks >= max_ticks {
            info!(tick = summary.tick, max_ticks, "Tick limit reached");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::MaxTicksReached,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        last_summary = Some(summary);

        // --- Sleep for tick interval ---
        if !tick_interval.is_zero() {
            std::thread::sleep(tick_interval);
        }
    }
}

/// Log the simulation end sequence.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            year_progress = summary.year_progress,
            total_years = summary.total_years,
            layers = summary.environment.len(),
            "Final tick summary"
        );
        for (kind, state) in &summary.environment {
            info!(
                layer = %kind,
                base_value = state.base_value,
                seasonal_factor = state.seasonal_factor,
                "Final layer state"
            );
        }
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use envsim_world::NoopTracker;

    use super::*;
    use crate::config::SimulationConfig;

    fn simulation() -> Simulation {
        Simulation::new(&SimulationConfig::default(), Arc::new(NoopTracker)).unwrap()
    }

    #[test]
    fn bounded_by_max_ticks() {
        let mut sim = simulation();
        let result = run_simulation(&mut sim, 5, Duration::ZERO, &mut NoOpCallback).unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(result.final_summary.unwrap().tick, 5);
        assert_eq!(sim.time_keeper().ticks(), 5);
    }

    #[test]
    fn callback_is_called_and_can_stop() {
        struct StopAfter {
            seen: Vec<u64>,
            limit: usize,
        }

        impl TickCallback for StopAfter {
            fn on_tick(&mut self, summary: &TickSummary, simulation: &Simulation) {
                assert_eq!(summary.tick, simulation.time_keeper().ticks());
                self.seen.push(summary.tick);
            }

            fn stop_requested(&self) -> bool {
                self.seen.len() >= self.limit
            }
        }

        let mut sim = simulation();
        let mut callback = StopAfter {
            seen: Vec::new(),
            limit: 3,
        };
        let result = run_simulation(&mut sim, 0, Duration::ZERO, &mut callback).unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::CallbackStop);
        assert_eq!(result.total_ticks, 3);
        assert_eq!(callback.seen, vec![1, 2, 3]);
        assert_eq!(result.final_summary.map(|s| s.tick), Some(3));
    }

    #[test]
    fn immediate_stop_runs_no_ticks() {
        struct Never;
        impl TickCallback for Never {
            fn on_tick(&mut self, _summary: &TickSummary, _simulation: &Simulation) {}
            fn stop_requested(&self) -> bool {
                true
            }
        }

        let mut sim = simulation();
        let result = run_simulation(&mut sim, 10, Duration::ZERO, &mut Never).unwrap();
        assert_eq!(result.total_ticks, 0);
        assert!(result.final_summary.is_none());
        log_simulation_end(&result);
    }
}
