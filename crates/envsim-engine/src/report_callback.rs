//! Tick callback that reports the environment through `tracing`.
//!
//! Season changes are logged as they happen. Every `report_every` ticks the
//! callback also samples each configured layer at three probe rows (north
//! pole, equator, south pole) in the centre column, which is what the
//! dashboards display.

use envsim_core::runner::TickCallback;
use envsim_core::simulation::{Simulation, TickSummary};
use envsim_types::{Cell, WorldBounds};
use tracing::info;

/// Callback that logs transitions and periodic field readings.
pub struct ReportCallback {
    report_every: u64,
    probes: [(&'static str, Cell); 3],
    reports: u64,
}

impl ReportCallback {
    /// Report every `report_every` ticks (0 disables periodic reports).
    pub fn new(bounds: WorldBounds, report_every: u64) -> Self {
        let center = bounds.center();
        let south = i64::from(bounds.height.saturating_sub(1));
        Self {
            report_every,
            probes: [
                ("north_pole", Cell::new(center.x, 0)),
                ("equator", center),
                ("south_pole", Cell::new(center.x, south)),
            ],
            reports: 0,
        }
    }

    /// Number of periodic reports emitted so far.
    pub const fn reports(&self) -> u64 {
        self.reports
    }

    fn report(&mut self, summary: &TickSummary, simulation: &Simulation) {
        for kind in simulation.environment().layer_kinds() {
            for (probe, cell) in self.probes {
                info!(
                    tick = summary.tick,
                    layer = %kind,
                    probe,
                    x = cell.x,
                    y = cell.y,
                    value = simulation.value_at(kind, cell),
                    "Layer reading"
                );
            }
        }
        self.reports = self.reports.saturating_add(1);
    }
}

impl TickCallback for ReportCallback {
    fn on_tick(&mut self, summary: &TickSummary, simulation: &Simulation) {
        for transition in &summary.transitions {
            info!(
                tick = summary.tick,
                hemisphere = %transition.hemisphere,
                from = %transition.from,
                to = %transition.to,
                year_progress = transition.year_progress,
                "Season changed"
            );
        }

        let due = summary
            .tick
            .checked_rem(self.report_every)
            .is_some_and(|rem| rem == 0);
        if due {
            self.report(summary, simulation);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use envsim_core::config::SimulationConfig;
    use envsim_world::NoopTracker;

    use super::*;

    #[test]
    fn probes_span_the_centre_column() {
        let callback = ReportCallback::new(WorldBounds::new(30, 20), 10);
        assert_eq!(callback.probes[0].1, Cell::new(15, 0));
        assert_eq!(callback.probes[1].1, Cell::new(15, 10));
        assert_eq!(callback.probes[2].1, Cell::new(15, 19));
    }

    #[test]
    fn reports_on_the_configured_cadence() {
        let config = SimulationConfig::default();
        let mut sim = Simulation::new(&config, Arc::new(NoopTracker)).unwrap();
        let mut callback = ReportCallback::new(sim.grid().bounds(), 4);
        for _ in 0..10 {
            let summary = sim.step().unwrap();
            callback.on_tick(&summary, &sim);
        }
        assert_eq!(callback.reports(), 2);

        let mut silent = ReportCallback::new(sim.grid().bounds(), 0);
        let summary = sim.step().unwrap();
        silent.on_tick(&summary, &sim);
        assert_eq!(silent.reports(), 0);
    }
}
