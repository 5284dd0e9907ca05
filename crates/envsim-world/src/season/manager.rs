//! Season manager: strategy orchestration and boundary detection.
//!
//! The manager caches the last discrete season it saw per hemisphere key.
//! Every query compares against that cache; a change is a boundary
//! crossing and is reported through the tracker, logged, and returned as a
//! [`SeasonTransition`]. The first observation of a key only seeds the
//! cache.
//!
//! World-wide detection does not depend on which cells layers happen to
//! read: [`SeasonManager::step`] polls three representative latitudes once
//! per tick, before any layer updates.

use std::collections::BTreeMap;
use std::sync::Arc;

use envsim_types::{
    Hemisphere, Season, SeasonStrategyKind, SeasonTransition, SeasonalData, TransitionMode,
};
use serde_json::json;
use tracing::{debug, info};

use super::SeasonStrategy;
use crate::context::LayerContext;
use crate::time::TimeKeeper;
use crate::tracker::Tracker;

/// Wraps a [`SeasonStrategy`] and tracks season changes per hemisphere.
pub struct SeasonManager {
    strategy: Box<dyn SeasonStrategy>,
    tracker: Arc<dyn Tracker>,
    transition_mode: TransitionMode,
    /// Last discrete season observed per hemisphere key.
    last_seasons: BTreeMap<Hemisphere, Season>,
}

impl SeasonManager {
    /// Wrap `strategy`, initialize it, and announce the manager.
    pub fn new(
        strategy: Box<dyn SeasonStrategy>,
        tracker: Arc<dyn Tracker>,
        transition_mode: TransitionMode,
    ) -> Self {
        strategy.initialize();
        tracker.track(
            "season_manager_created",
            json!({
                "strategy": strategy.kind().as_str(),
                "transitionMode": transition_mode.as_str(),
            }),
            false,
        );
        debug!(strategy = %strategy.kind(), mode = %transition_mode, "Season manager created");

        Self {
            strategy,
            tracker,
            transition_mode,
            last_seasons: BTreeMap::new(),
        }
    }

    /// Seasonal descriptor for `(x, y)`, with boundary detection.
    pub fn season_for_cell(&mut self, x: i64, y: i64, year_progress: f64) -> SeasonalData {
        self.query(x, y, year_progress, None).0
    }

    /// Build an immutable [`LayerContext`] for the seasonal state at `(x, y)`.
    pub fn create_layer_context<'a>(
        &mut self,
        time_keeper: &'a TimeKeeper,
        grid_width: u32,
        grid_height: u32,
        year_progress: f64,
        x: i64,
        y: i64,
    ) -> LayerContext<'a> {
        let seasonal_data = self.season_for_cell(x, y, year_progress);
        LayerContext::new(
            seasonal_data,
            time_keeper,
            grid_width,
            grid_height,
            Arc::clone(&self.tracker),
        )
    }

    /// Poll the representative latitudes for this tick.
    ///
    /// Queries the north pole (`y = 0`), the equator (`y = height / 2`),
    /// and the south pole (`y = height - 1`) at the centre column. Returns
    /// every boundary crossing detected, in poll order.
    pub fn step(
        &mut self,
        time_keeper: &TimeKeeper,
        grid_width: u32,
        grid_height: u32,
    ) -> Vec<SeasonTransition> {
        let center_x = i64::from(grid_width / 2);
        let equator_y = i64::from(grid_height / 2);
        let south_pole_y = i64::from(grid_height.saturating_sub(1));
        let year_progress = time_keeper.year_progress();
        let tick = Some(time_keeper.ticks());

        [0, equator_y, south_pole_y]
            .into_iter()
            .filter_map(|y| self.query(center_x, y, year_progress, tick).1)
            .collect()
    }

    /// Last season observed for `hemisphere`, if any.
    pub fn last_season(&self, hemisphere: Hemisphere) -> Option<Season> {
        self.last_seasons.get(&hemisphere).copied()
    }

    /// The wrapped strategy's kind.
    pub fn strategy_kind(&self) -> SeasonStrategyKind {
        self.strategy.kind()
    }

    /// The configured transition mode.
    pub const fn transition_mode(&self) -> TransitionMode {
        self.transition_mode
    }

    fn query(
        &mut self,
        x: i64,
        y: i64,
        year_progress: f64,
        tick: Option<u64>,
    ) -> (SeasonalData, Option<SeasonTransition>) {
        let data = self.strategy.season_for_cell(x, y, year_progress);
        let previous = self.last_seasons.insert(data.hemisphere, data.discrete_season);

        let transition = match previous {
            Some(from) if from != data.discrete_season => Some(SeasonTransition {
                hemisphere: data.hemisphere,
                from,
                to: data.discrete_season,
                year_progress,
            }),
            _ => None,
        };

        if let Some(ref crossing) = transition {
            info!(
                hemisphere = %crossing.hemisphere,
                from = %crossing.from,
                to = %crossing.to,
                year_progress,
                tick,
                "Season boundary crossed"
            );
            self.tracker.track(
                "season_boundary_crossed",
                json!({
                    "hemisphere": crossing.hemisphere,
                    "previousSeason": crossing.from,
                    "newSeason": crossing.to,
                    "yearProgress": year_progress,
                    "tick": tick,
                }),
                false,
            );
        }

        (data, transition)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::season::{GlobalUniformStrategy, HemisphericStrategy};
    use crate::tracker::RecordingTracker;

    fn hemispheric(tracker: &Arc<RecordingTracker>) -> SeasonManager {
        let shared: Arc<dyn Tracker> = tracker.clone();
        SeasonManager::new(
            Box::new(HemisphericStrategy::new(
                40,
                TransitionMode::Discretized,
                Arc::clone(&shared),
            )),
            shared,
            TransitionMode::Discretized,
        )
    }

    #[test]
    fn construction_initializes_strategy_and_announces() {
        let tracker = Arc::new(RecordingTracker::new());
        let manager = hemispheric(&tracker);
        assert_eq!(tracker.count("season_strategy_initialized"), 1);
        let created = tracker.calls_labelled("season_manager_created");
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].payload["strategy"], "HEMISPHERIC");
        assert_eq!(created[0].payload["transitionMode"], "DISCRETIZED");
        assert_eq!(manager.strategy_kind(), SeasonStrategyKind::Hemispheric);
    }

    #[test]
    fn first_observation_never_fires() {
        let tracker = Arc::new(RecordingTracker::new());
        let mut manager = hemispheric(&tracker);
        manager.season_for_cell(0, 0, 0.1);
        manager.season_for_cell(0, 39, 0.1);
        assert_eq!(tracker.count("season_boundary_crossed"), 0);
        assert_eq!(manager.last_season(Hemisphere::Northern), Some(Season::Winter));
        assert_eq!(manager.last_season(Hemisphere::Southern), Some(Season::Summer));
    }

    #[test]
    fn change_fires_once_per_key() {
        let tracker = Arc::new(RecordingTracker::new());
        let mut manager = hemispheric(&tracker);
        manager.season_for_cell(0, 0, 0.2);
        manager.season_for_cell(0, 0, 0.3);
        manager.season_for_cell(0, 0, 0.35);

        let crossings = tracker.calls_labelled("season_boundary_crossed");
        assert_eq!(crossings.len(), 1);
        assert_eq!(crossings[0].payload["hemisphere"], "northern");
        assert_eq!(crossings[0].payload["previousSeason"], "WINTER");
        assert_eq!(crossings[0].payload["newSeason"], "SPRING");
    }

    #[test]
    fn step_reports_both_hemispheres() {
        let tracker = Arc::new(RecordingTracker::new());
        let mut manager = hemispheric(&tracker);
        let mut keeper = TimeKeeper::new(100, 24).unwrap();

        assert!(manager.step(&keeper, 30, 40).is_empty());
        keeper.tick().unwrap();
        let transitions = manager.step(&keeper, 30, 40);

        assert_eq!(transitions.len(), 2);
        assert_eq!(transitions[0].hemisphere, Hemisphere::Northern);
        assert_eq!(transitions[0].to, Season::Spring);
        assert_eq!(transitions[1].hemisphere, Hemisphere::Southern);
        assert_eq!(transitions[1].from, Season::Summer);
        assert_eq!(transitions[1].to, Season::Winter);
        assert_eq!(tracker.count("season_boundary_crossed"), 2);
    }

    #[test]
    fn global_strategy_uses_a_single_key() {
        let tracker = Arc::new(RecordingTracker::new());
        let shared: Arc<dyn Tracker> = tracker.clone();
        let mut manager = SeasonManager::new(
            Box::new(GlobalUniformStrategy::new(
                TransitionMode::Smooth,
                Arc::clone(&shared),
            )),
            shared,
            TransitionMode::Smooth,
        );
        let keeper = TimeKeeper::new(4, 1).unwrap();
        manager.step(&keeper, 10, 10);
        assert_eq!(manager.last_season(Hemisphere::Global), Some(Season::Spring));
        assert_eq!(manager.last_season(Hemisphere::Northern), None);
        assert_eq!(manager.transition_mode(), TransitionMode::Smooth);
    }

    #[test]
    fn layer_context_carries_live_state() {
        let tracker = Arc::new(RecordingTracker::new());
        let mut manager = hemispheric(&tracker);
        let keeper = TimeKeeper::new(360, 90).unwrap();
        let ctx = manager.create_layer_context(&keeper, 30, 40, keeper.year_progress(), 15, 0);
        assert_eq!(ctx.grid_width(), 30);
        assert_eq!(ctx.grid_height(), 40);
        assert_eq!(ctx.time_keeper().ticks(), 90);
        assert!((ctx.seasonal_factor() - 1.0).abs() < 1e-12);
        assert_eq!(ctx.seasonal_data().hemisphere, Hemisphere::Northern);
    }
}
