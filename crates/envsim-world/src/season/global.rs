//! Globally uniform seasonal model: one curve, coordinates ignored.

use std::sync::Arc;

use envsim_types::{Hemisphere, Season, SeasonStrategyKind, SeasonalData, TransitionMode};
use serde_json::json;

use super::{SeasonStrategy, normalize_factor, seasonal_curve, transition_phase};
use crate::tracker::Tracker;

/// The same season everywhere at once.
pub struct GlobalUniformStrategy {
    transition_mode: TransitionMode,
    tracker: Arc<dyn Tracker>,
}

impl GlobalUniformStrategy {
    /// Create the strategy.
    pub fn new(transition_mode: TransitionMode, tracker: Arc<dyn Tracker>) -> Self {
        Self {
            transition_mode,
            tracker,
        }
    }
}

impl SeasonStrategy for GlobalUniformStrategy {
    fn initialize(&self) {
        self.tracker.track(
            "season_strategy_initialized",
            json!({ "strategy": self.kind().as_str() }),
            false,
        );
    }

    fn season_for_cell(&self, _x: i64, _y: i64, year_progress: f64) -> SeasonalData {
        SeasonalData {
            discrete_season: Season::from_progress(year_progress),
            continuous_seasonal_factor: normalize_factor(seasonal_curve(year_progress, 0.0)),
            year_progress,
            hemisphere: Hemisphere::Global,
            transition_phase: transition_phase(year_progress),
        }
    }

    fn kind(&self) -> SeasonStrategyKind {
        SeasonStrategyKind::GlobalUniform
    }

    fn transition_mode(&self) -> TransitionMode {
        self.transition_mode
    }
}
