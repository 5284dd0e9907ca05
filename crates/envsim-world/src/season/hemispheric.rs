//! Hemispheric seasonal model.
//!
//! Row 0 is the north pole and row `height - 1` the south pole. The
//! southern curve runs exactly half a year behind the northern one. Cells
//! in a thin band around the midpoint report the northern hemisphere; this
//! asymmetric tie-break is long-standing observed behavior and is kept.

use std::sync::Arc;

use envsim_types::{Hemisphere, Season, SeasonStrategyKind, SeasonalData, TransitionMode};
use serde_json::json;

use super::{SeasonStrategy, normalize_factor, seasonal_curve, transition_phase};
use crate::tracker::Tracker;

/// Rows on either side of the midpoint that count as northern.
const EQUATORIAL_BAND_ROWS: f64 = 2.0;

/// Phase offset of the southern curve, in years.
const SOUTHERN_OFFSET: f64 = 0.5;

/// Northern and southern seasons, six months apart, blended by latitude.
pub struct HemisphericStrategy {
    grid_height: u32,
    transition_mode: TransitionMode,
    tracker: Arc<dyn Tracker>,
}

impl HemisphericStrategy {
    /// Create the strategy for a grid `grid_height` rows tall.
    pub fn new(
        grid_height: u32,
        transition_mode: TransitionMode,
        tracker: Arc<dyn Tracker>,
    ) -> Self {
        Self {
            grid_height,
            transition_mode,
            tracker,
        }
    }

    /// Vertical midpoint of the grid.
    fn midpoint(&self) -> f64 {
        f64::from(self.grid_height) / 2.0
    }

    fn hemisphere_for(&self, y: f64) -> Hemisphere {
        let equator = self.midpoint();
        if (y - equator).abs() < EQUATORIAL_BAND_ROWS || y < equator {
            Hemisphere::Northern
        } else {
            Hemisphere::Southern
        }
    }
}

impl SeasonStrategy for HemisphericStrategy {
    fn initialize(&self) {
        self.tracker.track(
            "season_strategy_initialized",
            json!({ "strategy": self.kind().as_str() }),
            false,
        );
    }

    #[allow(clippy::cast_precision_loss)]
    fn season_for_cell(&self, _x: i64, y: i64, year_progress: f64) -> SeasonalData {
        let y = y as f64;
        let hemisphere = self.hemisphere_for(y);

        let northern = seasonal_curve(year_progress, 0.0);
        let southern = seasonal_curve(year_progress, SOUTHERN_OFFSET);

        let blended = if hemisphere == Hemisphere::Southern {
            southern
        } else {
            // 0 at the equator, 1 at the poles.
            let midpoint = self.midpoint();
            let blend_weight = ((y - midpoint) / midpoint).abs();
            northern.mul_add(blend_weight, southern * (1.0 - blend_weight))
        };

        let season_progress = if hemisphere == Hemisphere::Southern {
            year_progress + SOUTHERN_OFFSET
        } else {
            year_progress
        };

        SeasonalData {
            discrete_season: Season::from_progress(season_progress),
            continuous_seasonal_factor: normalize_factor(blended),
            year_progress,
            hemisphere,
            transition_phase: transition_phase(year_progress),
        }
    }

    fn kind(&self) -> SeasonStrategyKind {
        SeasonStrategyKind::Hemispheric
    }

    fn transition_mode(&self) -> TransitionMode {
        self.transition_mode
    }
}
