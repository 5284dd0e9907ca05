//! The context bundle handed to environment layers.
//!
//! Layers never hold a reference back to the environment or the season
//! manager. Instead the manager computes a [`LayerContext`] and passes it
//! down: once at layer construction and again on every update. The bundle
//! is immutable once built.

use std::fmt;
use std::sync::Arc;

use envsim_types::SeasonalData;

use crate::time::TimeKeeper;
use crate::tracker::Tracker;

/// Immutable per-layer context: seasonal snapshot, time, grid size, tracker.
#[derive(Clone)]
pub struct LayerContext<'a> {
    seasonal_data: SeasonalData,
    time_keeper: &'a TimeKeeper,
    grid_width: u32,
    grid_height: u32,
    tracker: Arc<dyn Tracker>,
}

impl<'a> LayerContext<'a> {
    /// Bundle the given parts. Normally called by the season manager.
    pub fn new(
        seasonal_data: SeasonalData,
        time_keeper: &'a TimeKeeper,
        grid_width: u32,
        grid_height: u32,
        tracker: Arc<dyn Tracker>,
    ) -> Self {
        Self {
            seasonal_data,
            time_keeper,
            grid_width,
            grid_height,
            tracker,
        }
    }

    /// Seasonal descriptor the context was built from.
    pub const fn seasonal_data(&self) -> &SeasonalData {
        &self.seasonal_data
    }

    /// Shorthand for the continuous seasonal factor.
    pub const fn seasonal_factor(&self) -> f64 {
        self.seasonal_data.continuous_seasonal_factor
    }

    /// The simulation's time keeper.
    pub const fn time_keeper(&self) -> &'a TimeKeeper {
        self.time_keeper
    }

    /// Grid width in cells.
    pub const fn grid_width(&self) -> u32 {
        self.grid_width
    }

    /// Grid height in cells.
    pub const fn grid_height(&self) -> u32 {
        self.grid_height
    }

    /// The shared tracker.
    pub fn tracker(&self) -> &dyn Tracker {
        self.tracker.as_ref()
    }
}

impl fmt::Debug for LayerContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerContext")
            .field("seasonal_data", &self.seasonal_data)
            .field("ticks", &self.time_keeper.ticks())
            .field("grid_width", &self.grid_width)
            .field("grid_height", &self.grid_height)
            .finish_non_exhaustive()
    }
}
