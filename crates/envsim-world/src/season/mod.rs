//! Seasonal models and the manager that drives them.
//!
//! A [`SeasonStrategy`] turns a coordinate and a year-progress value into a
//! [`SeasonalData`] descriptor. Two strategies exist:
//!
//! - [`HemisphericStrategy`] -- northern and southern halves of the grid run
//!   six months out of phase, blended by latitude.
//! - [`GlobalUniformStrategy`] -- one curve for the whole world.
//!
//! Both share the sine-based seasonal curve, the quarter-to-season mapping,
//! and the transition-phase measure defined in this module.
//!
//! The [`SeasonManager`] wraps one strategy, detects boundary crossings per
//! hemisphere, and builds the [`LayerContext`](crate::context::LayerContext)
//! bundles that layers read from.

mod global;
mod hemispheric;
mod manager;

use std::f64::consts::TAU;

use envsim_types::{SeasonStrategyKind, SeasonalData, TransitionMode};

pub use global::GlobalUniformStrategy;
pub use hemispheric::HemisphericStrategy;
pub use manager::SeasonManager;

/// Half-width of the zone around each season boundary, as a year fraction.
pub const TRANSITION_ZONE_WIDTH: f64 = 0.05;

/// Year-progress values at which discrete seasons change.
pub const SEASON_BOUNDARIES: [f64; 4] = [0.0, 0.25, 0.5, 0.75];

/// A seasonal model.
pub trait SeasonStrategy: Send {
    /// Called once by the manager right after construction.
    fn initialize(&self);

    /// Seasonal descriptor for `(x, y)` at `year_progress`.
    fn season_for_cell(&self, x: i64, y: i64, year_progress: f64) -> SeasonalData;

    /// Which strategy this is.
    fn kind(&self) -> SeasonStrategyKind;

    /// The transition mode the strategy was built with.
    ///
    /// `Smooth` is accepted but has no distinct computation path: both modes
    /// produce identical descriptors.
    fn transition_mode(&self) -> TransitionMode;
}

/// Sine seasonal curve in `[-1, 1]`, shifted by `offset` years.
pub fn seasonal_curve(year_progress: f64, offset: f64) -> f64 {
    ((year_progress + offset) * TAU).sin()
}

/// Map a curve value from `[-1, 1]` onto `[0, 1]`, clamping stray values.
pub fn normalize_factor(curve: f64) -> f64 {
    ((curve + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Proximity to the nearest season boundary.
///
/// The wraparound distance to the closest of [`SEASON_BOUNDARIES`] is
/// mapped onto `[0, 1]` inside the transition zone and is `0` outside it.
pub fn transition_phase(year_progress: f64) -> f64 {
    let normalized = year_progress.rem_euclid(1.0);
    let min_distance = SEASON_BOUNDARIES
        .iter()
        .map(|boundary| {
            let distance = (normalized - boundary).abs();
            distance.min((distance - 1.0).abs())
        })
        .fold(f64::INFINITY, f64::min);

    if min_distance <= TRANSITION_ZONE_WIDTH {
        min_distance / TRANSITION_ZONE_WIDTH
    } else {
        0.0
    }
}
