//! Environment layers: scalar fields derived from seasonal data.
//!
//! Each layer caches a single seasonal factor taken from a
//! [`LayerContext`]. The cache is captured at construction and explicitly
//! refreshed on every [`EnvironmentLayer::update`]; per-cell reads are pure
//! functions of that cached factor and the cell position.

mod humidity;
mod luminosity;
mod temperature;

use envsim_types::{Cell, LayerKind, LayerState};
use serde_json::json;

use crate::context::LayerContext;
use crate::grid::SparseGrid;

pub use humidity::{DEFAULT_BASE_HUMIDITY, HumidityLayer};
pub use luminosity::LuminosityLayer;
pub use temperature::{DEFAULT_BASE_TEMPERATURE, TemperatureLayer};

/// The contract every environment layer fulfills.
pub trait EnvironmentLayer: Send {
    /// Which field this layer computes.
    fn kind(&self) -> LayerKind;

    /// Refresh the cached factor from a live context.
    ///
    /// Returns a diagnostic snapshot of the refreshed state.
    fn update(&mut self, ctx: &LayerContext<'_>, grid: &SparseGrid) -> LayerState;

    /// Field value at `cell`, computed from the cached factor.
    fn value_at(&self, cell: Cell) -> f64;

    /// The cached seasonal factor.
    fn seasonal_factor(&self) -> f64;
}

/// Announce a freshly constructed layer.
fn announce_created(kind: LayerKind, ctx: &LayerContext<'_>) {
    ctx.tracker().track(
        "layer_created",
        json!({
            "layer": kind.as_str(),
            "seasonalFactor": ctx.seasonal_factor(),
            "hemisphere": ctx.seasonal_data().hemisphere,
        }),
        false,
    );
}

/// Debounced per-tick diagnostic for a refreshed layer.
fn announce_updated(
    kind: LayerKind,
    ctx: &LayerContext<'_>,
    grid: &SparseGrid,
    state: &LayerState,
) {
    ctx.tracker().track(
        "layer_updated",
        json!({
            "layer": kind.as_str(),
            "tick": ctx.time_keeper().ticks(),
            "yearProgress": state.year_progress,
            "seasonalFactor": state.seasonal_factor,
            "activeCells": grid.len(),
        }),
        true,
    );
}
