//! Humidity layer: `clamp01(base + 0.2 * (1 - f))`.
//!
//! Humidity runs opposite to seasonal warmth and is the same everywhere.

use envsim_types::{Cell, LayerKind, LayerParams, LayerState};

use super::{EnvironmentLayer, announce_created, announce_updated};
use crate::context::LayerContext;
use crate::grid::SparseGrid;

/// Baseline humidity when none is configured.
pub const DEFAULT_BASE_HUMIDITY: f64 = 0.5;

/// Maximum contribution of the cold season.
const SEASONAL_AMPLITUDE: f64 = 0.2;

/// Humidity field.
#[derive(Debug, Clone, PartialEq)]
pub struct HumidityLayer {
    base_humidity: f64,
    seasonal_factor: f64,
}

impl HumidityLayer {
    /// Build the layer, capturing the seasonal factor from `ctx`.
    pub fn new(params: &LayerParams, ctx: &LayerContext<'_>) -> Self {
        let layer = Self {
            base_humidity: params.base_humidity.unwrap_or(DEFAULT_BASE_HUMIDITY),
            seasonal_factor: ctx.seasonal_factor(),
        };
        announce_created(LayerKind::Humidity, ctx);
        layer
    }

    /// The configured baseline.
    pub const fn base_humidity(&self) -> f64 {
        self.base_humidity
    }
}

impl EnvironmentLayer for HumidityLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Humidity
    }

    fn update(&mut self, ctx: &LayerContext<'_>, grid: &SparseGrid) -> LayerState {
        self.seasonal_factor = ctx.seasonal_factor();
        let state = LayerState {
            year_progress: ctx.seasonal_data().year_progress,
            base_value: self.base_humidity,
            seasonal_factor: self.seasonal_factor,
        };
        announce_updated(LayerKind::Humidity, ctx, grid, &state);
        state
    }

    fn value_at(&self, _cell: Cell) -> f64 {
        SEASONAL_AMPLITUDE
            .mul_add(1.0 - self.seasonal_factor, self.base_humidity)
            .clamp(0.0, 1.0)
    }

    fn seasonal_factor(&self) -> f64 {
        self.seasonal_factor
    }
}
