//! Atmospheric temperature layer.
//!
//! `base + 10 * (2f - 1) + 5 * (1 - |y - 20| / 20)`
//!
//! The latitudinal term assumes a 40-row world (equator at row 20)
//! regardless of the actual grid height. That is observed behavior of the
//! model and is kept as is.

use envsim_types::{Cell, LayerKind, LayerParams, LayerState};

use super::{EnvironmentLayer, announce_created, announce_updated};
use crate::context::LayerContext;
use crate::grid::SparseGrid;

/// Baseline temperature when none is configured.
pub const DEFAULT_BASE_TEMPERATURE: f64 = 20.0;

/// Swing contributed by the season, in degrees either side of the base.
const SEASONAL_AMPLITUDE: f64 = 10.0;

/// Bonus at the equator, falling off linearly towards the poles.
const LATITUDE_AMPLITUDE: f64 = 5.0;

/// Fixed equator row.
const ASSUMED_EQUATOR_Y: f64 = 20.0;

/// Fixed distance from equator to pole.
const ASSUMED_HALF_HEIGHT: f64 = 20.0;

/// Temperature field.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureLayer {
    base_temperature: f64,
    seasonal_factor: f64,
}

impl TemperatureLayer {
    /// Build the layer, capturing the seasonal factor from `ctx`.
    pub fn new(params: &LayerParams, ctx: &LayerContext<'_>) -> Self {
        let layer = Self {
            base_temperature: params.base_temperature.unwrap_or(DEFAULT_BASE_TEMPERATURE),
            seasonal_factor: ctx.seasonal_factor(),
        };
        announce_created(LayerKind::Temperature, ctx);
        layer
    }

    /// The configured baseline.
    pub const fn base_temperature(&self) -> f64 {
        self.base_temperature
    }
}

impl EnvironmentLayer for TemperatureLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Temperature
    }

    fn update(&mut self, ctx: &LayerContext<'_>, grid: &SparseGrid) -> LayerState {
        self.seasonal_factor = ctx.seasonal_factor();
        let state = LayerState {
            year_progress: ctx.seasonal_data().year_progress,
            base_value: self.base_temperature,
            seasonal_factor: self.seasonal_factor,
        };
        announce_updated(LayerKind::Temperature, ctx, grid, &state);
        state
    }

    #[allow(clippy::cast_precision_loss)]
    fn value_at(&self, cell: Cell) -> f64 {
        let signed_seasonal = self.seasonal_factor.mul_add(2.0, -1.0);
        let latitudinal = 1.0 - (cell.y as f64 - ASSUMED_EQUATOR_Y).abs() / ASSUMED_HALF_HEIGHT;
        LATITUDE_AMPLITUDE.mul_add(
            latitudinal,
            SEASONAL_AMPLITUDE.mul_add(signed_seasonal, self.base_temperature),
        )
    }

    fn seasonal_factor(&self) -> f64 {
        self.seasonal_factor
    }
}
