//! Luminosity layer: the seasonal factor itself, clamped to `[0, 1]`.

use envsim_types::{Cell, LayerKind, LayerParams, LayerState};

use super::{EnvironmentLayer, announce_created, announce_updated};
use crate::context::LayerContext;
use crate::grid::SparseGrid;

/// Light intensity field.
#[derive(Debug, Clone, PartialEq)]
pub struct LuminosityLayer {
    seasonal_factor: f64,
}

impl LuminosityLayer {
    /// Build the layer, capturing the seasonal factor from `ctx`.
    ///
    /// Luminosity takes no parameters.
    pub fn new(_params: &LayerParams, ctx: &LayerContext<'_>) -> Self {
        let layer = Self {
            seasonal_factor: ctx.seasonal_factor(),
        };
        announce_created(LayerKind::Luminosity, ctx);
        layer
    }
}

impl EnvironmentLayer for LuminosityLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Luminosity
    }

    fn update(&mut self, ctx: &LayerContext<'_>, grid: &SparseGrid) -> LayerState {
        self.seasonal_factor = ctx.seasonal_factor();
        // No base parameter; the snapshot reports the cached factor instead.
        let state = LayerState {
            year_progress: ctx.seasonal_data().year_progress,
            base_value: self.seasonal_factor,
            seasonal_factor: self.seasonal_factor,
        };
        announce_updated(LayerKind::Luminosity, ctx, grid, &state);
        state
    }

    fn value_at(&self, _cell: Cell) -> f64 {
        self.seasonal_factor.clamp(0.0, 1.0)
    }

    fn seasonal_factor(&self) -> f64 {
        self.seasonal_factor
    }
}
