//! Core value structs shared across the envsim workspace.
//!
//! Covers grid coordinates, world bounds, the per-query seasonal descriptor,
//! per-layer snapshots, and the tracked-event envelope.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{EventType, Hemisphere, LayerKind, Season};
use crate::ids::{EventId, SessionId};

// ---------------------------------------------------------------------------
// Space
// ---------------------------------------------------------------------------

/// A grid coordinate.
///
/// Coordinates are signed so that out-of-bounds writes (including negative
/// ones) can be expressed and rejected rather than wrapped.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct Cell {
    /// Column, `0` at the left edge.
    pub x: i64,
    /// Row, `0` at the north pole.
    pub y: i64,
}

impl Cell {
    /// Create a cell at `(x, y)`.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Logical size of the simulated world in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldBounds {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl WorldBounds {
    /// Create bounds of `width` by `height` cells.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether `(x, y)` lies inside `[0, width) x [0, height)`.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        (0..i64::from(self.width)).contains(&x) && (0..i64::from(self.height)).contains(&y)
    }

    /// The representative centre cell, using integer halving.
    pub fn center(&self) -> Cell {
        Cell::new(i64::from(self.width / 2), i64::from(self.height / 2))
    }
}

// ---------------------------------------------------------------------------
// Seasons
// ---------------------------------------------------------------------------

/// Seasonal descriptor for one coordinate at one moment.
///
/// Computed fresh for every query and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SeasonalData {
    /// Discrete season label.
    pub discrete_season: Season,
    /// Warmth/light intensity in `[0, 1]`.
    pub continuous_seasonal_factor: f64,
    /// Year progress the descriptor was computed for, in `[0, 1)`.
    pub year_progress: f64,
    /// Curve that applied to the coordinate.
    pub hemisphere: Hemisphere,
    /// Proximity to the nearest season boundary, in `[0, 1]`.
    pub transition_phase: f64,
}

/// A season boundary crossing observed by the season manager.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SeasonTransition {
    /// Hemisphere key the crossing was detected on.
    pub hemisphere: Hemisphere,
    /// Season cached before the crossing.
    pub from: Season,
    /// Season observed after the crossing.
    pub to: Season,
    /// Year progress at which the crossing was observed.
    pub year_progress: f64,
}

// ---------------------------------------------------------------------------
// Layers
// ---------------------------------------------------------------------------

/// Diagnostic snapshot a layer returns from each update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct LayerState {
    /// Year progress of the context the layer refreshed from.
    pub year_progress: f64,
    /// The layer's base parameter (or, for luminosity, its cached factor).
    pub base_value: f64,
    /// Seasonal factor cached for this tick.
    pub seasonal_factor: f64,
}

/// Aggregated per-layer state returned by one environment update.
pub type EnvironmentState = BTreeMap<LayerKind, LayerState>;

// ---------------------------------------------------------------------------
// Tracking
// ---------------------------------------------------------------------------

/// Envelope for a diagnostic event delivered to an event sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TrackedEvent {
    /// Unique event identifier.
    pub id: EventId,
    /// Wall-clock time the event was created.
    pub timestamp: DateTime<Utc>,
    /// Event category.
    pub event_type: EventType,
    /// Session the event belongs to.
    pub session_id: SessionId,
    /// Diagnostic label (for example `season_boundary_crossed`).
    pub label: String,
    /// Label plus caller-supplied payload fields.
    pub payload: serde_json::Value,
}
