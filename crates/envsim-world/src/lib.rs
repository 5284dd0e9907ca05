//! Time, space, seasons, and environment layers for the envsim simulation.
//!
//! This crate owns everything that changes with the calendar: the tick
//! counter, the sparse cell grid, the season strategies and the manager
//! that detects season changes, and the layers that turn a seasonal
//! factor into a per-cell field value.
//!
//! # Modules
//!
//! - [`context`] -- [`LayerContext`], the immutable bundle handed to layers.
//! - [`environment`] -- [`CompositeEnvironment`], the top-level facade that
//!   steps the season manager and refreshes every layer.
//! - [`error`] -- Error types for world operations.
//! - [`grid`] -- [`SparseGrid`], the set of active cells within fixed bounds.
//! - [`layer`] -- The [`EnvironmentLayer`] trait and the temperature,
//!   humidity, and luminosity layers.
//! - [`registry`] -- Name resolution and constructors for configurable
//!   components.
//! - [`season`] -- Seasonal curves, the hemispheric and global strategies,
//!   and the [`SeasonManager`].
//! - [`time`] -- [`TimeKeeper`], the tick counter and year progress.
//! - [`tracker`] -- The [`Tracker`] diagnostic sink trait.
//!
//! [`EnvironmentLayer`]: layer::EnvironmentLayer
//! [`SeasonManager`]: season::SeasonManager

pub mod context;
pub mod environment;
pub mod error;
pub mod grid;
pub mod layer;
pub mod registry;
pub mod season;
pub mod time;
pub mod tracker;

// Re-export primary types at crate root.
pub use context::LayerContext;
pub use environment::CompositeEnvironment;
pub use error::WorldError;
pub use grid::SparseGrid;
pub use layer::{EnvironmentLayer, HumidityLayer, LuminosityLayer, TemperatureLayer};
pub use season::{GlobalUniformStrategy, HemisphericStrategy, SeasonManager, SeasonStrategy};
pub use time::TimeKeeper;
pub use tracker::{NoopTracker, RecordingTracker, TrackCall, Tracker};
