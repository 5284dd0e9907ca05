//! Error types for the `envsim-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type.

/// Errors that can occur while building or driving the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// An unknown layer type, season strategy, or transition mode was named
    /// in the configuration. Fatal to environment construction.
    #[error("configuration error: {reason}")]
    Configuration {
        /// Explanation of what could not be resolved.
        reason: String,
    },

    /// A grid write fell outside the declared bounds.
    #[error("coordinates out of bounds: ({x}, {y}) not within {width}x{height}")]
    OutOfBounds {
        /// Requested column.
        x: i64,
        /// Requested row.
        y: i64,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },

    /// World bounds with a zero dimension.
    #[error("invalid world bounds: {width}x{height} (both dimensions must be positive)")]
    InvalidBounds {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Invalid time configuration (e.g. zero ticks per year).
    #[error("invalid time configuration: {reason}")]
    InvalidTimeConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },

    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,
}

impl WorldError {
    /// Shorthand for a [`WorldError::Configuration`] with the given reason.
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }
}
