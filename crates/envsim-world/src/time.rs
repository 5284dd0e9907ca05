//! Simulated time for the environment.
//!
//! The [`TimeKeeper`] is the single source of truth for temporal state. It
//! holds the absolute tick counter; year progress and elapsed years are
//! derived from it on every call and never stored independently.

use crate::error::WorldError;

/// Discrete tick counter with a fixed year length.
///
/// Advances by exactly one tick per [`TimeKeeper::tick`] call. Nothing else
/// mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeKeeper {
    /// Absolute tick count since the start of the run.
    ticks: u64,

    /// Number of ticks in one simulated year (always at least 1).
    ticks_per_year: u64,
}

impl TimeKeeper {
    /// Create a time keeper starting at `initial_ticks`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidTimeConfig`] if `ticks_per_year` is 0.
    pub fn new(ticks_per_year: u64, initial_ticks: u64) -> Result<Self, WorldError> {
        if ticks_per_year == 0 {
            return Err(WorldError::InvalidTimeConfig {
                reason: "ticks_per_year must be at least 1".to_owned(),
            });
        }
        Ok(Self {
            ticks: initial_ticks,
            ticks_per_year,
        })
    }

    /// Create a time keeper starting at tick 0.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidTimeConfig`] if `ticks_per_year` is 0.
    pub fn with_ticks_per_year(ticks_per_year: u64) -> Result<Self, WorldError> {
        Self::new(ticks_per_year, 0)
    }

    /// Advance by one tick. Returns the new tick count.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TickOverflow`] if the counter would exceed
    /// `u64::MAX`.
    pub fn tick(&mut self) -> Result<u64, WorldError> {
        self.ticks = self.ticks.checked_add(1).ok_or(WorldError::TickOverflow)?;
        Ok(self.ticks)
    }

    /// Absolute tick count.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The configured year length.
    pub const fn ticks_per_year(&self) -> u64 {
        self.ticks_per_year
    }

    /// Normalized position within the current year, in `[0, 1)`.
    ///
    /// `(ticks mod ticks_per_year) / ticks_per_year`.
    #[allow(clippy::cast_precision_loss)]
    pub fn year_progress(&self) -> f64 {
        // ticks_per_year >= 1 is guaranteed by the constructor.
        let within = self.ticks.checked_rem(self.ticks_per_year).unwrap_or(0);
        within as f64 / self.ticks_per_year as f64
    }

    /// Number of complete years elapsed.
    pub fn total_years(&self) -> u64 {
        self.ticks.checked_div(self.ticks_per_year).unwrap_or(0)
    }

    /// Ticks remaining until year progress wraps back to 0.
    pub fn ticks_until_year_end(&self) -> u64 {
        let within = self.ticks.checked_rem(self.ticks_per_year).unwrap_or(0);
        self.ticks_per_year.saturating_sub(within)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_initial_ticks() {
        let keeper = TimeKeeper::new(360, 42).unwrap();
        assert_eq!(keeper.ticks(), 42);
        assert_eq!(keeper.ticks_per_year(), 360);
    }

    #[test]
    fn zero_ticks_per_year_is_rejected() {
        let result = TimeKeeper::with_ticks_per_year(0);
        assert!(matches!(result, Err(WorldError::InvalidTimeConfig { .. })));
    }

    #[test]
    fn tick_increments_by_one() {
        let mut keeper = TimeKeeper::with_ticks_per_year(10).unwrap();
        assert_eq!(keeper.tick().unwrap(), 1);
        assert_eq!(keeper.tick().unwrap(), 2);
        assert_eq!(keeper.ticks(), 2);
    }

    #[test]
    fn progress_and_years_follow_modular_arithmetic() {
        for ticks_per_year in [1_u64, 3, 7, 360] {
            let mut keeper = TimeKeeper::with_ticks_per_year(ticks_per_year).unwrap();
            for n in 0..1000_u64 {
                let expected_progress = (n % ticks_per_year) as f64 / ticks_per_year as f64;
                assert_eq!(keeper.year_progress(), expected_progress);
                assert_eq!(keeper.total_years(), n / ticks_per_year);
                assert!((0.0..1.0).contains(&keeper.year_progress()));
                keeper.tick().unwrap();
            }
        }
    }

    #[test]
    fn half_year_after_180_of_360_ticks() {
        let mut keeper = TimeKeeper::with_ticks_per_year(360).unwrap();
        for _ in 0..180 {
            keeper.tick().unwrap();
        }
        assert_eq!(keeper.year_progress(), 0.5);
        assert_eq!(keeper.total_years(), 0);
    }

    #[test]
    fn year_wraps() {
        let keeper = TimeKeeper::new(360, 725).unwrap();
        assert_eq!(keeper.total_years(), 2);
        assert_eq!(keeper.ticks_until_year_end(), 355);
    }

    #[test]
    fn overflow_is_reported() {
        let mut keeper = TimeKeeper::new(360, u64::MAX).unwrap();
        assert!(matches!(keeper.tick(), Err(WorldError::TickOverflow)));
        assert_eq!(keeper.ticks(), u64::MAX);
    }
}
