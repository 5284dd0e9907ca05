//! Sparse bounded grid of active cells.
//!
//! A cell is "active" simply by being present in the set; it carries no
//! payload. Writes outside the declared [`WorldBounds`] are rejected.

use std::collections::HashSet;

use envsim_types::{Cell, WorldBounds};

use crate::error::WorldError;

/// Bounded sparse set of active coordinates.
///
/// Membership and lookup are O(1) amortized. The bounds are fixed at
/// construction.
#[derive(Debug, Clone)]
pub struct SparseGrid {
    /// Immutable world size.
    bounds: WorldBounds,
    /// Active cells.
    cells: HashSet<Cell>,
}

impl SparseGrid {
    /// Create an empty grid with the given bounds.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidBounds`] if either dimension is 0.
    pub fn new(bounds: WorldBounds) -> Result<Self, WorldError> {
        if bounds.width == 0 || bounds.height == 0 {
            return Err(WorldError::InvalidBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }
        Ok(Self {
            bounds,
            cells: HashSet::new(),
        })
    }

    /// Create a grid with every in-bounds cell already active.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidBounds`] if either dimension is 0.
    pub fn filled(bounds: WorldBounds) -> Result<Self, WorldError> {
        let mut grid = Self::new(bounds)?;
        for y in 0..i64::from(bounds.height) {
            for x in 0..i64::from(bounds.width) {
                grid.cells.insert(Cell::new(x, y));
            }
        }
        Ok(grid)
    }

    /// Mark `(x, y)` active. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `x` is outside `[0, width)` or
    /// `y` is outside `[0, height)`.
    pub fn set_cell(&mut self, x: i64, y: i64) -> Result<(), WorldError> {
        if !self.bounds.contains(x, y) {
            return Err(WorldError::OutOfBounds {
                x,
                y,
                width: self.bounds.width,
                height: self.bounds.height,
            });
        }
        self.cells.insert(Cell::new(x, y));
        Ok(())
    }

    /// Whether `(x, y)` lies inside the bounds, active or not.
    pub fn contains_in_bounds(&self, x: i64, y: i64) -> bool {
        self.bounds.contains(x, y)
    }

    /// Return the active cell at `(x, y)`, if any.
    pub fn cell(&self, x: i64, y: i64) -> Option<Cell> {
        self.cells.get(&Cell::new(x, y)).copied()
    }

    /// Whether `(x, y)` is active.
    pub fn has_cell(&self, x: i64, y: i64) -> bool {
        self.cells.contains(&Cell::new(x, y))
    }

    /// Snapshot of all active cells. Order is not meaningful.
    pub fn all_cells(&self) -> Vec<Cell> {
        self.cells.iter().copied().collect()
    }

    /// The grid's bounds.
    pub const fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Grid width in cells.
    pub const fn width(&self) -> u32 {
        self.bounds.width
    }

    /// Grid height in cells.
    pub const fn height(&self) -> u32 {
        self.bounds.height
    }

    /// Number of active cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is active.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
