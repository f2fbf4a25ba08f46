//! Point-in-time copy of the grid for renderers.

use crate::cell::CellKind;
use crate::grid::Grid;
use crate::stats::PopulationCounts;
use std::fmt;

/// Owned, read-only frame of cell kinds taken between ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Ticks completed when the frame was taken
    pub tick: u64,
    grid: Grid<CellKind>,
}

impl Snapshot {
    pub fn new(tick: u64, grid: Grid<CellKind>) -> Self {
        Self { tick, grid }
    }

    /// Kind at `(row, col)`, wrapped onto the grid
    pub fn cell_kind(&self, row: usize, col: usize) -> CellKind {
        self.grid.get((row, col))
    }

    /// `(height, width)`
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    pub fn counts(&self) -> PopulationCounts {
        PopulationCounts::from_grid(&self.grid)
    }

    pub fn grid(&self) -> &Grid<CellKind> {
        &self.grid
    }

    pub fn to_ascii(&self) -> String {
        self.grid.to_ascii()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.grid.to_ascii())
    }
}
