//! Moore neighborhood lookups on the torus.

use crate::cell::CellKind;
use crate::grid::{Coord, Grid};

/// Row/column offsets of the eight neighbors, in lookup order
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl<T: Copy> Grid<T> {
    /// Get neighbors of a cell (8-connected, toroidal)
    ///
    /// Every offset wraps independently, so edge and corner cells still have
    /// exactly eight neighbors. On grids narrower than three cells some
    /// neighbors coincide.
    pub fn neighbors(&self, (row, col): Coord) -> [Coord; 8] {
        let (row, col) = (row as isize, col as isize);
        MOORE_OFFSETS.map(|(dr, dc)| self.wrap_coord(row + dr, col + dc))
    }
}

impl Grid<CellKind> {
    /// Neighbors currently holding `kind`, in lookup order
    pub fn neighbors_of_kind(&self, coord: Coord, kind: CellKind) -> Vec<Coord> {
        self.neighbors(coord)
            .into_iter()
            .filter(|&n| self.get(n) == kind)
            .collect()
    }
}
