//! Toroidal grid storage.
//!
//! The simulation keeps three layers of identical shape: cell kinds, ages and
//! hunger. Each layer is a flat row-major `Grid<T>` for cache locality. Every
//! accessor wraps its coordinate, so no lookup can go out of range.

use crate::cell::CellKind;
use crate::config::WorldConfig;
use crate::error::{ConfigError, Result};
use rand::Rng;

/// `(row, col)` position on the grid
pub type Coord = (usize, usize);

/// Ticks since birth or last reproduction, live only on prey and predator cells
pub type AgeMap = Grid<u32>;

/// Ticks since last meal, live only on predator cells
pub type HungerMap = Grid<u32>;

/// Fixed-size toroidal layer of `T`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    height: usize,
    width: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `fill`
    ///
    /// Both dimensions must be non-zero; [`WorldConfig::validate`] enforces
    /// this before any grid is built.
    pub fn new(height: usize, width: usize, fill: T) -> Self {
        debug_assert!(height > 0 && width > 0, "grid dimensions must be non-zero");
        Self {
            height,
            width,
            cells: vec![fill; height * width],
        }
    }

    /// `(height, width)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert a coordinate to a flat index, wrapping both axes
    #[inline]
    fn grid_index(&self, (row, col): Coord) -> usize {
        (row % self.height) * self.width + (col % self.width)
    }

    /// Wrap signed coordinates for toroidal topology
    #[inline]
    pub fn wrap_coord(&self, row: isize, col: isize) -> Coord {
        (
            row.rem_euclid(self.height as isize) as usize,
            col.rem_euclid(self.width as isize) as usize,
        )
    }

    #[inline]
    pub fn get(&self, coord: Coord) -> T {
        self.cells[self.grid_index(coord)]
    }

    #[inline]
    pub fn set(&mut self, coord: Coord, value: T) {
        let idx = self.grid_index(coord);
        self.cells[idx] = value;
    }

    #[inline]
    pub fn get_mut(&mut self, coord: Coord) -> &mut T {
        let idx = self.grid_index(coord);
        &mut self.cells[idx]
    }

    /// Flat row-major view of the layer
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Every coordinate in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| (row, col)))
    }

    /// Reset every cell to `value`
    pub fn fill(&mut self, value: T) {
        for cell in &mut self.cells {
            *cell = value;
        }
    }
}

impl Grid<CellKind> {
    /// Parse a text grid, one line per row, using [`CellKind::from_char`]
    ///
    /// Blank lines and surrounding whitespace are ignored.
    pub fn from_ascii(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if height == 0 || width == 0 {
            return Err(ConfigError::EmptyGrid { height, width });
        }

        let mut cells = Vec::with_capacity(height * width);
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ConfigError::RaggedRows {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let kind =
                    CellKind::from_char(ch).ok_or(ConfigError::InvalidCell { row, col, ch })?;
                cells.push(kind);
            }
        }

        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Render the grid as text, one line per row
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.height * (self.width + 1));
        for row in self.cells.chunks(self.width) {
            out.extend(row.iter().map(|kind| kind.to_char()));
            out.push('\n');
        }
        out
    }

    /// Number of cells holding `kind`
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&cell| cell == kind).count()
    }

    /// Coordinates of every prey and predator, row-major
    pub fn agents(&self) -> Vec<Coord> {
        self.coords()
            .filter(|&coord| self.get(coord).is_agent())
            .collect()
    }
}

/// Build the three layers for a fresh world
///
/// Each cell takes one uniform draw: below `p_prey` it is prey, below
/// `p_prey + p_predator` a predator, below that plus `p_obstacle` an
/// obstacle, otherwise empty. Ages and hunger all start at zero.
pub fn populate<R: Rng + ?Sized>(
    config: &WorldConfig,
    rng: &mut R,
) -> (Grid<CellKind>, AgeMap, HungerMap) {
    let mut grid = Grid::new(config.height, config.width, CellKind::Empty);
    let age = Grid::new(config.height, config.width, 0);
    let hunger = Grid::new(config.height, config.width, 0);

    let predator_cutoff = config.p_prey + config.p_predator;
    let obstacle_cutoff = predator_cutoff + config.p_obstacle;

    for coord in grid.coords().collect::<Vec<_>>() {
        let roll: f64 = rng.gen();
        let kind = if roll < config.p_prey {
            CellKind::Prey
        } else if roll < predator_cutoff {
            CellKind::Predator
        } else if roll < obstacle_cutoff {
            CellKind::Obstacle
        } else {
            CellKind::Empty
        };
        grid.set(coord, kind);
    }

    (grid, age, hunger)
}
