//! Population statistics over the grid layers.

use crate::cell::CellKind;
use crate::grid::{AgeMap, Grid, HungerMap};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of cells of each kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub empty: usize,
    pub prey: usize,
    pub predator: usize,
    pub obstacle: usize,
}

impl PopulationCounts {
    /// Count every cell kind (parallel)
    pub fn from_grid(grid: &Grid<CellKind>) -> Self {
        grid.cells()
            .par_iter()
            .fold(PopulationCounts::default, |mut acc, &kind| {
                acc.add(kind);
                acc
            })
            .reduce(PopulationCounts::default, |a, b| PopulationCounts {
                empty: a.empty + b.empty,
                prey: a.prey + b.prey,
                predator: a.predator + b.predator,
                obstacle: a.obstacle + b.obstacle,
            })
    }

    fn add(&mut self, kind: CellKind) {
        match kind {
            CellKind::Empty => self.empty += 1,
            CellKind::Prey => self.prey += 1,
            CellKind::Predator => self.predator += 1,
            CellKind::Obstacle => self.obstacle += 1,
        }
    }

    /// Always equals the number of cells on the grid
    pub fn total(&self) -> usize {
        self.empty + self.prey + self.predator + self.obstacle
    }

    pub fn agents(&self) -> usize {
        self.prey + self.predator
    }

    pub fn extinction(&self) -> Extinction {
        match (self.prey, self.predator) {
            (0, 0) => Extinction::Both,
            (0, _) => Extinction::Prey,
            (_, 0) => Extinction::Predators,
            _ => Extinction::Neither,
        }
    }
}

/// Which species have died out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extinction {
    Neither,
    Prey,
    Predators,
    Both,
}

/// Mean age over live prey, 0.0 when there are none (parallel)
pub fn average_prey_age(grid: &Grid<CellKind>, age: &AgeMap) -> f64 {
    average_where(grid, age, CellKind::Prey)
}

/// Mean hunger over live predators, 0.0 when there are none (parallel)
pub fn average_predator_hunger(grid: &Grid<CellKind>, hunger: &HungerMap) -> f64 {
    average_where(grid, hunger, CellKind::Predator)
}

/// Average `values` over cells holding `kind`, never touching stale entries
fn average_where(grid: &Grid<CellKind>, values: &Grid<u32>, kind: CellKind) -> f64 {
    let (total, count) = grid
        .cells()
        .par_iter()
        .zip(values.cells().par_iter())
        .filter(|&(&cell, _)| cell == kind)
        .map(|(_, &value)| (u64::from(value), 1usize))
        .reduce(|| (0, 0), |acc, val| (acc.0 + val.0, acc.1 + val.1));

    if count > 0 {
        total as f64 / count as f64
    } else {
        0.0
    }
}

/// Bounded per-tick population series, oldest first
#[derive(Debug, Clone)]
pub struct History {
    capacity: usize,
    samples: VecDeque<PopulationCounts>,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            samples: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    /// Record a sample, dropping the oldest once full
    pub fn push(&mut self, counts: PopulationCounts) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(counts);
    }

    pub fn latest(&self) -> Option<&PopulationCounts> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PopulationCounts> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn peak_prey(&self) -> usize {
        self.samples.iter().map(|c| c.prey).max().unwrap_or(0)
    }

    pub fn peak_predators(&self) -> usize {
        self.samples.iter().map(|c| c.predator).max().unwrap_or(0)
    }
}
