//! Per-tick agent transitions.
//!
//! Agents have no identity beyond their coordinate: whatever prey or predator
//! sits on a listed coordinate when its turn comes is the agent. Agents are
//! stepped one at a time over the shared grid in a freshly shuffled order.
//! Every coordinate a rule writes is settled for the rest of the tick: it is
//! never processed as an origin again and never offered as a move or
//! predation target.

use crate::cell::CellKind;
use crate::config::Rules;
use crate::grid::{AgeMap, Coord, Grid, HungerMap};
use rand::seq::SliceRandom;
use rand::Rng;

/// Counters describing what happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Agents present when the tick started
    pub agents: usize,
    /// Listed coordinates that ran a species rule
    pub processed: usize,
    /// Listed coordinates skipped because they were vacated or already settled
    pub skipped: usize,
    pub prey_moves: usize,
    pub prey_births: usize,
    /// Prey that reached the maximum age
    pub prey_deaths: usize,
    pub predator_moves: usize,
    /// Prey eaten by predators
    pub predations: usize,
    pub predator_births: usize,
    pub starvations: usize,
    /// Claims of a coordinate another rule invocation already settled this
    /// tick. Always zero; kept as an instrumented check.
    pub settle_conflicts: usize,
}

impl TickReport {
    pub fn births(&self) -> usize {
        self.prey_births + self.predator_births
    }

    /// Old age, starvation and predation combined
    pub fn deaths(&self) -> usize {
        self.prey_deaths + self.starvations + self.predations
    }
}

/// Per-tick record of which rule invocation settled each coordinate
#[derive(Debug, Clone)]
pub struct SettledMask {
    owners: Grid<Option<usize>>,
}

impl SettledMask {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            owners: Grid::new(height, width, None),
        }
    }

    pub fn is_settled(&self, coord: Coord) -> bool {
        self.owners.get(coord).is_some()
    }

    /// Settle `coord` on behalf of `owner`
    ///
    /// Returns `false`, leaving the mask untouched, when a different owner
    /// already settled it.
    pub fn claim(&mut self, coord: Coord, owner: usize) -> bool {
        let slot = self.owners.get_mut(coord);
        match *slot {
            Some(previous) if previous != owner => false,
            _ => {
                *slot = Some(owner);
                true
            }
        }
    }

    pub fn settled_count(&self) -> usize {
        self.owners.cells().iter().filter(|o| o.is_some()).count()
    }
}

/// Where a predator ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PredatorMove {
    Fed(Coord),
    Wandered(Coord),
    Stayed,
}

/// Mutable view of the world while one tick is being applied
struct Transition<'a, R: Rng + ?Sized> {
    grid: &'a mut Grid<CellKind>,
    age: &'a mut AgeMap,
    hunger: &'a mut HungerMap,
    rules: &'a Rules,
    rng: &'a mut R,
    settled: SettledMask,
    report: TickReport,
    /// Slot in the processing order of the agent currently stepping
    owner: usize,
}

impl<R: Rng + ?Sized> Transition<'_, R> {
    fn settle(&mut self, coord: Coord) {
        let claimed = self.settled.claim(coord, self.owner);
        if !claimed {
            self.report.settle_conflicts += 1;
        }
        debug_assert!(claimed, "cell {coord:?} settled twice in one tick");
    }

    /// Neighbors holding `kind` that nothing has settled yet this tick
    fn open_neighbors(&self, origin: Coord, kind: CellKind) -> Vec<Coord> {
        let mut candidates = self.grid.neighbors_of_kind(origin, kind);
        candidates.retain(|&n| !self.settled.is_settled(n));
        candidates
    }

    /// Pick one open neighbor holding `kind` uniformly at random
    fn pick(&mut self, origin: Coord, kind: CellKind) -> Option<Coord> {
        let candidates = self.open_neighbors(origin, kind);
        candidates.choose(&mut *self.rng).copied()
    }

    fn step_prey(&mut self, origin: Coord) {
        let origin_age = self.age.get(origin);

        let position = match self.pick(origin, CellKind::Empty) {
            Some(dest) => {
                self.grid.set(dest, CellKind::Prey);
                self.age.set(dest, origin_age + 1);
                self.settle(dest);

                // Reproduction looks at the age before the move
                if origin_age >= self.rules.prey_reproduction_age {
                    self.grid.set(origin, CellKind::Prey);
                    self.age.set(origin, 0);
                    self.age.set(dest, 0);
                    self.report.prey_births += 1;
                } else {
                    self.grid.set(origin, CellKind::Empty);
                }
                self.settle(origin);
                self.report.prey_moves += 1;
                dest
            }
            None => {
                *self.age.get_mut(origin) += 1;
                self.settle(origin);
                origin
            }
        };

        if self.age.get(position) >= self.rules.prey_max_age {
            self.grid.set(position, CellKind::Empty);
            self.settle(position);
            self.report.prey_deaths += 1;
        }
    }

    fn step_predator(&mut self, origin: Coord) {
        let origin_age = self.age.get(origin);
        let origin_hunger = self.hunger.get(origin);

        let movement = match self.pick(origin, CellKind::Prey) {
            Some(prey) => PredatorMove::Fed(prey),
            None => match self.pick(origin, CellKind::Empty) {
                Some(dest) => PredatorMove::Wandered(dest),
                None => PredatorMove::Stayed,
            },
        };

        let position = match movement {
            PredatorMove::Fed(dest) | PredatorMove::Wandered(dest) => {
                let hunger = if let PredatorMove::Fed(_) = movement {
                    self.report.predations += 1;
                    0
                } else {
                    origin_hunger + 1
                };

                // Overwrites (and kills) the prey when feeding
                self.grid.set(dest, CellKind::Predator);
                self.hunger.set(dest, hunger);
                self.age.set(dest, origin_age + 1);
                self.settle(dest);

                if origin_age >= self.rules.predator_reproduction_age {
                    self.grid.set(origin, CellKind::Predator);
                    self.age.set(origin, 0);
                    self.hunger.set(origin, 0);
                    self.age.set(dest, 0);
                    self.report.predator_births += 1;
                } else {
                    self.grid.set(origin, CellKind::Empty);
                }
                self.settle(origin);
                self.report.predator_moves += 1;
                dest
            }
            PredatorMove::Stayed => {
                *self.hunger.get_mut(origin) += 1;
                *self.age.get_mut(origin) += 1;
                self.settle(origin);
                origin
            }
        };

        if self.hunger.get(position) >= self.rules.predator_starvation {
            self.grid.set(position, CellKind::Empty);
            self.settle(position);
            self.report.starvations += 1;
        }
    }
}

/// Advance the world by one generation
///
/// Snapshots every agent coordinate, shuffles the list, then steps each
/// agent in that order. A world with no agents is a legal no-op tick.
pub fn tick<R: Rng + ?Sized>(
    grid: &mut Grid<CellKind>,
    age: &mut AgeMap,
    hunger: &mut HungerMap,
    rules: &Rules,
    rng: &mut R,
) -> TickReport {
    let mut order = grid.agents();
    order.shuffle(&mut *rng);
    apply_in_order(grid, age, hunger, rules, rng, &order)
}

/// Step the agents listed in `order`, in that order
///
/// `rng` is still used for destination and prey choices.
pub fn apply_in_order<R: Rng + ?Sized>(
    grid: &mut Grid<CellKind>,
    age: &mut AgeMap,
    hunger: &mut HungerMap,
    rules: &Rules,
    rng: &mut R,
    order: &[Coord],
) -> TickReport {
    let (height, width) = grid.dimensions();
    let mut step = Transition {
        grid,
        age,
        hunger,
        rules,
        rng,
        settled: SettledMask::new(height, width),
        report: TickReport {
            agents: order.len(),
            ..TickReport::default()
        },
        owner: 0,
    };

    for (slot, &coord) in order.iter().enumerate() {
        // A settled origin was claimed as someone else's destination
        if step.settled.is_settled(coord) {
            step.report.skipped += 1;
            continue;
        }

        step.owner = slot;
        match step.grid.get(coord) {
            CellKind::Prey => step.step_prey(coord),
            CellKind::Predator => step.step_predator(coord),
            CellKind::Empty | CellKind::Obstacle => {
                step.report.skipped += 1;
                continue;
            }
        }
        step.report.processed += 1;
    }

    step.report
}
