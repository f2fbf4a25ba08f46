use crate::cell::CellKind;
use crate::config::{Config, Rules, WorldConfig};
use crate::engine::{self, TickReport};
use crate::error::Result;
use crate::grid::{populate, AgeMap, Coord, Grid, HungerMap};
use crate::snapshot::Snapshot;
use crate::stats::{self, Extinction, History, PopulationCounts};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Ticks between periodic summary log lines
const LOG_INTERVAL: u64 = 100;

/// Population samples kept in [`World::history`]
const HISTORY_CAPACITY: usize = 1024;

/// Build the three layers of a fresh world from a seed
pub fn initialize(
    height: usize,
    width: usize,
    p_prey: f64,
    p_predator: f64,
    seed: u64,
) -> Result<(Grid<CellKind>, AgeMap, HungerMap)> {
    let config = WorldConfig {
        height,
        width,
        p_prey,
        p_predator,
        p_obstacle: 0.0,
    };
    config.validate()?;
    let mut rng = SmallRng::seed_from_u64(seed);
    Ok(populate(&config, &mut rng))
}

/// Predator-prey world on a toroidal grid
///
/// Owns the grid layers exclusively; renderers read it through
/// [`World::snapshot`] or [`World::cell_kind`] between ticks.
pub struct World {
    grid: Grid<CellKind>,
    age: AgeMap,
    hunger: HungerMap,

    /// Species thresholds
    pub rules: Rules,

    /// Statistics
    pub total_ticks: u64,
    pub total_births: u64,
    pub total_deaths: u64,
    pub total_predations: u64,

    /// Report of the most recent tick
    pub last_report: TickReport,

    /// Population after each tick, starting with the initial population
    pub history: History,

    seed: Option<u64>,
    rng: SmallRng,
}

impl World {
    /// Validate `config` and populate a new world
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let (grid, age, hunger) = populate(&config.world, &mut rng);

        let world = Self::assemble(grid, age, hunger, config.rules, config.seed, rng);
        log::debug!(
            "[INIT] {}x{} seed:{:?} prey:{} predators:{}",
            config.world.height,
            config.world.width,
            config.seed,
            world.grid.count(CellKind::Prey),
            world.grid.count(CellKind::Predator)
        );
        Ok(world)
    }

    /// Default configuration with a fixed seed
    pub fn with_seed(seed: u64) -> Result<Self> {
        Self::new(Config::seeded(seed))
    }

    /// Start from a prepared grid, every agent at age and hunger zero
    pub fn from_grid(grid: Grid<CellKind>, rules: Rules, seed: u64) -> Result<Self> {
        rules.validate()?;
        let (height, width) = grid.dimensions();
        let age = Grid::new(height, width, 0);
        let hunger = Grid::new(height, width, 0);
        let rng = SmallRng::seed_from_u64(seed);
        Ok(Self::assemble(grid, age, hunger, rules, Some(seed), rng))
    }

    fn assemble(
        grid: Grid<CellKind>,
        age: AgeMap,
        hunger: HungerMap,
        rules: Rules,
        seed: Option<u64>,
        rng: SmallRng,
    ) -> Self {
        let mut history = History::new(HISTORY_CAPACITY);
        history.push(PopulationCounts::from_grid(&grid));

        Self {
            grid,
            age,
            hunger,
            rules,
            total_ticks: 0,
            total_births: 0,
            total_deaths: 0,
            total_predations: 0,
            last_report: TickReport::default(),
            history,
            seed,
            rng,
        }
    }

    /// Advance one generation
    pub fn tick(&mut self) -> TickReport {
        let before = self.counts();

        let report = engine::tick(
            &mut self.grid,
            &mut self.age,
            &mut self.hunger,
            &self.rules,
            &mut self.rng,
        );

        self.total_ticks += 1;
        self.total_births += report.births() as u64;
        self.total_deaths += report.deaths() as u64;
        self.total_predations += report.predations as u64;
        self.last_report = report;

        let after = self.counts();
        self.history.push(after);
        log::trace!("[TICK #{}] {:?}", self.total_ticks, report);

        if self.total_ticks % LOG_INTERVAL == 0 {
            log::info!(
                "[TICK #{}] prey:{} predators:{} births:{} deaths:{}",
                self.total_ticks,
                after.prey,
                after.predator,
                self.total_births,
                self.total_deaths
            );
        }

        // Population crashes
        if before.prey > 0 && after.prey == 0 {
            log::warn!(
                "[EXTINCT] Prey died out at tick {} (was {})",
                self.total_ticks,
                before.prey
            );
        }
        if before.predator > 0 && after.predator == 0 {
            log::warn!(
                "[EXTINCT] Predators died out at tick {} (was {})",
                self.total_ticks,
                before.predator
            );
        }

        report
    }

    /// Run `ticks` generations
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// `(height, width)`
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    /// Kind at `(row, col)`, wrapped onto the grid
    pub fn cell_kind(&self, row: usize, col: usize) -> CellKind {
        self.grid.get((row, col))
    }

    /// Age of the prey or predator at `coord`, `None` if there is none
    pub fn age_at(&self, coord: Coord) -> Option<u32> {
        self.grid
            .get(coord)
            .is_agent()
            .then(|| self.age.get(coord))
    }

    /// Hunger of the predator at `coord`, `None` if there is none
    pub fn hunger_at(&self, coord: Coord) -> Option<u32> {
        (self.grid.get(coord) == CellKind::Predator).then(|| self.hunger.get(coord))
    }

    /// Overwrite a single cell, for scripted scenarios
    pub fn place(&mut self, coord: Coord, kind: CellKind, age: u32, hunger: u32) {
        self.grid.set(coord, kind);
        self.age.set(coord, age);
        self.hunger.set(coord, hunger);
    }

    /// Count current population (parallel)
    pub fn counts(&self) -> PopulationCounts {
        PopulationCounts::from_grid(&self.grid)
    }

    pub fn extinction(&self) -> Extinction {
        self.counts().extinction()
    }

    pub fn average_prey_age(&self) -> f64 {
        stats::average_prey_age(&self.grid, &self.age)
    }

    pub fn average_predator_hunger(&self) -> f64 {
        stats::average_predator_hunger(&self.grid, &self.hunger)
    }

    /// Copy of the current cell kinds for a renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.total_ticks, self.grid.clone())
    }

    pub fn grid(&self) -> &Grid<CellKind> {
        &self.grid
    }

    pub fn age_map(&self) -> &AgeMap {
        &self.age
    }

    pub fn hunger_map(&self) -> &HungerMap {
        &self.hunger
    }

    /// Seed the world was built with, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn into_layers(self) -> (Grid<CellKind>, AgeMap, HungerMap) {
        (self.grid, self.age, self.hunger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn small_config(seed: u64) -> Config {
        let mut config = Config::seeded(seed);
        config.world.height = 20;
        config.world.width = 30;
        config
    }

    #[test]
    fn test_world_creation() {
        let world = World::new(small_config(1)).unwrap();
        assert_eq!(world.dimensions(), (20, 30));
        assert_eq!(world.total_ticks, 0);
        assert_eq!(world.history.len(), 1);
        assert_eq!(world.seed(), Some(1));
    }

    #[test]
    fn test_world_rejects_bad_config() {
        let mut config = small_config(1);
        config.world.height = 0;
        assert!(matches!(
            World::new(config),
            Err(ConfigError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn test_initialize_matches_world() {
        let layers = initialize(20, 30, 0.2, 0.05, 9).unwrap();
        let world = World::new(small_config(9)).unwrap();
        assert_eq!(layers, world.into_layers());
    }

    #[test]
    fn test_initialize_rejects_overpopulation() {
        assert!(matches!(
            initialize(10, 10, 0.9, 0.2, 1),
            Err(ConfigError::OverPopulated { .. })
        ));
    }

    #[test]
    fn test_unseeded_world_runs() {
        let mut config = small_config(0);
        config.seed = None;
        let mut world = World::new(config).unwrap();
        world.run(5);
        assert_eq!(world.seed(), None);
        assert_eq!(world.total_ticks, 5);
    }

    #[test]
    fn test_tick_increments_counter() {
        let mut world = World::new(small_config(2)).unwrap();
        world.tick();
        assert_eq!(world.total_ticks, 1);
        world.tick();
        assert_eq!(world.total_ticks, 2);
        assert_eq!(world.history.len(), 3);
    }

    #[test]
    fn test_empty_world_ticks() {
        let grid = Grid::new(4, 4, CellKind::Empty);
        let mut world = World::from_grid(grid, Rules::default(), 0).unwrap();
        let report = world.tick();
        assert_eq!(report, TickReport::default());
        assert_eq!(world.total_ticks, 1);
        assert_eq!(world.extinction(), Extinction::Both);
    }

    #[test]
    fn test_totals_accumulate_reports() {
        let mut world = World::new(small_config(3)).unwrap();
        let mut births = 0;
        let mut deaths = 0;
        for _ in 0..20 {
            let report = world.tick();
            births += report.births() as u64;
            deaths += report.deaths() as u64;
        }
        assert_eq!(world.total_births, births);
        assert_eq!(world.total_deaths, deaths);
        assert!(world.total_births > 0);
    }

    #[test]
    fn test_population_accounting() {
        let mut world = World::new(small_config(4)).unwrap();
        let mut previous = world.counts();
        for _ in 0..30 {
            let report = world.tick();
            let counts = world.counts();
            assert_eq!(counts.total(), 600);
            let expected = previous.agents() + report.births() - report.deaths();
            assert_eq!(counts.agents(), expected);
            previous = counts;
        }
    }

    #[test]
    fn test_age_and_hunger_accessors() {
        let grid = Grid::new(3, 3, CellKind::Empty);
        let mut world = World::from_grid(grid, Rules::default(), 0).unwrap();
        world.place((0, 0), CellKind::Prey, 3, 99);
        world.place((1, 1), CellKind::Predator, 2, 1);
        world.place((2, 2), CellKind::Empty, 7, 7);

        assert_eq!(world.age_at((0, 0)), Some(3));
        assert_eq!(world.hunger_at((0, 0)), None);
        assert_eq!(world.age_at((1, 1)), Some(2));
        assert_eq!(world.hunger_at((1, 1)), Some(1));
        assert_eq!(world.age_at((2, 2)), None);
        assert_eq!(world.hunger_at((2, 2)), None);
    }

    #[test]
    fn test_cell_kind_wraps() {
        let grid = Grid::from_ascii("o.\n.X").unwrap();
        let world = World::from_grid(grid, Rules::default(), 0).unwrap();
        assert_eq!(world.cell_kind(0, 0), CellKind::Prey);
        assert_eq!(world.cell_kind(3, 5), CellKind::Predator);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut world = World::new(small_config(5)).unwrap();
        let snapshot = world.snapshot();
        world.run(3);
        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.counts(), *world.history.iter().next().unwrap());
        assert_eq!(world.snapshot().tick, 3);
    }

    #[test]
    fn test_seeded_worlds_match() {
        let mut a = World::new(small_config(11)).unwrap();
        let mut b = World::new(small_config(11)).unwrap();
        a.run(25);
        b.run(25);
        assert_eq!(a.into_layers(), b.into_layers());
    }
}
