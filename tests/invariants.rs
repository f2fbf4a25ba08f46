//! Property tests for the tick invariants over random worlds

use proptest::prelude::*;
use wator_rs::{CellKind, Config, Rules, World};

fn config(seed: u64, height: usize, width: usize, rules: Rules) -> Config {
    let mut config = Config::seeded(seed);
    config.world.height = height;
    config.world.width = width;
    config.world.p_prey = 0.3;
    config.world.p_predator = 0.1;
    config.world.p_obstacle = 0.05;
    config.rules = rules;
    config
}

fn rules_strategy() -> impl Strategy<Value = Rules> {
    (0u32..10, 1u32..25, 0u32..12, 1u32..8).prop_map(
        |(prey_reproduction_age, prey_max_age, predator_reproduction_age, predator_starvation)| {
            Rules {
                prey_reproduction_age,
                prey_max_age,
                predator_reproduction_age,
                predator_starvation,
            }
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn population_is_conserved(
        seed in any::<u64>(),
        height in 1usize..24,
        width in 1usize..24,
        ticks in 1usize..40,
    ) {
        let mut world = World::new(config(seed, height, width, Rules::default())).unwrap();
        let obstacles = world.counts().obstacle;
        for _ in 0..ticks {
            world.tick();
            let counts = world.counts();
            prop_assert_eq!(counts.total(), height * width);
            prop_assert_eq!(counts.obstacle, obstacles);
        }
    }

    #[test]
    fn no_cell_is_settled_twice(
        seed in any::<u64>(),
        height in 1usize..24,
        width in 1usize..24,
        rules in rules_strategy(),
    ) {
        let mut world = World::new(config(seed, height, width, rules)).unwrap();
        for _ in 0..30 {
            let report = world.tick();
            prop_assert_eq!(report.settle_conflicts, 0);
            prop_assert_eq!(report.processed + report.skipped, report.agents);
        }
    }

    #[test]
    fn age_and_hunger_stay_below_thresholds(
        seed in any::<u64>(),
        height in 1usize..24,
        width in 1usize..24,
        rules in rules_strategy(),
    ) {
        let mut world = World::new(config(seed, height, width, rules)).unwrap();
        for _ in 0..30 {
            world.tick();
            for coord in world.grid().coords() {
                match world.cell_kind(coord.0, coord.1) {
                    CellKind::Prey => {
                        let age = world.age_at(coord).unwrap();
                        prop_assert!(age < rules.prey_max_age);
                    }
                    CellKind::Predator => {
                        let hunger = world.hunger_at(coord).unwrap();
                        prop_assert!(hunger < rules.predator_starvation);
                    }
                    CellKind::Empty | CellKind::Obstacle => {}
                }
            }
        }
    }

    #[test]
    fn fixed_seed_runs_are_identical(
        seed in any::<u64>(),
        height in 1usize..24,
        width in 1usize..24,
        ticks in 0u64..30,
    ) {
        let mut first = World::new(config(seed, height, width, Rules::default())).unwrap();
        let mut second = World::new(config(seed, height, width, Rules::default())).unwrap();
        first.run(ticks);
        second.run(ticks);
        prop_assert_eq!(first.last_report, second.last_report);
        prop_assert_eq!(first.into_layers(), second.into_layers());
    }
}
