//! Headless driver - run the default world and print population progress
//! Run with: cargo run --release

use wator_rs::{Config, Extinction, World};

/// Stop after this many ticks even if both species survive
const MAX_TICKS: u64 = 1000;

/// Ticks between progress lines
const REPORT_INTERVAL: u64 = 50;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut world = World::new(Config::default())?;
    let (height, width) = world.dimensions();
    let counts = world.counts();
    log::info!(
        "[WATOR] Starting {}x{} world with {} prey and {} predators",
        height,
        width,
        counts.prey,
        counts.predator
    );

    while world.total_ticks < MAX_TICKS {
        world.tick();

        if world.total_ticks % REPORT_INTERVAL == 0 {
            let counts = world.counts();
            println!(
                "Tick {}: prey={} predators={} avg_prey_age={:.1} avg_hunger={:.1}",
                world.total_ticks,
                counts.prey,
                counts.predator,
                world.average_prey_age(),
                world.average_predator_hunger()
            );
        }

        if world.extinction() == Extinction::Both {
            break;
        }
    }

    println!("\n{}", world.snapshot());
    println!("--- Simulation Complete ---");
    println!("Ticks: {}", world.total_ticks);
    println!("Total births: {}", world.total_births);
    println!("Total deaths: {}", world.total_deaths);
    println!("Prey eaten: {}", world.total_predations);
    println!(
        "Peak prey: {}  Peak predators: {}",
        world.history.peak_prey(),
        world.history.peak_predators()
    );

    match world.extinction() {
        Extinction::Neither => println!("Both species survived."),
        Extinction::Prey => println!("Prey went extinct."),
        Extinction::Predators => println!("Predators went extinct."),
        Extinction::Both => println!("Both species went extinct."),
    }

    Ok(())
}
