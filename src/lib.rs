// Library exports for wator-rs
// The headless driver binary and the integration tests use these modules

pub mod cell;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod neighborhood;
pub mod snapshot;
pub mod stats;
pub mod world;

pub use cell::CellKind;
pub use config::{Config, Rules, WorldConfig};
pub use engine::{tick, TickReport};
pub use error::ConfigError;
pub use grid::{AgeMap, Coord, Grid, HungerMap};
pub use snapshot::Snapshot;
pub use stats::{Extinction, PopulationCounts};
pub use world::{initialize, World};
