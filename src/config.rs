//! Simulation configuration.
//!
//! Defaults reproduce the classic 50x50 rabbits-and-foxes setup. The structs
//! derive serde so a front end can persist them; nothing here touches files.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Full configuration for a [`World`](crate::world::World)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub world: WorldConfig,
    pub rules: Rules,
    /// Seed for initialization and every per-tick draw; `None` uses entropy
    pub seed: Option<u64>,
}

/// Grid size and initial population fractions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub height: usize,
    pub width: usize,
    /// Probability that a cell starts as prey
    pub p_prey: f64,
    /// Probability that a cell starts as a predator
    pub p_predator: f64,
    /// Probability that a cell starts as an obstacle
    pub p_obstacle: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            height: 50,
            width: 50,
            p_prey: 0.2,
            p_predator: 0.05,
            p_obstacle: 0.0,
        }
    }
}

/// Species thresholds, all measured in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Prey at or above this age leave offspring behind when they move
    pub prey_reproduction_age: u32,
    /// Prey reaching this age die
    pub prey_max_age: u32,
    /// Predators at or above this age leave offspring behind when they move
    pub predator_reproduction_age: u32,
    /// Predators reaching this many ticks without food die
    pub predator_starvation: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            prey_reproduction_age: 5,
            prey_max_age: 20,
            predator_reproduction_age: 8,
            predator_starvation: 4,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.height == 0 || self.width == 0 {
            return Err(ConfigError::EmptyGrid {
                height: self.height,
                width: self.width,
            });
        }

        for (name, value) in [
            ("p_prey", self.p_prey),
            ("p_predator", self.p_predator),
            ("p_obstacle", self.p_obstacle),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }

        let total = self.p_prey + self.p_predator + self.p_obstacle;
        if total > 1.0 {
            return Err(ConfigError::OverPopulated { total });
        }

        Ok(())
    }
}

impl Rules {
    pub fn validate(&self) -> Result<()> {
        if self.prey_max_age == 0 {
            return Err(ConfigError::ZeroThreshold {
                name: "prey_max_age",
            });
        }
        if self.predator_starvation == 0 {
            return Err(ConfigError::ZeroThreshold {
                name: "predator_starvation",
            });
        }
        Ok(())
    }
}

impl Config {
    /// Default configuration with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;
        self.rules.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_setup() {
        let config = Config::default();
        assert_eq!(config.world.height, 50);
        assert_eq!(config.world.width, 50);
        assert_eq!(config.world.p_prey, 0.2);
        assert_eq!(config.world.p_predator, 0.05);
        assert_eq!(config.world.p_obstacle, 0.0);
        assert_eq!(config.rules.prey_reproduction_age, 5);
        assert_eq!(config.rules.prey_max_age, 20);
        assert_eq!(config.rules.predator_reproduction_age, 8);
        assert_eq!(config.rules.predator_starvation, 4);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_grid() {
        let mut config = Config::default();
        config.world.width = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid {
                height: 50,
                width: 0
            })
        );
    }

    #[test]
    fn test_rejects_out_of_range_probability() {
        let mut config = Config::default();
        config.world.p_predator = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange {
                name: "p_predator",
                ..
            })
        ));

        config.world.p_predator = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_overpopulation() {
        let mut config = Config::default();
        config.world.p_prey = 0.7;
        config.world.p_predator = 0.4;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OverPopulated { .. })
        ));
    }

    #[test]
    fn test_full_population_is_allowed() {
        let mut config = Config::default();
        config.world.p_prey = 0.5;
        config.world.p_predator = 0.5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_thresholds() {
        let mut config = Config::default();
        config.rules.predator_starvation = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroThreshold {
                name: "predator_starvation"
            })
        );

        // Zero reproduction age is legal: every mover reproduces
        let mut config = Config::default();
        config.rules.prey_reproduction_age = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"world": {"height": 10}, "seed": 7}"#).unwrap();
        assert_eq!(config.world.height, 10);
        assert_eq!(config.world.width, 50);
        assert_eq!(config.rules, Rules::default());
        assert_eq!(config.seed, Some(7));
    }
}
