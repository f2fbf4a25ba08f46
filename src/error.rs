//! Error types for building a simulation.
//!
//! Ticking never fails; only a bad configuration or a malformed text grid
//! can be rejected.

use std::fmt;

/// Reasons a configuration or scripted grid is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Height or width is zero
    EmptyGrid { height: usize, width: usize },
    /// A population fraction is negative, above one, or not finite
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    /// Population fractions add up to more than the whole grid
    OverPopulated { total: f64 },
    /// A lifetime threshold of zero would kill every agent on its first tick
    ZeroThreshold { name: &'static str },
    /// Text grid rows have different lengths
    RaggedRows { row: usize, expected: usize, found: usize },
    /// Text grid contains a character with no cell kind
    InvalidCell { row: usize, col: usize, ch: char },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyGrid { height, width } => {
                write!(f, "grid must be non-empty, got {height}x{width}")
            }
            ConfigError::ProbabilityOutOfRange { name, value } => {
                write!(f, "{name} must be within [0, 1], got {value}")
            }
            ConfigError::OverPopulated { total } => {
                write!(f, "population fractions sum to {total}, which exceeds 1")
            }
            ConfigError::ZeroThreshold { name } => write!(f, "{name} must be at least 1"),
            ConfigError::RaggedRows {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            ConfigError::InvalidCell { row, col, ch } => {
                write!(f, "invalid cell character '{ch}' at ({row}, {col})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type for simulation construction.
pub type Result<T> = std::result::Result<T, ConfigError>;
