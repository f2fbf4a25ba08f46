use serde::{Deserialize, Serialize};

/// What occupies a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Empty,
    Prey,
    Predator,
    /// Never moves, never eaten, never a move target
    Obstacle,
}

impl CellKind {
    /// Prey and predators are agents; everything else is scenery
    pub fn is_agent(self) -> bool {
        matches!(self, CellKind::Prey | CellKind::Predator)
    }

    /// Convert a character to a cell kind
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(CellKind::Empty),
            'o' | 'O' => Some(CellKind::Prey),
            'x' | 'X' => Some(CellKind::Predator),
            '#' => Some(CellKind::Obstacle),
            _ => None,
        }
    }

    /// Convert a cell kind to its display character
    pub fn to_char(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Prey => 'o',
            CellKind::Predator => 'X',
            CellKind::Obstacle => '#',
        }
    }
}
