use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::game::GameMode;
use crate::snake::{Position, Snake};

/// Outcome of checking a candidate head cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    Safe,
    SelfCollision,
    BoundaryCollision,
}

/// Why a run ended in `GameOver`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

impl Collision {
    /// Maps a fatal collision to the reason shown on the game-over screen.
    #[must_use]
    pub fn death_reason(self) -> Option<DeathReason> {
        match self {
            Self::Safe => None,
            Self::SelfCollision => Some(DeathReason::SelfCollision),
            Self::BoundaryCollision => Some(DeathReason::WallCollision),
        }
    }
}

/// Classifies `candidate` against the pre-move `snake`.
///
/// Every segment except the current head counts, the tail included.
/// In wrap mode the candidate is expected to be wrapped already.
#[must_use]
pub fn classify(candidate: Position, snake: &Snake, mode: GameMode, grid: GridSize) -> Collision {
    if snake.body_occupies(candidate) {
        return Collision::SelfCollision;
    }

    if mode == GameMode::Walls && !candidate.is_within_bounds(grid) {
        return Collision::BoundaryCollision;
    }

    Collision::Safe
}
