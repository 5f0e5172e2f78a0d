use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collision::{classify, Collision, DeathReason};
use crate::config::{GridSize, INITIAL_SNAKE_LENGTH, INITIAL_TICK_INTERVAL_MS, POINTS_PER_FOOD};
use crate::difficulty::next_interval;
use crate::food::{place_food, CellSource};
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Boundary policy of the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Leaving the grid is fatal.
    #[default]
    #[serde(rename = "walls")]
    Walls,
    /// Leaving the grid re-enters from the opposite edge.
    #[serde(rename = "pass-through")]
    Wrap,
}

impl GameMode {
    /// Returns the other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Walls => Self::Wrap,
            Self::Wrap => Self::Walls,
        }
    }

    /// Applies the topology to a raw candidate cell.
    #[must_use]
    pub fn resolve(self, candidate: Position, grid: GridSize) -> Position {
        match self {
            Self::Walls => candidate,
            Self::Wrap => candidate.wrapped(grid),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Walls => "Walls",
            Self::Wrap => "Wrap",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
#[error("unknown game mode `{0}` (expected walls or wrap)")]
pub struct ParseModeError(String);

impl FromStr for GameMode {
    type Err = ParseModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "walls" => Ok(Self::Walls),
            "wrap" | "pass-through" => Ok(Self::Wrap),
            _ => Err(ParseModeError(value.to_owned())),
        }
    }
}

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    Idle,
    Playing,
    Paused,
    GameOver,
    /// The snake filled every cell.
    Won,
}

impl GameStatus {
    /// Returns true for states that only a restart can leave.
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::GameOver | Self::Won)
    }
}

/// Complete state of one run.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub direction: Direction,
    pub score: u32,
    pub status: GameStatus,
    pub mode: GameMode,
    pub tick_interval_ms: u64,
    pub death_reason: Option<DeathReason>,
    grid: GridSize,
}

impl GameState {
    /// Creates the idle starting state for `mode` on `grid`.
    ///
    /// The snake lies horizontally with its head in the middle of the board,
    /// moving right towards food three quarters of the way across.
    #[must_use]
    pub fn initial(mode: GameMode, grid: GridSize) -> Self {
        let mid_y = i32::from(grid.height / 2);
        let head = Position::new(i32::from(grid.width / 2), mid_y);
        let food = Position::new(i32::from(grid.width) * 3 / 4, mid_y);

        Self {
            snake: Snake::new(head, INITIAL_SNAKE_LENGTH, Direction::Right),
            food,
            direction: Direction::Right,
            score: 0,
            status: GameStatus::Idle,
            mode,
            tick_interval_ms: INITIAL_TICK_INTERVAL_MS,
            death_reason: None,
            grid,
        }
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Chooses the direction for the next move.
pub trait DirectionPolicy {
    fn choose(&mut self, state: &GameState) -> Direction;
}

/// Uses a direction already filtered by the direction controller.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Committed(pub Direction);

impl DirectionPolicy for Committed {
    fn choose(&mut self, _state: &GameState) -> Direction {
        self.0
    }
}

/// Advances one playing state by one cell using the direction `policy`
/// picks.
///
/// Non-playing states are returned unchanged. A fatal collision only flips
/// the status to `GameOver`. Eating grows the snake, adds
/// [`POINTS_PER_FOOD`], updates the interval and places new food off the
/// grown snake; if no free cell is left the run is `Won`.
#[must_use]
pub fn advance(
    state: &GameState,
    policy: &mut dyn DirectionPolicy,
    cells: &mut dyn CellSource,
) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let direction = policy.choose(state);
    let candidate = state
        .mode
        .resolve(state.snake.head().stepped(direction), state.grid);

    let collision = classify(candidate, &state.snake, state.mode, state.grid);
    if collision != Collision::Safe {
        let mut over = state.clone();
        over.status = GameStatus::GameOver;
        over.death_reason = collision.death_reason();
        return over;
    }

    let mut next = state.clone();
    next.direction = direction;

    if candidate != state.food {
        next.snake.slither(candidate);
        return next;
    }

    next.snake.grow(candidate);
    next.score += POINTS_PER_FOOD;
    next.tick_interval_ms = next_interval(state.tick_interval_ms, next.score);

    match place_food(cells, state.grid, &next.snake) {
        Some(food) => next.food = food,
        None => next.status = GameStatus::Won,
    }

    next
}

/// Advances an interactive game with the committed direction.
#[must_use]
pub fn tick(state: &GameState, committed: Direction, cells: &mut dyn CellSource) -> GameState {
    advance(state, &mut Committed(committed), cells)
}
