use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    /// Space: start from a stopped game, otherwise toggle pause.
    StartOrPause,
    /// Escape: back to idle (or back out of a sub-screen).
    Reset,
    ToggleMode,
    Leaderboard,
    Spectate,
    CycleFilter,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Filters one direction intent against the current movement direction.
///
/// A reversal is silently dropped and `current` is returned.
#[must_use]
pub fn submit(intent: Direction, current: Direction) -> Direction {
    if direction_change_is_valid(current, intent) {
        intent
    } else {
        current
    }
}

/// Holds the direction the next tick will use.
///
/// Each intent is checked against the committed direction and the latest
/// legal intent wins; nothing is queued. Two quick turns between ticks can
/// therefore commit a direction opposite to the last move.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DirectionController {
    committed: Direction,
}

impl DirectionController {
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            committed: direction,
        }
    }

    /// Offers a new intent; returns the committed direction afterwards.
    pub fn submit(&mut self, intent: Direction) -> Direction {
        self.committed = submit(intent, self.committed);
        self.committed
    }

    /// Records the direction a tick actually moved in.
    pub fn settle(&mut self, moved: Direction) {
        self.committed = moved;
    }

    #[must_use]
    pub fn committed(&self) -> Direction {
        self.committed
    }
}

/// Maps one key event to a game input.
///
/// Only presses count; repeats and releases are ignored so one physical
/// press yields exactly one input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Char(' ') => GameInput::StartOrPause,
        KeyCode::Esc => GameInput::Reset,
        KeyCode::Char('m' | 'M') => GameInput::ToggleMode,
        KeyCode::Char('l' | 'L') => GameInput::Leaderboard,
        KeyCode::Char('v' | 'V') => GameInput::Spectate,
        KeyCode::Char('f' | 'F') => GameInput::CycleFilter,
        KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Waits up to `timeout` for a terminal event and maps it to an input.
pub fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) => Ok(map_key(key)),
        _ => Ok(None),
    }
}
