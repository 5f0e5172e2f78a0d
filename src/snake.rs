use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Coordinates may briefly fall outside the grid while a move is being
/// resolved; topology correction or collision classification handles that.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y - 1),
            Direction::Down => Self::new(self.x, self.y + 1),
            Direction::Left => Self::new(self.x - 1, self.y),
            Direction::Right => Self::new(self.x + 1, self.y),
        }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: wrap_axis(self.x, i32::from(bounds.width)),
            y: wrap_axis(self.y, i32::from(bounds.height)),
        }
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    ((value % upper_bound) + upper_bound) % upper_bound
}

/// Ordered snake body, head first and tail last.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a straight snake of `length` cells with its head at `head`,
    /// trailing away from `direction`.
    #[must_use]
    pub fn new(head: Position, length: usize, direction: Direction) -> Self {
        let trailing = direction.opposite();
        let body = std::iter::successors(Some(head), |segment| Some(segment.stepped(trailing)))
            .take(length.max(1))
            .collect();

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` for an empty segment list.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: VecDeque::from(segments),
        })
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Moves onto `next_head`, dropping the tail so the length is unchanged.
    pub fn slither(&mut self, next_head: Position) {
        self.body.push_front(next_head);
        let _ = self.body.pop_back();
    }

    /// Moves onto `next_head` and keeps the tail, growing by one segment.
    pub fn grow(&mut self, next_head: Position) {
        self.body.push_front(next_head);
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if any segment behind the head occupies `position`.
    #[must_use]
    pub fn body_occupies(&self, position: Position) -> bool {
        self.body.iter().skip(1).any(|segment| *segment == position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
