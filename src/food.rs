use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Source of candidate food cells.
pub trait CellSource {
    /// Draws one cell inside `grid`.
    fn sample(&mut self, grid: GridSize) -> Position;
}

/// Uniformly random cells drawn from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomCells<R = StdRng> {
    rng: R,
}

impl RandomCells<StdRng> {
    /// Seeds from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Creates a reproducible source for tests and simulations.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomCells<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> CellSource for RandomCells<R> {
    fn sample(&mut self, grid: GridSize) -> Position {
        Position {
            x: self.rng.gen_range(0..i32::from(grid.width)),
            y: self.rng.gen_range(0..i32::from(grid.height)),
        }
    }
}

/// Replays a fixed list of cells, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedCells {
    cells: VecDeque<Position>,
}

impl ScriptedCells {
    /// Returns `None` when `cells` is empty.
    #[must_use]
    pub fn new(cells: Vec<Position>) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }
        Some(Self {
            cells: VecDeque::from(cells),
        })
    }
}

impl CellSource for ScriptedCells {
    fn sample(&mut self, _grid: GridSize) -> Position {
        let cell = self.cells[0];
        self.cells.rotate_left(1);
        cell
    }
}

/// Picks a free cell for the next food by rejection sampling.
///
/// Returns `None` when the snake covers the whole grid, which the engine
/// treats as a won game.
#[must_use]
pub fn place_food(cells: &mut dyn CellSource, grid: GridSize, snake: &Snake) -> Option<Position> {
    if snake.len() >= grid.total_cells() {
        return None;
    }

    loop {
        let candidate = cells.sample(grid);
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{place_food, CellSource, RandomCells, ScriptedCells};

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut cells = RandomCells::seeded(7);
        let grid = GridSize::square(8);
        let snake = Snake::new(Position::new(4, 4), 5, Direction::Right);

        for _ in 0..100 {
            let food = place_food(&mut cells, grid, &snake).expect("grid has free cells");
            assert!(!snake.occupies(food));
            assert!(food.is_within_bounds(grid));
        }
    }

    #[test]
    fn occupied_draws_are_rejected() {
        let snake = Snake::new(Position::new(10, 10), 3, Direction::Right);
        let mut cells = ScriptedCells::new(vec![
            Position::new(10, 10),
            Position::new(8, 10),
            Position::new(2, 7),
        ])
        .expect("script is not empty");

        let food = place_food(&mut cells, GridSize::square(20), &snake);

        assert_eq!(food, Some(Position::new(2, 7)));
    }

    #[test]
    fn full_grid_has_no_food_cell() {
        let grid = GridSize::square(2);
        let snake = Snake::from_segments(vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(0, 1),
        ])
        .expect("segments are not empty");
        let mut cells = RandomCells::seeded(1);

        assert_eq!(place_food(&mut cells, grid, &snake), None);
    }

    #[test]
    fn scripted_cells_cycle() {
        let mut cells = ScriptedCells::new(vec![Position::new(1, 1), Position::new(2, 2)])
            .expect("script is not empty");
        let grid = GridSize::square(4);

        assert_eq!(cells.sample(grid), Position::new(1, 1));
        assert_eq!(cells.sample(grid), Position::new(2, 2));
        assert_eq!(cells.sample(grid), Position::new(1, 1));
    }

    #[test]
    fn empty_script_is_rejected() {
        assert!(ScriptedCells::new(Vec::new()).is_none());
    }
}
