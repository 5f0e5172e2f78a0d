use crate::food::CellSource;
use crate::game::{advance, DirectionPolicy, GameState};
use crate::input::Direction;

/// Greedy bot steering straight at the food, horizontal axis first.
///
/// It never reverses and never looks ahead, so it happily runs into its own
/// body; the shared engine rules end such runs like any other.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct GreedyTowardFood;

impl DirectionPolicy for GreedyTowardFood {
    fn choose(&mut self, state: &GameState) -> Direction {
        let head = state.snake.head();
        let food = state.food;
        let current = state.direction;

        if food.x > head.x && current != Direction::Left {
            Direction::Right
        } else if food.x < head.x && current != Direction::Right {
            Direction::Left
        } else if food.y > head.y && current != Direction::Up {
            Direction::Down
        } else if food.y < head.y && current != Direction::Down {
            Direction::Up
        } else {
            current
        }
    }
}

/// Advances a simulated player by one step without any user input.
#[must_use]
pub fn auto_step(state: &GameState, cells: &mut dyn CellSource) -> GameState {
    advance(state, &mut GreedyTowardFood, cells)
}
