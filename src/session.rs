use std::time::Instant;

use tracing::{debug, info};

use crate::clock::TickClock;
use crate::config::GridSize;
use crate::food::CellSource;
use crate::game::{tick, GameMode, GameState, GameStatus};
use crate::input::{Direction, DirectionController, GameInput};

/// One interactive game: its state, committed direction and tick timer.
///
/// The state is replaced wholesale on start, reset and mode change.
pub struct GameSession {
    state: GameState,
    controller: DirectionController,
    clock: TickClock,
    cells: Box<dyn CellSource>,
}

impl GameSession {
    /// Creates an idle session.
    #[must_use]
    pub fn new(mode: GameMode, grid: GridSize, cells: Box<dyn CellSource>) -> Self {
        let state = GameState::initial(mode, grid);
        Self {
            controller: DirectionController::new(state.direction),
            state,
            clock: TickClock::default(),
            cells,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn committed_direction(&self) -> Direction {
        self.controller.committed()
    }

    /// Starts a fresh run from idle or after a finished one.
    pub fn start(&mut self) {
        if !(self.state.status == GameStatus::Idle || self.state.status.is_finished()) {
            return;
        }

        self.reinitialize(self.state.mode);
        self.state.status = GameStatus::Playing;
        info!(mode = %self.state.mode, "game started");
    }

    /// Switches between playing and paused; no effect in other states.
    pub fn toggle_pause(&mut self) {
        self.state.status = match self.state.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            other => other,
        };
        debug!(status = ?self.state.status, "pause toggled");
    }

    /// Abandons the current run and goes back to idle.
    pub fn reset(&mut self) {
        self.reinitialize(self.state.mode);
        debug!("game reset");
    }

    /// Changes the boundary mode; always abandons the current run.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.reinitialize(mode);
        info!(%mode, "mode changed");
    }

    /// Records a direction intent for the next tick.
    ///
    /// Ignored unless a run is in progress.
    pub fn submit_direction(&mut self, intent: Direction) {
        if matches!(self.state.status, GameStatus::Playing | GameStatus::Paused) {
            self.controller.submit(intent);
        }
    }

    /// Applies one game-screen input.
    pub fn handle_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.submit_direction(direction),
            GameInput::StartOrPause => match self.state.status {
                GameStatus::Playing | GameStatus::Paused => self.toggle_pause(),
                _ => self.start(),
            },
            GameInput::Reset => self.reset(),
            GameInput::ToggleMode => self.set_mode(self.state.mode.toggled()),
            GameInput::Leaderboard
            | GameInput::Spectate
            | GameInput::CycleFilter
            | GameInput::Quit => {}
        }
    }

    /// Runs one tick with the committed direction.
    pub fn step(&mut self) {
        let next = tick(&self.state, self.controller.committed(), self.cells.as_mut());
        if next.status != self.state.status {
            info!(
                status = ?next.status,
                score = next.score,
                length = next.snake.len(),
                "game status changed"
            );
        }
        if next.tick_interval_ms != self.state.tick_interval_ms {
            debug!(interval_ms = next.tick_interval_ms, "speed up");
        }

        self.controller.settle(next.direction);
        self.state = next;
    }

    /// Drives the tick timer. Returns true when a tick ran.
    ///
    /// The timer only runs while playing. After each tick it is re-armed
    /// with the interval of the new state.
    pub fn update(&mut self, now: Instant) -> bool {
        if self.state.status != GameStatus::Playing {
            self.clock.cancel();
            return false;
        }

        if !self.clock.is_running() {
            self.clock.schedule(now, self.state.tick_interval());
            return false;
        }

        if !self.clock.is_due(now) {
            return false;
        }

        self.step();
        if self.state.status == GameStatus::Playing {
            self.clock.schedule(now, self.state.tick_interval());
        } else {
            self.clock.cancel();
        }
        true
    }

    fn reinitialize(&mut self, mode: GameMode) {
        self.state = GameState::initial(mode, self.state.grid());
        self.controller = DirectionController::new(self.state.direction);
        self.clock.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::collision::DeathReason;
    use crate::config::GridSize;
    use crate::food::RandomCells;
    use crate::game::{GameMode, GameStatus};
    use crate::input::{Direction, GameInput};
    use crate::snake::Position;

    use super::GameSession;

    fn session() -> GameSession {
        GameSession::new(
            GameMode::Walls,
            GridSize::square(20),
            Box::new(RandomCells::seeded(9)),
        )
    }

    #[test]
    fn status_machine_follows_start_pause_reset() {
        let mut game = session();
        assert_eq!(game.state().status, GameStatus::Idle);

        game.handle_input(GameInput::StartOrPause);
        assert_eq!(game.state().status, GameStatus::Playing);

        game.handle_input(GameInput::StartOrPause);
        assert_eq!(game.state().status, GameStatus::Paused);

        game.handle_input(GameInput::StartOrPause);
        assert_eq!(game.state().status, GameStatus::Playing);

        game.handle_input(GameInput::Reset);
        assert_eq!(game.state().status, GameStatus::Idle);
    }

    #[test]
    fn mode_change_returns_to_idle_with_fresh_state() {
        let mut game = session();
        game.start();
        game.step();

        game.handle_input(GameInput::ToggleMode);

        assert_eq!(game.state().status, GameStatus::Idle);
        assert_eq!(game.state().mode, GameMode::Wrap);
        assert_eq!(game.state().snake.head(), Position::new(10, 10));
    }

    #[test]
    fn reversal_is_ignored_and_turns_apply_next_tick() {
        let mut game = session();
        game.start();

        game.submit_direction(Direction::Left);
        assert_eq!(game.committed_direction(), Direction::Right);

        game.submit_direction(Direction::Up);
        assert_eq!(game.state().direction, Direction::Right);

        game.step();
        assert_eq!(game.state().snake.head(), Position::new(10, 9));
        assert_eq!(game.state().direction, Direction::Up);
    }

    #[test]
    fn two_quick_turns_can_fold_back_onto_the_neck() {
        let mut game = session();
        game.start();

        game.submit_direction(Direction::Up);
        game.submit_direction(Direction::Left);
        assert_eq!(game.committed_direction(), Direction::Left);

        game.step();

        assert_eq!(game.state().status, GameStatus::GameOver);
        assert_eq!(
            game.state().death_reason,
            Some(DeathReason::SelfCollision)
        );
        assert_eq!(game.state().snake.head(), Position::new(10, 10));
    }

    #[test]
    fn intents_are_ignored_while_idle() {
        let mut game = session();

        game.submit_direction(Direction::Down);

        assert_eq!(game.committed_direction(), Direction::Right);
    }

    #[test]
    fn restart_after_game_over_reinitializes() {
        let mut game = session();
        game.start();
        game.submit_direction(Direction::Up);
        for _ in 0..11 {
            game.step();
        }
        assert_eq!(game.state().status, GameStatus::GameOver);

        game.handle_input(GameInput::StartOrPause);

        assert_eq!(game.state().status, GameStatus::Playing);
        assert_eq!(game.state().snake.head(), Position::new(10, 10));
        assert_eq!(game.state().score, 0);
    }

    #[test]
    fn timer_ticks_at_state_interval_and_stops_when_paused() {
        let t0 = Instant::now();
        let mut game = session();
        game.start();

        assert!(!game.update(t0));
        assert!(!game.update(t0 + Duration::from_millis(149)));
        assert!(game.update(t0 + Duration::from_millis(150)));
        assert_eq!(game.state().snake.head(), Position::new(11, 10));

        game.toggle_pause();
        assert!(!game.update(t0 + Duration::from_secs(5)));
        assert_eq!(game.state().snake.head(), Position::new(11, 10));

        game.toggle_pause();
        let resumed = t0 + Duration::from_secs(6);
        assert!(!game.update(resumed));
        assert!(game.update(resumed + Duration::from_millis(150)));
        assert_eq!(game.state().snake.head(), Position::new(12, 10));
    }
}
