use std::time::Instant;

use chrono::Local;
use tracing::{info, warn};

use crate::game::{GameMode, GameStatus};
use crate::input::{Direction, GameInput};
use crate::leaderboard::{submit_final_score, ArenaStore, LeaderboardEntry, SubmitError};
use crate::live::Spectator;
use crate::session::GameSession;

/// Top-level screen currently shown.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Screen {
    Game,
    Leaderboard,
    Spectate,
}

/// Result of handing a finished run to the store, shown on the game-over
/// popup.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SubmissionNotice {
    Saved(LeaderboardEntry),
    SignInRequired,
    Failed(String),
}

/// Everything the front-end drives: the game, the store and the spectator.
pub struct App {
    screen: Screen,
    session: GameSession,
    store: ArenaStore,
    spectator: Spectator,
    username: Option<String>,
    leaderboard_filter: Option<GameMode>,
    notice: Option<SubmissionNotice>,
    last_status: GameStatus,
    quit: bool,
}

impl App {
    #[must_use]
    pub fn new(
        session: GameSession,
        store: ArenaStore,
        spectator: Spectator,
        username: Option<String>,
    ) -> Self {
        let last_status = session.state().status;
        Self {
            screen: Screen::Game,
            session,
            store,
            spectator,
            username,
            leaderboard_filter: None,
            notice: None,
            last_status,
            quit: false,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn store(&self) -> &ArenaStore {
        &self.store
    }

    #[must_use]
    pub fn spectator(&self) -> &Spectator {
        &self.spectator
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    #[must_use]
    pub fn leaderboard_filter(&self) -> Option<GameMode> {
        self.leaderboard_filter
    }

    #[must_use]
    pub fn notice(&self) -> Option<&SubmissionNotice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_input(&mut self, input: GameInput) {
        if input == GameInput::Quit {
            self.quit = true;
            return;
        }

        match self.screen {
            Screen::Game => match input {
                GameInput::Leaderboard => self.open(Screen::Leaderboard),
                GameInput::Spectate => self.open(Screen::Spectate),
                other => self.session.handle_input(other),
            },
            Screen::Leaderboard => match input {
                GameInput::CycleFilter => {
                    self.leaderboard_filter = match self.leaderboard_filter {
                        None => Some(GameMode::Walls),
                        Some(GameMode::Walls) => Some(GameMode::Wrap),
                        Some(GameMode::Wrap) => None,
                    };
                }
                GameInput::Reset | GameInput::Leaderboard => self.screen = Screen::Game,
                GameInput::Spectate => self.open(Screen::Spectate),
                _ => {}
            },
            Screen::Spectate => match input {
                GameInput::Direction(Direction::Up | Direction::Left) => {
                    self.spectator.select_previous();
                }
                GameInput::Direction(Direction::Down | Direction::Right) => {
                    self.spectator.select_next();
                }
                GameInput::Reset | GameInput::Spectate => self.close_spectator(),
                GameInput::Leaderboard => {
                    self.close_spectator();
                    self.open(Screen::Leaderboard);
                }
                _ => {}
            },
        }
    }

    /// Advances whatever is running and submits scores of finished runs.
    pub fn update(&mut self, now: Instant) {
        self.session.update(now);
        if self.screen == Screen::Spectate {
            self.spectator.update(now);
        }

        let status = self.session.state().status;
        if status == self.last_status {
            return;
        }

        if status.is_finished() {
            self.submit_finished_run();
        } else {
            self.notice = None;
        }
        self.last_status = status;
    }

    /// Ranked rows for the leaderboard screen.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.store.leaderboard(self.leaderboard_filter)
    }

    fn open(&mut self, screen: Screen) {
        if self.session.state().status == GameStatus::Playing {
            self.session.toggle_pause();
        }
        self.screen = screen;
    }

    fn close_spectator(&mut self) {
        self.spectator.stop();
        self.screen = Screen::Game;
    }

    fn submit_finished_run(&mut self) {
        let today = Local::now().date_naive();
        let state = self.session.state();

        self.notice = match submit_final_score(
            &mut self.store,
            self.username.as_deref(),
            state,
            today,
        ) {
            Ok(Some(entry)) => Some(SubmissionNotice::Saved(entry)),
            Ok(None) => None,
            Err(SubmitError::NotSignedIn) => {
                info!(score = state.score, "guest score not submitted");
                Some(SubmissionNotice::SignInRequired)
            }
            Err(error) => {
                warn!(%error, "score submission failed");
                Some(SubmissionNotice::Failed(error.to_string()))
            }
        };
    }
}
