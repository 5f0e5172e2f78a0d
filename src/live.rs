use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::agent::auto_step;
use crate::clock::TickClock;
use crate::config::{
    GridSize, FEED_REFRESH_INTERVAL_MS, MAX_SIMULATED_START_SCORE, POINTS_PER_FOOD,
    SPECTATE_TICK_INTERVAL_MS,
};
use crate::food::{place_food, CellSource, RandomCells};
use crate::game::{GameMode, GameState, GameStatus};

const BOT_NAMES: &[&str] = &[
    "PixelMaster",
    "NeonNinja",
    "RetroGamer",
    "ArcadeAce",
    "ByteBiter",
    "GridGhost",
    "TailChaser",
    "VectorViper",
];

/// Snapshot of someone else's game.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ActivePlayer {
    pub id: String,
    pub username: String,
    pub state: GameState,
    pub started_at: DateTime<Utc>,
}

impl ActivePlayer {
    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.state.mode
    }
}

/// Supplies the players currently online.
pub trait PlayerFeed {
    fn active_players(&mut self) -> Vec<ActivePlayer>;
}

/// Feed of locally generated bot players.
pub struct SimulatedFeed<R = StdRng> {
    rng: R,
    grid: GridSize,
    roster: Vec<ActivePlayer>,
}

impl SimulatedFeed<StdRng> {
    /// Creates `count` bots seeded from OS entropy.
    #[must_use]
    pub fn from_entropy(count: usize, grid: GridSize) -> Self {
        Self::new(StdRng::from_entropy(), count, grid)
    }
}

impl<R: Rng> SimulatedFeed<R> {
    #[must_use]
    pub fn new(rng: R, count: usize, grid: GridSize) -> Self {
        let mut feed = Self {
            rng,
            grid,
            roster: Vec::with_capacity(count),
        };

        for index in 0..count {
            let player = feed.generate(index);
            feed.roster.push(player);
        }
        feed
    }

    fn generate(&mut self, index: usize) -> ActivePlayer {
        let mode = if self.rng.gen_bool(0.5) {
            GameMode::Walls
        } else {
            GameMode::Wrap
        };

        let mut state = GameState::initial(mode, self.grid);
        state.status = GameStatus::Playing;
        state.score =
            self.rng.gen_range(0..=MAX_SIMULATED_START_SCORE / POINTS_PER_FOOD) * POINTS_PER_FOOD;
        let mut cells = RandomCells::new(&mut self.rng);
        if let Some(food) = place_food(&mut cells, self.grid, &state.snake) {
            state.food = food;
        }

        let base = BOT_NAMES[index % BOT_NAMES.len()];
        let username = if index < BOT_NAMES.len() {
            base.to_owned()
        } else {
            format!("{base}{}", index / BOT_NAMES.len() + 1)
        };
        let minutes_ago = self.rng.gen_range(0..10);

        ActivePlayer {
            id: format!("bot-{}", index + 1),
            username,
            state,
            started_at: Utc::now() - chrono::Duration::minutes(minutes_ago),
        }
    }
}

impl<R: Rng> PlayerFeed for SimulatedFeed<R> {
    fn active_players(&mut self) -> Vec<ActivePlayer> {
        self.roster.clone()
    }
}

/// One watched player with its own independent tick timer.
#[derive(Debug, Clone)]
pub struct Spectated {
    pub player: ActivePlayer,
    clock: TickClock,
}

/// Watches the feed and animates every listed player with the bot agent.
pub struct Spectator {
    feed: Box<dyn PlayerFeed>,
    cells: Box<dyn CellSource>,
    players: Vec<Spectated>,
    selected: usize,
    refresh: TickClock,
}

impl Spectator {
    #[must_use]
    pub fn new(feed: Box<dyn PlayerFeed>, cells: Box<dyn CellSource>) -> Self {
        Self {
            feed,
            cells,
            players: Vec::new(),
            selected: 0,
            refresh: TickClock::default(),
        }
    }

    /// Pulls the roster from the feed.
    ///
    /// Players still listed keep their locally advanced game; players that
    /// disappeared are dropped. The selection follows the selected player.
    pub fn refresh(&mut self, now: Instant) {
        let selected_id = self.selected().map(|player| player.id.clone());
        let mut previous = std::mem::take(&mut self.players);

        self.players = self
            .feed
            .active_players()
            .into_iter()
            .map(|player| {
                match previous.iter().position(|known| known.player.id == player.id) {
                    Some(index) => previous.swap_remove(index),
                    None => Spectated {
                        player,
                        clock: TickClock::default(),
                    },
                }
            })
            .collect();

        self.selected = selected_id
            .and_then(|id| self.players.iter().position(|s| s.player.id == id))
            .unwrap_or(0);
        self.refresh
            .schedule(now, Duration::from_millis(FEED_REFRESH_INTERVAL_MS));
        debug!(players = self.players.len(), "spectator feed refreshed");
    }

    /// Refreshes the roster when due and advances every player whose own
    /// timer fired. Returns how many players moved.
    pub fn update(&mut self, now: Instant) -> usize {
        if !self.refresh.is_running() || self.refresh.is_due(now) {
            self.refresh(now);
        }

        let interval = Duration::from_millis(SPECTATE_TICK_INTERVAL_MS);
        let mut moved = 0;
        for watched in &mut self.players {
            if !watched.clock.is_running() {
                watched.clock.schedule(now, interval);
                continue;
            }
            if !watched.clock.is_due(now) {
                continue;
            }

            watched.player.state = auto_step(&watched.player.state, self.cells.as_mut());
            if watched.player.state.status.is_finished() {
                info!(
                    player = %watched.player.username,
                    score = watched.player.state.score,
                    "simulated game ended, restarting"
                );
                watched.player.state = restart(&watched.player.state, self.cells.as_mut());
            }
            watched.clock.schedule(now, interval);
            moved += 1;
        }
        moved
    }

    /// Stops all timers. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.refresh.cancel();
        for watched in &mut self.players {
            watched.clock.cancel();
        }
    }

    #[must_use]
    pub fn players(&self) -> &[Spectated] {
        &self.players
    }

    #[must_use]
    pub fn selected(&self) -> Option<&ActivePlayer> {
        self.players.get(self.selected).map(|watched| &watched.player)
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if !self.players.is_empty() {
            self.selected = (self.selected + 1) % self.players.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.players.is_empty() {
            self.selected = (self.selected + self.players.len() - 1) % self.players.len();
        }
    }
}

fn restart(finished: &GameState, cells: &mut dyn CellSource) -> GameState {
    let mut fresh = GameState::initial(finished.mode, finished.grid());
    fresh.status = GameStatus::Playing;
    if let Some(food) = place_food(cells, fresh.grid(), &fresh.snake) {
        fresh.food = food;
    }
    fresh
}
