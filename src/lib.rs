//! Terminal Snake arena: the tick engine, the greedy bot agent, a local
//! leaderboard store and a spectator for simulated players.

pub mod agent;
pub mod app;
pub mod clock;
pub mod collision;
pub mod config;
pub mod difficulty;
pub mod food;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod live;
pub mod logging;
pub mod renderer;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
