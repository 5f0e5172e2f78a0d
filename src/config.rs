use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::GameMode;

/// Directory name used under the platform config and data directories.
pub const APP_DIR_NAME: &str = "snake-arena";

const SETTINGS_FILE_NAME: &str = "settings.json";

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Square grid with `size` cells per side.
    #[must_use]
    pub const fn square(size: u16) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::square(DEFAULT_GRID_SIZE)
    }
}

/// Cells per side of the default board.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Smallest board that still fits the starting snake and food.
pub const MIN_GRID_SIZE: u16 = 8;

/// Largest board accepted from settings or the command line.
pub const MAX_GRID_SIZE: u16 = 64;

/// Length of the snake at the start of every run.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Tick interval at the start of every run, in milliseconds.
pub const INITIAL_TICK_INTERVAL_MS: u64 = 150;

/// Fastest tick interval difficulty progression can reach.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Interval reduction applied at each speed-up threshold.
pub const TICK_INTERVAL_STEP_MS: u64 = 10;

/// Points awarded for each food eaten.
pub const POINTS_PER_FOOD: u32 = 10;

/// The game speeds up every time the score reaches a multiple of this.
pub const POINTS_PER_SPEED_UP: u32 = 50;

/// Number of entries returned by a leaderboard query.
pub const LEADERBOARD_PAGE_SIZE: usize = 10;

/// Tick interval of spectated bot players.
pub const SPECTATE_TICK_INTERVAL_MS: u64 = 200;

/// How often the spectator pulls a fresh player list from its feed.
pub const FEED_REFRESH_INTERVAL_MS: u64 = 5_000;

/// Highest random score a freshly generated bot player can start with.
pub const MAX_SIMULATED_START_SCORE: u32 = 500;

/// Terminal columns used to draw one logical cell.
pub const CELL_WIDTH: u16 = 2;

pub const GLYPH_SNAKE_HEAD_UP: &str = "▲▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶▶";
pub const GLYPH_SNAKE_BODY: &str = "██";
pub const GLYPH_SNAKE_TAIL: &str = "▓▓";
pub const GLYPH_FOOD: &str = "()";

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub border: Color,
    pub hud_value: Color,
    pub hud_label: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
    pub highlight: Color,
}

/// Neon green snake on dark background.
pub const THEME_ARENA: Theme = Theme {
    snake_head: Color::White,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::LightMagenta,
    border: Color::Cyan,
    hud_value: Color::White,
    hud_label: Color::DarkGray,
    menu_title: Color::LightGreen,
    menu_footer: Color::DarkGray,
    highlight: Color::LightMagenta,
};

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("malformed settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("grid size {0} is outside {min}..={max}", min = MIN_GRID_SIZE, max = MAX_GRID_SIZE)]
    GridSize(u16),
}

/// User-adjustable settings, merged from the settings file and CLI flags.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid_size: u16,
    pub mode: GameMode,
    /// Signed-in player name. Scores are only submitted when set.
    pub username: Option<String>,
    pub simulated_players: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            mode: GameMode::Walls,
            username: None,
            simulated_players: 3,
        }
    }
}

impl Settings {
    /// Returns the board described by these settings.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize::square(self.grid_size)
    }

    /// Rejects values the engine cannot start from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSize(self.grid_size));
        }
        Ok(())
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads settings from `path`.
///
/// A missing file yields the defaults. A file that exists but cannot be read
/// or parsed is an error so it can be reported before the terminal switches
/// to raw mode.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let settings: Settings = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{load_settings, ConfigError, GridSize, Settings};
    use crate::game::GameMode;

    #[test]
    fn missing_settings_file_yields_defaults() {
        let path = unique_test_path("missing");

        let settings = load_settings(&path).expect("missing file should load defaults");

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.grid(), GridSize::square(20));
    }

    #[test]
    fn partial_settings_file_keeps_remaining_defaults() {
        let path = unique_test_path("partial");
        write(&path, r#"{ "mode": "pass-through", "username": "NeonNinja" }"#);

        let settings = load_settings(&path).expect("partial file should load");

        assert_eq!(settings.mode, GameMode::Wrap);
        assert_eq!(settings.username.as_deref(), Some("NeonNinja"));
        assert_eq!(settings.grid_size, 20);
        cleanup_test_path(&path);
    }

    #[test]
    fn malformed_settings_file_returns_error() {
        let path = unique_test_path("malformed");
        write(&path, "not-json");

        assert!(matches!(
            load_settings(&path),
            Err(ConfigError::Parse { .. })
        ));
        cleanup_test_path(&path);
    }

    #[test]
    fn out_of_range_grid_size_is_rejected() {
        let path = unique_test_path("tiny");
        write(&path, r#"{ "grid_size": 4 }"#);

        assert!(matches!(load_settings(&path), Err(ConfigError::GridSize(4))));
        cleanup_test_path(&path);
    }

    #[test]
    fn total_cells_multiplies_dimensions() {
        assert_eq!(GridSize::square(20).total_cells(), 400);
    }

    fn write(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("snake-arena-settings-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
