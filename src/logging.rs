use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::APP_DIR_NAME;

/// Environment variable holding the log filter, e.g. `debug`.
pub const LOG_ENV_VAR: &str = "SNAKE_ARENA_LOG";

const LOG_FILE_NAME: &str = "snake-arena.log";

/// Returns the platform-correct log file path.
#[must_use]
pub fn log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

/// Installs the global subscriber, appending plain-text events to `path`.
///
/// The terminal is in raw mode while playing, so nothing goes to stdout or
/// stderr. Defaults to `info` when the filter variable is unset or invalid.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|error| io::Error::other(error.to_string()))
}
