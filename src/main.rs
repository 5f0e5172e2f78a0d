use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use snake_arena::app::App;
use snake_arena::config::{load_settings, settings_path, Settings, THEME_ARENA};
use snake_arena::food::RandomCells;
use snake_arena::game::GameMode;
use snake_arena::input::poll_input;
use snake_arena::leaderboard::{arena_path, ArenaStore};
use snake_arena::live::{SimulatedFeed, Spectator};
use snake_arena::logging;
use snake_arena::renderer;
use snake_arena::session::GameSession;
use snake_arena::terminal_runtime::TerminalGuard;
use tracing::{info, warn};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Boundary mode: `walls` or `wrap`.
    #[arg(long)]
    mode: Option<GameMode>,

    /// Cells per side of the square board.
    #[arg(long = "grid-size")]
    grid_size: Option<u16>,

    /// Play signed in as this player so scores reach the leaderboard.
    #[arg(long)]
    user: Option<String>,

    /// Number of simulated players on the spectate screen.
    #[arg(long)]
    players: Option<usize>,

    /// Settings file to read instead of the platform default.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;

    let log_file = logging::log_path();
    if let Err(error) = logging::init(&log_file) {
        eprintln!("Logging disabled ({}): {error}", log_file.display());
    }
    info!(?settings, "starting");

    let store = open_store();
    let grid = settings.grid();
    let session = GameSession::new(settings.mode, grid, Box::new(RandomCells::from_entropy()));
    let spectator = Spectator::new(
        Box::new(SimulatedFeed::from_entropy(settings.simulated_players, grid)),
        Box::new(RandomCells::from_entropy()),
    );
    let mut app = App::new(session, store, spectator, settings.username);

    let mut guard = TerminalGuard::enter()?;
    run(guard.terminal_mut(), &mut app)?;
    drop(guard);

    info!("bye");
    Ok(())
}

fn run(terminal: &mut snake_arena::terminal_runtime::AppTerminal, app: &mut App) -> io::Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| renderer::render(frame, app, &THEME_ARENA))?;

        if let Some(input) = poll_input(FRAME_INTERVAL)? {
            app.handle_input(input);
        }
        app.update(Instant::now());
    }
    Ok(())
}

fn resolve_settings(cli: &Cli) -> io::Result<Settings> {
    let path = cli.config.clone().unwrap_or_else(settings_path);
    let mut settings = load_settings(&path)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    if let Some(mode) = cli.mode {
        settings.mode = mode;
    }
    if let Some(grid_size) = cli.grid_size {
        settings.grid_size = grid_size;
    }
    if let Some(user) = &cli.user {
        settings.username = Some(user.clone());
    }
    if let Some(players) = cli.players {
        settings.simulated_players = players;
    }

    settings
        .validate()
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
    Ok(settings)
}

/// Opens the arena file, falling back to a throwaway store when it is broken.
fn open_store() -> ArenaStore {
    let path = arena_path();
    match ArenaStore::open(&path) {
        Ok(store) => store,
        Err(error) => {
            eprintln!(
                "Warning: could not load {} ({error}); scores will not be saved this session.",
                path.display()
            );
            warn!(%error, "falling back to in-memory arena");
            ArenaStore::in_memory()
        }
    }
}
