use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Keeps the arena screen up while alive.
///
/// Leaves raw mode and the alternate screen when dropped, and when the
/// process panics while it is alive.
pub struct TerminalGuard {
    terminal: AppTerminal,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        PANIC_HOOK.call_once(|| {
            let previous = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                let _ = leave_arena_screen();
                previous(info);
            }));
        });

        enable_raw_mode()?;
        let terminal = enter_arena_screen().inspect_err(|_| {
            let _ = leave_arena_screen();
        })?;
        Ok(Self { terminal })
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = leave_arena_screen();
    }
}

fn enter_arena_screen() -> io::Result<AppTerminal> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Undoes everything `TerminalGuard::enter` did; each step is attempted even
/// if an earlier one fails.
fn leave_arena_screen() -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    raw
}
