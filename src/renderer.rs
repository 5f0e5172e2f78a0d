use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::app::{App, Screen};
use crate::config::{
    GridSize, Theme, CELL_WIDTH, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_SNAKE_TAIL,
};
use crate::game::{GameState, GameStatus};
use crate::input::Direction;
use crate::snake::Position;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::leaderboard::render_leaderboard;
use crate::ui::menu::{
    render_game_over_menu, render_pause_menu, render_start_menu, render_won_menu,
};
use crate::ui::spectate::render_spectate;

/// Renders the full frame for the current screen.
pub fn render(frame: &mut Frame<'_>, app: &App, theme: &Theme) {
    let [tabs_area, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

    render_tabs(frame, tabs_area, app.screen(), theme);

    match app.screen() {
        Screen::Game => render_game(frame, body, app, theme),
        Screen::Leaderboard => {
            render_leaderboard(frame, body, &app.leaderboard(), app.leaderboard_filter(), theme);
        }
        Screen::Spectate => render_spectate(frame, body, app.spectator(), theme),
    }
}

fn render_game(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let state = app.session().state();
    let best_score = app
        .username()
        .and_then(|name| app.store().profile(name))
        .map(|profile| profile.high_score);

    let play_area = render_hud(
        frame,
        area,
        state,
        &HudInfo {
            username: app.username(),
            best_score,
            theme,
        },
    );
    let board = render_board(frame, play_area, state, theme);

    match state.status {
        GameStatus::Idle => render_start_menu(frame, board, state.mode, theme),
        GameStatus::Paused => render_pause_menu(frame, board, theme),
        GameStatus::GameOver => render_game_over_menu(
            frame,
            board,
            state.score,
            state.death_reason,
            app.notice(),
            theme,
        ),
        GameStatus::Won => render_won_menu(frame, board, state.score, app.notice(), theme),
        GameStatus::Playing => {}
    }
}

fn render_tabs(frame: &mut Frame<'_>, area: Rect, screen: Screen, theme: &Theme) {
    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                format!(" {label} "),
                Style::new()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
        } else {
            Span::styled(format!(" {label} "), Style::new().fg(theme.hud_label))
        }
    };

    let line = Line::from(vec![
        Span::styled(
            "SNAKE ARENA  ",
            Style::new()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        tab("Play", screen == Screen::Game),
        tab("[L] Leaderboard", screen == Screen::Leaderboard),
        tab("[V] Spectate", screen == Screen::Spectate),
        Span::styled("  [Q] Quit", Style::new().fg(theme.menu_footer)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Draws `state` centered in `area` and returns the bordered board rect.
pub fn render_board(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) -> Rect {
    let board = board_rect(area, state.grid());
    let block = Block::bordered()
        .title(format!(" {} ", state.mode))
        .title_alignment(Alignment::Center)
        .border_style(Style::new().fg(theme.border));

    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_food(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);

    board
}

fn board_rect(area: Rect, grid: GridSize) -> Rect {
    let width = grid
        .width
        .saturating_mul(CELL_WIDTH)
        .saturating_add(2)
        .min(area.width);
    let height = grid.height.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, state.grid(), state.food) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(
        x,
        y,
        GLYPH_FOOD,
        Style::new().fg(theme.food).add_modifier(Modifier::BOLD),
    );
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let snake = &state.snake;
    let last = snake.len().saturating_sub(1);

    let buffer = frame.buffer_mut();
    for (index, segment) in snake.segments().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, state.grid(), *segment) else {
            continue;
        };

        let (glyph, style) = if index == 0 {
            (
                head_glyph(state.direction),
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            )
        } else if index == last {
            (GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail))
        } else {
            (GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body))
        };

        buffer.set_string(x, y, glyph, style);
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
