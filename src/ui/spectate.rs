use chrono::Utc;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::config::Theme;
use crate::live::{ActivePlayer, Spectator};
use crate::renderer::render_board;

/// Draws the online player list next to the selected player's board.
pub fn render_spectate(frame: &mut Frame<'_>, area: Rect, spectator: &Spectator, theme: &Theme) {
    let [list_area, board_area] =
        Layout::horizontal([Constraint::Length(30), Constraint::Min(0)]).areas(area);

    let mut lines = vec![Line::from(Span::styled(
        format!("{} players online", spectator.players().len()),
        Style::new().fg(theme.hud_label),
    ))];
    for (index, watched) in spectator.players().iter().enumerate() {
        let player = &watched.player;
        let style = if index == spectator.selected_index() {
            Style::new()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(theme.hud_value)
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(player.username.clone(), style)));
        lines.push(Line::from(Span::styled(
            format!(
                "  {}  {}  {}",
                player.mode().label(),
                playing_for(player),
                player.state.score
            ),
            Style::new().fg(theme.hud_label),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Up/Down] Select  [Esc] Back",
        Style::new().fg(theme.menu_footer),
    )));

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::bordered()
                .title(" spectate ")
                .border_style(Style::new().fg(theme.border)),
        ),
        list_area,
    );

    match spectator.selected() {
        Some(player) => {
            let [title_area, rest] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(board_area);
            frame.render_widget(
                Paragraph::new(format!("Watching {}", player.username))
                    .centered()
                    .style(Style::new().fg(theme.highlight)),
                title_area,
            );
            render_board(frame, rest, &player.state, theme);
        }
        None => {
            frame.render_widget(
                Paragraph::new("No players online right now").centered(),
                board_area,
            );
        }
    }
}

/// Elapsed play time as `m:ss`.
fn playing_for(player: &ActivePlayer) -> String {
    let seconds = (Utc::now() - player.started_at).num_seconds().max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
