use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Row, Table};
use ratatui::Frame;

use crate::config::Theme;
use crate::game::GameMode;
use crate::leaderboard::LeaderboardEntry;

/// Draws the top scores with the active mode filter.
pub fn render_leaderboard(
    frame: &mut Frame<'_>,
    area: Rect,
    entries: &[LeaderboardEntry],
    filter: Option<GameMode>,
    theme: &Theme,
) {
    let [table_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let title = format!(" leaderboard - {} ", filter_label(filter));
    let block = Block::bordered()
        .title(title)
        .border_style(Style::new().fg(theme.border));

    if entries.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from("No scores yet. Be the first!")).block(block),
            table_area,
        );
    } else {
        let rows = entries.iter().map(|entry| {
            Row::new(vec![
                format!("#{}", entry.rank),
                entry.username.clone(),
                entry.score.to_string(),
                entry.mode.label().to_owned(),
                entry.date.format("%Y-%m-%d").to_string(),
            ])
        });
        let header = Row::new(vec!["Rank", "Player", "Score", "Mode", "Date"]).style(
            Style::new()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        );

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Min(12),
                Constraint::Length(8),
                Constraint::Length(7),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(block);
        frame.render_widget(table, table_area);
    }

    frame.render_widget(
        Paragraph::new("[F] Filter  [Esc] Back").style(Style::new().fg(theme.menu_footer)),
        footer_area,
    );
}

fn filter_label(filter: Option<GameMode>) -> &'static str {
    match filter {
        None => "all modes",
        Some(mode) => mode.label(),
    }
}
