use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::Theme;
use crate::game::GameState;

/// Supplemental values displayed by the HUD rows.
#[derive(Debug, Clone)]
pub struct HudInfo<'a> {
    /// Signed-in player, `None` for guests.
    pub username: Option<&'a str>,
    /// Best recorded score of the signed-in player.
    pub best_score: Option<u32>,
    pub theme: &'a Theme,
}

/// Renders the two-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, info: &HudInfo<'_>) -> Rect {
    let [play_area, stats_area, player_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(stats_line(state, info.theme)).alignment(Alignment::Center),
        stats_area,
    );
    frame.render_widget(
        Paragraph::new(player_line(info)).alignment(Alignment::Center),
        player_area,
    );

    play_area
}

fn stats_line(state: &GameState, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    push_field(&mut spans, "Score", state.score.to_string(), theme, true);
    push_field(&mut spans, "Length", state.snake.len().to_string(), theme, false);
    push_field(
        &mut spans,
        "Speed",
        format!("{}ms", state.tick_interval_ms),
        theme,
        false,
    );
    push_field(&mut spans, "Mode", state.mode.label().to_owned(), theme, false);
    Line::from(spans)
}

fn player_line(info: &HudInfo<'_>) -> Line<'static> {
    let theme = info.theme;
    match info.username {
        Some(name) => {
            let mut spans = Vec::new();
            push_field(&mut spans, "Player", name.to_owned(), theme, false);
            let best = info
                .best_score
                .map_or_else(|| "-".to_owned(), |score| score.to_string());
            push_field(&mut spans, "Best", best, theme, false);
            Line::from(spans)
        }
        None => Line::from(Span::styled(
            "Guest - start with --user NAME to save scores",
            Style::new().fg(theme.hud_label),
        )),
    }
}

fn push_field(
    spans: &mut Vec<Span<'static>>,
    label: &'static str,
    value: String,
    theme: &Theme,
    emphasize: bool,
) {
    if !spans.is_empty() {
        spans.push(Span::styled("  |  ", Style::new().fg(Color::DarkGray)));
    }

    spans.push(Span::styled(
        format!("{label} "),
        Style::new().fg(theme.hud_label),
    ));

    let mut value_style = Style::new().fg(theme.hud_value);
    if emphasize {
        value_style = value_style.fg(theme.highlight).add_modifier(Modifier::BOLD);
    }
    spans.push(Span::styled(value, value_style));
}
