use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::app::SubmissionNotice;
use crate::collision::DeathReason;
use crate::config::Theme;
use crate::game::GameMode;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, mode: GameMode, theme: &Theme) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE ARENA"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let mode_hint = match mode {
        GameMode::Walls => "Walls: the edge is deadly",
        GameMode::Wrap => "Wrap: the edges connect",
    };
    let body = vec![
        Line::from(mode_hint),
        Line::from(""),
        Line::from("[Space] Start"),
        Line::from("[M] Switch mode"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Arrows/WASD move, Space pause, Esc reset"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.menu_footer)),
        footer_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, _theme: &Theme) {
    let popup = centered_popup(area, 60, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[Space] Resume"),
        Line::from("[Esc] Reset"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    death_reason: Option<DeathReason>,
    notice: Option<&SubmissionNotice>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("GAME OVER").style(Style::new().fg(theme.highlight)),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(match death_reason {
            Some(DeathReason::WallCollision) => "Cause: hit the wall",
            Some(DeathReason::SelfCollision) => "Cause: bit yourself",
            None => "",
        }),
        Line::from(notice_text(notice)),
        Line::from(""),
        Line::from("[Space] Play again"),
        Line::from("[L] Leaderboard"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

/// Draws the victory popup shown when the snake fills the board.
pub fn render_won_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    notice: Option<&SubmissionNotice>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("BOARD CLEARED").style(
            Style::new()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(notice_text(notice)),
        Line::from(""),
        Line::from("[Space] Play again"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" victory ")),
        popup,
    );
}

fn notice_text(notice: Option<&SubmissionNotice>) -> String {
    match notice {
        Some(SubmissionNotice::Saved(entry)) => format!("Saved! Rank #{}", entry.rank),
        Some(SubmissionNotice::SignInRequired) => "Sign in with --user to save".to_owned(),
        Some(SubmissionNotice::Failed(reason)) => format!("Not saved: {reason}"),
        None => String::new(),
    }
}

/// Returns a rect of the given percentage size centered in `area`.
#[must_use]
pub fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::notice_text;
    use crate::app::SubmissionNotice;
    use crate::game::GameMode;
    use crate::leaderboard::LeaderboardEntry;

    #[test]
    fn saved_notice_shows_rank() {
        let entry = LeaderboardEntry {
            id: 1,
            username: "RetroGamer".to_owned(),
            score: 850,
            mode: GameMode::Walls,
            date: NaiveDate::from_ymd_opt(2024, 11, 23).expect("valid date"),
            rank: 3,
        };

        assert_eq!(
            notice_text(Some(&SubmissionNotice::Saved(entry))),
            "Saved! Rank #3"
        );
        assert_eq!(notice_text(None), "");
    }
}
