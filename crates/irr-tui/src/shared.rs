//! Shared utilities for views: line styling, layout helpers, and popups.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Visual style for an output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// An echoed command (yellow, starts with "> ").
    Command,
    /// Text printed by the game (white).
    Result,
    /// A load or interpreter failure (red).
    Error,
    /// A notice from the session itself (cyan).
    System,
}

impl OutputStyle {
    /// Classify a log line.
    pub fn of(line: &str) -> Self {
        if line.starts_with("> ") {
            Self::Command
        } else if line.starts_with("Error loading story") || line.starts_with("Interpreter error") {
            Self::Error
        } else if line.starts_with("No path found") {
            Self::System
        } else {
            Self::Result
        }
    }

    /// Foreground color and modifier.
    pub fn style(self) -> Style {
        match self {
            Self::Command => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Self::Result => Style::default().fg(Color::White),
            Self::Error => Style::default().fg(Color::Red),
            Self::System => Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        }
    }
}

/// Create a centered rectangle as a percentage of the given area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Draw the help popup overlay.
pub fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("Game:"),
        Line::from("  Enter       Send command (empty: run panel selection)"),
        Line::from("  Esc         Clear input"),
        Line::from("  PgUp / PgDn Scroll output"),
        Line::from("  \u{2190} / \u{2192}       Move cursor in input"),
        Line::from("  Ctrl+X      Cancel queued commands"),
        Line::from(""),
        Line::from("Panels:"),
        Line::from("  Tab         Next panel (Nav, Macros, Walkthrough, Controls)"),
        Line::from("  \u{2191} / \u{2193}       Move selection"),
        Line::from(""),
        Line::from("  ?           Toggle this help (empty input)"),
        Line::from("  Ctrl+C      Quit"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
