//! Input line and status bar.

use irr_session::RunState;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;

/// Draw the input line and status bar.
pub fn draw(frame: &mut Frame, app: &App, input_area: Rect, status_area: Rect) {
    let state = app.session.state();
    let border = match state {
        RunState::AwaitingInput => Color::Green,
        RunState::Finished | RunState::Halted => Color::Red,
        RunState::Running | RunState::Pacing { .. } => Color::DarkGray,
    };
    let input = Paragraph::new(format!("> {}", app.input_text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(input, input_area);

    // Offset by 2 for "> " prefix, plus 1 for left border
    let cursor_x = input_area.x + 1 + 2 + app.input_text[..app.input_cursor].chars().count() as u16;
    let cursor_y = input_area.y + 1;
    if cursor_x < input_area.x + input_area.width - 1 {
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }

    let queued = app.session.pending_commands().count();
    let mut spans = vec![Span::styled(
        format!(" {} ", state_label(state)),
        Style::default().fg(Color::Black).bg(border),
    )];
    if queued > 0 {
        spans.push(Span::styled(
            format!(" {queued} queued "),
            Style::default().fg(Color::Yellow),
        ));
    }
    for (key, what) in [
        ("Enter", ":send  "),
        ("Tab", ":panel  "),
        ("PgUp/PgDn", ":scroll  "),
        ("?", ":help  "),
        ("Ctrl+C", ":quit"),
    ] {
        spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(what));
    }
    let status = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::DarkGray).bg(Color::Black));

    frame.render_widget(status, status_area);
}

fn state_label(state: RunState) -> &'static str {
    match state {
        RunState::Running => "running",
        RunState::Pacing { .. } => "auto",
        RunState::AwaitingInput => "ready",
        RunState::Finished => "finished",
        RunState::Halted => "halted",
    }
}
