//! Scrollable output panel for the session log.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::shared::OutputStyle;

/// Draw the scrollable output panel.
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .session
        .lines()
        .iter()
        .map(|l| Line::from(Span::styled(l.as_str(), OutputStyle::of(l).style())))
        .collect();

    // Calculate scroll: show the bottom by default.
    let inner_width = area.width.saturating_sub(2) as usize;
    let total_wrapped: u16 = lines
        .iter()
        .map(|l| {
            let len = l.width();
            if inner_width == 0 {
                1
            } else {
                len.max(1).div_ceil(inner_width) as u16
            }
        })
        .sum();

    let visible_height = area.height.saturating_sub(2);
    let max_scroll = total_wrapped.saturating_sub(visible_height);
    let scroll = max_scroll.saturating_sub(app.output_scroll);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Game ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}
