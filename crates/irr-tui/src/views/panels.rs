//! Tabbed side panel: travel picker, macros, walkthrough checklist and
//! control pad.

use irr_session::macros;
use irr_session::walkthrough;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, ListState, Tabs};

use crate::app::{App, Panel};

/// Draw the tab strip and the active panel.
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let titles: Vec<Line> = Panel::ALL
        .iter()
        .map(|p| Line::from(p.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.panel.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider(" | ");
    frame.render_widget(tabs, chunks[0]);

    match app.panel {
        Panel::Nav => draw_nav(frame, app, chunks[1]),
        Panel::Macros => draw_macros(frame, app, chunks[1]),
        Panel::Walkthrough => draw_walkthrough(frame, app, chunks[1]),
        Panel::Controls => draw_controls(frame, app, chunks[1]),
    }
}

fn highlight() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn draw_list(frame: &mut Frame, area: Rect, title: &str, items: Vec<ListItem>, selected: usize) {
    let len = items.len();
    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .highlight_style(highlight());
    let mut state = ListState::default();
    // The control pad shrinks when items are dropped.
    state.select(Some(selected.min(len.saturating_sub(1))));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_nav(frame: &mut Frame, app: &App, area: Rect) {
    let here = app.session.location();
    let items = app
        .destinations
        .iter()
        .map(|name| {
            let style = if name == here {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(name.as_str(), style))
        })
        .collect();
    draw_list(frame, area, "Travel to", items, app.selected[Panel::Nav.index()]);
}

fn draw_macros(frame: &mut Frame, app: &App, area: Rect) {
    let items = macros::all()
        .iter()
        .map(|m| {
            ListItem::new(Line::from(vec![
                Span::styled(m.label, Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("  {}", m.commands.join(", ")),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    draw_list(frame, area, "Macros", items, app.selected[Panel::Macros.index()]);
}

fn draw_walkthrough(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(2)])
        .split(area);

    let progress = &app.progress;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
        .ratio(progress.fraction().clamp(0.0, 1.0))
        .label(format!("{}/{}", progress.completed(), progress.total()));
    frame.render_widget(gauge, chunks[0]);

    let mut items = Vec::new();
    for phase in walkthrough::phases() {
        for task in phase.tasks {
            let done = progress.is_done(task.id);
            let mark = if done { "[x]" } else { "[ ]" };
            let style = if done {
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            let mut spans = vec![Span::styled(format!("{mark} {}", task.text), style)];
            if let Some(hint) = task.hint {
                spans.push(Span::styled(
                    format!("  ({hint})"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            items.push(ListItem::new(Line::from(spans)));
        }
    }
    draw_list(
        frame,
        chunks[1],
        "Walkthrough",
        items,
        app.selected[Panel::Walkthrough.index()],
    );
}

fn draw_controls(frame: &mut Frame, app: &App, area: Rect) {
    let items = app
        .control_commands()
        .into_iter()
        .map(|(label, command)| {
            ListItem::new(Line::from(vec![
                Span::styled(label, Style::default().fg(Color::Cyan)),
                Span::styled(format!("  {command}"), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();
    draw_list(frame, area, "Controls", items, app.selected[Panel::Controls.index()]);
}
