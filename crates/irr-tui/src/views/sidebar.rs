//! Sidebar: location, compass of exits, and inventory.

use irr_map::{Compass, Direction as Heading};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::app::App;

/// Width of one compass cell.
const CELL: usize = 12;

/// Draw the sidebar.
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Status ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 3 || inner.width < 6 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Location
            Constraint::Length(5), // Compass
            Constraint::Min(1),    // Inventory
        ])
        .split(inner);

    let location = Paragraph::new(vec![
        Line::from(Span::styled("Location", Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            app.session.location(),
            Style::default().fg(Color::Green).bold(),
        )),
    ]);
    frame.render_widget(location, chunks[0]);

    let compass = app.session.neighbors();
    frame.render_widget(Paragraph::new(compass_lines(&compass)), chunks[1]);

    let items: Vec<ListItem> = app
        .session
        .inventory()
        .items()
        .iter()
        .map(|i| {
            ListItem::new(Span::styled(
                format!(" \u{25b8} {i}"),
                Style::default().fg(Color::Cyan),
            ))
        })
        .collect();
    let inventory = List::new(items).block(
        Block::default()
            .title("Inventory")
            .borders(Borders::NONE)
            .title_style(Style::default().fg(Color::Cyan).bold()),
    );
    frame.render_widget(inventory, chunks[2]);
}

/// A 3x3 mini-map of compass exits plus a row for up and down.
pub fn compass_lines(compass: &Compass) -> Vec<Line<'static>> {
    let rows: [[Option<Heading>; 3]; 3] = [
        [Some(Heading::Northwest), Some(Heading::North), Some(Heading::Northeast)],
        [Some(Heading::West), None, Some(Heading::East)],
        [Some(Heading::Southwest), Some(Heading::South), Some(Heading::Southeast)],
    ];
    let mut lines: Vec<Line> = rows
        .iter()
        .map(|row| Line::from(row.iter().map(|d| cell(compass, *d)).collect::<Vec<_>>()))
        .collect();
    lines.push(Line::from(vec![
        cell(compass, Some(Heading::Up)),
        cell(compass, Some(Heading::Down)),
    ]));
    lines
}

fn cell(compass: &Compass, dir: Option<Heading>) -> Span<'static> {
    let Some(dir) = dir else {
        return Span::styled(format!("{:^CELL$}", "\u{25cf}"), Style::default().fg(Color::Green));
    };
    match compass.get(dir) {
        Some(n) => {
            let mark = if n.locked { "!" } else { "" };
            let text: String = format!("{}:{mark}{}", dir.command(), n.name)
                .chars()
                .take(CELL - 1)
                .collect();
            let style = if n.locked {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::White)
            };
            Span::styled(format!("{text:<CELL$}"), style)
        }
        None => Span::styled(
            format!("{:<CELL$}", dir.command()),
            Style::default().fg(Color::DarkGray),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irr_map::WorldGraph;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn west_of_house_compass() {
        let graph = WorldGraph::bundled().unwrap();
        let lines = compass_lines(&graph.neighbors("West of House"));
        assert_eq!(lines.len(), 4);
        assert!(text(&lines[0]).contains("n:North of"));
        assert!(text(&lines[2]).contains("sw:!Stone"));
    }

    #[test]
    fn empty_compass_shows_bare_directions() {
        let lines = compass_lines(&Compass::default());
        assert_eq!(text(&lines[3]).trim_end(), format!("{:<CELL$}d", "u"));
    }
}
