//! Terminal setup, teardown, and main event loop.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use crate::app::App;
use crate::shared;
use crate::views;

/// Lines moved by one PageUp/PageDown.
const PAGE: u16 = 10;

/// Launch the TUI application.
pub fn run(mut app: App) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Main event loop.
///
/// Keys are polled with a timeout taken from the session, so queued
/// commands keep flowing while nobody types.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|frame| draw(frame, app))
            .map_err(|e| format!("draw error: {e}"))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(app.poll_timeout()).map_err(|e| format!("event error: {e}"))? {
            let event = event::read().map_err(|e| format!("event error: {e}"))?;
            if let Event::Key(key) = event
                && key.kind == KeyEventKind::Press
            {
                handle_key(app, key);
            }
        }

        app.tick();
    }
}

/// Handle keyboard input.
fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl {
        match key.code {
            KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('x') => app.session.cancel_queued(),
            _ => {}
        }
        return;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::Enter => {
            if app.input_text.trim().is_empty() {
                app.activate_selected();
            } else {
                app.submit_input();
            }
        }
        KeyCode::Tab => app.switch_panel(app.panel.next()),
        KeyCode::BackTab => app.switch_panel(app.panel.prev()),
        KeyCode::Up => app.select_prev(),
        KeyCode::Down => app.select_next(),
        KeyCode::PageUp => app.scroll_up(PAGE),
        KeyCode::PageDown => app.scroll_down(PAGE),
        KeyCode::Esc => app.clear_input(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete_char(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        KeyCode::Char('?') if app.input_text.is_empty() => app.show_help = true,
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }
}

/// Main draw function.
fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Main content
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    // Output (60%) + sidebar and panels (40%)
    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(6)])
        .split(content[1]);

    views::output::draw(frame, app, content[0]);
    views::sidebar::draw(frame, app, side[0]);
    views::panels::draw(frame, app, side[1]);
    views::input::draw(frame, app, chunks[1], chunks[2]);

    if app.show_help {
        shared::draw_help_popup(frame);
    }
}
