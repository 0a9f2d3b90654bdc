//! Application state: the session plus everything the views need.

use std::time::{Duration, Instant};

use log::{debug, warn};

use irr_session::macros;
use irr_session::walkthrough::{self, Task};
use irr_session::{Interpreter, RunState, Session, WalkthroughProgress};

/// How long to wait for a key when the session has nothing to do.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Control pad rows: label and the command it sends.
pub const CONTROLS: &[(&str, &str)] = &[
    ("NW", "nw"),
    ("N", "n"),
    ("NE", "ne"),
    ("W", "w"),
    ("Wait", "wait"),
    ("E", "e"),
    ("SW", "sw"),
    ("S", "s"),
    ("SE", "se"),
    ("UP", "up"),
    ("DOWN", "down"),
    ("LOOK", "look"),
    ("INVENTORY", "inventory"),
    ("TAKE ALL", "take all"),
    ("DROP ALL", "drop all"),
    ("SAVE", "save"),
    ("RESTORE", "restore"),
];

/// The session type driven by the terminal.
pub type TuiSession = Session<Box<dyn Interpreter>>;

/// Side panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Travel to a known location.
    Nav,
    /// Run a macro.
    Macros,
    /// Tick off walkthrough tasks.
    Walkthrough,
    /// Send a single command: moves, actions, examine an item.
    Controls,
}

impl Panel {
    /// All panels in tab order.
    pub const ALL: [Panel; 4] = [Panel::Nav, Panel::Macros, Panel::Walkthrough, Panel::Controls];

    /// Tab title.
    pub fn title(self) -> &'static str {
        match self {
            Panel::Nav => "Nav",
            Panel::Macros => "Macros",
            Panel::Walkthrough => "Walkthrough",
            Panel::Controls => "Controls",
        }
    }

    /// Position in [`Panel::ALL`].
    pub fn index(self) -> usize {
        match self {
            Panel::Nav => 0,
            Panel::Macros => 1,
            Panel::Walkthrough => 2,
            Panel::Controls => 3,
        }
    }

    /// The next panel, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The previous panel, wrapping around.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Main application state.
pub struct App {
    /// The play session.
    pub session: TuiSession,
    /// Walkthrough checklist progress.
    pub progress: WalkthroughProgress,
    /// Travel destinations, alphabetical.
    pub destinations: Vec<String>,
    /// Active side panel.
    pub panel: Panel,
    /// Selected row in each panel, indexed by [`Panel::index`].
    pub selected: [usize; 4],
    /// Current input text.
    pub input_text: String,
    /// Cursor position within input text (byte offset).
    pub input_cursor: usize,
    /// Scroll offset from the bottom (0 = fully scrolled down).
    pub output_scroll: u16,
    /// Whether the help popup is visible.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Wrap a freshly started session.
    pub fn new(session: TuiSession) -> Self {
        let destinations = session
            .graph()
            .sorted_location_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            session,
            progress: WalkthroughProgress::new(),
            destinations,
            panel: Panel::Nav,
            selected: [0; 4],
            input_text: String::new(),
            input_cursor: 0,
            output_scroll: 0,
            show_help: false,
            should_quit: false,
        }
    }

    /// Let the session make progress.
    pub fn tick(&mut self) -> RunState {
        let before = self.session.lines().len();
        let state = self.session.advance();
        if self.session.lines().len() != before {
            self.output_scroll = 0;
        }
        state
    }

    /// How long the event loop may block waiting for a key.
    pub fn poll_timeout(&self) -> Duration {
        match self.session.state() {
            RunState::Pacing { due } => due.saturating_duration_since(Instant::now()),
            RunState::Running => Duration::ZERO,
            RunState::AwaitingInput | RunState::Finished | RunState::Halted => IDLE_POLL,
        }
    }

    /// Submit the input line to the session.
    ///
    /// The text stays in the input line if the session is not waiting for
    /// input.
    pub fn submit_input(&mut self) {
        let input = self.input_text.trim().to_string();
        if input.is_empty() {
            return;
        }
        if self.session.submit_command(&input) {
            self.input_text.clear();
            self.input_cursor = 0;
            self.output_scroll = 0;
        }
    }

    /// Run the selected entry of the active panel.
    pub fn activate_selected(&mut self) {
        let row = self.selected[self.panel.index()];
        match self.panel {
            Panel::Nav => {
                if let Some(dest) = self.destinations.get(row).cloned() {
                    self.session.navigate_to(&dest);
                }
            }
            Panel::Macros => {
                if let Some(m) = macros::all().get(row)
                    && let Err(e) = self.session.run_macro(m.id)
                {
                    warn!("macro {} failed: {e}", m.id);
                }
            }
            Panel::Walkthrough => {
                if let Some(task) = walkthrough_tasks().nth(row) {
                    match self.progress.toggle(task.id) {
                        Ok(done) => debug!("task {} done: {done}", task.id),
                        Err(e) => warn!("cannot toggle task: {e}"),
                    }
                }
            }
            Panel::Controls => {
                if let Some((_, command)) = self.control_commands().into_iter().nth(row) {
                    self.session.submit_command(&command);
                }
            }
        }
        self.output_scroll = 0;
    }

    /// Rows of the control pad: the fixed controls, then one
    /// `examine` per carried item.
    pub fn control_commands(&self) -> Vec<(String, String)> {
        let fixed = CONTROLS
            .iter()
            .map(|(label, command)| (label.to_string(), command.to_string()));
        let examine = self
            .session
            .inventory()
            .items()
            .iter()
            .map(|item| (format!("EXAMINE {}", item.to_uppercase()), format!("examine {item}")));
        fixed.chain(examine).collect()
    }

    /// Number of rows in a panel.
    pub fn panel_len(&self, panel: Panel) -> usize {
        match panel {
            Panel::Nav => self.destinations.len(),
            Panel::Macros => macros::all().len(),
            Panel::Walkthrough => walkthrough::total_tasks(),
            Panel::Controls => CONTROLS.len() + self.session.inventory().items().len(),
        }
    }

    /// Move the panel selection down.
    pub fn select_next(&mut self) {
        let len = self.panel_len(self.panel);
        let row = &mut self.selected[self.panel.index()];
        if len > 0 {
            *row = (*row + 1) % len;
        }
    }

    /// Move the panel selection up.
    pub fn select_prev(&mut self) {
        let len = self.panel_len(self.panel);
        let row = &mut self.selected[self.panel.index()];
        if len > 0 {
            *row = (*row + len - 1) % len;
        }
    }

    /// Switch to another panel.
    pub fn switch_panel(&mut self, panel: Panel) {
        self.panel = panel;
    }

    /// Push a character to the input at the cursor position.
    pub fn push_char(&mut self, c: char) {
        self.input_text.insert(self.input_cursor, c);
        self.input_cursor += c.len_utf8();
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if let Some((prev, _)) = self.input_text[..self.input_cursor].char_indices().next_back() {
            self.input_text.remove(prev);
            self.input_cursor = prev;
        }
    }

    /// Delete the character at the cursor.
    pub fn delete_char(&mut self) {
        if self.input_cursor < self.input_text.len() {
            self.input_text.remove(self.input_cursor);
        }
    }

    /// Move cursor left.
    pub fn cursor_left(&mut self) {
        if let Some((prev, _)) = self.input_text[..self.input_cursor].char_indices().next_back() {
            self.input_cursor = prev;
        }
    }

    /// Move cursor right.
    pub fn cursor_right(&mut self) {
        if let Some(c) = self.input_text[self.input_cursor..].chars().next() {
            self.input_cursor += c.len_utf8();
        }
    }

    /// Move cursor to start of input.
    pub fn cursor_home(&mut self) {
        self.input_cursor = 0;
    }

    /// Move cursor to end of input.
    pub fn cursor_end(&mut self) {
        self.input_cursor = self.input_text.len();
    }

    /// Clear the input line.
    pub fn clear_input(&mut self) {
        self.input_text.clear();
        self.input_cursor = 0;
    }

    /// Scroll output up.
    pub fn scroll_up(&mut self, lines: u16) {
        self.output_scroll = self.output_scroll.saturating_add(lines);
    }

    /// Scroll output down.
    pub fn scroll_down(&mut self, lines: u16) {
        self.output_scroll = self.output_scroll.saturating_sub(lines);
    }
}

/// Walkthrough tasks flattened across phases.
pub fn walkthrough_tasks() -> impl Iterator<Item = &'static Task> {
    walkthrough::phases().iter().flat_map(|p| p.tasks)
}
