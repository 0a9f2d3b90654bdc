//! The session orchestrator.
//!
//! [`Session`] steps the interpreter, routes its output into the
//! [`OutputLog`] and the [`StateInferencer`], and answers its input
//! requests from the [`CommandSource`]. Everything runs on the caller's
//! thread: [`advance`](Session::advance) returns whenever the session has
//! to wait, either for a human command or for the pacing delay in front
//! of a queued one.

use std::time::Instant;

use irr_map::{Compass, WorldGraph};
use log::{debug, error, info, warn};

use crate::config::SessionConfig;
use crate::error::{InterpreterError, InterpreterResult, SessionError, SessionResult};
use crate::infer::{Inventory, StateInferencer};
use crate::interpreter::{Event, Interpreter};
use crate::macros;
use crate::multiplex::{CommandSource, Delivery};
use crate::output::OutputLog;

/// Where the session stands between calls to [`Session::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// The interpreter can be stepped.
    Running,
    /// A queued command will be served once `due` has passed.
    Pacing {
        /// When the queued command becomes due.
        due: Instant,
    },
    /// The interpreter is blocked until a human submits a command.
    AwaitingInput,
    /// The story ended.
    Finished,
    /// The interpreter failed to load or failed mid-game. Nothing more
    /// will be stepped.
    Halted,
}

impl RunState {
    /// Whether the session can never make progress again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Halted)
    }
}

/// A play session over one interpreter.
pub struct Session<I: Interpreter> {
    interpreter: Option<I>,
    graph: WorldGraph,
    config: SessionConfig,
    output: OutputLog,
    inferencer: StateInferencer,
    source: CommandSource,
    state: RunState,
}

impl<I: Interpreter> Session<I> {
    /// Create a session over an interpreter that may have failed to load.
    ///
    /// A load failure is written to the log as a single line and leaves the
    /// session [`Halted`](RunState::Halted); the interpreter is never
    /// stepped.
    pub fn start(loaded: InterpreterResult<I>, graph: WorldGraph, config: SessionConfig) -> Self {
        let inferencer = StateInferencer::new(&config);
        let mut output = OutputLog::new();
        let (interpreter, state) = match loaded {
            Ok(interpreter) => {
                info!("session started at {}", config.start_location);
                (Some(interpreter), RunState::Running)
            }
            Err(e) => {
                error!("failed to load story: {e}");
                output.push_line(format!("Error loading story: {e}"));
                (None, RunState::Halted)
            }
        };
        Self {
            interpreter,
            graph,
            config,
            output,
            inferencer,
            source: CommandSource::new(),
            state,
        }
    }

    /// Drive the interpreter until the session has to wait.
    ///
    /// Never returns [`Running`](RunState::Running). On
    /// [`Pacing`](RunState::Pacing) call again once `due` has passed.
    pub fn advance(&mut self) -> RunState {
        loop {
            match self.state {
                RunState::AwaitingInput | RunState::Finished | RunState::Halted => {
                    return self.state;
                }
                RunState::Pacing { due } => {
                    if Instant::now() < due {
                        return self.state;
                    }
                    match self.source.serve_queued() {
                        Some(delivery) => self.deliver(delivery),
                        None => self.state = RunState::AwaitingInput,
                    }
                }
                RunState::Running => self.step(),
            }
        }
    }

    fn step(&mut self) {
        let Some(interpreter) = self.interpreter.as_mut() else {
            self.state = RunState::Halted;
            return;
        };
        match interpreter.step() {
            Ok(Event::Output(text)) => {
                self.output.append(&text);
                if self.inferencer.observe_output(&text, &self.output) {
                    debug!(
                        "inferred {} carrying {:?}",
                        self.inferencer.location(),
                        self.inferencer.inventory().items()
                    );
                }
            }
            Ok(Event::Status(line)) => {
                if self.inferencer.observe_status(&line, &self.graph) {
                    debug!("status line puts us in {}", self.inferencer.location());
                }
            }
            Ok(Event::InputRequest { max_len }) => {
                self.inferencer.input_requested();
                self.source.request(max_len);
                if !self.source.has_queued() {
                    self.state = RunState::AwaitingInput;
                } else if self.config.pacing.is_zero() {
                    if let Some(delivery) = self.source.serve_queued() {
                        self.deliver(delivery);
                    }
                } else {
                    self.state = RunState::Pacing {
                        due: Instant::now() + self.config.pacing,
                    };
                }
            }
            Ok(Event::Done) => {
                info!("story finished");
                self.state = RunState::Finished;
            }
            Err(e) => self.halt(&e),
        }
    }

    /// Echo a command to the log and hand it to the interpreter.
    fn deliver(&mut self, delivery: Delivery) {
        let Some(interpreter) = self.interpreter.as_mut() else {
            self.state = RunState::Halted;
            return;
        };
        debug!("serving {:?}", delivery.command);
        self.output.push_line(format!("> {}", delivery.command));
        self.output.push_line("");

        let mut line: String = delivery.command.chars().take(delivery.max_len).collect();
        line.push('\n');
        match interpreter.resume(&line) {
            Ok(()) => self.state = RunState::Running,
            Err(e) => self.halt(&e),
        }
    }

    fn halt(&mut self, e: &InterpreterError) {
        error!("interpreter failed, halting: {e}");
        self.output.push_line(format!("Interpreter error: {e}"));
        self.state = RunState::Halted;
    }

    /// Submit a command typed by the player.
    ///
    /// Accepted only while the session is
    /// [`AwaitingInput`](RunState::AwaitingInput); otherwise the command is
    /// dropped without touching the log or the queue and `false` is
    /// returned.
    pub fn submit_command(&mut self, text: &str) -> bool {
        if self.state != RunState::AwaitingInput {
            warn!("ignoring {text:?}: interpreter is not waiting for input");
            return false;
        }
        match self.source.submit_human(text) {
            Some(delivery) => {
                self.deliver(delivery);
                self.advance();
                true
            }
            None => {
                warn!("ignoring {text:?}: no input request is open");
                false
            }
        }
    }

    /// Queue commands behind any already pending.
    ///
    /// If the interpreter is already waiting, the first command is served
    /// immediately.
    pub fn enqueue<T, S>(&mut self, commands: T) -> RunState
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.state.is_terminal() {
            warn!("session is over, not queueing commands");
            return self.state;
        }
        if let Some(delivery) = self.source.enqueue(commands) {
            self.deliver(delivery);
        }
        self.advance()
    }

    /// Queue the commands of a macro.
    pub fn run_macro(&mut self, id: &str) -> SessionResult<RunState> {
        let m = macros::get(id).ok_or_else(|| SessionError::UnknownMacro(id.to_string()))?;
        info!("running macro {}", m.id);
        Ok(self.enqueue(m.commands.iter().copied()))
    }

    /// Queue the shortest route from the inferred location to `destination`.
    ///
    /// When no route exists a notice is written to the log and nothing is
    /// queued.
    pub fn navigate_to(&mut self, destination: &str) -> RunState {
        if self.state.is_terminal() {
            warn!("session is over, not travelling to {destination}");
            return self.state;
        }
        let here = self.inferencer.location().to_string();
        match self.graph.find_path(&here, destination) {
            Some(route) if route.commands.is_empty() => {
                debug!("already at {destination}");
                self.state
            }
            Some(route) => {
                info!("travelling {here} -> {destination} in {} hop(s)", route.hops());
                self.enqueue(route.commands)
            }
            None => {
                warn!("no path from {here} to {destination}");
                self.output
                    .push_line(format!("No path found from {here} to {destination}."));
                self.state
            }
        }
    }

    /// Drop every queued command.
    pub fn cancel_queued(&mut self) {
        self.source.clear_queue();
    }

    /// All log lines, oldest first.
    pub fn lines(&self) -> &[String] {
        self.output.lines()
    }

    /// The output log.
    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    /// The inferred location.
    pub fn location(&self) -> &str {
        self.inferencer.location()
    }

    /// The inferred inventory.
    pub fn inventory(&self) -> &Inventory {
        self.inferencer.inventory()
    }

    /// Commands still queued, next first.
    pub fn pending_commands(&self) -> impl Iterator<Item = &str> {
        self.source.pending()
    }

    /// The current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The world graph.
    pub fn graph(&self) -> &WorldGraph {
        &self.graph
    }

    /// Exits around the inferred location.
    pub fn neighbors(&self) -> Compass {
        self.graph.neighbors(self.inferencer.location())
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The interpreter, unless it failed to load.
    pub fn interpreter(&self) -> Option<&I> {
        self.interpreter.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::interpreter::ScriptedInterpreter;

    fn session(interp: ScriptedInterpreter) -> Session<ScriptedInterpreter> {
        let config = SessionConfig::default().with_pacing(Duration::ZERO);
        Session::start(Ok(interp), WorldGraph::bundled().unwrap(), config)
    }

    #[test]
    fn runs_until_input_requested() {
        let mut s = session(ScriptedInterpreter::new().output("ZORK I\n\n>").prompt(80));
        assert_eq!(s.advance(), RunState::AwaitingInput);
        assert_eq!(s.lines(), ["ZORK I", "", ">"]);
    }

    #[test]
    fn human_command_is_echoed_and_truncated() {
        let mut s = session(
            ScriptedInterpreter::new()
                .output(">")
                .prompt(4)
                .output("ok"),
        );
        s.advance();
        assert!(s.submit_command("inventory"));
        assert_eq!(s.lines(), [">", "> inventory", "ok"]);
        assert_eq!(s.interpreter().unwrap().inputs(), ["inve\n"]);
        assert_eq!(s.state(), RunState::Finished);
    }

    #[test]
    fn submit_while_running_is_ignored() {
        let mut s = session(ScriptedInterpreter::new().prompt(80));
        assert!(!s.submit_command("n"));
        assert!(s.lines().is_empty());
        assert_eq!(s.pending_commands().count(), 0);
    }

    #[test]
    fn terminal_states() {
        assert!(RunState::Finished.is_terminal());
        assert!(RunState::Halted.is_terminal());
        assert!(!RunState::AwaitingInput.is_terminal());
    }

    #[test]
    fn unknown_macro() {
        let mut s = session(ScriptedInterpreter::new());
        assert!(matches!(
            s.run_macro("teleport"),
            Err(SessionError::UnknownMacro(_))
        ));
    }

    #[test]
    fn navigate_to_current_location_queues_nothing() {
        let mut s = session(ScriptedInterpreter::new().prompt(80));
        s.advance();
        assert_eq!(s.navigate_to("West of House"), RunState::AwaitingInput);
        assert!(s.lines().is_empty());
        assert_eq!(s.pending_commands().count(), 0);
    }

    #[test]
    fn neighbors_follow_location() {
        let s = session(ScriptedInterpreter::new());
        assert_eq!(s.neighbors().len(), 4);
    }
}
