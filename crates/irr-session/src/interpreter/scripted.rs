use std::collections::VecDeque;

use crate::error::{InterpreterError, InterpreterResult};

use super::{Event, Interpreter};

#[derive(Debug, Clone)]
enum ScriptStep {
    Emit(Event),
    Fail(String),
    FailResume(String),
}

/// An in-memory interpreter that plays back a fixed script.
///
/// Every input it is resumed with is recorded. Once the script runs out it
/// reports [`Event::Done`].
///
/// ```
/// use irr_session::{Event, Interpreter, ScriptedInterpreter};
///
/// let mut interp = ScriptedInterpreter::new()
///     .output("West of House\n")
///     .prompt(80);
/// assert_eq!(interp.step().unwrap(), Event::Output("West of House\n".into()));
/// assert_eq!(interp.step().unwrap(), Event::InputRequest { max_len: 80 });
/// interp.resume("look\n").unwrap();
/// assert_eq!(interp.inputs(), ["look\n"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedInterpreter {
    script: VecDeque<ScriptStep>,
    inputs: Vec<String>,
    awaiting: bool,
}

impl ScriptedInterpreter {
    /// Create an interpreter with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit narrative text.
    pub fn output(mut self, text: impl Into<String>) -> Self {
        self.script.push_back(ScriptStep::Emit(Event::Output(text.into())));
        self
    }

    /// Emit a status line.
    pub fn status(mut self, line: impl Into<String>) -> Self {
        self.script.push_back(ScriptStep::Emit(Event::Status(line.into())));
        self
    }

    /// Ask for one line of input.
    pub fn prompt(mut self, max_len: usize) -> Self {
        self.script
            .push_back(ScriptStep::Emit(Event::InputRequest { max_len }));
        self
    }

    /// Fail the step with the given message.
    pub fn fail(mut self, message: impl Into<String>) -> Self {
        self.script.push_back(ScriptStep::Fail(message.into()));
        self
    }

    /// Fail the next resume with the given message.
    ///
    /// Place it right after the [`prompt`](Self::prompt) whose answer
    /// should fail. Stepping past it without a resume skips it.
    pub fn fail_resume(mut self, message: impl Into<String>) -> Self {
        self.script.push_back(ScriptStep::FailResume(message.into()));
        self
    }

    /// Every line received so far, in order.
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Whether script steps remain.
    pub fn has_remaining(&self) -> bool {
        !self.script.is_empty()
    }
}

impl Interpreter for ScriptedInterpreter {
    fn step(&mut self) -> InterpreterResult<Event> {
        if self.awaiting {
            return Err(InterpreterError::Script(
                "stepped while waiting for input".to_string(),
            ));
        }
        loop {
            return match self.script.pop_front() {
                Some(ScriptStep::Emit(event)) => {
                    self.awaiting = matches!(event, Event::InputRequest { .. });
                    Ok(event)
                }
                Some(ScriptStep::Fail(message)) => Err(InterpreterError::Script(message)),
                Some(ScriptStep::FailResume(_)) => continue,
                None => Ok(Event::Done),
            };
        }
    }

    fn resume(&mut self, input: &str) -> InterpreterResult<()> {
        if !self.awaiting {
            return Err(InterpreterError::NotAwaitingInput);
        }
        self.awaiting = false;
        if matches!(self.script.front(), Some(ScriptStep::FailResume(_)))
            && let Some(ScriptStep::FailResume(message)) = self.script.pop_front()
        {
            return Err(InterpreterError::Script(message));
        }
        self.inputs.push(input.to_string());
        Ok(())
    }
}
