//! The boundary to the interactive-fiction interpreter.
//!
//! An interpreter is driven one [`step`](Interpreter::step) at a time. Each
//! step yields an [`Event`]; after an [`Event::InputRequest`] the caller
//! must [`resume`](Interpreter::resume) it with one line before stepping
//! again.

mod process;
mod scripted;

pub use process::ProcessInterpreter;
pub use scripted::ScriptedInterpreter;

use crate::error::InterpreterResult;

/// Something an interpreter did during one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Narrative text, possibly a partial line.
    Output(String),
    /// A fixed-width status line, usually `<location>  Score: n  Moves: n`.
    Status(String),
    /// The interpreter is blocked until it receives one line of input.
    InputRequest {
        /// Longest input the interpreter will read.
        max_len: usize,
    },
    /// The story has ended.
    Done,
}

/// A steppable interpreter.
pub trait Interpreter {
    /// Run until the next event.
    fn step(&mut self) -> InterpreterResult<Event>;

    /// Supply the line requested by the last [`Event::InputRequest`].
    ///
    /// `input` is newline-terminated.
    fn resume(&mut self, input: &str) -> InterpreterResult<()>;
}

impl<T: Interpreter + ?Sized> Interpreter for Box<T> {
    fn step(&mut self) -> InterpreterResult<Event> {
        (**self).step()
    }

    fn resume(&mut self, input: &str) -> InterpreterResult<()> {
        (**self).resume(input)
    }
}
