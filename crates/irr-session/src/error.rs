//! Error types for the session layer.

use std::io;

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Result type for interpreter operations.
pub type InterpreterResult<T> = Result<T, InterpreterError>;

/// Errors raised by an interpreter while loading or stepping.
///
/// The session treats every one of these as fatal.
#[derive(Debug, Error)]
pub enum InterpreterError {
    /// The interpreter process could not be started.
    #[error("cannot start interpreter: {0}")]
    Spawn(#[source] io::Error),

    /// Reading from or writing to the interpreter failed.
    #[error("interpreter i/o failed: {0}")]
    Io(#[from] io::Error),

    /// Input was supplied while the interpreter was not asking for any.
    #[error("interpreter is not waiting for input")]
    NotAwaitingInput,

    /// The interpreter went away while input was being delivered.
    #[error("interpreter exited: {0}")]
    Exited(String),

    /// A scripted interpreter was told to fail.
    #[error("{0}")]
    Script(String),
}

/// Errors that can occur during a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No macro is registered under this identifier.
    #[error("unknown macro: {0}")]
    UnknownMacro(String),

    /// No walkthrough task has this identifier.
    #[error("unknown walkthrough task: {0}")]
    UnknownTask(String),
}
