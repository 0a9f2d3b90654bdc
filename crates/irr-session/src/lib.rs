//! Session layer for Irrlicht.
//!
//! Sits between a turn-based interactive-fiction interpreter and the person
//! playing. The [`Session`] drives the interpreter one step at a time, feeds
//! it commands typed by hand, queued by macros, or planned by the route
//! finder, and guesses the player's location and inventory from the text
//! the game prints.

pub mod config;
pub mod error;
pub mod infer;
pub mod interpreter;
pub mod macros;
pub mod multiplex;
pub mod output;
pub mod session;
pub mod walkthrough;

pub use config::SessionConfig;
pub use error::{InterpreterError, InterpreterResult, SessionError, SessionResult};
pub use infer::{Inventory, StateInferencer};
pub use interpreter::{Event, Interpreter, ProcessInterpreter, ScriptedInterpreter};
pub use multiplex::CommandSource;
pub use output::OutputLog;
pub use session::{RunState, Session};
pub use walkthrough::WalkthroughProgress;
