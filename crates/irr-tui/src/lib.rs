//! Terminal front end for Irrlicht.
//!
//! Shows the session's output log with an input line, a sidebar with the
//! inferred location, nearby exits and inventory, and a panel for travel,
//! macros and the walkthrough checklist.

pub mod app;
pub mod shared;
pub mod terminal;
pub mod views;
