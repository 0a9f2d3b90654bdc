//! View rendering.

pub mod input;
pub mod output;
pub mod panels;
pub mod sidebar;
