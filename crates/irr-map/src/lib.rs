//! World graph and shortest-route planning for Irrlicht.
//!
//! The graph is a fixed, hand-authored set of named locations joined by
//! directed exits. It carries no behavior of its own: [`find_path`] searches
//! it breadth-first and turns the route into the literal commands a player
//! would type, and [`WorldGraph::neighbors`] offers a compass view of a
//! single location for display.

/// Compass view of a location's immediate exits.
pub mod compass;
/// Movement directions used to tag exits.
pub mod direction;
/// Error types for loading and validating graphs.
pub mod error;
/// Locations, exits, and the validated world graph.
pub mod graph;
/// Breadth-first route planning.
pub mod path;

pub use compass::{Compass, NeighborInfo};
pub use direction::Direction;
pub use error::{MapError, MapResult};
pub use graph::{Location, Transition, WorldGraph};
pub use path::{PathResult, find_path};
