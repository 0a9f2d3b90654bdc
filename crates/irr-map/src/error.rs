//! Error types for loading and validating world graphs.

use thiserror::Error;

/// Alias for `Result<T, MapError>`.
pub type MapResult<T> = Result<T, MapError>;

/// Errors raised while building a [`WorldGraph`](crate::WorldGraph).
///
/// Route misses are not errors; see [`find_path`](crate::find_path).
#[derive(Debug, Error)]
pub enum MapError {
    /// A location was looked up by a name the graph does not contain.
    #[error("unknown location: {0}")]
    UnknownLocation(String),

    /// Two locations share the same display name.
    #[error("location defined twice: \"{0}\"")]
    DuplicateLocation(String),

    /// An exit points at a location that is not part of the graph.
    #[error("exit from \"{from}\" leads to unknown location \"{to}\"")]
    DanglingEdge {
        /// The location the exit belongs to.
        from: String,
        /// The missing target.
        to: String,
    },

    /// The map document could not be parsed.
    #[error("invalid map data: {0}")]
    Parse(#[from] serde_json::Error),

    /// The map file could not be read.
    #[error("cannot read map file: {0}")]
    Io(#[from] std::io::Error),
}
