//! Error types for dungeon generation

use glam::{IVec3, UVec3};
use thiserror::Error;

/// Errors that can occur during dungeon generation or grid queries
///
/// Structural problems (bad configuration, invalid goals, broken geometry)
/// abort a generation pass. A single connection that cannot be routed is not
/// an error: the pathfinder reports it as `Ok(None)` and the pass continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DungeonError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A grid index outside `[0, dims)` was accessed
    #[error("cell index {index} is out of bounds for grid {dims}")]
    OutOfBounds {
        /// Requested index
        index: IVec3,
        /// Grid dimensions
        dims: UVec3,
    },

    /// The pathfinder was given a start or goal it can never reach
    #[error("invalid pathfinding goal: {0}")]
    InvalidGoal(String),

    /// The minimum spanning tree was asked to run over an empty graph
    #[error("edge graph is empty, rooms cannot be connected")]
    EmptyEdgeGraph,

    /// The tetrahedralization produced a flat tetrahedron
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Too few rooms fit into the grid to build a connectivity graph
    #[error("placed {placed} of {requested} rooms, at least 4 are required")]
    RoomPlacementFailed {
        /// Number of rooms actually placed
        placed: usize,
        /// Number of rooms requested by the configuration
        requested: usize,
    },
}

/// Result type alias for dungeon operations
pub type Result<T> = std::result::Result<T, DungeonError>;
