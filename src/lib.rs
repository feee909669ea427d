//! Multi-level voxel dungeon generation
//!
//! A standalone library that lays out dungeons on a 3-D voxel grid: rooms are
//! scattered at random, connected through a Delaunay tetrahedralization and a
//! minimum spanning tree (plus a few extra loops), and joined by corridors
//! that an A* search carves with staircases between levels. The output is a
//! typed grid that any engine can turn into geometry.
//!
//! # Quick Start
//!
//! ```rust
//! use voxel_dungeon::*;
//!
//! let config = DungeonConfigBuilder::new()
//!     .seed(42)
//!     .grid_size(UVec3::new(30, 5, 30))
//!     .unwrap()
//!     .room_count(12)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let dungeon = Dungeon::generate(config).unwrap();
//!
//! let grid = dungeon.grid();
//! println!(
//!     "{} rooms, {} hallway cells, {} staircases",
//!     dungeon.rooms().len(),
//!     grid.count(CellType::Hallway),
//!     grid.count(CellType::Stairs)
//! );
//! ```
//!
//! The stages are usable on their own, e.g. a single corridor search:
//!
//! ```rust
//! use voxel_dungeon::*;
//!
//! let mut grid = Grid::new(Vec3::ONE, UVec3::new(10, 3, 10));
//! let goal = Room::cuboid(IVec3::new(6, 1, 6), IVec3::new(2, 1, 2), Vec3::ONE);
//! for &cell in goal.cells() {
//!     grid.set_type(cell, CellType::Room).unwrap();
//! }
//!
//! let path = Pathfinder::new(&grid)
//!     .find_path(IVec3::new(1, 0, 1), &goal)
//!     .unwrap()
//!     .expect("open grid");
//! path.carve(&mut grid).unwrap();
//! assert_eq!(grid.count(CellType::Stairs), 1);
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-room lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, cells, rooms and paths

// Modules
pub mod error;
pub mod config;
pub mod cell;
pub mod grid;
pub mod room;
pub mod queue;
pub mod geometry;
pub mod generation;
pub mod observer;
pub mod dungeon;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{DungeonError, Result};
pub use config::{DungeonConfig, DungeonConfigBuilder, DEFAULT_STAIR_COST};
pub use cell::{Cell, CellType, Direction};
pub use grid::Grid;
pub use room::{Room, RoomId};
pub use queue::{Keyed, PriorityQueue};
pub use geometry::{Circumcircle, Circumsphere, Edge, Tetrahedron, Triangle, Vertex};
pub use generation::{NodeKind, Path, PathNode, Pathfinder, SpanningTree, StairCells, Tetrahedralization};
pub use observer::{GenerationObserver, LogObserver, NoopObserver};
pub use dungeon::{Connection, Dungeon};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam vector types for convenience
pub use glam::{DVec3, IVec3, UVec3, Vec3};
