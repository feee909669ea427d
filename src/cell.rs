//! Grid Cell Structure
//!
//! Represents one voxel of the dungeon grid: its index, world position, what
//! has been carved into it, and which way stairs in it face.

use glam::{IVec3, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What occupies a grid cell
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellType {
    /// Nothing carved yet, free for rooms and hallways
    #[default]
    Empty,
    /// Part of a room
    Room,
    /// Flat corridor cell
    Hallway,
    /// The lower cell of a staircase, holding the steps
    Stairs,
    /// The headroom cell directly above a staircase
    StairSpace,
}

impl CellType {
    /// Check if this cell is part of a corridor (flat or stairs)
    pub fn is_corridor(&self) -> bool {
        matches!(self, CellType::Hallway | CellType::Stairs | CellType::StairSpace)
    }
}

/// Horizontal cardinal direction on the XZ plane
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Direction {
    /// +Z
    #[default]
    North,
    /// +X
    East,
    /// -Z
    South,
    /// -X
    West,
}

impl Direction {
    /// All four directions, in expansion order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit grid offset of one step in this direction
    pub fn offset(self) -> IVec3 {
        match self {
            Direction::North => IVec3::Z,
            Direction::East => IVec3::X,
            Direction::South => IVec3::NEG_Z,
            Direction::West => IVec3::NEG_X,
        }
    }

    /// The direction pointing the other way
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Direction of travel from `from` to an adjacent index `to`
    ///
    /// Only the horizontal delta is considered, so a staircase step (which
    /// also changes y) still reports the direction it was walked in.
    /// Returns `None` unless the two indices are exactly one cardinal step
    /// apart on the XZ plane.
    pub fn between(from: IVec3, to: IVec3) -> Option<Self> {
        let delta = to - from;
        match (delta.x, delta.z) {
            (0, 1) => Some(Direction::North),
            (1, 0) => Some(Direction::East),
            (0, -1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }
}

/// A single cell of the dungeon grid
///
/// Cells are never removed from the grid; carving a room or a corridor only
/// changes `cell_type` (and `face_direction` for stairs).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Integer grid coordinates of this cell
    pub index: IVec3,

    /// World-space center, `index * cell_size`
    pub center: Vec3,

    /// What has been carved into this cell
    pub cell_type: CellType,

    /// Uphill direction of a staircase
    ///
    /// Only meaningful for `Stairs` and `StairSpace` cells.
    pub face_direction: Direction,
}

impl Cell {
    /// Create an empty cell at the given index
    pub fn new(index: IVec3, cell_size: Vec3) -> Self {
        Self {
            index,
            center: index.as_vec3() * cell_size,
            cell_type: CellType::Empty,
            face_direction: Direction::default(),
        }
    }

    /// Check if nothing has been carved into this cell
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cell_type == CellType::Empty
    }
}
