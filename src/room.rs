//! Room Structure
//!
//! A room is a fixed set of grid cells with a cached centroid.

use glam::{IVec3, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index of a room in the dungeon's room list
///
/// Room ids double as vertex ids in the tetrahedralization, so an edge of the
/// connectivity graph resolves to its two rooms without a position lookup.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub usize);

/// A room: an ordered collection of grid cells
///
/// The center is the centroid of the cell centers. It is computed once when
/// the room is built and the cell set cannot change afterwards. No cell is the
/// designated "origin"; any of them may be listed first.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct Room {
    cells: Vec<IVec3>,
    center: Vec3,
}

impl Room {
    /// Build a room from its cell indices
    ///
    /// `cell_size` converts indices to world centers, matching
    /// [`Grid::center_by_indices`](crate::Grid::center_by_indices).
    pub fn new(cells: Vec<IVec3>, cell_size: Vec3) -> Self {
        let center = if cells.is_empty() {
            Vec3::ZERO
        } else {
            let sum: Vec3 = cells.iter().map(|c| c.as_vec3() * cell_size).sum();
            sum / cells.len() as f32
        };
        Self { cells, center }
    }

    /// Build an axis-aligned box room from its lowest corner and size
    pub fn cuboid(origin: IVec3, size: IVec3, cell_size: Vec3) -> Self {
        let mut cells = Vec::with_capacity((size.x * size.y * size.z).max(0) as usize);
        for x in 0..size.x {
            for y in 0..size.y {
                for z in 0..size.z {
                    cells.push(origin + IVec3::new(x, y, z));
                }
            }
        }
        Self::new(cells, cell_size)
    }

    /// Cell indices belonging to this room
    #[inline]
    pub fn cells(&self) -> &[IVec3] {
        &self.cells
    }

    /// Centroid of the cell centers
    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Number of cells in the room
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if a cell index belongs to this room
    #[inline]
    pub fn contains(&self, index: IVec3) -> bool {
        self.cells.contains(&index)
    }

    /// The room cell closest to a world position
    ///
    /// Ties go to the cell listed first. Returns `None` for an empty room.
    pub fn nearest_cell(&self, position: Vec3, cell_size: Vec3) -> Option<IVec3> {
        self.cells.iter().copied().min_by(|a, b| {
            let da = (a.as_vec3() * cell_size).distance_squared(position);
            let db = (b.as_vec3() * cell_size).distance_squared(position);
            da.total_cmp(&db)
        })
    }

    /// The room cell with the smallest Manhattan distance to a grid index
    pub fn nearest_cell_to_index(&self, index: IVec3) -> Option<IVec3> {
        self.cells
            .iter()
            .copied()
            .min_by_key(|c| (*c - index).abs().element_sum())
    }
}

/// Rooms compare equal when their centers and cell counts match
///
/// Room placement never accepts two rooms with the same centroid, so this is
/// only a structural identity within one dungeon.
impl PartialEq for Room {
    fn eq(&self, other: &Self) -> bool {
        self.center == other.center && self.cells.len() == other.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_center() {
        let room = Room::cuboid(IVec3::new(2, 0, 4), IVec3::new(3, 1, 2), Vec3::new(2.0, 1.0, 1.0));
        assert_eq!(room.cell_count(), 6);
        // x: 2,3,4 -> world 4,6,8 ; z: 4,5 -> 4.5
        assert_eq!(room.center(), Vec3::new(6.0, 0.0, 4.5));
        assert!(room.contains(IVec3::new(4, 0, 5)));
        assert!(!room.contains(IVec3::new(5, 0, 5)));
    }

    #[test]
    fn test_structural_equality() {
        let a = Room::new(vec![IVec3::new(0, 0, 0), IVec3::new(2, 0, 0)], Vec3::ONE);
        let b = Room::new(vec![IVec3::new(1, 0, 1), IVec3::new(1, 0, -1)], Vec3::ONE);
        let c = Room::new(vec![IVec3::new(1, 0, 0)], Vec3::ONE);
        // Same centroid and cardinality, different cells
        assert_eq!(a, b);
        // Same centroid, different cardinality
        assert_ne!(a, c);
    }

    #[test]
    fn test_nearest_cell() {
        let room = Room::cuboid(IVec3::ZERO, IVec3::new(3, 1, 3), Vec3::ONE);
        assert_eq!(room.nearest_cell(Vec3::new(10.0, 0.0, 1.0), Vec3::ONE), Some(IVec3::new(2, 0, 1)));
        assert_eq!(room.nearest_cell_to_index(IVec3::new(-4, 0, 2)), Some(IVec3::new(0, 0, 2)));

        let empty = Room::new(Vec::new(), Vec3::ONE);
        assert_eq!(empty.nearest_cell(Vec3::ZERO, Vec3::ONE), None);
    }
}
