//! Spatial indexing for fast position-to-room lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::Vec3;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// KD-tree over room centers
///
/// Answers "which room is closest to this world position" in O(log n), for
/// picking, spawning or placing props next to a room.
#[derive(Clone, Default)]
pub struct SpatialIndex {
    tree: Option<ImmutableKdTree<f32, usize, 3, 32>>,
}

impl SpatialIndex {
    /// Build an index from room centers; item ids are slice indices
    ///
    /// # Example
    ///
    /// ```
    /// use voxel_dungeon::*;
    ///
    /// let centers = vec![
    ///     Vec3::new(2.0, 0.0, 2.0),
    ///     Vec3::new(10.0, 1.0, 4.0),
    ///     Vec3::new(5.0, 3.0, 12.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&centers);
    /// assert_eq!(index.find_nearest(Vec3::new(9.0, 1.0, 5.0)), Some(1));
    /// ```
    pub fn new(centers: &[Vec3]) -> Self {
        if centers.is_empty() {
            return Self { tree: None };
        }
        let points: Vec<[f32; 3]> = centers.iter().map(|c| c.to_array()).collect();
        Self {
            tree: Some(ImmutableKdTree::new_from_slice(&points)),
        }
    }

    /// Index of the center nearest to `position`, `None` for an empty index
    pub fn find_nearest(&self, position: Vec3) -> Option<usize> {
        let tree = self.tree.as_ref()?;
        let result = tree.nearest_one::<SquaredEuclidean>(&position.to_array());
        Some(result.item as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_room_center() {
        let centers = vec![
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(8.0, 0.0, 1.0),
            Vec3::new(1.0, 2.0, 8.0),
            Vec3::new(8.0, 4.0, 8.0),
        ];
        let index = SpatialIndex::new(&centers);

        assert_eq!(index.find_nearest(Vec3::new(0.0, 0.0, 0.0)), Some(0));
        assert_eq!(index.find_nearest(Vec3::new(7.0, 1.0, 2.0)), Some(1));
        assert_eq!(index.find_nearest(Vec3::new(2.0, 2.0, 7.0)), Some(2));
        assert_eq!(index.find_nearest(Vec3::new(9.0, 3.0, 9.0)), Some(3));
        for (id, &center) in centers.iter().enumerate() {
            assert_eq!(index.find_nearest(center), Some(id));
        }
    }

    #[test]
    fn test_empty_index() {
        let index = SpatialIndex::new(&[]);
        assert_eq!(index.find_nearest(Vec3::ZERO), None);
    }
}
