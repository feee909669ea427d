//! Dungeon generation pipeline stages
//!
//! Rooms are placed at random, their centers are tetrahedralized to find
//! which rooms are natural neighbours, a minimum spanning tree keeps every
//! room reachable, a random share of the remaining edges adds loops, and
//! the A* pathfinder carves a corridor for each selected edge.

mod delaunay;
mod pathfinding;
mod rooms;
mod spanning_tree;

pub use delaunay::{EdgeMap, SuperTetrahedron, Tetrahedralization};
pub use pathfinding::{NodeKind, Path, PathNode, Pathfinder, StairCells, HEURISTIC_BIAS};
pub use rooms::place_rooms;
pub use spanning_tree::SpanningTree;

use glam::{DVec3, Vec3};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::geometry::Edge;
use crate::room::Room;

/// Perturbation on an axis all rooms share, as a fraction of the cell size
/// along that axis
pub const FLAT_LIFT: f64 = 0.25;

/// Room centers as triangulation input, each nudged by a small random offset
///
/// Rooms sit on a lattice, so their centers are often coplanar or
/// cospherical. Offsets are drawn uniformly from `[-a, a]` per axis with
/// `a = jitter * min(cell_size)`. On an axis where every center lies within
/// half a cell of the others (a single-level dungeon), `a` grows to
/// `FLAT_LIFT` of the cell size so the tetrahedra have real volume.
/// With `jitter == 0` the centers are used as-is. The offset only feeds the
/// triangulation, room centers are not moved.
pub fn jitter_points<R: Rng>(rooms: &[Room], cell_size: Vec3, jitter: f32, rng: &mut R) -> Vec<DVec3> {
    let centers: Vec<DVec3> = rooms.iter().map(|r| r.center().as_dvec3()).collect();
    let base = f64::from(jitter) * f64::from(cell_size.min_element());
    if base <= 0.0 || centers.is_empty() {
        return centers;
    }

    let lo = centers.iter().copied().fold(DVec3::INFINITY, DVec3::min);
    let hi = centers.iter().copied().fold(DVec3::NEG_INFINITY, DVec3::max);
    let cell = cell_size.as_dvec3();
    let amplitude = DVec3::select(
        (hi - lo).cmplt(cell * 0.5),
        (cell * FLAT_LIFT).max(DVec3::splat(base)),
        DVec3::splat(base),
    );

    centers
        .into_iter()
        .map(|center| {
            center
                + DVec3::new(
                    rng.gen_range(-amplitude.x..=amplitude.x),
                    rng.gen_range(-amplitude.y..=amplitude.y),
                    rng.gen_range(-amplitude.z..=amplitude.z),
                )
        })
        .collect()
}

/// Sample extra hallway edges from the edges the spanning tree left out
///
/// Picks `round(fraction * excluded.len())` distinct edges, so no corridor
/// is requested twice.
pub fn select_extra_edges<R: Rng>(excluded: &[Edge], fraction: f32, rng: &mut R) -> Vec<Edge> {
    let count = (f64::from(fraction) * excluded.len() as f64).round() as usize;
    excluded
        .choose_multiple(rng, count.min(excluded.len()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vertex;
    use glam::IVec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;
    use std::collections::HashSet;

    fn edges(count: usize) -> Vec<Edge> {
        (0..count)
            .map(|i| {
                Edge::new(
                    Vertex::new(i, DVec3::new(i as f64, 0.0, 0.0)),
                    Vertex::new(i + 1, DVec3::new(i as f64 + 1.0, 0.0, 0.0)),
                )
            })
            .collect()
    }

    #[rstest]
    #[case(0.0, 8, 0)]
    #[case(0.125, 8, 1)]
    #[case(0.5, 7, 4)]
    #[case(1.0, 8, 8)]
    #[case(0.3, 0, 0)]
    fn test_extra_edge_count(#[case] fraction: f32, #[case] available: usize, #[case] expected: usize) {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let pool = edges(available);
        let picked = select_extra_edges(&pool, fraction, &mut rng);

        assert_eq!(picked.len(), expected);
        let distinct: HashSet<(usize, usize)> = picked.iter().map(Edge::key).collect();
        assert_eq!(distinct.len(), picked.len());
        assert!(picked.iter().all(|e| pool.contains(e)));
    }

    #[test]
    fn test_jitter_stays_within_amplitude() {
        let rooms: Vec<Room> = (0..6)
            .map(|i| Room::new(vec![IVec3::new(i * 2, i % 3, i)], Vec3::ONE))
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let points = jitter_points(&rooms, Vec3::new(2.0, 1.0, 3.0), 0.01, &mut rng);

        assert_eq!(points.len(), rooms.len());
        for (room, point) in rooms.iter().zip(&points) {
            let offset = (*point - room.center().as_dvec3()).abs();
            assert!(offset.max_element() <= 0.01 + 1e-9);
        }
        // At least one point actually moved
        assert!(rooms.iter().zip(&points).any(|(r, p)| *p != r.center().as_dvec3()));
    }

    #[test]
    fn test_single_level_is_lifted() {
        let rooms: Vec<Room> = (0..8)
            .map(|i| Room::new(vec![IVec3::new(i * 2, 0, (i * 5) % 7)], Vec3::ONE))
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let points = jitter_points(&rooms, Vec3::new(1.0, 2.0, 1.0), 0.001, &mut rng);

        let mut spread = 0.0f64;
        for (room, point) in rooms.iter().zip(&points) {
            let offset = *point - room.center().as_dvec3();
            assert!(offset.x.abs() <= 0.001 + 1e-9);
            assert!(offset.z.abs() <= 0.001 + 1e-9);
            assert!(offset.y.abs() <= FLAT_LIFT * 2.0 + 1e-9);
            spread = spread.max(offset.y.abs());
        }
        // Lifted well beyond the base amplitude
        assert!(spread > 0.01);
    }

    #[test]
    fn test_zero_jitter_keeps_centers() {
        let rooms = vec![Room::new(vec![IVec3::new(3, 1, 4)], Vec3::ONE)];
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let points = jitter_points(&rooms, Vec3::ONE, 0.0, &mut rng);
        assert_eq!(points, vec![DVec3::new(3.0, 1.0, 4.0)]);
    }
}
