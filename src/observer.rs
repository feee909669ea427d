//! Generation progress hooks
//!
//! A [`GenerationObserver`] is handed every intermediate result of a
//! generation pass as soon as the stage producing it finishes. Visualisers,
//! debuggers and tests implement it to see the triangulation or spanning tree
//! without the generator keeping them around.

use crate::generation::{Path, SpanningTree, Tetrahedralization};
use crate::geometry::Edge;
use crate::room::{Room, RoomId};

/// Callbacks invoked by [`Dungeon`](crate::Dungeon) during generation
///
/// Every method has an empty default, so implementors only override the
/// stages they care about.
///
/// # Example
///
/// ```
/// use voxel_dungeon::*;
///
/// #[derive(Default)]
/// struct CountCorridors(usize);
///
/// impl GenerationObserver for CountCorridors {
///     fn path_carved(&mut self, _from: RoomId, _to: RoomId, _path: &Path) {
///         self.0 += 1;
///     }
/// }
///
/// let config = DungeonConfigBuilder::new().seed(9).build().unwrap();
/// let mut counter = CountCorridors::default();
/// let dungeon = Dungeon::generate_with_observer(config, &mut counter).unwrap();
/// assert_eq!(counter.0, dungeon.connections().len());
/// ```
pub trait GenerationObserver {
    /// Rooms were placed and written into the grid
    fn rooms_placed(&mut self, _rooms: &[Room]) {}

    /// The room centers were tetrahedralized
    fn triangulated(&mut self, _tetrahedralization: &Tetrahedralization) {}

    /// The minimum spanning tree over the triangulation edges was built
    fn spanning_tree(&mut self, _tree: &SpanningTree) {}

    /// Final list of room pairs to connect: tree edges, then extra edges
    fn connections_selected(&mut self, _edges: &[Edge]) {}

    /// A corridor from `from` to `to` was carved
    fn path_carved(&mut self, _from: RoomId, _to: RoomId, _path: &Path) {}

    /// No corridor could be found from `from` to `to`
    fn path_failed(&mut self, _from: RoomId, _to: RoomId) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {}

/// Observer that reports every stage through the `log` facade at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl GenerationObserver for LogObserver {
    fn rooms_placed(&mut self, rooms: &[Room]) {
        for (id, room) in rooms.iter().enumerate() {
            log::debug!(
                "[Observer] room {} at {} with {} cells",
                id,
                room.center(),
                room.cell_count()
            );
        }
    }

    fn triangulated(&mut self, tetrahedralization: &Tetrahedralization) {
        log::debug!(
            "[Observer] {} tetrahedra over {} points",
            tetrahedralization.tetrahedra().len(),
            tetrahedralization.points().len()
        );
    }

    fn spanning_tree(&mut self, tree: &SpanningTree) {
        log::debug!(
            "[Observer] spanning tree: {} edges, total length {:.2}, {} left over",
            tree.solution().len(),
            tree.total_length(),
            tree.excluded().len()
        );
    }

    fn connections_selected(&mut self, edges: &[Edge]) {
        log::debug!("[Observer] {} connections selected", edges.len());
    }

    fn path_carved(&mut self, from: RoomId, to: RoomId, path: &Path) {
        log::debug!(
            "[Observer] {} -> {}: {} steps, {} stairs, cost {}",
            from.0,
            to.0,
            path.steps().len(),
            path.stairs().count(),
            path.cost()
        );
    }

    fn path_failed(&mut self, from: RoomId, to: RoomId) {
        log::debug!("[Observer] {} -> {}: no path", from.0, to.0);
    }
}
