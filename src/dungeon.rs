//! Dungeon main structure

use std::collections::BTreeMap;
use std::time::Instant;

use glam::{IVec3, Vec3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::DungeonConfig;
use crate::error::{DungeonError, Result};
use crate::generation::{
    jitter_points, place_rooms, select_extra_edges, Path, Pathfinder, SpanningTree, Tetrahedralization,
};
use crate::geometry::Edge;
use crate::grid::Grid;
use crate::observer::{GenerationObserver, NoopObserver};
use crate::room::{Room, RoomId};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// Fewest rooms a tetrahedralization can be built from
const MIN_ROOMS: usize = 4;

/// A corridor carved between two rooms
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Room the corridor starts in
    pub from: RoomId,
    /// Room the corridor enters
    pub to: RoomId,
    /// The carved path, ending at the entry cell of `to`
    pub path: Path,
}

/// A generated multi-level dungeon
///
/// Owns the voxel grid with rooms, hallways and stairs carved in, the rooms
/// themselves, and the room-to-room connections. Generation is a single
/// blocking call; running it again goes through [`regenerate`](Self::regenerate),
/// whose `&mut self` receiver rules out a second pass while one is running.
///
/// # Examples
///
/// ```
/// use voxel_dungeon::*;
///
/// let config = DungeonConfigBuilder::new()
///     .seed(42)
///     .grid_size(UVec3::new(24, 4, 24))
///     .unwrap()
///     .room_count(8)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let dungeon = Dungeon::generate(config).unwrap();
/// println!("{} rooms, {} corridors", dungeon.rooms().len(), dungeon.connections().len());
///
/// for connection in dungeon.connections() {
///     println!("{:?} -> {:?}: {} steps", connection.from, connection.to, connection.path.steps().len());
/// }
/// ```
#[derive(Clone)]
pub struct Dungeon {
    /// Configuration of the last generation pass
    config: DungeonConfig,

    /// Voxel grid with everything carved in
    grid: Grid,

    /// Placed rooms, indexed by `RoomId`
    rooms: Vec<Room>,

    /// Directed from -> to for every carved corridor
    adjacency: BTreeMap<RoomId, Vec<RoomId>>,

    /// Carved corridors, in carving order
    connections: Vec<Connection>,

    /// Room pairs no corridor could be found for
    failed_connections: Vec<(RoomId, RoomId)>,

    /// Nearest-room lookups over room centers (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl Dungeon {
    /// Generate a dungeon from a configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `config` fails [`DungeonConfig::validate`],
    /// `RoomPlacementFailed` if fewer than four rooms fit into the
    /// grid, `DegenerateGeometry` if the room centers cannot be
    /// tetrahedralized, or `EmptyEdgeGraph` if the triangulation has no edges.
    /// Corridors that cannot be routed are not errors, see
    /// [`failed_connections`](Self::failed_connections).
    pub fn generate(config: DungeonConfig) -> Result<Self> {
        Self::generate_with_observer(config, &mut NoopObserver)
    }

    /// Generate a dungeon, reporting each stage to `observer`
    pub fn generate_with_observer<O>(config: DungeonConfig, observer: &mut O) -> Result<Self>
    where
        O: GenerationObserver + ?Sized,
    {
        // Before the grid is allocated from the config's dimensions
        config.validate()?;
        let mut dungeon = Self {
            config,
            grid: Grid::new(config.cell_size, config.grid_size),
            rooms: Vec::new(),
            adjacency: BTreeMap::new(),
            connections: Vec::new(),
            failed_connections: Vec::new(),
            #[cfg(feature = "spatial-index")]
            spatial_index: SpatialIndex::default(),
        };
        dungeon.run(observer)?;
        Ok(dungeon)
    }

    /// Throw away the current layout and generate a new one with `seed`
    ///
    /// The grid is reset in place. If generation fails, the dungeon holds
    /// whatever the failing stage had produced so far.
    pub fn regenerate<O>(&mut self, seed: u32, observer: &mut O) -> Result<()>
    where
        O: GenerationObserver + ?Sized,
    {
        self.config.seed = seed;
        self.run(observer)
    }

    fn run<O>(&mut self, observer: &mut O) -> Result<()>
    where
        O: GenerationObserver + ?Sized,
    {
        let total = Instant::now();
        self.config.validate()?;
        let config = self.config;
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(config.seed));

        self.grid.init(config.cell_size, config.grid_size);
        self.rooms.clear();
        self.adjacency.clear();
        self.connections.clear();
        self.failed_connections.clear();

        // Step 1: Rooms
        let start = Instant::now();
        self.rooms = place_rooms(&mut self.grid, &config, &mut rng)?;
        log::info!(
            "[Rooms] Placed {} of {} rooms in {:?}",
            self.rooms.len(),
            config.room_count,
            start.elapsed()
        );
        if self.rooms.len() < MIN_ROOMS {
            return Err(DungeonError::RoomPlacementFailed {
                placed: self.rooms.len(),
                requested: config.room_count,
            });
        }
        #[cfg(feature = "spatial-index")]
        {
            let centers: Vec<Vec3> = self.rooms.iter().map(Room::center).collect();
            self.spatial_index = SpatialIndex::new(&centers);
        }
        observer.rooms_placed(&self.rooms);

        // Step 2: Tetrahedralize room centers
        let start = Instant::now();
        let points = jitter_points(&self.rooms, config.cell_size, config.jitter, &mut rng);
        let (min, max) = self.grid.world_bounds();
        let tetrahedralization = Tetrahedralization::build(&points, min.as_dvec3(), max.as_dvec3())?;
        let graph = tetrahedralization.adjacency();
        log::info!(
            "[Delaunay] {} tetrahedra, {} edges in {:?}",
            tetrahedralization.tetrahedra().len(),
            graph.values().map(Vec::len).sum::<usize>() / 2,
            start.elapsed()
        );
        observer.triangulated(&tetrahedralization);

        // Step 3: Spanning tree from room 0
        let tree = SpanningTree::prim(0, &graph)?;
        log::info!(
            "[MST] {} tree edges, {} candidates for loops",
            tree.solution().len(),
            tree.excluded().len()
        );
        observer.spanning_tree(&tree);

        // Step 4: Tree edges plus a sample of the rest
        let extra = select_extra_edges(tree.excluded(), config.extra_hallway_fraction, &mut rng);
        log::info!("[MST] {} extra hallways selected", extra.len());
        let selected: Vec<Edge> = tree.solution().iter().copied().chain(extra).collect();
        observer.connections_selected(&selected);

        // Step 5: Carve corridors in order, each one avoiding the earlier ones
        let start = Instant::now();
        for edge in &selected {
            self.connect(RoomId(edge.a.id), RoomId(edge.b.id), observer)?;
        }
        log::info!(
            "[Hallways] Carved {} corridors, {} failed in {:?}",
            self.connections.len(),
            self.failed_connections.len(),
            start.elapsed()
        );

        log::info!("[Dungeon] Generated in {:?}", total.elapsed());
        Ok(())
    }

    /// Route and carve one corridor
    fn connect<O>(&mut self, from: RoomId, to: RoomId, observer: &mut O) -> Result<()>
    where
        O: GenerationObserver + ?Sized,
    {
        let (Some(start_room), Some(goal_room)) = (self.rooms.get(from.0), self.rooms.get(to.0)) else {
            return Err(DungeonError::InvalidGoal(format!(
                "edge {} -> {} names a room that does not exist",
                from.0, to.0
            )));
        };
        let origin = start_room
            .nearest_cell(goal_room.center(), self.config.cell_size)
            .ok_or_else(|| DungeonError::InvalidGoal(format!("room {} has no cells", from.0)))?;

        let path = Pathfinder::new(&self.grid)
            .with_stair_cost(self.config.stair_cost)
            .find_path(origin, goal_room)?;

        match path {
            Some(path) => {
                path.carve(&mut self.grid)?;
                log::debug!(
                    "[Hallways] {} -> {}: {} steps, {} stairs",
                    from.0,
                    to.0,
                    path.steps().len(),
                    path.stairs().count()
                );
                observer.path_carved(from, to, &path);
                self.adjacency.entry(from).or_default().push(to);
                self.connections.push(Connection { from, to, path });
            }
            None => {
                log::warn!("[Hallways] No path from room {} to room {}", from.0, to.0);
                observer.path_failed(from, to);
                self.failed_connections.push((from, to));
            }
        }
        Ok(())
    }

    /// Get the configuration of the last generation pass
    #[inline]
    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// Get the voxel grid
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get all rooms; a room's `RoomId` is its index here
    #[inline]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Get a room by id
    #[inline]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    /// Carved corridors as a directed from -> to map
    #[inline]
    pub fn adjacency(&self) -> &BTreeMap<RoomId, Vec<RoomId>> {
        &self.adjacency
    }

    /// Rooms reachable from `id` through one corridor, in either direction
    pub fn neighbors(&self, id: RoomId) -> Vec<RoomId> {
        let mut out: Vec<RoomId> = self.adjacency.get(&id).cloned().unwrap_or_default();
        for (&from, targets) in &self.adjacency {
            if targets.contains(&id) && !out.contains(&from) {
                out.push(from);
            }
        }
        out
    }

    /// Carved corridors, in carving order
    #[inline]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Room pairs that were selected but could not be connected
    #[inline]
    pub fn failed_connections(&self) -> &[(RoomId, RoomId)] {
        &self.failed_connections
    }

    /// The room whose center is exactly `center`
    pub fn room_at_center(&self, center: Vec3) -> Option<RoomId> {
        self.rooms.iter().position(|r| r.center() == center).map(RoomId)
    }

    /// The room owning a grid cell
    pub fn room_containing(&self, index: IVec3) -> Option<RoomId> {
        self.rooms.iter().position(|r| r.contains(index)).map(RoomId)
    }

    /// Find the room whose center is nearest to a world position (requires
    /// spatial-index feature)
    ///
    /// # Example
    ///
    /// ```
    /// # use voxel_dungeon::*;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// # let dungeon = Dungeon::generate(DungeonConfigBuilder::new().seed(3).build().unwrap()).unwrap();
    /// let center = dungeon.rooms()[2].center();
    /// assert_eq!(dungeon.find_room_at(center), Some(RoomId(2)));
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn find_room_at(&self, position: Vec3) -> Option<RoomId> {
        self.spatial_index.find_nearest(position).map(RoomId)
    }
}
