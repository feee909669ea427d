//! A* corridor search with staircase rules
//!
//! Searches the voxel grid for a corridor from a start cell to any cell of a
//! goal room. Unlike a plain grid A*, the moves depend on the path taken so
//! far:
//!
//! - Candidates are the four cardinal neighbours at vertical offsets
//!   -1, 0 and +1, minus the direction the path just came from.
//! - A flat step costs 1. A vertical step is a staircase and costs
//!   `stair_cost`; it also needs the cell at the candidate's x/z on the
//!   current level (the auxiliary cell, which holds either the steps or their
//!   headroom) to be free.
//! - A staircase node may only be left in its own direction, so a flat
//!   landing must follow before the corridor turns.
//! - A corridor never crosses itself: candidates already used by the node's
//!   own ancestor chain (including auxiliary cells) are rejected.
//! - Occupied cells are impassable, except that goal-room cells may be
//!   entered by a flat step. Reaching one ends the search.
//!
//! Each search owns its node arena, open queue and best-score table; nothing
//! is shared between calls. A search that exhausts its open set returns
//! `Ok(None)`, which callers treat as a recoverable per-connection failure.

use std::cmp::Ordering;
use std::collections::HashMap;

use glam::IVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cell::{CellType, Direction};
use crate::config::DEFAULT_STAIR_COST;
use crate::error::{DungeonError, Result};
use crate::grid::Grid;
use crate::queue::{Keyed, PriorityQueue};
use crate::room::Room;

/// Heuristic scale slightly above 1: breaks f ties toward cells nearer the
/// goal, trading admissibility for less sideways exploration
pub const HEURISTIC_BIAS: f32 = 1.001;

/// What a path node carves
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Flat corridor step
    Hallway,
    /// Staircase step, one level up or down from its parent
    Stairs,
}

/// The two cells a staircase occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StairCells {
    /// Lower cell, holding the steps
    pub steps: IVec3,
    /// Upper cell, kept clear as headroom
    pub headroom: IVec3,
}

/// One step of a corridor
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathNode {
    /// Cell the path stands on after this step
    pub index: IVec3,
    /// Cost from the start
    pub g: f32,
    /// Biased Manhattan estimate to the goal
    pub h: f32,
    /// `g + h`
    pub f: f32,
    /// Flat or staircase step
    pub kind: NodeKind,
    /// For staircases, the cell at this step's x/z on the parent's level
    pub auxiliary: Option<IVec3>,
    /// Direction walked from the parent; `None` for the start
    pub direction: Option<Direction>,
}

impl PathNode {
    /// Lower and upper cell of a staircase step
    pub fn stair_cells(&self) -> Option<StairCells> {
        let aux = self.auxiliary?;
        Some(if self.index.y < aux.y {
            StairCells {
                steps: self.index,
                headroom: aux,
            }
        } else {
            StairCells {
                steps: aux,
                headroom: self.index,
            }
        })
    }

    /// Uphill direction of a staircase step
    pub fn face_direction(&self) -> Option<Direction> {
        let aux = self.auxiliary?;
        let walked = self.direction?;
        Some(if self.index.y > aux.y { walked } else { walked.opposite() })
    }

    /// Check if this step, or its auxiliary cell, uses `cell`
    #[inline]
    pub fn occupies(&self, cell: IVec3) -> bool {
        self.index == cell || self.auxiliary == Some(cell)
    }
}

/// A corridor found by the pathfinder
///
/// `steps` runs from the first cell after the start to the goal-room cell the
/// corridor enters through. All steps except that last one lay on empty cells
/// when the search ran.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    start: IVec3,
    steps: Vec<PathNode>,
}

impl Path {
    /// Cell the search started from
    #[inline]
    pub fn start(&self) -> IVec3 {
        self.start
    }

    /// Every step after the start, ending inside the goal room
    #[inline]
    pub fn steps(&self) -> &[PathNode] {
        &self.steps
    }

    /// Steps outside the rooms, i.e. everything but the entry step
    pub fn corridor(&self) -> &[PathNode] {
        &self.steps[..self.steps.len().saturating_sub(1)]
    }

    /// The goal-room cell the corridor enters through
    pub fn entry(&self) -> Option<&PathNode> {
        self.steps.last()
    }

    /// Total cost of the corridor
    pub fn cost(&self) -> f32 {
        self.steps.last().map_or(0.0, |n| n.g)
    }

    /// The staircase steps
    pub fn stairs(&self) -> impl Iterator<Item = &PathNode> {
        self.steps.iter().filter(|n| n.kind == NodeKind::Stairs)
    }

    /// Write the corridor into the grid
    ///
    /// Flat steps on empty cells become `Hallway`; staircases become a
    /// `Stairs` cell with a `StairSpace` cell above it, both facing uphill.
    /// Room cells are left untouched.
    pub fn carve(&self, grid: &mut Grid) -> Result<()> {
        for node in self.corridor() {
            match (node.kind, node.stair_cells(), node.face_direction()) {
                (NodeKind::Stairs, Some(cells), Some(face)) => {
                    grid.set_stairs(cells.steps, CellType::Stairs, face)?;
                    grid.set_stairs(cells.headroom, CellType::StairSpace, face)?;
                }
                _ => {
                    if grid.is_empty(node.index) {
                        grid.set_type(node.index, CellType::Hallway)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Arena slot of a search node
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    node: PathNode,
    parent: Option<usize>,
    closed: bool,
}

/// Open set entry, ordered by f and keyed by grid index
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: f32,
    id: usize,
    index: IVec3,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f.total_cmp(&other.f).then_with(|| self.id.cmp(&other.id))
    }
}

impl Keyed for OpenEntry {
    type Key = IVec3;

    fn key(&self) -> IVec3 {
        self.index
    }
}

/// Best node seen so far at a grid index
#[derive(Debug, Clone, Copy)]
struct Best {
    f: f32,
    open: bool,
}

/// Grid-constrained corridor search
///
/// # Example
///
/// ```
/// use voxel_dungeon::*;
///
/// let grid = Grid::new(Vec3::ONE, UVec3::new(8, 3, 3));
/// let goal = Room::new(vec![IVec3::new(5, 0, 0)], Vec3::ONE);
///
/// let path = Pathfinder::new(&grid)
///     .find_path(IVec3::ZERO, &goal)
///     .unwrap()
///     .expect("open grid");
/// assert_eq!(path.steps().len(), 5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Pathfinder<'a> {
    grid: &'a Grid,
    stair_cost: f32,
}

impl<'a> Pathfinder<'a> {
    /// Create a pathfinder over `grid` with the default stair cost
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            stair_cost: DEFAULT_STAIR_COST,
        }
    }

    /// Override the cost of a staircase step
    pub fn with_stair_cost(mut self, cost: f32) -> Self {
        self.stair_cost = cost;
        self
    }

    /// Find a corridor from `start` into `goal`
    ///
    /// Returns `Ok(None)` when every reachable candidate has been expanded
    /// without entering the goal room.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGoal` if `start` is outside the grid or inside the
    /// goal room, or if the goal room is empty or has a cell outside the grid
    pub fn find_path(&self, start: IVec3, goal: &Room) -> Result<Option<Path>> {
        if !self.grid.is_valid_cell(start) {
            return Err(DungeonError::InvalidGoal(format!(
                "start {} is outside the grid",
                start
            )));
        }
        if let Some(bad) = goal.cells().iter().find(|&&c| !self.grid.is_valid_cell(c)) {
            return Err(DungeonError::InvalidGoal(format!(
                "goal cell {} is outside the grid",
                bad
            )));
        }
        if goal.contains(start) {
            return Err(DungeonError::InvalidGoal(format!(
                "start {} already lies in the goal room",
                start
            )));
        }
        let target = goal
            .nearest_cell_to_index(start)
            .ok_or_else(|| DungeonError::InvalidGoal("goal room has no cells".to_string()))?;

        let mut search = Search::new(self, goal, target);
        Ok(search.run(start))
    }
}

/// State of one search, dropped when the search returns
struct Search<'p, 'a> {
    finder: &'p Pathfinder<'a>,
    goal: &'p Room,
    target: IVec3,
    arena: Vec<SearchNode>,
    open: PriorityQueue<OpenEntry>,
    best: HashMap<IVec3, Best>,
}

impl<'p, 'a> Search<'p, 'a> {
    fn new(finder: &'p Pathfinder<'a>, goal: &'p Room, target: IVec3) -> Self {
        Self {
            finder,
            goal,
            target,
            arena: Vec::new(),
            open: PriorityQueue::new(),
            best: HashMap::new(),
        }
    }

    fn heuristic(&self, index: IVec3) -> f32 {
        (index - self.target).abs().element_sum() as f32 * HEURISTIC_BIAS
    }

    fn run(&mut self, start: IVec3) -> Option<Path> {
        let h = self.heuristic(start);
        self.add(
            PathNode {
                index: start,
                g: 0.0,
                h,
                f: h,
                kind: NodeKind::Hallway,
                auxiliary: None,
                direction: None,
            },
            None,
        );

        let mut expanded = 0usize;
        while let Some(entry) = self.open.pop() {
            let id = entry.id;
            if self.arena[id].closed {
                continue;
            }
            self.arena[id].closed = true;
            if let Some(best) = self.best.get_mut(&entry.index) {
                best.open = false;
            }

            if self.is_goal(id) {
                log::trace!("[A*] reached goal after expanding {} nodes", expanded);
                return Some(self.reconstruct(id, start));
            }

            expanded += 1;
            for candidate in self.candidates(id) {
                self.add(candidate, Some(id));
            }
        }

        log::trace!("[A*] open set exhausted after expanding {} nodes", expanded);
        None
    }

    /// Queue a candidate unless an equal or better node already exists at
    /// its index
    fn add(&mut self, node: PathNode, parent: Option<usize>) {
        let previous = self.best.get(&node.index).copied();
        if previous.is_some_and(|b| b.f <= node.f) {
            return;
        }

        let id = self.arena.len();
        self.arena.push(SearchNode {
            node,
            parent,
            closed: false,
        });
        let entry = OpenEntry {
            f: node.f,
            id,
            index: node.index,
        };
        match previous {
            Some(b) if b.open => {
                if let Some(old) = self.open.replace(entry) {
                    // The replaced node can no longer be popped
                    self.arena[old.id].closed = true;
                } else {
                    self.open.push(entry);
                }
            }
            _ => self.open.push(entry),
        }
        self.best.insert(node.index, Best { f: node.f, open: true });
    }

    fn is_goal(&self, id: usize) -> bool {
        let slot = &self.arena[id];
        let Some(parent) = slot.parent else {
            return false;
        };
        self.goal.contains(slot.node.index) && self.arena[parent].node.index.y == slot.node.index.y
    }

    /// Check if `cell` is used by node `id` or any of its ancestors
    fn in_chain(&self, id: usize, cell: IVec3) -> bool {
        let mut cursor = Some(id);
        while let Some(i) = cursor {
            let slot = &self.arena[i];
            if slot.node.occupies(cell) {
                return true;
            }
            cursor = slot.parent;
        }
        false
    }

    fn candidates(&self, id: usize) -> Vec<PathNode> {
        let grid = self.finder.grid;
        let slot = self.arena[id];
        let current = slot.node;
        let arrived = slot
            .parent
            .and_then(|p| Direction::between(self.arena[p].node.index, current.index));

        let directions: Vec<Direction> = match (current.kind, arrived) {
            (NodeKind::Stairs, Some(dir)) => vec![dir],
            (_, Some(dir)) => Direction::ALL
                .into_iter()
                .filter(|d| *d != dir.opposite())
                .collect(),
            (_, None) => Direction::ALL.to_vec(),
        };

        let mut out = Vec::new();
        for dir in directions {
            let beside = current.index + dir.offset();
            if !grid.is_valid_cell(beside) {
                continue;
            }

            // Flat step
            if (grid.is_empty(beside) || self.goal.contains(beside)) && !self.in_chain(id, beside) {
                out.push(self.node(beside, current.g + 1.0, NodeKind::Hallway, None, dir));
            }

            // Both staircase cells must be Empty, so rooms are only ever
            // entered by a flat step
            for dy in [1, -1] {
                let next = beside + IVec3::Y * dy;
                if !grid.is_empty(next) || !grid.is_empty(beside) {
                    continue;
                }
                if self.in_chain(id, next) || self.in_chain(id, beside) {
                    continue;
                }
                out.push(self.node(
                    next,
                    current.g + self.finder.stair_cost,
                    NodeKind::Stairs,
                    Some(beside),
                    dir,
                ));
            }
        }
        out
    }

    fn node(
        &self,
        index: IVec3,
        g: f32,
        kind: NodeKind,
        auxiliary: Option<IVec3>,
        direction: Direction,
    ) -> PathNode {
        let h = self.heuristic(index);
        PathNode {
            index,
            g,
            h,
            f: g + h,
            kind,
            auxiliary,
            direction: Some(direction),
        }
    }

    fn reconstruct(&self, id: usize, start: IVec3) -> Path {
        let mut steps = Vec::new();
        let mut cursor = Some(id);
        while let Some(i) = cursor {
            let slot = &self.arena[i];
            if slot.parent.is_some() {
                steps.push(slot.node);
            }
            cursor = slot.parent;
        }
        steps.reverse();
        Path { start, steps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{UVec3, Vec3};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn single(index: IVec3) -> Room {
        Room::new(vec![index], Vec3::ONE)
    }

    /// Grid with the two rooms carved in
    fn grid_with(dims: UVec3, rooms: &[&Room]) -> Grid {
        let mut grid = Grid::new(Vec3::ONE, dims);
        for room in rooms {
            for &cell in room.cells() {
                grid.set_type(cell, CellType::Room).unwrap();
            }
        }
        grid
    }

    /// Movement rules every corridor must satisfy
    fn assert_well_formed(path: &Path, grid: &Grid, goal: &Room) {
        let mut used: HashSet<IVec3> = HashSet::from([path.start()]);
        let mut previous = path.start();
        let mut previous_node: Option<PathNode> = None;

        for node in path.steps() {
            // One cardinal step, at most one level
            let delta = node.index - previous;
            assert_eq!(delta.x.abs() + delta.z.abs(), 1, "not a cardinal step: {:?}", delta);
            assert!(delta.y.abs() <= 1);
            let dir = Direction::between(previous, node.index).unwrap();
            assert_eq!(node.direction, Some(dir));

            // No revisits, including auxiliary cells
            assert!(used.insert(node.index), "revisited {}", node.index);
            if let Some(aux) = node.auxiliary {
                assert!(used.insert(aux), "revisited auxiliary {}", aux);
            }

            match node.kind {
                NodeKind::Stairs => {
                    assert_eq!(delta.y.abs(), 1);
                    let aux = node.auxiliary.unwrap();
                    assert_eq!(aux, previous + dir.offset());
                    assert!(grid.is_empty(aux) && grid.is_empty(node.index));
                }
                NodeKind::Hallway => assert_eq!(delta.y, 0),
            }

            if let Some(prev) = previous_node {
                // Never reverse
                assert_ne!(Some(dir.opposite()), prev.direction);
                // Leaving a staircase keeps its direction
                if prev.kind == NodeKind::Stairs {
                    assert_eq!(prev.direction, Some(dir));
                }
            }
            previous = node.index;
            previous_node = Some(*node);
        }

        let entry = path.entry().unwrap();
        assert!(goal.contains(entry.index));
        assert_eq!(entry.kind, NodeKind::Hallway);
        for node in path.corridor() {
            assert!(!goal.contains(node.index));
            assert!(grid.is_empty(node.index));
        }
    }

    #[test]
    fn test_straight_hallway() {
        let origin = single(IVec3::new(0, 0, 0));
        let goal = single(IVec3::new(5, 0, 0));
        let grid = grid_with(UVec3::new(8, 3, 3), &[&origin, &goal]);

        let path = Pathfinder::new(&grid)
            .find_path(IVec3::ZERO, &goal)
            .unwrap()
            .expect("straight line is open");

        let g: Vec<f32> = path.steps().iter().map(|n| n.g).collect();
        assert_eq!(g, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let cells: Vec<IVec3> = path.steps().iter().map(|n| n.index).collect();
        assert_eq!(cells, (1..=5).map(|x| IVec3::new(x, 0, 0)).collect::<Vec<_>>());
        assert_eq!(path.stairs().count(), 0);
        assert_eq!(path.corridor().len(), 4);
        assert_eq!(path.cost(), 5.0);
        assert_well_formed(&path, &grid, &goal);
    }

    #[test]
    fn test_one_level_up_uses_one_staircase() {
        let origin = single(IVec3::new(0, 0, 0));
        let goal = single(IVec3::new(5, 1, 0));
        let mut grid = grid_with(UVec3::new(8, 3, 3), &[&origin, &goal]);

        let path = Pathfinder::new(&grid)
            .find_path(IVec3::ZERO, &goal)
            .unwrap()
            .expect("one staircase suffices");
        assert_well_formed(&path, &grid, &goal);

        let steps = path.steps();
        let stairs: Vec<usize> = (0..steps.len()).filter(|&i| steps[i].kind == NodeKind::Stairs).collect();
        assert_eq!(stairs.len(), 1);
        let i = stairs[0];
        let stair = steps[i];
        let before = if i == 0 { 0.0 } else { steps[i - 1].g };
        assert_eq!(stair.g - before, DEFAULT_STAIR_COST);
        // Flat landing in the same direction right after the stairs
        let landing = steps[i + 1];
        assert_eq!(landing.kind, NodeKind::Hallway);
        assert_eq!(landing.index.y, stair.index.y);
        assert_eq!(landing.direction, stair.direction);
        // 5 flat moves + 1 staircase
        assert_eq!(path.cost(), 4.0 + DEFAULT_STAIR_COST);

        path.carve(&mut grid).unwrap();
        let cells = stair.stair_cells().unwrap();
        assert_eq!(cells.headroom, cells.steps + IVec3::Y);
        assert_eq!(grid.cell_type(cells.steps), Some(CellType::Stairs));
        assert_eq!(grid.cell_type(cells.headroom), Some(CellType::StairSpace));
        assert_eq!(grid.get(cells.steps).unwrap().face_direction, Direction::East);
        assert_eq!(grid.cell_type(goal.cells()[0]), Some(CellType::Room));
        assert_eq!(grid.count(CellType::Hallway), path.corridor().len() - 1);
    }

    #[test]
    fn test_staircase_right_out_of_the_start() {
        let origin = single(IVec3::new(0, 0, 0));
        let goal = single(IVec3::new(2, 1, 0));
        let grid = grid_with(UVec3::new(4, 3, 1), &[&origin, &goal]);

        let path = Pathfinder::new(&grid)
            .find_path(IVec3::ZERO, &goal)
            .unwrap()
            .expect("the only route climbs straight away");
        assert_well_formed(&path, &grid, &goal);

        let first = path.steps()[0];
        assert_eq!(first.kind, NodeKind::Stairs);
        assert_eq!(first.index, IVec3::new(1, 1, 0));
        assert_eq!(first.auxiliary, Some(IVec3::new(1, 0, 0)));
        assert_eq!(path.cost(), DEFAULT_STAIR_COST + 1.0);
    }

    #[test]
    fn test_descending_staircase_faces_uphill() {
        let origin = single(IVec3::new(0, 2, 0));
        let goal = single(IVec3::new(5, 1, 0));
        let mut grid = grid_with(UVec3::new(8, 3, 3), &[&origin, &goal]);

        let path = Pathfinder::new(&grid)
            .find_path(origin.cells()[0], &goal)
            .unwrap()
            .unwrap();
        assert_well_formed(&path, &grid, &goal);
        let stair = *path.stairs().next().unwrap();
        assert_eq!(stair.direction, Some(Direction::East));
        assert_eq!(stair.face_direction(), Some(Direction::West));
        let cells = stair.stair_cells().unwrap();
        assert_eq!(cells.steps, stair.index);

        path.carve(&mut grid).unwrap();
        assert_eq!(grid.get(cells.headroom).unwrap().face_direction, Direction::West);
    }

    #[test]
    fn test_two_levels_keep_landing_rule() {
        let origin = single(IVec3::new(0, 0, 2));
        let goal = single(IVec3::new(9, 2, 2));
        let grid = grid_with(UVec3::new(12, 4, 5), &[&origin, &goal]);

        let path = Pathfinder::new(&grid)
            .find_path(origin.cells()[0], &goal)
            .unwrap()
            .unwrap();
        assert_eq!(path.stairs().count(), 2);
        assert_well_formed(&path, &grid, &goal);
    }

    #[test]
    fn test_enclosed_goal_has_no_path() {
        let origin = single(IVec3::new(0, 0, 0));
        let goal = single(IVec3::new(4, 0, 2));
        let mut grid = grid_with(UVec3::new(7, 1, 5), &[&origin, &goal]);
        for offset in [IVec3::X, IVec3::NEG_X, IVec3::Z, IVec3::NEG_Z] {
            grid.set_type(IVec3::new(4, 0, 2) + offset, CellType::Hallway).unwrap();
        }

        let result = Pathfinder::new(&grid).find_path(IVec3::ZERO, &goal).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_inputs_are_errors() {
        let grid = Grid::new(Vec3::ONE, UVec3::new(4, 1, 4));
        let finder = Pathfinder::new(&grid);

        let goal = single(IVec3::new(3, 0, 3));
        assert!(matches!(
            finder.find_path(IVec3::new(-1, 0, 0), &goal),
            Err(DungeonError::InvalidGoal(_))
        ));
        assert!(matches!(
            finder.find_path(IVec3::ZERO, &single(IVec3::new(9, 0, 0))),
            Err(DungeonError::InvalidGoal(_))
        ));
        assert!(matches!(
            finder.find_path(IVec3::ZERO, &Room::new(Vec::new(), Vec3::ONE)),
            Err(DungeonError::InvalidGoal(_))
        ));
        assert!(matches!(
            finder.find_path(IVec3::new(3, 0, 3), &goal),
            Err(DungeonError::InvalidGoal(_))
        ));
    }

    #[test]
    fn test_carved_corridors_do_not_overlap() {
        let a = single(IVec3::new(0, 0, 2));
        let b = single(IVec3::new(9, 0, 2));
        let c = single(IVec3::new(4, 0, 0));
        let d = single(IVec3::new(4, 0, 5));
        let mut grid = grid_with(UVec3::new(10, 2, 7), &[&a, &b, &c, &d]);

        let first = Pathfinder::new(&grid).find_path(a.cells()[0], &b).unwrap().unwrap();
        first.carve(&mut grid).unwrap();
        let second = Pathfinder::new(&grid).find_path(c.cells()[0], &d).unwrap().unwrap();
        assert_well_formed(&second, &grid, &d);

        let mut first_cells: HashSet<IVec3> = HashSet::new();
        for node in first.corridor() {
            first_cells.insert(node.index);
            first_cells.extend(node.auxiliary);
        }
        for node in second.corridor() {
            assert!(!first_cells.contains(&node.index));
            if let Some(aux) = node.auxiliary {
                assert!(!first_cells.contains(&aux));
            }
        }
        // The first corridor walls off the whole row, so the second one has
        // to climb over it
        assert!(second.stairs().count() >= 2);
    }

    #[test]
    fn test_random_obstacles_respect_rules() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut found = 0;
        for _ in 0..20 {
            let origin = single(IVec3::new(0, rng.gen_range(0..3), rng.gen_range(0..8)));
            let goal = single(IVec3::new(11, rng.gen_range(0..3), rng.gen_range(0..8)));
            let mut grid = grid_with(UVec3::new(12, 3, 8), &[&origin, &goal]);
            for _ in 0..40 {
                let index = IVec3::new(rng.gen_range(1..11), rng.gen_range(0..3), rng.gen_range(0..8));
                grid.set_type(index, CellType::Hallway).unwrap();
            }

            if let Some(path) = Pathfinder::new(&grid).find_path(origin.cells()[0], &goal).unwrap() {
                assert_well_formed(&path, &grid, &goal);
                found += 1;
            }
        }
        assert!(found > 0);
    }
}
