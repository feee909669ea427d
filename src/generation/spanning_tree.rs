//! Minimum spanning tree over the triangulation graph (Prim's algorithm)
//!
//! The tree guarantees every room is reachable. Edges rejected by Prim's
//! because both endpoints were already connected are kept in
//! [`SpanningTree::excluded`]: they are the pool that extra hallways (loops)
//! are sampled from.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use crate::error::{DungeonError, Result};
use crate::generation::delaunay::EdgeMap;
use crate::geometry::Edge;
use crate::queue::PriorityQueue;

/// Frontier entry ordered by edge length
///
/// Equal lengths fall back to the endpoint ids only so the heap has a total
/// order; callers must not rely on which of two equal edges wins.
#[derive(Debug, Clone, Copy)]
struct FrontierEdge(Edge);

impl PartialEq for FrontierEdge {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEdge {}

impl PartialOrd for FrontierEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .length
            .total_cmp(&other.0.length)
            .then_with(|| (self.0.a.id, self.0.b.id).cmp(&(other.0.a.id, other.0.b.id)))
    }
}

/// Result of running Prim's algorithm from a start vertex
#[derive(Debug, Clone)]
pub struct SpanningTree {
    start: usize,
    solution: Vec<Edge>,
    excluded: Vec<Edge>,
    visited: BTreeSet<usize>,
}

impl SpanningTree {
    /// Build the minimum spanning tree of the component containing `start`
    ///
    /// Vertices not reachable from `start` are left out of the tree without
    /// an error; they can be detected by comparing [`visited`](Self::visited)
    /// against the graph's keys.
    ///
    /// # Errors
    ///
    /// Returns `EmptyEdgeGraph` if `graph` contains no edges
    pub fn prim(start: usize, graph: &EdgeMap) -> Result<Self> {
        if graph.values().all(Vec::is_empty) {
            return Err(DungeonError::EmptyEdgeGraph);
        }

        let mut visited = BTreeSet::new();
        let mut frontier = PriorityQueue::new();
        let mut solution = Vec::new();
        let mut excluded = Vec::new();

        visit(start, graph, &mut visited, &mut frontier);

        while let Some(FrontierEdge(edge)) = frontier.pop() {
            if visited.contains(&edge.b.id) {
                excluded.push(edge);
                continue;
            }
            solution.push(edge);
            visit(edge.b.id, graph, &mut visited, &mut frontier);
        }

        let mut seen = HashSet::new();
        excluded.retain(|e: &Edge| seen.insert(e.key()));

        let unreachable = graph.keys().filter(|id| !visited.contains(id)).count();
        if unreachable > 0 {
            log::debug!(
                "[MST] {} vertices unreachable from {} were left out",
                unreachable,
                start
            );
        }

        Ok(Self {
            start,
            solution,
            excluded,
            visited,
        })
    }

    /// The vertex the tree was grown from
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Tree edges, in the order they were added, oriented away from the start
    #[inline]
    pub fn solution(&self) -> &[Edge] {
        &self.solution
    }

    /// Graph edges that were rejected because they would close a cycle
    #[inline]
    pub fn excluded(&self) -> &[Edge] {
        &self.excluded
    }

    /// Vertices reached by the tree, including the start
    #[inline]
    pub fn visited(&self) -> &BTreeSet<usize> {
        &self.visited
    }

    /// Sum of tree edge lengths
    pub fn total_length(&self) -> f64 {
        self.solution.iter().map(|e| e.length).sum()
    }
}

fn visit(
    id: usize,
    graph: &EdgeMap,
    visited: &mut BTreeSet<usize>,
    frontier: &mut PriorityQueue<FrontierEdge>,
) {
    visited.insert(id);
    for edge in graph.get(&id).into_iter().flatten() {
        if !visited.contains(&edge.b.id) {
            frontier.push(FrontierEdge(*edge));
        }
    }
}
