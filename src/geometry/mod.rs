//! Geometric primitives for the connectivity graph
//!
//! Value types used by the tetrahedralization and the spanning tree. Every
//! primitive carries vertex ids alongside positions: equality is decided by
//! ids (order-independent), never by comparing floating-point coordinates.
//! Positions are `f64` so circumspheres of long, thin tetrahedra near the
//! enclosing super-tetrahedron stay accurate.

mod edge;
mod tetrahedron;
mod triangle;

pub use edge::Edge;
pub use tetrahedron::{Circumsphere, Tetrahedron};
pub use triangle::{Circumcircle, Triangle};

use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Relative tolerance for in-sphere tests and degeneracy checks
pub(crate) const EPSILON: f64 = 1e-10;

/// A labelled point of the triangulation
///
/// Ids `0..n` are the input points; the triangulator appends the four
/// super-tetrahedron corners after them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// Index of the point in the triangulated point list
    pub id: usize,
    /// Position of the point
    pub position: DVec3,
}

impl Vertex {
    /// Create a vertex
    pub fn new(id: usize, position: DVec3) -> Self {
        Self { id, position }
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vertex {}

impl std::hash::Hash for Vertex {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
