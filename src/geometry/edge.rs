//! Undirected weighted edge between two vertices

use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Vertex;

/// An edge between two vertices with its Euclidean length
///
/// The same type serves as a tetrahedralization edge and as a weighted graph
/// edge for the spanning tree. Endpoints have an orientation (`a` to `b`),
/// which the adjacency map uses, but equality and hashing ignore it:
/// `(a, b) == (b, a)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// Source endpoint
    pub a: Vertex,
    /// Destination endpoint
    pub b: Vertex,
    /// Distance between the endpoints
    pub length: f64,
}

impl Edge {
    /// Create an edge, computing its length
    pub fn new(a: Vertex, b: Vertex) -> Self {
        Self {
            a,
            b,
            length: a.position.distance(b.position),
        }
    }

    /// The same edge walked the other way
    pub fn reversed(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
            length: self.length,
        }
    }

    /// Endpoint ids in ascending order
    #[inline]
    pub fn key(&self) -> (usize, usize) {
        if self.a.id <= self.b.id {
            (self.a.id, self.b.id)
        } else {
            (self.b.id, self.a.id)
        }
    }

    /// Check if this edge touches the given vertex id
    #[inline]
    pub fn has_vertex(&self, id: usize) -> bool {
        self.a.id == id || self.b.id == id
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
