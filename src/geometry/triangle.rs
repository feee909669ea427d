//! Triangle faces and their circumcircles

use std::hash::{Hash, Hasher};

use glam::DVec3;

use super::{Edge, Vertex, EPSILON};

/// Circle through the three corners of a triangle, embedded in 3D
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle {
    /// Center, lying in the triangle's plane
    pub center: DVec3,
    /// Distance from the center to each corner
    pub radius: f64,
}

impl Circumcircle {
    /// Check if a point lies strictly within `radius` of the center
    ///
    /// Uses the same relative tolerance as [`Circumsphere::contains`](super::Circumsphere::contains);
    /// points off the triangle's plane are measured in 3D.
    #[inline]
    pub fn contains(&self, point: DVec3) -> bool {
        let r2 = self.radius * self.radius;
        self.center.distance_squared(point) < r2 * (1.0 - EPSILON)
    }
}

/// A triangle over three vertices
///
/// Two triangles are equal when they have the same vertex set, whatever order
/// the vertices were listed in. The triangulator relies on this to find faces
/// shared by two tetrahedra.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// Corners, in construction order
    pub vertices: [Vertex; 3],
}

impl Triangle {
    /// Create a triangle
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self { vertices: [a, b, c] }
    }

    /// Vertex ids in ascending order
    pub fn key(&self) -> [usize; 3] {
        let mut ids = self.vertices.map(|v| v.id);
        ids.sort_unstable();
        ids
    }

    /// The circumcircle, or `None` if the corners are collinear
    pub fn circumcircle(&self) -> Option<Circumcircle> {
        let [a, b, c] = self.vertices.map(|v| v.position);
        let u = b - a;
        let v = c - a;
        let n = u.cross(v);
        let n2 = n.length_squared();
        if n2 <= EPSILON * u.length_squared() * v.length_squared() {
            return None;
        }
        let offset = (u.length_squared() * v - v.length_squared() * u).cross(n) / (2.0 * n2);
        Some(Circumcircle {
            center: a + offset,
            radius: offset.length(),
        })
    }

    /// The three edges of the triangle
    pub fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.vertices;
        [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]
    }

    /// Check if the triangle uses the given vertex id
    pub fn contains_vertex(&self, id: usize) -> bool {
        self.vertices.iter().any(|v| v.id == id)
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Triangle {}

impl Hash for Triangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
