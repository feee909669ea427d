//! Tetrahedra and their circumspheres

use std::hash::{Hash, Hasher};

use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Edge, Triangle, Vertex, EPSILON};

/// Sphere through the four corners of a tetrahedron
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumsphere {
    /// Center of the sphere
    pub center: DVec3,
    /// Distance from the center to each corner
    pub radius: f64,
}

impl Circumsphere {
    /// Check if a point lies strictly inside the sphere
    ///
    /// Points within a relative `EPSILON` of the surface count as outside, so
    /// cospherical inputs never pull a neighbour into an insertion cavity.
    #[inline]
    pub fn contains(&self, point: DVec3) -> bool {
        let r2 = self.radius * self.radius;
        self.center.distance_squared(point) < r2 * (1.0 - EPSILON)
    }
}

/// A tetrahedron over four vertices
///
/// The circumsphere is computed once at construction. It is `None` when the
/// four corners are coplanar: such a tetrahedron has no finite circumsphere,
/// a zero radius is never used to mean "missing".
///
/// Equality compares vertex sets, independent of order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct Tetrahedron {
    /// Corners, in construction order
    pub vertices: [Vertex; 4],
    /// Sphere through all four corners, absent for flat tetrahedra
    pub circumsphere: Option<Circumsphere>,
}

impl Tetrahedron {
    /// Create a tetrahedron and compute its circumsphere
    pub fn new(a: Vertex, b: Vertex, c: Vertex, d: Vertex) -> Self {
        let circumsphere = compute_circumsphere(a.position, b.position, c.position, d.position);
        Self {
            vertices: [a, b, c, d],
            circumsphere,
        }
    }

    /// Check if the corners are coplanar
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.circumsphere.is_none()
    }

    /// Check if a point lies strictly inside the circumsphere
    ///
    /// Always false for a degenerate tetrahedron.
    #[inline]
    pub fn circumsphere_contains(&self, point: DVec3) -> bool {
        self.circumsphere.is_some_and(|s| s.contains(point))
    }

    /// Check if the tetrahedron uses the given vertex id
    #[inline]
    pub fn contains_vertex(&self, id: usize) -> bool {
        self.vertices.iter().any(|v| v.id == id)
    }

    /// The four triangular faces
    pub fn faces(&self) -> [Triangle; 4] {
        let [a, b, c, d] = self.vertices;
        [
            Triangle::new(a, b, c),
            Triangle::new(a, b, d),
            Triangle::new(a, c, d),
            Triangle::new(b, c, d),
        ]
    }

    /// The six edges
    pub fn edges(&self) -> [Edge; 6] {
        let [a, b, c, d] = self.vertices;
        [
            Edge::new(a, b),
            Edge::new(a, c),
            Edge::new(a, d),
            Edge::new(b, c),
            Edge::new(b, d),
            Edge::new(c, d),
        ]
    }

    /// Absolute volume
    pub fn volume(&self) -> f64 {
        let [a, b, c, d] = self.vertices.map(|v| v.position);
        (b - a).dot((c - a).cross(d - a)).abs() / 6.0
    }

    /// Vertex ids in ascending order
    pub fn key(&self) -> [usize; 4] {
        let mut ids = self.vertices.map(|v| v.id);
        ids.sort_unstable();
        ids
    }
}

impl PartialEq for Tetrahedron {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Tetrahedron {}

impl Hash for Tetrahedron {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Circumsphere from the four corners, `None` if they are (nearly) coplanar
fn compute_circumsphere(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> Option<Circumsphere> {
    let u = b - a;
    let v = c - a;
    let w = d - a;

    let det = u.dot(v.cross(w));
    // Scale-free flatness test: |det| is the parallelepiped volume, compared
    // against the product of the edge lengths spanning it.
    let scale = u.length() * v.length() * w.length();
    if !det.is_finite() || det.abs() <= EPSILON * scale {
        return None;
    }

    let offset = (u.length_squared() * v.cross(w)
        + v.length_squared() * w.cross(u)
        + w.length_squared() * u.cross(v))
        / (2.0 * det);

    Some(Circumsphere {
        center: a + offset,
        radius: offset.length(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(id: usize, x: f64, y: f64, z: f64) -> Vertex {
        Vertex::new(id, DVec3::new(x, y, z))
    }

    fn unit_corner() -> Tetrahedron {
        Tetrahedron::new(
            v(0, 0.0, 0.0, 0.0),
            v(1, 1.0, 0.0, 0.0),
            v(2, 0.0, 1.0, 0.0),
            v(3, 0.0, 0.0, 1.0),
        )
    }

    #[test]
    fn test_circumsphere_of_corner() {
        let tet = unit_corner();
        let sphere = tet.circumsphere.unwrap();
        assert!((sphere.center - DVec3::splat(0.5)).length() < 1e-12);
        assert!((sphere.radius - 0.75f64.sqrt()).abs() < 1e-12);
        assert!((tet.volume() - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_circumsphere_is_equidistant() {
        let tet = Tetrahedron::new(
            v(0, 2.0, -1.0, 0.5),
            v(1, 7.0, 3.0, -2.0),
            v(2, -3.0, 4.0, 1.0),
            v(3, 1.0, 1.0, 9.0),
        );
        let sphere = tet.circumsphere.unwrap();
        for corner in tet.vertices {
            assert!((corner.position.distance(sphere.center) - sphere.radius).abs() < 1e-9);
        }
    }

    #[test]
    fn test_contains_is_strict() {
        let tet = unit_corner();
        assert!(tet.circumsphere_contains(DVec3::splat(0.5)));
        assert!(tet.circumsphere_contains(DVec3::new(0.9, 0.9, 0.1)));
        // The corners themselves lie on the sphere
        assert!(!tet.circumsphere_contains(DVec3::X));
        // (1,1,1) is also on the sphere of the unit corner
        assert!(!tet.circumsphere_contains(DVec3::ONE));
        assert!(!tet.circumsphere_contains(DVec3::splat(2.0)));
    }

    #[test]
    fn test_coplanar_is_degenerate() {
        let flat = Tetrahedron::new(
            v(0, 0.0, 0.0, 0.0),
            v(1, 1.0, 0.0, 0.0),
            v(2, 0.0, 0.0, 1.0),
            v(3, 1.0, 0.0, 1.0),
        );
        assert!(flat.is_degenerate());
        assert!(!flat.circumsphere_contains(DVec3::new(0.5, 0.0, 0.5)));
    }

    #[test]
    fn test_faces_and_edges() {
        let tet = unit_corner();
        let faces = tet.faces();
        for (i, face) in faces.iter().enumerate() {
            for other in &faces[i + 1..] {
                assert_ne!(face, other);
            }
        }
        let edges = tet.edges();
        assert_eq!(edges.len(), 6);
        for (i, edge) in edges.iter().enumerate() {
            for other in &edges[i + 1..] {
                assert_ne!(edge, other);
            }
        }
        assert!(tet.contains_vertex(3));
        assert!(!tet.contains_vertex(4));
    }

    #[test]
    fn test_order_independent_equality() {
        let tet = unit_corner();
        let [a, b, c, d] = tet.vertices;
        assert_eq!(tet, Tetrahedron::new(d, b, a, c));
    }
}
