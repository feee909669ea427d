//! Delaunay tetrahedralization via incremental Bowyer–Watson insertion
//!
//! Points are inserted one at a time into a working set of tetrahedra that
//! starts as a single super-tetrahedron enclosing every input point. Each
//! insertion removes the tetrahedra whose circumsphere contains the new
//! point, keeps the faces of that cavity that are not shared between two
//! removed tetrahedra, and fans new tetrahedra from those boundary faces to
//! the point. At the end everything attached to a super vertex is dropped.
//!
//! The connectivity graph handed to the spanning tree is the deduplicated set
//! of tetrahedron edges, see [`Tetrahedralization::adjacency`].

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use glam::DVec3;

use crate::error::{DungeonError, Result};
use crate::geometry::{Edge, Tetrahedron, Triangle, Vertex};

/// Undirected adjacency: every edge is stored under both endpoint ids,
/// oriented away from the key
pub type EdgeMap = HashMap<usize, Vec<Edge>>;

/// Inscribed-sphere sizes tried for the super-tetrahedron, relative to the
/// bounding sphere of the input
///
/// Nearly flat point sets produce sliver tetrahedra with huge circumspheres.
/// A super vertex inside one of them steals the sliver, so the build retries
/// with a larger super-tetrahedron until every input point is connected.
const SUPER_SCALES: [f64; 3] = [1e2, 1e4, 1e6];

/// Corners of a tetrahedron enclosing a bounding box with a wide margin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuperTetrahedron {
    /// The four corners
    pub corners: [DVec3; 4],
}

impl SuperTetrahedron {
    /// Build a regular tetrahedron enclosing the box `[min, max]`
    ///
    /// The inscribed sphere is 100 times the box's bounding sphere, so every
    /// point of the box is deep inside and the super corners barely influence
    /// which tetrahedra survive.
    pub fn enclosing(min: DVec3, max: DVec3) -> Self {
        Self::scaled(min, max, SUPER_SCALES[0])
    }

    /// Like [`enclosing`](Self::enclosing) with an explicit inscribed-sphere scale
    pub fn scaled(min: DVec3, max: DVec3, scale: f64) -> Self {
        let center = (min + max) * 0.5;
        let half_diagonal = ((max - min) * 0.5).length().max(1.0);
        // Circumradius of a regular tetrahedron is three times its inradius
        let reach = 3.0 * scale * half_diagonal;
        let corners = [
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(1.0, -1.0, -1.0),
            DVec3::new(-1.0, 1.0, -1.0),
            DVec3::new(-1.0, -1.0, 1.0),
        ]
        .map(|dir| center + dir.normalize() * reach);
        Self { corners }
    }
}

/// A finished tetrahedralization of a point set
///
/// Vertex ids are indices into [`points`](Self::points). Only tetrahedra whose
/// four corners are all input points are kept. With four or more points, the
/// edges always connect every point.
#[derive(Debug, Clone)]
pub struct Tetrahedralization {
    points: Vec<DVec3>,
    tetrahedra: Vec<Tetrahedron>,
}

impl Tetrahedralization {
    /// Tetrahedralize `points`, which must all lie within `[min, max]`
    ///
    /// Fewer than four points cannot form a tetrahedron and give an empty
    /// result.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateGeometry` if:
    /// - an insertion would create a flat tetrahedron (the new point is
    ///   coplanar with a cavity face),
    /// - a point falls inside no circumsphere at all (a duplicate point),
    /// - the surviving tetrahedra leave some point unconnected even with the
    ///   largest super-tetrahedron, as happens for coplanar input.
    ///
    /// Points are not perturbed here; callers that may produce flat sets
    /// should jitter the input first, see
    /// [`jitter_points`](crate::generation::jitter_points).
    pub fn build(points: &[DVec3], min: DVec3, max: DVec3) -> Result<Self> {
        let start = Instant::now();
        let n = points.len();

        for scale in SUPER_SCALES {
            let mut tetrahedra = triangulate(points, SuperTetrahedron::scaled(min, max, scale))?;
            let total = tetrahedra.len();
            tetrahedra.retain(|t| t.vertices.iter().all(|v| v.id < n));

            if n < 4 || connects_all(&tetrahedra, n) {
                log::debug!(
                    "[Delaunay] {} points -> {} tetrahedra ({} touched the super-tetrahedron, scale {:e}) in {:?}",
                    n,
                    tetrahedra.len(),
                    total - tetrahedra.len(),
                    scale,
                    start.elapsed()
                );
                return Ok(Self {
                    points: points.to_vec(),
                    tetrahedra,
                });
            }
            log::debug!(
                "[Delaunay] super-tetrahedron at scale {:e} cut off part of the input, growing it",
                scale
            );
        }

        Err(DungeonError::DegenerateGeometry(format!(
            "{} points do not span a volume; no tetrahedralization connects them all",
            n
        )))
    }

    /// The triangulated points, indexed by vertex id
    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// The surviving tetrahedra
    #[inline]
    pub fn tetrahedra(&self) -> &[Tetrahedron] {
        &self.tetrahedra
    }

    /// Every tetrahedron edge once, in first-seen order
    pub fn edges(&self) -> Vec<Edge> {
        let mut seen = HashSet::new();
        self.tetrahedra
            .iter()
            .flat_map(|t| t.edges())
            .filter(|e| seen.insert(e.key()))
            .collect()
    }

    /// Undirected adjacency map of the tetrahedron edges
    ///
    /// Each edge `(a, b)` appears as `(a, b)` under key `a` and as `(b, a)`
    /// under key `b`, so the graph can be walked from either endpoint.
    pub fn adjacency(&self) -> EdgeMap {
        let mut map = EdgeMap::new();
        for edge in self.edges() {
            map.entry(edge.a.id).or_default().push(edge);
            map.entry(edge.b.id).or_default().push(edge.reversed());
        }
        map
    }
}

/// Bowyer–Watson over every point, starting from `enclosing`
fn triangulate(points: &[DVec3], enclosing: SuperTetrahedron) -> Result<Vec<Tetrahedron>> {
    let n = points.len();
    let [a, b, c, d] = enclosing.corners;
    let mut tetrahedra = vec![Tetrahedron::new(
        Vertex::new(n, a),
        Vertex::new(n + 1, b),
        Vertex::new(n + 2, c),
        Vertex::new(n + 3, d),
    )];
    for (id, &position) in points.iter().enumerate() {
        insert_point(&mut tetrahedra, Vertex::new(id, position))?;
    }
    Ok(tetrahedra)
}

/// Check if the tetrahedra join points `0..n` into one component
fn connects_all(tetrahedra: &[Tetrahedron], n: usize) -> bool {
    fn root(parent: &mut [usize], mut x: usize) -> usize {
        while parent[x] != x {
            parent[x] = parent[parent[x]];
            x = parent[x];
        }
        x
    }

    let mut parent: Vec<usize> = (0..n).collect();
    for tet in tetrahedra {
        let first = root(&mut parent, tet.vertices[0].id);
        for v in &tet.vertices[1..] {
            let other = root(&mut parent, v.id);
            parent[other] = first;
        }
    }
    let component = root(&mut parent, 0);
    (1..n).all(|id| root(&mut parent, id) == component)
}

/// One Bowyer–Watson insertion step
fn insert_point(tetrahedra: &mut Vec<Tetrahedron>, vertex: Vertex) -> Result<()> {
    // Transient per-step mark of tetrahedra slated for removal
    let invalid: Vec<bool> = tetrahedra
        .iter()
        .map(|t| t.circumsphere_contains(vertex.position))
        .collect();

    let mut faces: Vec<Triangle> = Vec::new();
    for (tet, bad) in tetrahedra.iter().zip(&invalid) {
        if *bad {
            faces.extend(tet.faces());
        }
    }
    if faces.is_empty() {
        return Err(DungeonError::DegenerateGeometry(format!(
            "point {} at {} lies inside no circumsphere (duplicate or outside bounds)",
            vertex.id, vertex.position
        )));
    }

    // A face collected twice is shared by two removed tetrahedra: interior to
    // the cavity, so it cancels out
    let mut occurrences: HashMap<[usize; 3], usize> = HashMap::new();
    for face in &faces {
        *occurrences.entry(face.key()).or_insert(0) += 1;
    }

    let previous = std::mem::take(tetrahedra);
    tetrahedra.extend(
        previous
            .into_iter()
            .zip(&invalid)
            .filter(|(_, bad)| !**bad)
            .map(|(tet, _)| tet),
    );

    for face in faces.iter().filter(|f| occurrences[&f.key()] == 1) {
        let [a, b, c] = face.vertices;
        let tet = Tetrahedron::new(a, b, c, vertex);
        if tet.is_degenerate() {
            return Err(DungeonError::DegenerateGeometry(format!(
                "point {} at {} is coplanar with face {:?}",
                vertex.id,
                vertex.position,
                face.key()
            )));
        }
        tetrahedra.push(tet);
    }
    Ok(())
}
