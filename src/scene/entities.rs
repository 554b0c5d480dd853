//! Face and edge entities owned by a [`Group`](super::Group).

use crate::float_types::{DEGENERATE_LENGTH, Real};
use crate::mesh::{Mesh, PolygonMesh, polygon::Polygon, vertex::Vertex};
use crate::triangulated::Triangulated3D;
use hashbrown::HashMap;
use nalgebra::Point3;
use std::fmt::Debug;

/// Endpoint positions are matched after snapping to this many steps per unit.
const KEY_SCALE: Real = 1e6;

/// Order-independent identity of an edge, built from snapped endpoints.
pub type EdgeKey = ([i64; 3], [i64; 3]);

fn quantize(p: &Point3<Real>) -> [i64; 3] {
    [
        (p.x * KEY_SCALE).round() as i64,
        (p.y * KEY_SCALE).round() as i64,
        (p.z * KEY_SCALE).round() as i64,
    ]
}

fn edge_key(a: &Point3<Real>, b: &Point3<Real>) -> EdgeKey {
    let (qa, qb) = (quantize(a), quantize(b));
    if qa <= qb { (qa, qb) } else { (qb, qa) }
}

/// A straight, undirected edge with display flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Point3<Real>,
    pub end: Point3<Real>,
    /// Hidden in the default rendering style.
    pub soft: bool,
    /// Shading is interpolated across the edge.
    pub smooth: bool,
}

impl Edge {
    pub const fn new(start: Point3<Real>, end: Point3<Real>) -> Self {
        Edge {
            start,
            end,
            soft: false,
            smooth: false,
        }
    }

    pub fn key(&self) -> EdgeKey {
        edge_key(&self.start, &self.end)
    }

    pub fn length(&self) -> Real {
        (self.end - self.start).norm()
    }
}

/// The faces and edges of one group.
///
/// Every face added through [`Entities::add_face`] registers its boundary
/// edges; an edge shared by several faces is stored once.
#[derive(Debug, Clone)]
pub struct Entities<S: Clone> {
    faces: Vec<Polygon<S>>,
    edges: Vec<Edge>,
    edge_index: HashMap<EdgeKey, usize>,
}

impl<S: Clone> Default for Entities<S> {
    fn default() -> Self {
        Entities {
            faces: Vec::new(),
            edges: Vec::new(),
            edge_index: HashMap::new(),
        }
    }
}

impl<S: Clone + Send + Sync + Debug> Entities<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn faces(&self) -> &[Polygon<S>] {
        &self.faces
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() && self.edges.is_empty()
    }

    /// Add an edge unless an edge with the same endpoints exists.
    /// Returns the index of the stored edge, or `None` for zero-length input.
    pub fn add_edge(&mut self, start: Point3<Real>, end: Point3<Real>) -> Option<usize> {
        if (end - start).norm() < DEGENERATE_LENGTH {
            return None;
        }
        let key = edge_key(&start, &end);
        if let Some(&index) = self.edge_index.get(&key) {
            return Some(index);
        }
        self.edges.push(Edge::new(start, end));
        let index = self.edges.len() - 1;
        self.edge_index.insert(key, index);
        Some(index)
    }

    /// Add a face and its boundary edges. Returns the face index.
    pub fn add_face(&mut self, face: Polygon<S>) -> usize {
        for (start, end) in face.edges() {
            self.add_edge(start, end);
        }
        self.faces.push(face);
        self.faces.len() - 1
    }

    /// Instantiate every non-degenerate triangle of `mesh` as a face.
    /// Returns the number of faces added.
    pub fn add_faces_from_mesh(&mut self, mesh: &PolygonMesh, metadata: Option<S>) -> usize {
        let before = self.faces.len();
        for polygon in Mesh::from_polygon_mesh(mesh, metadata).polygons {
            self.add_face(polygon);
        }
        let added = self.faces.len() - before;
        log::debug!(
            "instantiated {added} of {} triangles ({} edges total)",
            mesh.triangle_count(),
            self.edges.len()
        );
        added
    }

    /// Replace every face with `faces`. Edges of the new faces are added;
    /// existing edges stay until [`Entities::remove_orphan_edges`] runs.
    pub fn replace_faces(&mut self, faces: Vec<Polygon<S>>) {
        self.faces.clear();
        for face in faces {
            self.add_face(face);
        }
    }

    /// Keep only faces for which `keep` returns true. Returns how many were removed.
    pub fn retain_faces<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Polygon<S>) -> bool,
    {
        let before = self.faces.len();
        self.faces.retain(|face| keep(face));
        before - self.faces.len()
    }

    /// Number of faces bounded by each stored edge.
    pub fn edge_face_counts(&self) -> HashMap<EdgeKey, usize> {
        let mut counts: HashMap<EdgeKey, usize> =
            self.edges.iter().map(|e| (e.key(), 0)).collect();
        for face in &self.faces {
            for (start, end) in face.edges() {
                if let Some(count) = counts.get_mut(&edge_key(&start, &end)) {
                    *count += 1;
                }
            }
        }
        counts
    }

    /// Drop edges no face uses. Returns how many were removed.
    pub fn remove_orphan_edges(&mut self) -> usize {
        let counts = self.edge_face_counts();
        let before = self.edges.len();
        self.edges
            .retain(|e| counts.get(&e.key()).copied().unwrap_or(0) > 0);
        self.reindex_edges();
        before - self.edges.len()
    }

    /// Mark every edge shared by exactly two faces soft and smooth.
    /// Returns how many edges were marked.
    pub fn soften_internal_edges(&mut self) -> usize {
        let counts = self.edge_face_counts();
        let mut softened = 0;
        for edge in &mut self.edges {
            if counts.get(&edge.key()) == Some(&2) {
                edge.soft = true;
                edge.smooth = true;
                softened += 1;
            }
        }
        softened
    }

    /// Copy the faces into a standalone polygon soup.
    pub fn to_mesh(&self) -> Mesh<S> {
        Mesh::from_polygons(&self.faces)
    }

    fn reindex_edges(&mut self) {
        self.edge_index = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key(), i))
            .collect();
    }
}

impl<S: Clone + Send + Sync + Debug> Triangulated3D for Entities<S> {
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Vertex; 3]),
    {
        for face in &self.faces {
            for tri in face.triangulate() {
                f(tri);
            }
        }
    }
}
