//! `Mesh` struct and implementations of the `TransformOps` trait for `Mesh`

use crate::float_types::{
    DEGENERATE_LENGTH, Real,
    parry3d::bounding_volume::{Aabb, BoundingVolume},
};
use crate::mesh::{bsp::Node, plane::Plane, polygon::Polygon, vertex::Vertex};
use crate::traits::TransformOps;
use nalgebra::{Matrix4, Point3};
use std::{fmt::Debug, sync::OnceLock};

pub mod bsp;
pub mod extrude;
pub mod plane;
pub mod polygon;
pub mod polygon_mesh;
pub mod vertex;

pub use polygon_mesh::PolygonMesh;

/// A polygon soup. Closed soups are treated as solids by the BSP operations.
#[derive(Clone, Debug)]
pub struct Mesh<S: Clone + Send + Sync + Debug> {
    /// 3D polygons for volumetric shapes
    pub polygons: Vec<Polygon<S>>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,

    /// Metadata
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Default for Mesh<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Returns a new empty Mesh
    pub const fn new() -> Self {
        Mesh {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
            metadata: None,
        }
    }

    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon<S>]) -> Self {
        let mut mesh = Mesh::new();
        mesh.polygons = polygons.to_vec();
        mesh
    }

    /// Build a Mesh from the triangles of an indexed [`PolygonMesh`].
    /// Sliver triangles are skipped.
    pub fn from_polygon_mesh(source: &PolygonMesh, metadata: Option<S>) -> Self {
        let polygons = source
            .triangle_points()
            .filter(|[a, b, c]| (b - a).cross(&(c - a)).norm() >= DEGENERATE_LENGTH)
            .map(|tri| Polygon::from_points(&tri, metadata.clone()))
            .collect::<Vec<_>>();
        Mesh::from_polygons(&polygons)
    }

    /// Split polygons into (may_touch, cannot_touch) using bounding‑box tests
    fn partition_polys(
        polys: &[Polygon<S>],
        other_bb: &Aabb,
    ) -> (Vec<Polygon<S>>, Vec<Polygon<S>>) {
        let mut maybe = Vec::new();
        let mut never = Vec::new();
        for p in polys {
            if p.bounding_box().intersects(other_bb) {
                maybe.push(p.clone());
            } else {
                never.push(p.clone());
            }
        }
        (maybe, never)
    }

    /// Helper to collect all vertices from the Mesh.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.clone())
            .collect()
    }

    /// Keep only the parts of this mesh's polygons that lie inside `solid`.
    ///
    /// Unlike a solid/solid intersection this treats `self` as an open
    /// surface: nothing of `solid` is added to the result, so a sheet comes
    /// back as a trimmed sheet.
    ///
    /// ```text
    /// let c = sheet.intersect_surface(solid);
    ///          +-------+
    ///     -----|-------|-----   =   +-------+
    ///          |  solid|
    ///          +-------+
    /// ```
    pub fn intersect_surface(&self, solid: &Mesh<S>) -> Mesh<S> {
        if solid.polygons.is_empty() {
            return Mesh {
                polygons: Vec::new(),
                bounding_box: OnceLock::new(),
                metadata: self.metadata.clone(),
            };
        }

        // polygons whose box misses the solid are outside; skip the tree for them
        let (candidates, outside) = Self::partition_polys(&self.polygons, &solid.bounding_box());
        log::trace!(
            "intersect_surface: {} candidate polygons, {} culled by bounding box",
            candidates.len(),
            outside.len()
        );

        let mut inverted = Node::from_polygons(&solid.polygons);
        inverted.invert();

        Mesh {
            polygons: inverted.clip_polygons(&candidates),
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }
}

impl<S: Clone + Send + Sync + Debug> TransformOps for Mesh<S> {
    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to the mesh.
    /// Singular matrices leave normals untouched.
    fn transform(&self, mat: &Matrix4<Real>) -> Mesh<S> {
        let mat_inv_transpose = mat.try_inverse().map(|inv| inv.transpose());
        let mut mesh = self.clone();

        for poly in &mut mesh.polygons {
            for vert in &mut poly.vertices {
                vert.pos = mat.transform_point(&vert.pos);
                if let Some(normal_mat) = &mat_inv_transpose {
                    vert.normal = normal_mat.transform_vector(&vert.normal).normalize();
                }
            }

            // keep the cached plane consistent with the new vertex positions
            poly.plane = Plane::from_vertices(&poly.vertices);
            poly.bounding_box = OnceLock::new();
        }

        mesh.bounding_box = OnceLock::new();
        mesh
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`] indicating the 3D bounds of all `polygons`.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut vertices = self.polygons.iter().flat_map(|p| p.vertices.iter());
            let Some(first) = vertices.next() else {
                // no polygons: trivial AABB at origin
                return Aabb::new(Point3::origin(), Point3::origin());
            };
            let (mins, maxs) = vertices.fold((first.pos, first.pos), |(mins, maxs), v| {
                (mins.inf(&v.pos), maxs.sup(&v.pos))
            });
            Aabb::new(mins, maxs)
        })
    }

    /// Invalidates object's cached bounding box.
    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }
}
