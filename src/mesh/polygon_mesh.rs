//! Indexed triangle mesh: a shared point table plus index triples.

use crate::float_types::Real;
use nalgebra::Point3;

/// Indexed triangle soup. Indices refer to positions in `points`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonMesh {
    points: Vec<Point3<Real>>,
    triangles: Vec<[usize; 3]>,
}

impl PolygonMesh {
    pub const fn new() -> Self {
        PolygonMesh {
            points: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Preallocate room for `points` points and `triangles` triangles.
    pub fn with_capacity(points: usize, triangles: usize) -> Self {
        PolygonMesh {
            points: Vec::with_capacity(points),
            triangles: Vec::with_capacity(triangles),
        }
    }

    /// Append a point and return its index.
    pub fn add_point(&mut self, point: Point3<Real>) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    /// Append a triangle over three existing point indices.
    pub fn add_triangle(&mut self, a: usize, b: usize, c: usize) {
        debug_assert!(
            a < self.points.len() && b < self.points.len() && c < self.points.len(),
            "triangle index out of range"
        );
        self.triangles.push([a, b, c]);
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn points(&self) -> &[Point3<Real>] {
        &self.points
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Each triangle resolved to its three positions.
    pub fn triangle_points(&self) -> impl Iterator<Item = [Point3<Real>; 3]> + '_ {
        self.triangles
            .iter()
            .map(|&[a, b, c]| [self.points[a], self.points[b], self.points[c]])
    }
}
