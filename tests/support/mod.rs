//! Test support library
//! Provides faces, scenes and helpers shared by the integration tests.
#![allow(dead_code)]

use corrugrs::{
    errors::ClipError,
    face::Face,
    float_types::Real,
    mesh::{Mesh, polygon::Polygon},
    panel::BooleanIntersector,
    traits::TransformOps,
};
use nalgebra::Point3;

/// Axis aligned square `[0, size]²` in the XY plane, counter-clockwise.
pub fn square(size: Real) -> Face {
    Face::from_xy(&[[0.0, 0.0], [size, 0.0], [size, size], [0.0, size]], &[])
}

/// 1000 × 1000 square with a 200 × 200 hole in its middle.
pub fn square_with_hole() -> Face {
    Face::from_xy(
        &[[0.0, 0.0], [1000.0, 0.0], [1000.0, 1000.0], [0.0, 1000.0]],
        &[&[[400.0, 400.0], [600.0, 400.0], [600.0, 600.0], [400.0, 600.0]]],
    )
}

/// A 600 × 300 rectangle rotated off every world axis and moved away from the origin.
pub fn tilted_rectangle() -> Face {
    Face::from_xy(&[[0.0, 0.0], [600.0, 0.0], [600.0, 300.0], [0.0, 300.0]], &[])
        .rotate(30.0, -20.0, 45.0)
        .translate(100.0, -50.0, 25.0)
}

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// for a set of points.
pub fn bounding_box<'a>(points: impl IntoIterator<Item = &'a Point3<Real>>) -> [Real; 6] {
    let mut b = [Real::MAX, Real::MAX, Real::MAX, Real::MIN, Real::MIN, Real::MIN];
    for p in points {
        for axis in 0..3 {
            b[axis] = b[axis].min(p[axis]);
            b[axis + 3] = b[axis + 3].max(p[axis]);
        }
    }
    b
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Centroids of every face, in face order.
pub fn centroids(polygons: &[Polygon<()>]) -> Vec<Point3<Real>> {
    polygons.iter().map(Polygon::centroid).collect()
}

/// Intersector that always fails, for exercising cleanup paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingIntersector;

impl BooleanIntersector<()> for FailingIntersector {
    fn intersect(
        &self,
        _faces: &[Polygon<()>],
        _cutter: &Mesh<()>,
    ) -> Result<Vec<Polygon<()>>, ClipError> {
        Err(ClipError::GeometryOperation("intersector offline".into()))
    }
}

/// Intersector that returns its input untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughIntersector;

impl BooleanIntersector<()> for PassThroughIntersector {
    fn intersect(
        &self,
        faces: &[Polygon<()>],
        _cutter: &Mesh<()>,
    ) -> Result<Vec<Polygon<()>>, ClipError> {
        Ok(faces.to_vec())
    }
}
