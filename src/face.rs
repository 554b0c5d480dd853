//! Planar faces bounded by one outer loop and any number of hole loops.
//!
//! A [`Face`] is the input the panel pipeline is driven by. Besides its loops
//! it exposes the queries the pipeline needs from a host modeller: a unit
//! normal, its plane, an axis aligned bounding volume and a point
//! classification relative to the face's own plane.

use crate::errors::ValidationError;
use crate::float_types::{EPSILON, Real, parry3d::bounding_volume::Aabb, tolerance};
use crate::mesh::plane::{Plane, build_orthonormal_basis, newell_normal};
use crate::traits::TransformOps;
use geo::coordinate_position::{CoordPos, CoordinatePosition};
use geo::{Coord, LineString, Polygon as GeoPolygon, TriangulateEarcut};
use nalgebra::{Matrix4, Point3, Vector3};
use std::sync::OnceLock;

/// Where a point lies relative to a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointClassification {
    /// Strictly inside the outer loop and outside every hole.
    Inside,
    /// Within tolerance of one of the face's vertices.
    OnVertex,
    /// Within tolerance of one of the face's edges, hole edges included.
    OnEdge,
    /// In the face plane but outside the region (holes count as outside).
    Outside,
    /// Farther from the face plane than the tolerance.
    NotOnPlane,
    /// The face is degenerate and cannot classify anything.
    Unknown,
}

impl PointClassification {
    pub const fn is_boundary(self) -> bool {
        matches!(self, PointClassification::OnVertex | PointClassification::OnEdge)
    }
}

/// A planar polygon with holes.
#[derive(Debug, Clone)]
pub struct Face {
    outer: Vec<Point3<Real>>,
    holes: Vec<Vec<Point3<Real>>>,
    plane: Plane,

    /// In-plane basis used for every 2D query, `u × v == normal`.
    basis: (Vector3<Real>, Vector3<Real>),

    /// Lazily built 2D outline in `basis` coordinates.
    outline: OnceLock<GeoPolygon<Real>>,

    /// Lazily calculated AABB that spans every loop.
    bounding_box: OnceLock<Aabb>,
}

impl Face {
    /// Build a face from its outer loop and hole loops.
    ///
    /// A repeated closing point is dropped from each loop. Hole loops with
    /// fewer than three points are discarded. The normal follows the winding
    /// of the outer loop (right-hand rule); a loop enclosing no area gets +Z.
    pub fn new(outer: Vec<Point3<Real>>, holes: Vec<Vec<Point3<Real>>>) -> Self {
        let outer = open_loop(outer);
        let holes: Vec<_> = holes
            .into_iter()
            .map(open_loop)
            .filter(|hole| {
                let keep = hole.len() >= 3;
                if !keep {
                    log::warn!("dropping hole loop with {} points", hole.len());
                }
                keep
            })
            .collect();

        let newell = newell_normal(outer.iter());
        let normal = if newell.norm_squared() > Real::EPSILON {
            newell.normalize()
        } else {
            Vector3::z()
        };
        let plane = match centroid(&outer) {
            Some(center) => Plane::from_point_normal(&center, normal),
            None => Plane::from_normal(normal, 0.0),
        };

        Face {
            outer,
            holes,
            basis: build_orthonormal_basis(plane.normal()),
            plane,
            outline: OnceLock::new(),
            bounding_box: OnceLock::new(),
        }
    }

    /// Build a face in the XY plane (z = 0) from 2D loops.
    pub fn from_xy(outer: &[[Real; 2]], holes: &[&[[Real; 2]]]) -> Self {
        let lift = |ring: &[[Real; 2]]| -> Vec<Point3<Real>> {
            ring.iter().map(|&[x, y]| Point3::new(x, y, 0.0)).collect()
        };
        Face::new(lift(outer), holes.iter().map(|hole| lift(hole)).collect())
    }

    pub fn outer_loop(&self) -> &[Point3<Real>] {
        &self.outer
    }

    pub fn holes(&self) -> &[Vec<Point3<Real>>] {
        &self.holes
    }

    /// Outer loop first, then every hole loop.
    pub fn loops(&self) -> impl Iterator<Item = &[Point3<Real>]> + '_ {
        std::iter::once(self.outer.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }

    /// Every boundary vertex, loop by loop.
    pub fn vertices(&self) -> impl Iterator<Item = &Point3<Real>> + '_ {
        self.loops().flat_map(|ring| ring.iter())
    }

    /// Every boundary edge as `(start, end)`, loop by loop, each loop closed.
    pub fn edges(&self) -> impl Iterator<Item = (Point3<Real>, Point3<Real>)> + '_ {
        self.loops().flat_map(|ring| {
            ring.iter()
                .zip(ring.iter().cycle().skip(1))
                .map(|(a, b)| (*a, *b))
        })
    }

    pub fn normal(&self) -> Vector3<Real> {
        self.plane.normal()
    }

    pub const fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Length of the bounding box diagonal.
    pub fn diagonal(&self) -> Real {
        if self.outer.is_empty() {
            return 0.0;
        }
        self.bounding_box().extents().norm()
    }

    /// Orthogonal projection of `point` onto the face plane.
    pub fn project_to_plane(&self, point: &Point3<Real>) -> Point3<Real> {
        self.plane.project_point(point)
    }

    /// Check the face is usable: enough finite points and a real normal.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for ring in self.loops() {
            if ring.len() < 3 {
                return Err(ValidationError::TooFewPoints(ring.len()));
            }
            if let Some(bad) = ring.iter().find(|p| !p.coords.iter().all(|c| c.is_finite())) {
                return Err(ValidationError::InvalidCoordinate(*bad));
            }
        }
        if newell_normal(self.outer.iter()).norm() < EPSILON {
            return Err(ValidationError::DegenerateNormal);
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Classify `point` using the crate-wide [`tolerance`].
    pub fn classify_point(&self, point: &Point3<Real>) -> PointClassification {
        self.classify_point_with_tolerance(point, tolerance())
    }

    /// Classify `point` against this face. Vertex hits win over edge hits,
    /// edge hits win over the interior test.
    pub fn classify_point_with_tolerance(
        &self,
        point: &Point3<Real>,
        tolerance: Real,
    ) -> PointClassification {
        if !self.is_valid() {
            return PointClassification::Unknown;
        }
        if self.plane.signed_distance(point).abs() > tolerance {
            return PointClassification::NotOnPlane;
        }

        let query = self.to_2d(point);
        if self
            .vertices()
            .any(|p| distance_2d(self.to_2d(p), query) <= tolerance)
        {
            return PointClassification::OnVertex;
        }
        if self.edges().any(|(a, b)| {
            segment_distance_2d(self.to_2d(&a), self.to_2d(&b), query) <= tolerance
        }) {
            return PointClassification::OnEdge;
        }

        match self.outline().coordinate_position(&query) {
            CoordPos::Inside => PointClassification::Inside,
            CoordPos::OnBoundary => PointClassification::OnEdge,
            CoordPos::Outside => PointClassification::Outside,
        }
    }

    /// Ear-cut triangulation of the face region (holes excluded), lifted back
    /// onto the face plane. Triangle winding is whatever the triangulator
    /// produced; callers orient triangles themselves.
    pub fn triangulate(&self) -> Vec<[Point3<Real>; 3]> {
        if !self.is_valid() {
            return Vec::new();
        }
        let triangulation = self.outline().earcut_triangles_raw();
        let vertices = triangulation.vertices;
        let lift = |i: usize| self.from_2d(vertices[2 * i], vertices[2 * i + 1]);

        triangulation
            .triangle_indices
            .chunks_exact(3)
            .map(|tri| [lift(tri[0]), lift(tri[1]), lift(tri[2])])
            .collect()
    }

    /// Face-local 2D coordinates of a point.
    pub fn to_2d(&self, point: &Point3<Real>) -> Coord<Real> {
        let (u, v) = &self.basis;
        Coord {
            x: point.coords.dot(u),
            y: point.coords.dot(v),
        }
    }

    /// Inverse of [`Face::to_2d`] for points on the face plane.
    pub fn from_2d(&self, x: Real, y: Real) -> Point3<Real> {
        let (u, v) = &self.basis;
        Point3::from(u * x + v * y + self.plane.normal() * self.plane.offset())
    }

    fn outline(&self) -> &GeoPolygon<Real> {
        self.outline.get_or_init(|| {
            let ring = |points: &[Point3<Real>]| -> LineString<Real> {
                LineString::new(points.iter().map(|p| self.to_2d(p)).collect())
            };
            GeoPolygon::new(ring(&self.outer), self.holes.iter().map(|h| ring(h)).collect())
        })
    }
}

impl TransformOps for Face {
    fn transform(&self, matrix: &Matrix4<Real>) -> Self {
        let map = |ring: &[Point3<Real>]| -> Vec<Point3<Real>> {
            ring.iter().map(|p| matrix.transform_point(p)).collect()
        };
        Face::new(map(&self.outer), self.holes.iter().map(|h| map(h)).collect())
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`] spanning every loop.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut points = self.vertices();
            let Some(first) = points.next() else {
                return Aabb::new(Point3::origin(), Point3::origin());
            };
            let (mins, maxs) = points.fold((*first, *first), |(mins, maxs), p| {
                (mins.inf(p), maxs.sup(p))
            });
            Aabb::new(mins, maxs)
        })
    }

    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }
}

fn open_loop(mut ring: Vec<Point3<Real>>) -> Vec<Point3<Real>> {
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

fn centroid(points: &[Point3<Real>]) -> Option<Point3<Real>> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as Real))
}

fn distance_2d(a: Coord<Real>, b: Coord<Real>) -> Real {
    (a.x - b.x).hypot(a.y - b.y)
}

fn segment_distance_2d(a: Coord<Real>, b: Coord<Real>, p: Coord<Real>) -> Real {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 <= Real::EPSILON {
        return distance_2d(a, p);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    distance_2d(Coord { x: a.x + t * dx, y: a.y + t * dy }, p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_with_hole() -> Face {
        Face::from_xy(
            &[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]],
            &[&[[4.0, 4.0], [6.0, 4.0], [6.0, 6.0], [4.0, 6.0]]],
        )
    }

    #[test]
    fn normal_follows_outer_winding() {
        let face = square_with_hole();
        assert!((face.normal() - Vector3::z()).norm() < 1e-12);
        assert!(face.plane().offset().abs() < 1e-12);

        let reversed = Face::from_xy(&[[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]], &[]);
        assert!((reversed.normal() + Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn closing_point_is_dropped() {
        let face = Face::from_xy(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]], &[]);
        assert_eq!(face.outer_loop().len(), 3);
        assert_eq!(face.edges().count(), 3);
    }

    #[test]
    fn edges_cover_every_loop() {
        let face = square_with_hole();
        assert_eq!(face.edges().count(), 8);
        assert_eq!(face.vertices().count(), 8);
    }

    #[test]
    fn classify_interior_hole_and_boundary() {
        let face = square_with_hole();
        let at = |x: Real, y: Real| face.classify_point(&Point3::new(x, y, 0.0));

        assert_eq!(at(2.0, 2.0), PointClassification::Inside);
        assert_eq!(at(5.0, 5.0), PointClassification::Outside);
        assert_eq!(at(12.0, 5.0), PointClassification::Outside);
        assert_eq!(at(5.0, 0.0), PointClassification::OnEdge);
        assert_eq!(at(5.0, 4.0), PointClassification::OnEdge);
        assert_eq!(at(10.0, 10.0), PointClassification::OnVertex);
        assert_eq!(at(6.0, 6.0), PointClassification::OnVertex);
        assert_eq!(
            face.classify_point(&Point3::new(2.0, 2.0, 1.0)),
            PointClassification::NotOnPlane
        );
    }

    #[test]
    fn degenerate_faces_are_invalid() {
        let empty = Face::new(Vec::new(), Vec::new());
        assert_eq!(empty.validate(), Err(ValidationError::TooFewPoints(0)));
        assert_eq!(
            empty.classify_point(&Point3::origin()),
            PointClassification::Unknown
        );

        let collinear = Face::from_xy(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]], &[]);
        assert_eq!(collinear.validate(), Err(ValidationError::DegenerateNormal));

        let nan = Face::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(Real::NAN, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            Vec::new(),
        );
        assert!(matches!(nan.validate(), Err(ValidationError::InvalidCoordinate(_))));
    }

    #[test]
    fn triangulation_excludes_hole() {
        let face = square_with_hole();
        let tris = face.triangulate();
        assert!(!tris.is_empty());

        let area: Real = tris
            .iter()
            .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() * 0.5)
            .sum();
        assert!((area - 96.0).abs() < 1e-9);
        for [a, b, c] in &tris {
            assert!(a.z.abs() < 1e-12 && b.z.abs() < 1e-12 && c.z.abs() < 1e-12);
        }
    }

    #[test]
    fn transform_moves_plane_and_bounds() {
        let face = square_with_hole().translate(0.0, 0.0, 5.0);
        assert!((face.plane().offset() - 5.0).abs() < 1e-12);
        let bb = face.bounding_box();
        assert_eq!(bb.mins, Point3::new(0.0, 0.0, 5.0));
        assert_eq!(bb.maxs, Point3::new(10.0, 10.0, 5.0));
        assert!((face.diagonal() - (200.0 as Real).sqrt()).abs() < 1e-9);
    }
}
