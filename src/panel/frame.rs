//! Local coordinate frame anchored to a planar face.
//!
//! The frame maps world points to `(u, v, n)` coordinates where `n` is the
//! height above the face plane. The wave generator works entirely in these
//! coordinates.

use crate::face::Face;
use crate::float_types::{EPSILON, Real};
use crate::mesh::plane::build_orthonormal_basis;
use crate::panel::parameters::Axis;
use crate::traits::TransformOps;
use nalgebra::{Matrix4, Point3, Vector3};

/// Extent of a face in frame coordinates, as `(min, max)` pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvBounds {
    pub u: (Real, Real),
    pub v: (Real, Real),
}

impl UvBounds {
    /// Bounds of an empty point set: every minimum is `+∞`, every maximum `-∞`.
    pub const EMPTY: UvBounds = UvBounds {
        u: (Real::INFINITY, Real::NEG_INFINITY),
        v: (Real::INFINITY, Real::NEG_INFINITY),
    };

    pub fn is_finite(&self) -> bool {
        [self.u.0, self.u.1, self.v.0, self.v.1]
            .iter()
            .all(|c| c.is_finite())
    }

    pub fn u_span(&self) -> Real {
        self.u.1 - self.u.0
    }

    pub fn v_span(&self) -> Real {
        self.v.1 - self.v.0
    }

    fn include(&mut self, u: Real, v: Real) {
        self.u = (self.u.0.min(u), self.u.1.max(u));
        self.v = (self.v.0.min(v), self.v.1.max(v));
    }
}

/// A candidate for the primary axis, or `None` when the rule has nothing to offer.
type AxisRule = fn(&Face, &Vector3<Real>) -> Option<Vector3<Real>>;

/// Tried in order; the first candidate that survives [`accept_axis`] wins.
const AXIS_RULES: &[AxisRule] = &[longest_edge_axis, world_axis_fallback, default_axis];

/// Direction of the longest boundary edge. Ties go to the edge seen first.
fn longest_edge_axis(face: &Face, _normal: &Vector3<Real>) -> Option<Vector3<Real>> {
    let mut best: Option<(Real, Vector3<Real>)> = None;
    for (start, end) in face.edges() {
        let direction = end - start;
        let length = direction.norm();
        if best.is_none_or(|(longest, _)| length > longest) {
            best = Some((length, direction));
        }
    }
    best.map(|(_, direction)| direction)
}

/// First world axis not parallel to the normal.
fn world_axis_fallback(_face: &Face, normal: &Vector3<Real>) -> Option<Vector3<Real>> {
    [Vector3::x(), Vector3::y(), Vector3::z()]
        .into_iter()
        .find(|axis| !is_parallel(axis, normal))
}

fn default_axis(_face: &Face, _normal: &Vector3<Real>) -> Option<Vector3<Real>> {
    Some(Vector3::x())
}

fn is_parallel(a: &Vector3<Real>, b: &Vector3<Real>) -> bool {
    match (a.try_normalize(EPSILON), b.try_normalize(EPSILON)) {
        (Some(a), Some(b)) => 1.0 - a.dot(&b).abs() < EPSILON,
        _ => true,
    }
}

/// Reject zero or normal-parallel candidates, then project onto the plane.
fn accept_axis(candidate: Vector3<Real>, normal: &Vector3<Real>) -> Option<Vector3<Real>> {
    if candidate.norm() < EPSILON || is_parallel(&candidate, normal) {
        return None;
    }
    (candidate - normal * candidate.dot(normal)).try_normalize(EPSILON)
}

/// Orthonormal frame `{u, v, n}` on a face, right handed.
#[derive(Debug, Clone)]
pub struct Frame<'f> {
    face: &'f Face,
    origin: Point3<Real>,
    u_axis: Vector3<Real>,
    v_axis: Vector3<Real>,
    normal: Vector3<Real>,
    /// local → world
    transformation: Matrix4<Real>,
    /// world → local
    inverse: Matrix4<Real>,
}

impl<'f> Frame<'f> {
    pub fn new(face: &'f Face, direction: Axis) -> Self {
        let normal = face.normal().normalize();
        let origin = face.project_to_plane(&face.bounding_box().center());

        let primary = AXIS_RULES
            .iter()
            .find_map(|rule| rule(face, &normal).and_then(|c| accept_axis(c, &normal)))
            .unwrap_or_else(|| build_orthonormal_basis(normal).0);
        let base_v = normal.cross(&primary).normalize();

        let (u_axis, v_axis) = match direction {
            Axis::U => (primary, base_v),
            Axis::V => (base_v, normal.cross(&base_v).normalize()),
        };

        #[rustfmt::skip]
        let transformation = Matrix4::new(
            u_axis.x, v_axis.x, normal.x, origin.x,
            u_axis.y, v_axis.y, normal.y, origin.y,
            u_axis.z, v_axis.z, normal.z, origin.z,
            0.0,      0.0,      0.0,      1.0,
        );
        // rotation is orthonormal, so the inverse is its transpose
        let o = origin.coords;
        #[rustfmt::skip]
        let inverse = Matrix4::new(
            u_axis.x, u_axis.y, u_axis.z, -u_axis.dot(&o),
            v_axis.x, v_axis.y, v_axis.z, -v_axis.dot(&o),
            normal.x, normal.y, normal.z, -normal.dot(&o),
            0.0,      0.0,      0.0,      1.0,
        );

        log::trace!("frame origin {origin:?} u {u_axis:?} v {v_axis:?} n {normal:?}");

        Frame {
            face,
            origin,
            u_axis,
            v_axis,
            normal,
            transformation,
            inverse,
        }
    }

    pub const fn face(&self) -> &'f Face {
        self.face
    }

    pub const fn origin(&self) -> Point3<Real> {
        self.origin
    }

    pub const fn u_axis(&self) -> Vector3<Real> {
        self.u_axis
    }

    pub const fn v_axis(&self) -> Vector3<Real> {
        self.v_axis
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// Local to world matrix.
    pub const fn transformation(&self) -> &Matrix4<Real> {
        &self.transformation
    }

    /// World to local matrix.
    pub const fn inverse(&self) -> &Matrix4<Real> {
        &self.inverse
    }

    pub fn to_world(&self, local: &Point3<Real>) -> Point3<Real> {
        self.transformation.transform_point(local)
    }

    pub fn to_local(&self, world: &Point3<Real>) -> Point3<Real> {
        self.inverse.transform_point(world)
    }

    /// Extent of every boundary vertex, holes included, in `(u, v)`.
    /// A face without vertices yields [`UvBounds::EMPTY`].
    pub fn bounds_uv(&self) -> UvBounds {
        let mut bounds = UvBounds::EMPTY;
        for vertex in self.face.vertices() {
            let local = self.to_local(vertex);
            bounds.include(local.x, local.y);
        }
        bounds
    }
}
