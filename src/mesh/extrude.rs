//! Linear extrusion of a planar [`Face`] into a closed prism.

use crate::face::Face;
use crate::float_types::{EPSILON, Real};
use crate::mesh::{Mesh, plane::newell_normal, polygon::Polygon};
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Sweep `face` along its normal by `depth` (negative sweeps backwards).
    ///
    /// The result is a closed, outward facing solid: the two caps are the
    /// face triangulation (holes stay open through the prism) and every loop
    /// edge contributes one side quad. Invalid faces and zero depth give an
    /// empty mesh.
    pub fn extrude_face(face: &Face, depth: Real, metadata: Option<S>) -> Mesh<S> {
        if !face.is_valid() || depth.abs() < EPSILON || !depth.is_finite() {
            return Mesh::new();
        }

        let offset = face.normal() * depth;
        let direction = offset.normalize();
        let lift = |p: &Point3<Real>| p + offset;

        let mut polygons = Vec::new();

        for [a, b, c] in face.triangulate() {
            let facing = (b - a).cross(&(c - a)).dot(&direction);
            if facing.abs() < EPSILON {
                continue;
            }
            let (top, bottom) = if facing > 0.0 {
                ([a, b, c], [a, c, b])
            } else {
                ([a, c, b], [a, b, c])
            };
            polygons.push(Polygon::from_points(&bottom, metadata.clone()));
            polygons.push(Polygon::from_points(&top.map(|p| lift(&p)), metadata.clone()));
        }

        let outer = std::iter::once((face.outer_loop(), true));
        let holes = face.holes().iter().map(|h| (h.as_slice(), false));
        for (ring, is_outer) in outer.chain(holes) {
            for (start, end) in oriented_edges(ring, direction, is_outer) {
                polygons.push(Polygon::from_points(
                    &[start, end, lift(&end), lift(&start)],
                    metadata.clone(),
                ));
            }
        }

        let mut mesh = Mesh::from_polygons(&polygons);
        mesh.metadata = metadata;
        mesh
    }
}

/// Loop edges wound so that `edge × direction` points away from the solid:
/// counter-clockwise about `direction` for the outer loop, clockwise for holes.
fn oriented_edges(
    ring: &[Point3<Real>],
    direction: Vector3<Real>,
    is_outer: bool,
) -> Vec<(Point3<Real>, Point3<Real>)> {
    let ccw = newell_normal(ring.iter()).dot(&direction) > 0.0;
    let mut points = ring.to_vec();
    if ccw != is_outer {
        points.reverse();
    }
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
        .filter(|(a, b)| (b - a).norm() > EPSILON)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TransformOps;

    /// Signed volume via the divergence theorem; positive for outward faces.
    fn volume(mesh: &Mesh<()>) -> Real {
        mesh.polygons
            .iter()
            .flat_map(|p| p.triangulate())
            .map(|[a, b, c]| a.pos.coords.dot(&b.pos.coords.cross(&c.pos.coords)) / 6.0)
            .sum()
    }

    #[test]
    fn square_becomes_box() {
        let face = Face::from_xy(&[[0.0, 0.0], [2.0, 0.0], [2.0, 3.0], [0.0, 3.0]], &[]);
        let solid: Mesh<()> = Mesh::extrude_face(&face, 4.0, None);
        assert_eq!(solid.polygons.len(), 2 + 2 + 4);
        assert!((volume(&solid) - 24.0).abs() < 1e-9);

        let bb = solid.bounding_box();
        assert_eq!(bb.maxs, Point3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn winding_and_sign_do_not_change_orientation() {
        let cw = Face::from_xy(&[[0.0, 0.0], [0.0, 3.0], [2.0, 3.0], [2.0, 0.0]], &[]);
        let down: Mesh<()> = Mesh::extrude_face(&cw, 4.0, None);
        assert!((volume(&down) - 24.0).abs() < 1e-9);
        assert!(down.bounding_box().mins.z < -3.9);

        let back: Mesh<()> = Mesh::extrude_face(&cw, -4.0, None);
        assert!((volume(&back) - 24.0).abs() < 1e-9);
    }

    #[test]
    fn hole_runs_through_prism() {
        let face = Face::from_xy(
            &[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]],
            &[&[[4.0, 4.0], [4.0, 6.0], [6.0, 6.0], [6.0, 4.0]]],
        );
        let solid: Mesh<()> = Mesh::extrude_face(&face, 1.0, None);
        assert!((volume(&solid) - 96.0).abs() < 1e-9);
    }

    #[test]
    fn empty_for_zero_depth_or_bad_face() {
        let face = Face::from_xy(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]], &[]);
        assert!(Mesh::<()>::extrude_face(&face, 0.0, None).polygons.is_empty());
        let line = Face::from_xy(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]], &[]);
        assert!(Mesh::<()>::extrude_face(&line, 1.0, None).polygons.is_empty());
    }

    #[test]
    fn tilted_face_extrudes_along_its_normal() {
        let face = Face::from_xy(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]], &[])
            .rotate(90.0, 0.0, 0.0);
        let solid: Mesh<()> = Mesh::extrude_face(&face, 2.0, None);
        let bb = solid.bounding_box();
        assert!((bb.maxs.y - bb.mins.y - 2.0).abs() < 1e-9);
        assert!((volume(&solid) - 2.0).abs() < 1e-9);
    }
}
