mod support;

use corrugrs::{
    float_types::{EPSILON, Real},
    mesh::{Mesh, bsp::Node, plane::Plane, polygon::Polygon, vertex::Vertex},
    traits::TransformOps,
};
use nalgebra::{Point3, Vector3};
use support::*;

fn make_polygon_3d(points: &[[Real; 3]]) -> Polygon<()> {
    let vertices = points
        .iter()
        .map(|p| Vertex::new(Point3::new(p[0], p[1], p[2]), Vector3::z()))
        .collect();
    Polygon::new(vertices, None)
}

#[test]
fn split_polygon_keeps_both_halves_on_their_side() {
    let plane = Plane::from_normal(Vector3::x(), 0.5);
    let poly = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]);
    let (cf, cb, f, b) = plane.split_polygon(&poly);
    assert!(cf.is_empty() && cb.is_empty());
    assert_eq!((f.len(), b.len()), (1, 1));

    assert!(f[0].vertices.iter().all(|v| v.pos.x >= 0.5 - EPSILON));
    assert!(b[0].vertices.iter().all(|v| v.pos.x <= 0.5 + EPSILON));
    assert!(approx_eq(f[0].area() + b[0].area(), 1.0, 1e-12));
    // split parts keep the parent's plane
    assert_eq!(f[0].plane, poly.plane);
}

#[test]
fn node_clip_polygons_removes_inside() {
    let solid: Mesh<()> = Mesh::extrude_face(&square(2.0), 2.0, None);
    let node = Node::from_polygons(&solid.polygons);

    let inside = make_polygon_3d(&[[0.5, 0.5, 1.0], [1.5, 0.5, 1.0], [1.5, 1.5, 1.0]]);
    let outside = make_polygon_3d(&[[5.0, 5.0, 1.0], [6.0, 5.0, 1.0], [6.0, 6.0, 1.0]]);
    let kept = node.clip_polygons(&[inside, outside.clone()]);
    assert_eq!(kept, vec![outside]);
}

#[test]
fn extruded_solid_faces_outward() {
    let solid: Mesh<()> = Mesh::extrude_face(&square_with_hole(), 50.0, None);

    let bb = solid.bounding_box();
    assert_eq!(bb.mins, Point3::new(0.0, 0.0, 0.0));
    assert_eq!(bb.maxs, Point3::new(1000.0, 1000.0, 50.0));

    // a probe just past each polygon lands in empty space
    for poly in &solid.polygons {
        let n = poly.plane.normal();
        let c = poly.centroid();
        let probe = c + n * 1.0;
        let inside_hole = probe.x > 400.0 && probe.x < 600.0 && probe.y > 400.0 && probe.y < 600.0;
        let outside_box = probe.x < 0.0
            || probe.x > 1000.0
            || probe.y < 0.0
            || probe.y > 1000.0
            || probe.z < 0.0
            || probe.z > 50.0;
        assert!(inside_hole || outside_box, "polygon at {c:?} faces inward");
    }
}

#[test]
fn transformed_mesh_recomputes_planes() {
    let solid: Mesh<()> = Mesh::extrude_face(&square(1.0), 1.0, None);
    let rotated = solid.rotate(0.0, 0.0, 90.0);
    for (before, after) in solid.polygons.iter().zip(&rotated.polygons) {
        let n = before.plane.normal();
        let expected = Vector3::new(-n.y, n.x, n.z);
        assert!((after.plane.normal() - expected).norm() < 1e-9);
        for v in &after.vertices {
            assert!(after.plane.signed_distance(&v.pos).abs() < 1e-9);
        }
    }
}
