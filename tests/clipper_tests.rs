mod support;

use corrugrs::{
    errors::ClipError,
    face::{Face, PointClassification},
    float_types::Real,
    mesh::PolygonMesh,
    panel::{BoundaryPolicy, ClipOptions, Clipper, clip_to_boundary},
    scene::{GroupId, Scene},
};
use nalgebra::Point3;
use support::*;

/// Flat `n × n` cell grid over `[x0, x0 + size]²` at height `z`.
fn grid(x0: Real, size: Real, n: usize, z: Real) -> PolygonMesh {
    let mut mesh = PolygonMesh::new();
    let step = size / n as Real;
    let mut index = vec![vec![0; n + 1]; n + 1];
    for (i, row) in index.iter_mut().enumerate() {
        for (j, slot) in row.iter_mut().enumerate() {
            *slot = mesh.add_point(Point3::new(x0 + i as Real * step, x0 + j as Real * step, z));
        }
    }
    for i in 0..n {
        for j in 0..n {
            let (a, b, c, d) = (index[i][j], index[i + 1][j], index[i + 1][j + 1], index[i][j + 1]);
            mesh.add_triangle(a, b, c);
            mesh.add_triangle(a, c, d);
        }
    }
    mesh
}

fn scene_with(mesh: &PolygonMesh) -> (Scene<()>, GroupId) {
    let mut scene = Scene::new();
    let group = scene.add_group("panel");
    if let Some(g) = scene.group_mut(group) {
        g.entities.add_faces_from_mesh(mesh, None);
    }
    (scene, group)
}

fn face_count(scene: &Scene<()>, group: GroupId) -> usize {
    scene.group(group).map_or(0, |g| g.entities.face_count())
}

fn edge_count(scene: &Scene<()>, group: GroupId) -> usize {
    scene.group(group).map_or(0, |g| g.entities.edge_count())
}

#[test]
fn mesh_inside_keeps_every_face() {
    let (mut scene, group) = scene_with(&grid(100.0, 200.0, 2, 5.0));
    let (faces, edges) = (face_count(&scene, group), edge_count(&scene, group));

    clip_to_boundary(&mut scene, group, &square(1000.0)).expect("clip");
    assert_eq!(face_count(&scene, group), faces);
    assert_eq!(edge_count(&scene, group), edges);
    assert_eq!(scene.len(), 1);
}

#[test]
fn mesh_outside_loses_every_face_and_edge() {
    let (mut scene, group) = scene_with(&grid(2000.0, 200.0, 2, 0.0));
    clip_to_boundary(&mut scene, group, &square(1000.0)).expect("clip");
    assert_eq!(face_count(&scene, group), 0);
    assert_eq!(edge_count(&scene, group), 0);
    assert!(scene.contains(group));
}

#[test]
fn cutter_reaches_faces_far_from_the_plane() {
    // 500 above a face whose diagonal is only about 141
    let (mut scene, group) = scene_with(&grid(10.0, 80.0, 2, 500.0));
    let faces = face_count(&scene, group);
    clip_to_boundary(&mut scene, group, &square(100.0)).expect("clip");
    assert_eq!(face_count(&scene, group), faces);
    assert_eq!(scene.len(), 1);
}

#[test]
fn straddling_mesh_is_trimmed_to_the_boundary() {
    let (mut scene, group) = scene_with(&grid(-500.0, 2000.0, 3, 0.0));
    clip_to_boundary(&mut scene, group, &square(1000.0)).expect("clip");

    let faces = scene.group(group).map(|g| g.entities.faces().to_vec()).unwrap_or_default();
    assert!(!faces.is_empty());
    let area: Real = faces.iter().map(|f| f.area()).sum();
    assert!(approx_eq(area, 1_000_000.0, 1e-3));

    let points = faces.iter().flat_map(|f| f.vertices.iter().map(|v| &v.pos));
    let [min_x, min_y, _, max_x, max_y, _] = bounding_box(points);
    assert!(min_x >= -1e-6 && min_y >= -1e-6);
    assert!(max_x <= 1000.0 + 1e-6 && max_y <= 1000.0 + 1e-6);
}

#[test]
fn hole_is_cut_out() {
    let (mut scene, group) = scene_with(&grid(-100.0, 1200.0, 6, 0.0));
    let face = square_with_hole();
    clip_to_boundary(&mut scene, group, &face).expect("clip");

    let faces = scene.group(group).map(|g| g.entities.faces().to_vec()).unwrap_or_default();
    let area: Real = faces.iter().map(|f| f.area()).sum();
    assert!(approx_eq(area, 1_000_000.0 - 40_000.0, 1e-3));

    for c in centroids(&faces) {
        let in_hole = c.x > 400.0 + 1e-6 && c.x < 600.0 - 1e-6 && c.y > 400.0 + 1e-6 && c.y < 600.0 - 1e-6;
        assert!(!in_hole, "centroid {c:?} inside the hole");
        assert_ne!(face.classify_point(&face.project_to_plane(&c)), PointClassification::Outside);
    }
}

#[test]
fn scratch_cutter_is_always_released() {
    let (mut scene, group) = scene_with(&grid(100.0, 200.0, 2, 0.0));
    let before = face_count(&scene, group);

    let clipper = Clipper::with_intersector(ClipOptions::default(), FailingIntersector);
    let result = clipper.clip(&mut scene, group, &square(1000.0));
    assert!(matches!(result, Err(ClipError::GeometryOperation(_))));

    // only the target group remains and it is untouched
    assert_eq!(scene.len(), 1);
    assert_eq!(face_count(&scene, group), before);

    clip_to_boundary(&mut scene, group, &square(1000.0)).expect("clip");
    assert_eq!(scene.len(), 1);
}

#[test]
fn boundary_policy_decides_edge_faces() {
    // centroid (500, 0) sits exactly on the bottom edge of the square
    let mut mesh = PolygonMesh::new();
    let a = mesh.add_point(Point3::new(400.0, -10.0, 0.0));
    let b = mesh.add_point(Point3::new(600.0, -10.0, 0.0));
    let c = mesh.add_point(Point3::new(500.0, 20.0, 0.0));
    mesh.add_triangle(a, b, c);
    // and this one lies well outside
    let d = mesh.add_point(Point3::new(2000.0, 2000.0, 0.0));
    let e = mesh.add_point(Point3::new(2100.0, 2000.0, 0.0));
    let f = mesh.add_point(Point3::new(2000.0, 2100.0, 0.0));
    mesh.add_triangle(d, e, f);

    let keep = Clipper::with_intersector(ClipOptions::default(), PassThroughIntersector);
    let (mut scene, group) = scene_with(&mesh);
    keep.clip(&mut scene, group, &square(1000.0)).expect("clip");
    assert_eq!(face_count(&scene, group), 1);
    assert_eq!(edge_count(&scene, group), 3);

    let discard = Clipper::with_intersector(
        ClipOptions {
            boundary: BoundaryPolicy::Discard,
            ..ClipOptions::default()
        },
        PassThroughIntersector,
    );
    let (mut scene, group) = scene_with(&mesh);
    discard.clip(&mut scene, group, &square(1000.0)).expect("clip");
    assert_eq!(face_count(&scene, group), 0);
}

#[test]
fn tolerance_widens_the_boundary() {
    // centroid 0.5 below the bottom edge
    let mut mesh = PolygonMesh::new();
    let a = mesh.add_point(Point3::new(400.0, -10.5, 0.0));
    let b = mesh.add_point(Point3::new(600.0, -10.5, 0.0));
    let c = mesh.add_point(Point3::new(500.0, 19.5, 0.0));
    mesh.add_triangle(a, b, c);

    let strict = Clipper::with_intersector(ClipOptions::default(), PassThroughIntersector);
    let (mut scene, group) = scene_with(&mesh);
    strict.clip(&mut scene, group, &square(1000.0)).expect("clip");
    assert_eq!(face_count(&scene, group), 0);

    let loose = Clipper::with_intersector(
        ClipOptions {
            tolerance: 1.0,
            ..ClipOptions::default()
        },
        PassThroughIntersector,
    );
    let (mut scene, group) = scene_with(&mesh);
    loose.clip(&mut scene, group, &square(1000.0)).expect("clip");
    assert_eq!(face_count(&scene, group), 1);
}

#[test]
fn invalid_face_or_group_is_a_no_op() {
    let (mut scene, group) = scene_with(&grid(2000.0, 200.0, 2, 0.0));
    let faces = face_count(&scene, group);

    let degenerate = Face::from_xy(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]], &[]);
    clip_to_boundary(&mut scene, group, &degenerate).expect("no-op");
    assert_eq!(face_count(&scene, group), faces);

    let erased = scene.add_group("gone");
    scene.erase(erased);
    clip_to_boundary(&mut scene, erased, &square(1000.0)).expect("no-op");
    assert_eq!(scene.len(), 1);
    assert_eq!(face_count(&scene, group), faces);
}
