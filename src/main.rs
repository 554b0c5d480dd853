// main.rs
//
// Minimal walk through the panel pipeline on a 1 m square with a window cut
// out of it. Geometry carries no shared data, so S is bound to ().

use corrugrs::panel::{self, Axis, Parameters};
use corrugrs::{Face, Scene};

#[cfg(feature = "stl-io")]
use std::fs;

fn main() {
    let face = Face::from_xy(
        &[[0.0, 0.0], [1000.0, 0.0], [1000.0, 1000.0], [0.0, 1000.0]],
        &[&[[400.0, 400.0], [600.0, 400.0], [600.0, 600.0], [400.0, 600.0]]],
    );
    let mut params = Parameters::default();

    // 1) frame
    let frame = panel::build_frame(&face, params.direction);
    let bounds = frame.bounds_uv();
    println!("frame u {:?} v {:?}, extent u {:?} v {:?}", frame.u_axis(), frame.v_axis(), bounds.u, bounds.v);

    // 2) preview, in both directions
    for _ in 0..2 {
        let paths = panel::generate_preview(&face, &params, panel::sine_surface::DEFAULT_PREVIEW_SAMPLES);
        let points: usize = paths.iter().map(Vec::len).sum();
        println!("preview {:?}: {} polylines, {points} points", params.direction, paths.len());
        params.flip_direction();
    }

    // 3) untrimmed surface
    let surface = panel::generate_mesh(&face, &params);
    println!("surface: {} points, {} triangles", surface.point_count(), surface.triangle_count());

    // 4) commit into a scene
    let mut scene: Scene<()> = Scene::new();
    let group = match panel::apply(&mut scene, &face, &params) {
        Ok(Some(group)) => group,
        Ok(None) => {
            eprintln!("face is not valid");
            return;
        },
        Err(error) => {
            eprintln!("panel failed: {error}");
            return;
        },
    };
    let Some(panel_group) = scene.group(group) else {
        return;
    };
    println!(
        "{} {group}: {} faces, {} edges",
        panel_group.name,
        panel_group.entities.face_count(),
        panel_group.entities.edge_count()
    );

    #[cfg(feature = "stl-io")]
    {
        // Ensure the /stl folder exists
        let _ = fs::create_dir_all("stl");
        let _ = fs::write("stl/panel_surface.stl", surface.to_stl_ascii("panel_surface"));
        let _ = fs::write("stl/panel.stl", panel_group.entities.to_stl_ascii("panel"));
        if let Ok(bytes) = panel_group.entities.to_stl_binary("panel") {
            let _ = fs::write("stl/panel_binary.stl", bytes);
        }
    }

    // 5) the same face, waves across
    let across = params.with_direction(Axis::V).with_pitch(120.0).with_amplitude(-20.0);
    if let Ok(Some(id)) = panel::apply(&mut scene, &face, &across) {
        if let Some(g) = scene.group(id) {
            println!("across: {} faces", g.entities.face_count());
        }
    }
}
