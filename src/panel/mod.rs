//! Corrugated sine panels on planar faces.
//!
//! ```rust
//! # use corrugrs::{face::Face, panel::{self, Parameters}, scene::Scene};
//! let face = Face::from_xy(&[[0.0, 0.0], [1000.0, 0.0], [1000.0, 1000.0], [0.0, 1000.0]], &[]);
//! let params = Parameters::default();
//!
//! // live feedback while parameters change
//! let preview = panel::generate_preview(&face, &params, 6);
//! assert_eq!(preview.len(), 6);
//!
//! // commit
//! let mut scene: Scene<()> = Scene::new();
//! let group = panel::apply(&mut scene, &face, &params)?.expect("valid face");
//! assert!(scene.group(group).is_some_and(|g| g.entities.face_count() > 0));
//! # Ok::<(), corrugrs::errors::ClipError>(())
//! ```

use crate::errors::ClipError;
use crate::face::Face;
use crate::float_types::Real;
use crate::mesh::PolygonMesh;
use crate::scene::{GroupId, Scene};
use nalgebra::Point3;
use std::fmt::Debug;

pub mod apply;
pub mod clipper;
pub mod frame;
pub mod parameters;
pub mod sine_surface;

pub use apply::PANEL_GROUP_NAME;
pub use clipper::{BooleanIntersector, BoundaryPolicy, BspIntersector, ClipOptions, Clipper};
pub use frame::{Frame, UvBounds};
pub use parameters::{Axis, Parameters};

/// Local frame of `face` with waves along `direction`.
pub fn build_frame(face: &Face, direction: Axis) -> Frame<'_> {
    Frame::new(face, direction)
}

/// Full tessellated panel surface for `face`, not yet trimmed.
pub fn generate_mesh(face: &Face, params: &Parameters) -> PolygonMesh {
    sine_surface::build(face, params)
}

/// Sparse preview polylines for `face`.
pub fn generate_preview(face: &Face, params: &Parameters, sample_count: usize) -> Vec<Vec<Point3<Real>>> {
    sine_surface::preview_paths(face, params, sample_count)
}

/// Trim the faces of `group` to `face` with default options.
pub fn clip_to_boundary<S: Clone + Send + Sync + Debug>(
    scene: &mut Scene<S>,
    group: GroupId,
    face: &Face,
) -> Result<(), ClipError> {
    clipper::clip_to_boundary(scene, group, face)
}

/// Commit a panel for `face` into a new group of `scene`.
pub fn apply<S: Clone + Send + Sync + Debug>(
    scene: &mut Scene<S>,
    face: &Face,
    params: &Parameters,
) -> Result<Option<GroupId>, ClipError> {
    apply::apply_with(scene, face, params, &Clipper::new(ClipOptions::default()))
}
