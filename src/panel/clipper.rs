//! Trim generated geometry to the boundary of its source face.
//!
//! The face is extruded into a prism straddling its own plane (the
//! *cutter*), the group's faces are intersected with it, and whatever a
//! point-in-face test on the projected centroids rejects is pruned.

use crate::errors::ClipError;
use crate::face::{Face, PointClassification};
use crate::float_types::{Real, tolerance};
use crate::mesh::{Mesh, polygon::Polygon};
use crate::scene::{GroupId, Scene};
use crate::traits::TransformOps;
use std::fmt::Debug;

/// Extra prism depth beyond the farthest target vertex, split over both caps.
const CUTTER_MARGIN: Real = 2.0;

/// What happens to trimmed faces whose centroid lands on the face boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Keep faces classified on an edge or vertex.
    #[default]
    Keep,
    /// Only faces strictly inside survive.
    Discard,
}

impl BoundaryPolicy {
    pub const fn keeps(self, class: PointClassification) -> bool {
        match class {
            PointClassification::Inside => true,
            PointClassification::OnEdge | PointClassification::OnVertex => {
                matches!(self, BoundaryPolicy::Keep)
            },
            PointClassification::Outside
            | PointClassification::NotOnPlane
            | PointClassification::Unknown => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipOptions {
    pub boundary: BoundaryPolicy,
    /// Distance within which a centroid counts as on the boundary.
    pub tolerance: Real,
}

impl Default for ClipOptions {
    fn default() -> Self {
        ClipOptions {
            boundary: BoundaryPolicy::default(),
            tolerance: tolerance(),
        }
    }
}

/// Boolean intersection of loose faces with a closed solid.
pub trait BooleanIntersector<S: Clone + Send + Sync + Debug> {
    /// Return the parts of `faces` inside `cutter`.
    fn intersect(&self, faces: &[Polygon<S>], cutter: &Mesh<S>)
    -> Result<Vec<Polygon<S>>, ClipError>;
}

/// Intersection through a BSP tree of the cutter.
#[derive(Debug, Clone, Copy, Default)]
pub struct BspIntersector;

impl<S: Clone + Send + Sync + Debug> BooleanIntersector<S> for BspIntersector {
    fn intersect(
        &self,
        faces: &[Polygon<S>],
        cutter: &Mesh<S>,
    ) -> Result<Vec<Polygon<S>>, ClipError> {
        if cutter.polygons.is_empty() {
            return Err(ClipError::GeometryOperation("cutter has no faces".into()));
        }
        Ok(Mesh::from_polygons(faces).intersect_surface(cutter).polygons)
    }
}

/// Boundary trimming with explicit options and intersector.
#[derive(Debug, Clone, Default)]
pub struct Clipper<I = BspIntersector> {
    pub options: ClipOptions,
    pub intersector: I,
}

impl Clipper<BspIntersector> {
    pub fn new(options: ClipOptions) -> Self {
        Clipper {
            options,
            intersector: BspIntersector,
        }
    }
}

impl<I> Clipper<I> {
    pub const fn with_intersector(options: ClipOptions, intersector: I) -> Self {
        Clipper {
            options,
            intersector,
        }
    }

    /// Trim the faces of `group` to the region of `face`, holes excluded.
    ///
    /// An invalid face or a missing group makes this a no-op. The scratch
    /// cutter group is removed from `scene` on every path, including errors.
    pub fn clip<S>(&self, scene: &mut Scene<S>, group: GroupId, face: &Face) -> Result<(), ClipError>
    where
        S: Clone + Send + Sync + Debug,
        I: BooleanIntersector<S>,
    {
        if !face.is_valid() {
            log::debug!("clip skipped: invalid face");
            return Ok(());
        }
        let Some(target) = scene.group(group) else {
            log::debug!("clip skipped: group {group} does not exist");
            return Ok(());
        };
        let faces = target.entities.faces().to_vec();

        // the prism must reach past the farthest crest on either side
        let reach = faces
            .iter()
            .flat_map(|polygon| &polygon.vertices)
            .map(|v| face.plane().signed_distance(&v.pos).abs())
            .filter(|d| d.is_finite())
            .fold(0.0, Real::max);
        let normal = face.normal();
        let depth = face
            .diagonal()
            .max(normal.norm() * 2.0)
            .max(2.0 * reach + CUTTER_MARGIN);
        let base = face.translate_vector(-normal.normalize() * (depth / 2.0));

        let mut scratch = scene.scratch_group("cutter");
        let scratch_id = scratch.id();
        let cutter = {
            let Some(cutter_group) = scratch.group_mut(scratch_id) else {
                return Err(ClipError::GeometryOperation("scratch group vanished".into()));
            };
            let prism = Mesh::<S>::extrude_face(&base, depth, None);
            cutter_group.entities.replace_faces(prism.polygons);
            cutter_group.entities.to_mesh()
        };
        log::trace!(
            "cutter: depth {depth}, {} faces, {} target faces",
            cutter.polygons.len(),
            faces.len()
        );

        let trimmed = self.intersector.intersect(&faces, &cutter)?;

        let Some(target) = scratch.group_mut(group) else {
            return Err(ClipError::GeometryOperation(format!("group {group} vanished")));
        };
        let entities = &mut target.entities;
        entities.replace_faces(trimmed);

        let options = self.options;
        let pruned = entities.retain_faces(|polygon| {
            let centroid = face.project_to_plane(&polygon.centroid());
            let class = face.classify_point_with_tolerance(&centroid, options.tolerance);
            options.boundary.keeps(class)
        });
        let orphans = entities.remove_orphan_edges();

        log::debug!(
            "clipped group {group}: {} faces kept, {pruned} pruned, {orphans} orphan edges removed",
            entities.face_count()
        );
        Ok(())
    }
}

/// Trim `group` to `face` with default options and the BSP intersector.
pub fn clip_to_boundary<S: Clone + Send + Sync + Debug>(
    scene: &mut Scene<S>,
    group: GroupId,
    face: &Face,
) -> Result<(), ClipError> {
    Clipper::new(ClipOptions::default()).clip(scene, group, face)
}
