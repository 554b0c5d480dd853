use crate::errors::ClipError;
use crate::face::Face;
use crate::panel::clipper::{BooleanIntersector, Clipper};
use crate::panel::parameters::Parameters;
use crate::panel::sine_surface;
use crate::scene::{GroupId, Scene};
use std::fmt::Debug;

/// Name given to every committed panel group.
pub const PANEL_GROUP_NAME: &str = "Corrugated Sine Panel";

/// Build, place, trim and soften a panel for `face` in a new group.
///
/// Returns `Ok(None)` for an invalid face. If trimming fails the new group
/// is erased again before the error is returned, leaving `scene` as it was.
pub fn apply_with<S, I>(
    scene: &mut Scene<S>,
    face: &Face,
    params: &Parameters,
    clipper: &Clipper<I>,
) -> Result<Option<GroupId>, ClipError>
where
    S: Clone + Send + Sync + Debug,
    I: BooleanIntersector<S>,
{
    if let Err(error) = face.validate() {
        log::warn!("not applying panel: {error}");
        return Ok(None);
    }

    let mesh = sine_surface::build(face, params);
    let group = scene.add_group(PANEL_GROUP_NAME);
    if let Some(target) = scene.group_mut(group) {
        target.entities.add_faces_from_mesh(&mesh, None);
    }

    if let Err(error) = clipper.clip(scene, group, face) {
        scene.erase(group);
        log::warn!("panel rolled back: {error}");
        return Err(error);
    }

    if let Some(target) = scene.group_mut(group) {
        let softened = target.entities.soften_internal_edges();
        log::debug!(
            "panel {group}: {} faces, {softened} soft edges",
            target.entities.face_count()
        );
    }
    Ok(Some(group))
}
