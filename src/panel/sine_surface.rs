//! Sine height field over a face's frame: full tessellation for commit and
//! a sparse polyline preview.

use crate::face::Face;
use crate::float_types::{DEGENERATE_LENGTH, Real, TAU};
use crate::mesh::PolygonMesh;
use crate::panel::frame::{Frame, UvBounds};
use crate::panel::parameters::Parameters;
use nalgebra::Point3;

/// Upper bound on samples along either grid axis.
pub const MAX_SAMPLES: usize = 512;

/// Preview polyline count is clamped into this range.
pub const PREVIEW_SAMPLES: (usize, usize) = (2, 24);

/// Default number of preview polylines.
pub const DEFAULT_PREVIEW_SAMPLES: usize = 6;

/// Period used for the wave; a vanishing pitch becomes `1.0`.
pub fn normalized_period(pitch: Real) -> Real {
    if !pitch.is_finite() || pitch.abs() < DEGENERATE_LENGTH {
        1.0
    } else {
        pitch
    }
}

/// `amplitude · sin(2π u / period)`, zero for a vanishing amplitude.
///
/// `period` must already be normalized with [`normalized_period`].
pub fn wave_height(amplitude: Real, u: Real, period: Real) -> Real {
    if amplitude.abs() < DEGENERATE_LENGTH {
        return 0.0;
    }
    amplitude * (TAU * u / period).sin()
}

/// Tessellate the corrugated surface over `face`, padded past its boundary
/// so the later trim leaves no gaps.
pub fn build(face: &Face, params: &Parameters) -> PolygonMesh {
    if !face.is_valid() {
        log::debug!("invalid face, nothing to build");
        return PolygonMesh::new();
    }
    let frame = Frame::new(face, params.direction);
    let bounds = frame.bounds_uv();
    if !bounds.is_finite() {
        log::debug!("face has no finite extent, nothing to build");
        return PolygonMesh::new();
    }

    let pitch = params.pitch.abs();
    let u_range = expand_range(bounds.u, pitch);
    let v_range = expand_range(bounds.v, pitch / 2.0);

    let u_step = u_step(u_range, pitch / params.segments_per_period() as Real);
    let v_step = v_step(v_range, pitch / 2.0);
    let u_count = steps_count(u_range, u_step);
    let v_count = steps_count(v_range, v_step);
    let period = normalized_period(params.pitch);

    let mut mesh = PolygonMesh::with_capacity(
        u_count * v_count,
        2 * (u_count - 1) * (v_count - 1),
    );

    // indices[iu][iv]
    let indices: Vec<Vec<usize>> = (0..u_count)
        .map(|iu| {
            let u = u_range.0 + iu as Real * u_step;
            let height = wave_height(params.amplitude, u, period);
            (0..v_count)
                .map(|iv| {
                    let v = v_range.0 + iv as Real * v_step;
                    mesh.add_point(frame.to_world(&Point3::new(u, v, height)))
                })
                .collect()
        })
        .collect();

    for iu in 0..u_count - 1 {
        for iv in 0..v_count - 1 {
            let a = indices[iu][iv];
            let b = indices[iu + 1][iv];
            let c = indices[iu + 1][iv + 1];
            let d = indices[iu][iv + 1];
            mesh.add_triangle(a, b, c);
            mesh.add_triangle(a, c, d);
        }
    }

    log::debug!(
        "sine surface: {u_count}x{v_count} samples, {} triangles",
        mesh.triangle_count()
    );
    mesh
}

/// Polylines along `u` at `samples` evenly spaced `v` values over the raw
/// face extent. `samples` is clamped into [`PREVIEW_SAMPLES`].
pub fn preview_paths(face: &Face, params: &Parameters, samples: usize) -> Vec<Vec<Point3<Real>>> {
    if !face.is_valid() {
        return Vec::new();
    }
    let frame = Frame::new(face, params.direction);
    let bounds = frame.bounds_uv();
    if !bounds.is_finite() {
        return Vec::new();
    }
    let UvBounds { u: (u_min, u_max), v: (v_min, v_max) } = bounds;

    let samples = samples.clamp(PREVIEW_SAMPLES.0, PREVIEW_SAMPLES.1);
    let v_step = (v_max - v_min) / (samples - 1) as Real;

    let u_span = u_max - u_min;
    let mut u_step = params.pitch.abs() / params.segments_per_period() as Real;
    if u_step <= 0.0 {
        u_step = u_span / 20.0;
    }
    let count_u = steps_count((u_min, u_max), u_step);
    let period = normalized_period(params.pitch);

    (0..samples)
        .map(|i| {
            let v = v_min + v_step * i as Real;
            (0..count_u)
                .map(|j| {
                    let u = u_min + u_step * j as Real;
                    let height = wave_height(params.amplitude, u, period);
                    frame.to_world(&Point3::new(u, v, height))
                })
                .collect()
        })
        .collect()
}

/// Pad `(min, max)` by `padding` on both sides, or by a tenth of the span
/// when `padding` is zero.
fn expand_range((min, max): (Real, Real), padding: Real) -> (Real, Real) {
    let pad = if padding == 0.0 { (max - min) * 0.1 } else { padding };
    (min - pad, max + pad)
}

fn u_step((min, max): (Real, Real), desired: Real) -> Real {
    let span = max - min;
    if span <= 0.0 {
        return span;
    }
    if desired <= 0.0 {
        return span / 2.0;
    }
    desired.max(span / 100.0).min(span)
}

fn v_step((min, max): (Real, Real), target: Real) -> Real {
    let span = max - min;
    if span <= 0.0 {
        return span;
    }
    let target = if target <= 0.0 { span / 20.0 } else { target };
    target.max(span / 60.0).min(span)
}

/// Number of samples covering the range, always in `2..=MAX_SAMPLES`.
fn steps_count((min, max): (Real, Real), step: Real) -> usize {
    let span = max - min;
    if span <= 0.0 || step <= 0.0 || !span.is_finite() {
        return 2;
    }
    let count = (span / step).ceil() + 1.0;
    if count.is_finite() {
        (count as usize).clamp(2, MAX_SAMPLES)
    } else {
        MAX_SAMPLES
    }
}
