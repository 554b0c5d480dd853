//! Corrugated **sine-wave panels** on planar faces.
//!
//! Given a planar face (an outer loop plus any number of holes), `corrugrs`
//! builds a tessellated sine-wave sheet over it and trims the sheet to the
//! face boundary with a BSP-based boolean intersection, so the panel never
//! spills past the outline or into a hole.
//!
//! The pipeline lives in [`panel`]: a [`Frame`](panel::Frame) anchored to the
//! face, the [`sine_surface`](panel::sine_surface) generator and the
//! [`clipper`](panel::clipper). The geometry it runs on ([`face`], [`mesh`]
//! and [`scene`]) is small and self-contained.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` export
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod face;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod panel;
pub mod scene;
pub mod traits;
pub mod triangulated;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use face::{Face, PointClassification};
pub use mesh::{Mesh, PolygonMesh};
pub use panel::{Axis, Parameters, apply, build_frame, clip_to_boundary, generate_mesh, generate_preview};
pub use scene::{GroupId, Scene};
pub use traits::TransformOps;
