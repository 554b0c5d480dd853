//! Validation and operation errors

use crate::float_types::Real;
use nalgebra::Point3;
use std::fmt::Display;

/// All the possible validation issues a face might have
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (TooFewPoints) A loop has fewer than the minimal #points
    TooFewPoints(usize),
    /// (InvalidCoordinate) The coordinate has a NaN or infinite
    InvalidCoordinate(Point3<Real>),
    /// (DegenerateNormal) The outer loop encloses no area, so no normal can be derived
    DegenerateNormal,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::TooFewPoints(count) => write!(f, "(TooFewPoints) A loop needs at least 3 points, got {}", count),
            ValidationError::InvalidCoordinate(opoint) => write!(f, "(InvalidCoordinate) The coordinate ({}) has a NaN or infinite", opoint),
            ValidationError::DegenerateNormal => write!(f, "(DegenerateNormal) The outer loop encloses no area"),
        }
    }
}

/// Failures surfaced by clipping and committing a panel.
///
/// Degenerate input never ends up here: invalid faces make the operations
/// no-ops, and numeric degeneracies are absorbed by fallbacks.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClipError {
    /// The boolean-intersection primitive failed
    #[error("boolean intersection failed: {0}")]
    GeometryOperation(String),
}
