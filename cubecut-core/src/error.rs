/// Error types for plane generation, coordinate solving and scene updates
use thiserror::Error;

use crate::transform::Axis;

/// Why a single plane-generation attempt was thrown away.
///
/// Rejections never reach the caller of [`crate::PlaneGenerator::generate`];
/// they are retried until an attempt succeeds or the attempt cap is hit.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Rejection {
    /// One of the A, B, C coefficients is exactly zero
    #[error("degenerate plane: a normal coefficient is zero")]
    DegeneratePlane,
    /// A computed cross-section vertex left the accepted z band
    #[error("computed vertex z = {z} lies outside the accepted band")]
    OutOfBandIntersection { z: f64 },
}

/// Failures of the plane-equation coordinate solver
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// The point must leave exactly one coordinate unset
    #[error("expected exactly one unknown coordinate, found {unknown}")]
    UnderdeterminedPoint { unknown: usize },
    /// Solving for this axis would divide by a zero coefficient
    #[error("plane coefficient for the {0:?} axis is zero")]
    ZeroCoefficient(Axis),
}

/// Errors surfaced by [`crate::Scene`] construction and updates
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("no valid cutting plane found after {attempts} attempts")]
    GenerationFailed { attempts: usize },
    #[error("plane band {band} must be finite and non-negative")]
    InvalidBand { band: f64 },
    #[error("axis index {0} is out of range (expected 0, 1 or 2)")]
    InvalidAxis(usize),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
