//! Shared error types used across submodules.

use thiserror::Error;

/// Validation failures raised before any field computation proceeds.
///
/// A coincident observation point and charge sample is not an error: it is resolved with
/// [`SINGULARITY_FLOOR_SQUARED`](crate::constants::SINGULARITY_FLOOR_SQUARED).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Zero-length line direction, non-positive radius, non-finite coordinates, or mismatched
    /// dimensionality between charges and observation points.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A sample count below one for a discretization or grid axis.
    #[error("invalid sampling: {0}")]
    InvalidSampling(String),
    /// A non-finite charge magnitude or density.
    #[error("invalid magnitude: {0}")]
    InvalidMagnitude(String),
    /// The requested potential diverges and cannot be sampled.
    #[error("potential is not computable for {0}")]
    UndefinedPotential(&'static str),
}

/// Result alias for fallible field operations.
pub type FieldResult<T> = Result<T, FieldError>;
