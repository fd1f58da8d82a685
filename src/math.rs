//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{Vector2, Vector3};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for two-dimensional real vectors.
pub type R2 = Vector2<Scalar>;
/// Convenient alias for three-dimensional real vectors.
pub type R3 = Vector3<Scalar>;

/// Dimensionality of an evaluation space.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Two-dimensional plane (x, y).
    Planar,
    /// Three-dimensional space (x, y, z).
    Spatial,
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Planar => f.write_str("2D"),
            Self::Spatial => f.write_str("3D"),
        }
    }
}

/// A point in either the plane or in space.
///
/// Charges and observation points carry their dimensionality explicitly so that an evaluation
/// mixing the two can be rejected instead of silently zero-filling the missing coordinate.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Point in the plane.
    Planar(R2),
    /// Point in space.
    Spatial(R3),
}

impl Position {
    /// Planar point `(x, y)`.
    #[must_use]
    pub fn planar(x: Scalar, y: Scalar) -> Self {
        Self::Planar(R2::new(x, y))
    }

    /// Spatial point `(x, y, z)`.
    #[must_use]
    pub fn spatial(x: Scalar, y: Scalar, z: Scalar) -> Self {
        Self::Spatial(R3::new(x, y, z))
    }

    /// Dimensionality of the point.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        match self {
            Self::Planar(_) => Dimension::Planar,
            Self::Spatial(_) => Dimension::Spatial,
        }
    }

    /// Lifts the point into space; planar points land on `z = 0`.
    #[must_use]
    pub fn to_spatial(&self) -> R3 {
        match self {
            Self::Planar(p) => R3::new(p.x, p.y, 0.0),
            Self::Spatial(p) => *p,
        }
    }

    /// Builds a point of the requested dimensionality from a spatial vector, dropping `z` for
    /// planar output.
    #[must_use]
    pub fn from_spatial(v: R3, dimension: Dimension) -> Self {
        match dimension {
            Dimension::Planar => Self::Planar(R2::new(v.x, v.y)),
            Dimension::Spatial => Self::Spatial(v),
        }
    }

    /// True when every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Planar(p) => p.iter().all(|c| c.is_finite()),
            Self::Spatial(p) => p.iter().all(|c| c.is_finite()),
        }
    }

    /// Euclidean distance to `other`, or `None` when the dimensionalities differ.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> Option<Scalar> {
        match (self, other) {
            (Self::Planar(a), Self::Planar(b)) => Some((a - b).norm()),
            (Self::Spatial(a), Self::Spatial(b)) => Some((a - b).norm()),
            _ => None,
        }
    }
}

impl From<R2> for Position {
    fn from(value: R2) -> Self {
        Self::Planar(value)
    }
}

impl From<R3> for Position {
    fn from(value: R3) -> Self {
        Self::Spatial(value)
    }
}
