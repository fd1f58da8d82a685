use crate::errors::{FieldError, FieldResult};
use crate::math::{Dimension, Position, Scalar, R3};

/// Infinitely long, uniformly charged straight line.
///
/// The field is evaluated in closed form from the perpendicular distance to the line rather than
/// through discretization. Its potential diverges and is never sampled.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "LineChargeFields")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfiniteLineCharge {
    point: Position,
    direction: R3,
    linear_density: Scalar,
}

impl InfiniteLineCharge {
    /// Creates a line through `point` along `direction` with linear density λ in C/m.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidGeometry`] when `direction` is the zero vector, a coordinate is not
    /// finite, or `point` and `direction` differ in dimensionality.
    /// [`FieldError::InvalidMagnitude`] when λ is not finite.
    pub fn new(point: Position, direction: Position, linear_density: Scalar) -> FieldResult<Self> {
        if point.dimension() != direction.dimension() {
            return Err(FieldError::InvalidGeometry(format!(
                "line point is {} but direction is {}",
                point.dimension(),
                direction.dimension()
            )));
        }
        if !point.is_finite() || !direction.is_finite() {
            return Err(FieldError::InvalidGeometry(
                "line point and direction must be finite".into(),
            ));
        }
        // Rescale by the largest component first so the norm neither overflows nor underflows.
        let direction = direction.to_spatial();
        let scale = direction.amax();
        if scale == 0.0 {
            return Err(FieldError::InvalidGeometry(
                "line direction must be non-zero".into(),
            ));
        }
        let direction = (direction / scale).normalize();
        if !linear_density.is_finite() {
            return Err(FieldError::InvalidMagnitude(
                "line linear_density is not finite".into(),
            ));
        }
        Ok(Self {
            point,
            direction,
            linear_density,
        })
    }

    /// A point on the line.
    #[must_use]
    pub const fn point(&self) -> Position {
        self.point
    }

    /// Unit direction, lifted into space (`z = 0` for planar lines).
    #[must_use]
    pub const fn direction(&self) -> R3 {
        self.direction
    }

    /// Linear charge density λ in C/m.
    #[must_use]
    pub const fn linear_density(&self) -> Scalar {
        self.linear_density
    }

    /// Dimensionality of the line's defining point.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.point.dimension()
    }

    /// Component of `p − point` perpendicular to the line.
    #[must_use]
    pub(crate) fn perpendicular_offset(&self, p: R3) -> R3 {
        let qp = p - self.point.to_spatial();
        qp - self.direction * qp.dot(&self.direction)
    }
}

/// Serialized form of [`InfiniteLineCharge`], re-validated on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct LineChargeFields {
    point: Position,
    direction: R3,
    linear_density: Scalar,
}

#[cfg(feature = "serde")]
impl TryFrom<LineChargeFields> for InfiniteLineCharge {
    type Error = FieldError;

    fn try_from(raw: LineChargeFields) -> FieldResult<Self> {
        let dimension = raw.point.dimension();
        if dimension == Dimension::Planar && raw.direction.z != 0.0 {
            return Err(FieldError::InvalidGeometry(
                "planar line direction has a z component".into(),
            ));
        }
        Self::new(
            raw.point,
            Position::from_spatial(raw.direction, dimension),
            raw.linear_density,
        )
    }
}
