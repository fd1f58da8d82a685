//! Closed-form field of infinite line charges.

use std::f64::consts::PI;

use crate::charges::InfiniteLineCharge;
use crate::constants::{floored_distance_squared, VACUUM_PERMITTIVITY};
use crate::errors::{FieldError, FieldResult};
use crate::math::{Position, Scalar, R3};

impl InfiniteLineCharge {
    /// Field at `point`, without validation: `E = λ / (2π ε₀ r⊥²) · r⊥`.
    #[must_use]
    pub fn field_at(&self, point: R3) -> R3 {
        let r_perp = self.perpendicular_offset(point);
        let r = floored_distance_squared(r_perp.norm_squared()).sqrt();
        (r_perp / r) * (self.linear_density() / (2.0 * PI * VACUUM_PERMITTIVITY) / r)
    }

    /// Electric field at every observation point.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidGeometry`] when a point differs in dimensionality from the line or has
    /// non-finite coordinates.
    pub fn electric_field(&self, points: &[Position]) -> FieldResult<Vec<R3>> {
        electric_field_from_lines(std::slice::from_ref(self), points)
    }

    /// The potential of an infinite line diverges; this always fails.
    ///
    /// # Errors
    ///
    /// Always [`FieldError::UndefinedPotential`].
    pub fn electric_potential(&self, _points: &[Position]) -> FieldResult<Vec<Scalar>> {
        Err(FieldError::UndefinedPotential("an infinite line charge"))
    }
}

/// Superposed field of several infinite lines at every observation point.
///
/// # Errors
///
/// [`FieldError::InvalidGeometry`] on mixed dimensionality or non-finite points.
pub fn electric_field_from_lines(
    lines: &[InfiniteLineCharge],
    points: &[Position],
) -> FieldResult<Vec<R3>> {
    let Some(dimension) = points
        .first()
        .map(Position::dimension)
        .or_else(|| lines.first().map(InfiniteLineCharge::dimension))
    else {
        return Ok(Vec::new());
    };
    if let Some(p) = points
        .iter()
        .find(|p| p.dimension() != dimension || !p.is_finite())
    {
        return Err(FieldError::InvalidGeometry(format!(
            "observation point {p:?} is not a finite {dimension} point"
        )));
    }
    if let Some(line) = lines.iter().find(|l| l.dimension() != dimension) {
        return Err(FieldError::InvalidGeometry(format!(
            "line charge is {} but the observation points are {dimension}",
            line.dimension()
        )));
    }
    log::debug!(
        "evaluating {} line charges on {} {} points",
        lines.len(),
        points.len(),
        dimension
    );
    Ok(points
        .iter()
        .map(|p| {
            let p = p.to_spatial();
            lines
                .iter()
                .fold(R3::zeros(), |acc, line| acc + line.field_at(p))
        })
        .collect())
}
