//! Superposition of point-charge fields and potentials over observation points.

use crate::charges::{discretize_all, Charge, Distribution};
use crate::constants::{floored_distance_squared, COULOMB_CONSTANT};
use crate::errors::{FieldError, FieldResult};
use crate::math::{Dimension, Position, Scalar, R3};

use super::FieldMap;

/// Electric field E at `point` due to discrete point charges, without validation.
///
/// Contributions are accumulated left to right in slice order. An exactly coincident sample
/// contributes the zero vector (see
/// [`SINGULARITY_FLOOR_SQUARED`](crate::constants::SINGULARITY_FLOOR_SQUARED)).
#[must_use]
pub fn field_at(charges: &[Charge], point: R3) -> R3 {
    let mut e = R3::zeros();
    for c in charges {
        let r_vec = point - c.position().to_spatial();
        let r = floored_distance_squared(r_vec.norm_squared()).sqrt();
        e += coulomb_field(r_vec, r, COULOMB_CONSTANT * c.magnitude() / r);
    }
    e
}

/// Electric potential φ at `point` due to discrete point charges, without validation.
#[must_use]
pub fn potential_at(charges: &[Charge], point: R3) -> Scalar {
    let mut phi = 0.0;
    for c in charges {
        let r2 = floored_distance_squared((point - c.position().to_spatial()).norm_squared());
        phi += COULOMB_CONSTANT * c.magnitude() / r2.sqrt();
    }
    phi
}

fn sample_at(charges: &[Charge], point: R3) -> (R3, Scalar) {
    let mut e = R3::zeros();
    let mut phi = 0.0;
    for c in charges {
        let r_vec = point - c.position().to_spatial();
        let r = floored_distance_squared(r_vec.norm_squared()).sqrt();
        let kq_over_r = COULOMB_CONSTANT * c.magnitude() / r;
        e += coulomb_field(r_vec, r, kq_over_r);
        phi += kq_over_r;
    }
    (e, phi)
}

// Unit vector times kq/r², never forming kq/r³, which overflows long before the field does.
fn coulomb_field(r_vec: R3, r: Scalar, kq_over_r: Scalar) -> R3 {
    (r_vec / r) * (kq_over_r / r)
}

/// Superposed electric field and potential at every observation point.
///
/// Output sequences follow the order of `points`.
///
/// # Errors
///
/// [`FieldError::InvalidGeometry`] when charges and points do not share one dimensionality or a
/// coordinate is not finite; [`FieldError::InvalidMagnitude`] for a non-finite charge. Nothing is
/// computed when validation fails.
pub fn field_and_potential(charges: &[Charge], points: &[Position]) -> FieldResult<FieldMap> {
    let dimension = validate(charges, points)?;
    log::debug!(
        "evaluating {} charges on {} {} points",
        charges.len(),
        points.len(),
        dimension
    );
    let (field, potential) = points
        .iter()
        .map(|p| sample_at(charges, p.to_spatial()))
        .unzip();
    Ok(FieldMap::new(dimension, field, potential))
}

/// Superposed electric field at every observation point.
///
/// # Errors
///
/// Same validation as [`field_and_potential`].
pub fn electric_field(charges: &[Charge], points: &[Position]) -> FieldResult<Vec<R3>> {
    validate(charges, points)?;
    Ok(points
        .iter()
        .map(|p| field_at(charges, p.to_spatial()))
        .collect())
}

/// Superposed electric potential at every observation point.
///
/// # Errors
///
/// Same validation as [`field_and_potential`].
pub fn electric_potential(charges: &[Charge], points: &[Position]) -> FieldResult<Vec<Scalar>> {
    validate(charges, points)?;
    Ok(points
        .iter()
        .map(|p| potential_at(charges, p.to_spatial()))
        .collect())
}

/// Discretizes `distributions` in order and evaluates the result on `points`.
///
/// # Errors
///
/// Any discretization error, then the validation of [`field_and_potential`].
pub fn evaluate_distributions(
    distributions: &[Distribution],
    points: &[Position],
) -> FieldResult<FieldMap> {
    let charges = discretize_all(distributions)?;
    field_and_potential(&charges, points)
}

/// Checks dimensional homogeneity and finiteness; returns the shared dimension.
pub(crate) fn validate(charges: &[Charge], points: &[Position]) -> FieldResult<Dimension> {
    let dimension = points
        .first()
        .map(Position::dimension)
        .or_else(|| charges.first().map(Charge::dimension))
        .unwrap_or(Dimension::Planar);

    for (i, p) in points.iter().enumerate() {
        if p.dimension() != dimension {
            return Err(FieldError::InvalidGeometry(format!(
                "observation point {i} is {} but the evaluation is {dimension}",
                p.dimension()
            )));
        }
        if !p.is_finite() {
            return Err(FieldError::InvalidGeometry(format!(
                "observation point {i} has non-finite coordinates"
            )));
        }
    }
    for (i, c) in charges.iter().enumerate() {
        if c.dimension() != dimension {
            return Err(FieldError::InvalidGeometry(format!(
                "charge {i} is {} but the observation points are {dimension}",
                c.dimension()
            )));
        }
        if !c.position().is_finite() {
            return Err(FieldError::InvalidGeometry(format!(
                "charge {i} has non-finite coordinates"
            )));
        }
        if !c.magnitude().is_finite() {
            return Err(FieldError::InvalidMagnitude(format!(
                "charge {i} magnitude is not finite"
            )));
        }
    }
    Ok(dimension)
}
