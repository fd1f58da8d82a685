//! Physical constants and numerical floors used by the field evaluator.
//!
//! ## Accuracy
//!
//! ε₀ is provided with 11 significant figures (CODATA 2018), which is far beyond the accuracy of a
//! point-sampled charge distribution. The Coulomb constant is derived from it rather than stored
//! as a rounded literal such as `8.99e9`.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>
//! - CODATA 2018 values published May 20, 2019 (following 2019 SI redefinition)

use std::f64::consts::PI;

use crate::math::Scalar;

/// Vacuum permittivity ε₀ in farads per meter (F/m).
/// Approximate value: 8.8541878128 × 10⁻¹² F/m (11 significant figures).
pub const VACUUM_PERMITTIVITY: Scalar = 8.854_187_812_8e-12;

/// Coulomb constant k = 1 / (4π ε₀) in N·m²/C².
pub const COULOMB_CONSTANT: Scalar = 1.0 / (4.0 * PI * VACUUM_PERMITTIVITY);

/// Squared distance (m²) substituted for `r²` when an observation point coincides exactly with a
/// charge sample, or lies exactly on an infinite line charge.
///
/// The substitution keeps every sampled value finite. For a coincident point charge the field
/// contribution is the zero vector (the displacement itself is zero) and the potential
/// contribution is capped at `k·q / 1e-10`.
pub const SINGULARITY_FLOOR_SQUARED: Scalar = 1.0e-20;

/// Returns the Coulomb constant k = 1 / (4π ε₀).
#[inline]
#[must_use]
pub fn coulomb_constant() -> Scalar {
    COULOMB_CONSTANT
}

/// Replaces an exactly-zero squared distance by [`SINGULARITY_FLOOR_SQUARED`].
#[inline]
#[must_use]
pub(crate) fn floored_distance_squared(r2: Scalar) -> Scalar {
    if r2 == 0.0 {
        log::trace!("observation point coincides with a source, applying singularity floor");
        SINGULARITY_FLOOR_SQUARED
    } else {
        r2
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn coulomb_constant_matches_reference() {
        assert_relative_eq!(coulomb_constant(), 8.987_551_792_3e9, max_relative = 1.0e-9);
    }

    #[test]
    fn floor_only_applies_to_exact_zero() {
        assert_eq!(floored_distance_squared(0.0), SINGULARITY_FLOOR_SQUARED);
        assert_eq!(floored_distance_squared(1.0e-30), 1.0e-30);
        assert_eq!(floored_distance_squared(4.0), 4.0);
    }
}
