use std::f64::consts::PI;

use crate::errors::{FieldError, FieldResult};
use crate::math::{Dimension, Position, Scalar, R3};

use super::Charge;

/// Declarative description of a charge distribution.
///
/// Each variant is turned into an ordered sequence of [`Charge`] samples by
/// [`Distribution::discretize`]. Emission order is deterministic so that repeated evaluations sum
/// contributions in the same order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Distribution {
    /// Single point charge.
    Point {
        /// Location of the charge.
        position: Position,
        /// Charge in coulombs.
        magnitude: Scalar,
    },
    /// Uniformly charged straight segment from `endpoint_a` to `endpoint_b`.
    Segment {
        /// First endpoint.
        endpoint_a: Position,
        /// Second endpoint; must share the dimensionality of `endpoint_a`.
        endpoint_b: Position,
        /// Total charge spread along the segment in coulombs.
        total_charge: Scalar,
        /// Number of point samples.
        sample_count: usize,
    },
    /// Uniformly charged circle (ring). A spatial center places the ring in the plane parallel to
    /// `xy` through the center.
    Circle {
        /// Center of the circle.
        center: Position,
        /// Radius in meters.
        radius: Scalar,
        /// Total charge spread around the circle in coulombs.
        total_charge: Scalar,
        /// Number of point samples.
        sample_count: usize,
    },
    /// Spherical shell of uniform surface charge density.
    SphericalShell {
        /// Center of the shell; must be spatial.
        center: Position,
        /// Radius in meters.
        radius: Scalar,
        /// Surface charge density σ in C/m².
        surface_density: Scalar,
        /// Samples of the azimuthal angle θ over `[0, 2π)`.
        theta_samples: usize,
        /// Samples of the polar angle φ over `[0, π]`.
        phi_samples: usize,
    },
}

impl Distribution {
    /// Point charge descriptor.
    #[must_use]
    pub const fn point(position: Position, magnitude: Scalar) -> Self {
        Self::Point { position, magnitude }
    }

    /// Segment descriptor carrying `total_charge` over `sample_count` samples.
    #[must_use]
    pub const fn segment(
        endpoint_a: Position,
        endpoint_b: Position,
        total_charge: Scalar,
        sample_count: usize,
    ) -> Self {
        Self::Segment {
            endpoint_a,
            endpoint_b,
            total_charge,
            sample_count,
        }
    }

    /// Segment descriptor defined by its linear charge density λ (C/m); the total charge is
    /// `λ · |b − a|`.
    pub fn segment_with_density(
        endpoint_a: Position,
        endpoint_b: Position,
        linear_density: Scalar,
        sample_count: usize,
    ) -> FieldResult<Self> {
        let length = endpoint_a.distance_to(&endpoint_b).ok_or_else(|| {
            FieldError::InvalidGeometry(format!(
                "segment endpoints mix {} and {} coordinates",
                endpoint_a.dimension(),
                endpoint_b.dimension()
            ))
        })?;
        Ok(Self::segment(
            endpoint_a,
            endpoint_b,
            linear_density * length,
            sample_count,
        ))
    }

    /// Circle descriptor carrying `total_charge` over `sample_count` samples.
    #[must_use]
    pub const fn circle(
        center: Position,
        radius: Scalar,
        total_charge: Scalar,
        sample_count: usize,
    ) -> Self {
        Self::Circle {
            center,
            radius,
            total_charge,
            sample_count,
        }
    }

    /// Alias of [`Distribution::circle`], reading better for rings placed in space.
    #[must_use]
    pub const fn ring(
        center: Position,
        radius: Scalar,
        total_charge: Scalar,
        sample_count: usize,
    ) -> Self {
        Self::circle(center, radius, total_charge, sample_count)
    }

    /// Spherical shell descriptor of uniform surface density σ.
    #[must_use]
    pub const fn spherical_shell(
        center: Position,
        radius: Scalar,
        surface_density: Scalar,
        theta_samples: usize,
        phi_samples: usize,
    ) -> Self {
        Self::SphericalShell {
            center,
            radius,
            surface_density,
            theta_samples,
            phi_samples,
        }
    }

    /// Dimensionality of the charges this descriptor emits.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        match self {
            Self::Point { position, .. } => position.dimension(),
            Self::Segment { endpoint_a, .. } => endpoint_a.dimension(),
            Self::Circle { center, .. } => center.dimension(),
            Self::SphericalShell { .. } => Dimension::Spatial,
        }
    }

    /// Declared total charge. For the shell this is the exact `σ · 4πr²`, which the discretized
    /// samples only approximate.
    #[must_use]
    pub fn total_charge(&self) -> Scalar {
        match self {
            Self::Point { magnitude, .. } => *magnitude,
            Self::Segment { total_charge, .. } | Self::Circle { total_charge, .. } => *total_charge,
            Self::SphericalShell {
                radius,
                surface_density,
                ..
            } => surface_density * 4.0 * PI * radius * radius,
        }
    }

    /// Number of samples [`Distribution::discretize`] emits, or `None` if it does not fit in a
    /// `usize`.
    #[must_use]
    pub const fn sample_count(&self) -> Option<usize> {
        match self {
            Self::Point { .. } => Some(1),
            Self::Segment { sample_count, .. } | Self::Circle { sample_count, .. } => {
                Some(*sample_count)
            }
            Self::SphericalShell {
                theta_samples,
                phi_samples,
                ..
            } => (*theta_samples).checked_mul(*phi_samples),
        }
    }

    /// Discretizes the descriptor into an ordered sequence of point-like charge samples.
    ///
    /// # Errors
    ///
    /// - [`FieldError::InvalidSampling`] when a sample count is zero.
    /// - [`FieldError::InvalidGeometry`] for non-finite coordinates, a non-positive radius,
    ///   segment endpoints of different dimensionality, or a planar shell center.
    /// - [`FieldError::InvalidMagnitude`] for a non-finite charge or density.
    pub fn discretize(&self) -> FieldResult<Vec<Charge>> {
        let charges = match *self {
            Self::Point {
                position,
                magnitude,
            } => {
                ensure_finite_position(&position, "point position")?;
                ensure_finite_magnitude(magnitude, "point magnitude")?;
                vec![Charge::new(position, magnitude)]
            }
            Self::Segment {
                endpoint_a,
                endpoint_b,
                total_charge,
                sample_count,
            } => discretize_segment(endpoint_a, endpoint_b, total_charge, sample_count)?,
            Self::Circle {
                center,
                radius,
                total_charge,
                sample_count,
            } => discretize_circle(center, radius, total_charge, sample_count)?,
            Self::SphericalShell {
                center,
                radius,
                surface_density,
                theta_samples,
                phi_samples,
            } => discretize_shell(center, radius, surface_density, theta_samples, phi_samples)?,
        };
        log::debug!(
            "discretized {} distribution into {} charge samples",
            self.kind_name(),
            charges.len()
        );
        Ok(charges)
    }

    const fn kind_name(&self) -> &'static str {
        match self {
            Self::Point { .. } => "point",
            Self::Segment { .. } => "segment",
            Self::Circle { .. } => "circle",
            Self::SphericalShell { .. } => "spherical shell",
        }
    }
}

/// Discretizes every descriptor and concatenates the samples in descriptor order.
///
/// Fails on the first invalid descriptor; no partial output is returned.
pub fn discretize_all(distributions: &[Distribution]) -> FieldResult<Vec<Charge>> {
    let total = distributions
        .iter()
        .try_fold(0_usize, |acc, d| acc.checked_add(d.sample_count()?))
        .ok_or_else(|| {
            FieldError::InvalidSampling("total sample count overflows usize".into())
        })?;
    let mut charges = Vec::with_capacity(total);
    for distribution in distributions {
        charges.extend(distribution.discretize()?);
    }
    Ok(charges)
}

fn discretize_segment(
    a: Position,
    b: Position,
    total_charge: Scalar,
    n: usize,
) -> FieldResult<Vec<Charge>> {
    ensure_samples(n, "segment sample_count")?;
    ensure_finite_position(&a, "segment endpoint_a")?;
    ensure_finite_position(&b, "segment endpoint_b")?;
    ensure_finite_magnitude(total_charge, "segment total_charge")?;
    let dimension = a.dimension();
    if b.dimension() != dimension {
        return Err(FieldError::InvalidGeometry(format!(
            "segment endpoints mix {} and {} coordinates",
            dimension,
            b.dimension()
        )));
    }

    let (a, b) = (a.to_spatial(), b.to_spatial());
    let dq = total_charge / n as Scalar;
    let charges = (0..n)
        .map(|i| {
            let t = if n == 1 {
                0.5
            } else {
                i as Scalar / (n - 1) as Scalar
            };
            let p = a * (1.0 - t) + b * t;
            Charge::new(Position::from_spatial(p, dimension), dq)
        })
        .collect();
    Ok(charges)
}

fn discretize_circle(
    center: Position,
    radius: Scalar,
    total_charge: Scalar,
    n: usize,
) -> FieldResult<Vec<Charge>> {
    ensure_samples(n, "circle sample_count")?;
    ensure_finite_position(&center, "circle center")?;
    ensure_radius(radius, "circle radius")?;
    ensure_finite_magnitude(total_charge, "circle total_charge")?;

    let dimension = center.dimension();
    let c = center.to_spatial();
    let dq = total_charge / n as Scalar;
    let charges = (0..n)
        .map(|i| {
            let theta = 2.0 * PI * i as Scalar / n as Scalar;
            let p = c + R3::new(radius * theta.cos(), radius * theta.sin(), 0.0);
            Charge::new(Position::from_spatial(p, dimension), dq)
        })
        .collect();
    Ok(charges)
}

// Polar angles use the midpoint rule, φ_k = (k + ½)·Δφ, so every sample carries weight and a
// single polar sample is the equatorial ring.
fn discretize_shell(
    center: Position,
    radius: Scalar,
    sigma: Scalar,
    n_theta: usize,
    n_phi: usize,
) -> FieldResult<Vec<Charge>> {
    ensure_samples(n_theta, "shell theta_samples")?;
    ensure_samples(n_phi, "shell phi_samples")?;
    ensure_finite_position(&center, "shell center")?;
    ensure_radius(radius, "shell radius")?;
    ensure_finite_magnitude(sigma, "shell surface_density")?;
    let Position::Spatial(c) = center else {
        return Err(FieldError::InvalidGeometry(
            "spherical shell requires a 3D center".into(),
        ));
    };

    let count = n_theta.checked_mul(n_phi).ok_or_else(|| {
        FieldError::InvalidSampling(format!(
            "shell sampling {n_theta} x {n_phi} overflows usize"
        ))
    })?;

    let d_theta = 2.0 * PI / n_theta as Scalar;
    let d_phi = PI / n_phi as Scalar;
    let mut charges = Vec::with_capacity(count);
    for j in 0..n_theta {
        let theta = j as Scalar * d_theta;
        let (sin_t, cos_t) = theta.sin_cos();
        for k in 0..n_phi {
            let phi = (k as Scalar + 0.5) * d_phi;
            let (sin_p, cos_p) = phi.sin_cos();
            let p = c + R3::new(sin_p * cos_t, sin_p * sin_t, cos_p) * radius;
            let dq = sigma * radius * radius * sin_p * d_phi * d_theta;
            charges.push(Charge::new(Position::Spatial(p), dq));
        }
    }
    Ok(charges)
}

fn ensure_samples(n: usize, what: &str) -> FieldResult<()> {
    if n < 1 {
        return Err(FieldError::InvalidSampling(format!("{what} must be at least 1")));
    }
    Ok(())
}

fn ensure_finite_position(p: &Position, what: &str) -> FieldResult<()> {
    if !p.is_finite() {
        return Err(FieldError::InvalidGeometry(format!("{what} has non-finite coordinates")));
    }
    Ok(())
}

fn ensure_radius(radius: Scalar, what: &str) -> FieldResult<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(FieldError::InvalidGeometry(format!(
            "{what} must be finite and positive, got {radius}"
        )));
    }
    Ok(())
}

fn ensure_finite_magnitude(value: Scalar, what: &str) -> FieldResult<()> {
    if !value.is_finite() {
        return Err(FieldError::InvalidMagnitude(format!("{what} is not finite")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn total(charges: &[Charge]) -> Scalar {
        charges.iter().map(Charge::magnitude).sum()
    }

    #[test]
    fn point_discretizes_to_itself() {
        let d = Distribution::point(Position::planar(0.5, -1.0), 2.0e-9);
        let charges = d.discretize().unwrap();
        assert_eq!(charges, vec![Charge::new(Position::planar(0.5, -1.0), 2.0e-9)]);
    }

    #[test]
    fn segment_samples_span_both_endpoints() {
        let d =
            Distribution::segment(Position::planar(0.0, 0.0), Position::planar(1.0, 2.0), 1.0, 5);
        let charges = d.discretize().unwrap();
        assert_eq!(charges.len(), 5);
        assert_eq!(charges[0].position(), Position::planar(0.0, 0.0));
        assert_eq!(charges[4].position(), Position::planar(1.0, 2.0));
        assert_eq!(charges[2].position(), Position::planar(0.5, 1.0));
        for q in &charges {
            assert_relative_eq!(q.magnitude(), 0.2, epsilon = 1.0e-15);
        }
        assert_relative_eq!(total(&charges), 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn single_sample_segment_sits_at_midpoint() {
        let d = Distribution::segment(
            Position::spatial(0.0, 0.0, 0.0),
            Position::spatial(2.0, 0.0, 4.0),
            -3.0,
            1,
        );
        let charges = d.discretize().unwrap();
        assert_eq!(charges, vec![Charge::new(Position::spatial(1.0, 0.0, 2.0), -3.0)]);
    }

    #[test]
    fn segment_from_density_uses_length() {
        let d = Distribution::segment_with_density(
            Position::planar(-1.0, 0.0),
            Position::planar(1.0, 0.0),
            0.5,
            16,
        )
        .unwrap();
        assert_relative_eq!(d.total_charge(), 1.0, epsilon = 1.0e-15);
        assert!(Distribution::segment_with_density(
            Position::planar(0.0, 0.0),
            Position::spatial(1.0, 0.0, 0.0),
            1.0,
            4
        )
        .is_err());
    }

    #[test]
    fn circle_of_128_samples_sits_on_unit_circle() {
        let d = Distribution::circle(Position::planar(0.0, 0.0), 1.0, 1.0, 128);
        let charges = d.discretize().unwrap();
        assert_eq!(charges.len(), 128);
        for (i, q) in charges.iter().enumerate() {
            let theta = 2.0 * PI * i as Scalar / 128.0;
            assert_relative_eq!(q.magnitude(), 1.0 / 128.0, epsilon = 1.0e-18);
            let Position::Planar(p) = q.position() else {
                panic!("expected planar sample");
            };
            assert_relative_eq!(p.x, theta.cos(), epsilon = 1.0e-12);
            assert_relative_eq!(p.y, theta.sin(), epsilon = 1.0e-12);
        }
        assert_relative_eq!(total(&charges), 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn spatial_ring_lies_in_plane_of_center() {
        let d = Distribution::ring(Position::spatial(1.0, 0.0, 2.0), 0.5, -1.0, 8);
        for q in d.discretize().unwrap() {
            let Position::Spatial(p) = q.position() else {
                panic!("expected spatial sample");
            };
            assert_relative_eq!(p.z, 2.0, epsilon = 1.0e-15);
            assert_relative_eq!((p - R3::new(1.0, 0.0, 2.0)).norm(), 0.5, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn shell_magnitudes_follow_polar_weighting() {
        let d = Distribution::spherical_shell(Position::spatial(0.0, 0.0, 0.0), 1.0, 1.0, 4, 3);
        let charges = d.discretize().unwrap();
        assert_eq!(charges.len(), 12);
        // φ = π/6, π/2, 5π/6 for every θ
        let w = (2.0 * PI / 4.0) * (PI / 3.0);
        assert_relative_eq!(charges[0].magnitude(), w * 0.5, epsilon = 1.0e-12);
        assert_relative_eq!(charges[1].magnitude(), w, epsilon = 1.0e-12);
        assert_relative_eq!(charges[2].magnitude(), w * 0.5, epsilon = 1.0e-12);
        for q in &charges {
            assert_relative_eq!(
                q.position().distance_to(&Position::spatial(0.0, 0.0, 0.0)).unwrap(),
                1.0,
                epsilon = 1.0e-12
            );
        }
    }

    #[test]
    fn shell_total_charge_converges() {
        let sigma = 1.0e-12;
        let radius = 1.0;
        let exact = sigma * 4.0 * PI * radius * radius;
        let center = Position::spatial(0.0, 0.0, 0.0);
        let mut previous = Scalar::INFINITY;
        for (n_theta, n_phi) in [(8, 4), (20, 12), (50, 30), (100, 60)] {
            let d = Distribution::spherical_shell(center, radius, sigma, n_theta, n_phi);
            let err = ((total(&d.discretize().unwrap()) - exact) / exact).abs();
            assert!(err < previous, "error {err} did not shrink below {previous}");
            previous = err;
        }
        let coarse = Distribution::spherical_shell(center, radius, sigma, 50, 30);
        let sum = total(&coarse.discretize().unwrap());
        assert_relative_eq!(sum, exact, max_relative = 1.0e-2);
        assert_relative_eq!(coarse.total_charge(), exact, max_relative = 1.0e-15);
    }

    #[test]
    fn zero_samples_are_rejected() {
        let origin = Position::planar(0.0, 0.0);
        let cases = [
            Distribution::segment(origin, Position::planar(1.0, 0.0), 1.0, 0),
            Distribution::circle(origin, 1.0, 1.0, 0),
            Distribution::spherical_shell(Position::spatial(0.0, 0.0, 0.0), 1.0, 1.0, 0, 4),
            Distribution::spherical_shell(Position::spatial(0.0, 0.0, 0.0), 1.0, 1.0, 4, 0),
        ];
        for d in cases {
            assert!(matches!(d.discretize(), Err(FieldError::InvalidSampling(_))), "{d:?}");
        }
    }

    #[test]
    fn overflowing_shell_sampling_is_rejected() {
        let origin = Position::spatial(0.0, 0.0, 0.0);
        let huge = Distribution::spherical_shell(origin, 1.0, 1.0, usize::MAX, 2);
        assert_eq!(huge.sample_count(), None);
        assert!(matches!(huge.discretize(), Err(FieldError::InvalidSampling(_))));
        assert!(matches!(
            discretize_all(&[Distribution::point(origin, 1.0), huge]),
            Err(FieldError::InvalidSampling(_))
        ));

        let halves = [
            Distribution::segment(origin, origin, 1.0, usize::MAX / 2 + 1),
            Distribution::segment(origin, origin, 1.0, usize::MAX / 2 + 1),
        ];
        assert!(matches!(discretize_all(&halves), Err(FieldError::InvalidSampling(_))));
        assert_eq!(
            Distribution::spherical_shell(origin, 1.0, 1.0, 4, 3).sample_count(),
            Some(12)
        );
    }

    #[test]
    fn bad_geometry_is_rejected() {
        let cases = [
            Distribution::point(Position::planar(Scalar::NAN, 0.0), 1.0),
            Distribution::circle(Position::planar(0.0, 0.0), 0.0, 1.0, 8),
            Distribution::circle(Position::planar(0.0, 0.0), -1.0, 1.0, 8),
            Distribution::circle(Position::planar(0.0, 0.0), Scalar::INFINITY, 1.0, 8),
            Distribution::segment(
                Position::planar(0.0, 0.0),
                Position::spatial(0.0, 0.0, 1.0),
                1.0,
                4,
            ),
            Distribution::spherical_shell(Position::planar(0.0, 0.0), 1.0, 1.0, 4, 4),
        ];
        for d in cases {
            assert!(matches!(d.discretize(), Err(FieldError::InvalidGeometry(_))), "{d:?}");
        }
    }

    #[test]
    fn non_finite_charge_is_rejected() {
        let d = Distribution::circle(Position::planar(0.0, 0.0), 1.0, Scalar::NAN, 8);
        assert!(matches!(d.discretize(), Err(FieldError::InvalidMagnitude(_))));
    }

    #[test]
    fn discretize_all_concatenates_in_order() {
        let ds = [
            Distribution::point(Position::planar(0.0, 0.0), 1.0),
            Distribution::circle(Position::planar(0.0, 0.0), 1.0, -1.0, 4),
        ];
        let charges = discretize_all(&ds).unwrap();
        assert_eq!(charges.len(), 5);
        assert_eq!(charges[0].magnitude(), 1.0);
        assert_relative_eq!(total(&charges), 0.0, epsilon = 1.0e-15);

        let bad = [ds[0].clone(), Distribution::circle(Position::planar(0.0, 0.0), 1.0, 1.0, 0)];
        assert!(discretize_all(&bad).is_err());
    }
}
