use crate::errors::{FieldError, FieldResult};
use crate::math::{Dimension, Scalar, R2, R3};

/// Sampled electric field and potential, one entry per observation point in input order.
///
/// Field vectors are always spatial; for planar evaluations the `z` component is zero.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "FieldMapSamples")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMap {
    dimension: Dimension,
    field: Vec<R3>,
    potential: Vec<Scalar>,
}

impl FieldMap {
    pub(crate) fn new(dimension: Dimension, field: Vec<R3>, potential: Vec<Scalar>) -> Self {
        debug_assert_eq!(field.len(), potential.len());
        Self {
            dimension,
            field,
            potential,
        }
    }

    /// Dimensionality of the observation points.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Electric field vectors in V/m.
    #[must_use]
    pub fn field(&self) -> &[R3] {
        &self.field
    }

    /// Electric potential values in volts.
    #[must_use]
    pub fn potential(&self) -> &[Scalar] {
        &self.potential
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.field.len()
    }

    /// True if no samples were evaluated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }

    /// Euclidean norm of each field vector.
    #[must_use]
    pub fn field_magnitudes(&self) -> Vec<Scalar> {
        self.field.iter().map(|e| e.norm()).collect()
    }

    /// Field vectors with the `z` component dropped.
    #[must_use]
    pub fn planar_field(&self) -> Vec<R2> {
        self.field.iter().map(|e| R2::new(e.x, e.y)).collect()
    }

    /// Adds `other` sample by sample.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidGeometry`] when the maps were sampled on different point sets.
    pub fn superpose(&mut self, other: &Self) -> FieldResult<()> {
        if self.dimension != other.dimension || self.len() != other.len() {
            return Err(FieldError::InvalidGeometry(format!(
                "cannot superpose {} samples in {} onto {} samples in {}",
                other.len(),
                other.dimension,
                self.len(),
                self.dimension
            )));
        }
        for (e, o) in self.field.iter_mut().zip(&other.field) {
            *e += o;
        }
        for (v, o) in self.potential.iter_mut().zip(&other.potential) {
            *v += o;
        }
        Ok(())
    }

    /// Returns a copy with every sample multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: Scalar) -> Self {
        Self {
            dimension: self.dimension,
            field: self.field.iter().map(|e| e * factor).collect(),
            potential: self.potential.iter().map(|v| v * factor).collect(),
        }
    }

    /// Consumes the map, returning `(field, potential)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<R3>, Vec<Scalar>) {
        (self.field, self.potential)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct FieldMapSamples {
    dimension: Dimension,
    field: Vec<R3>,
    potential: Vec<Scalar>,
}

#[cfg(feature = "serde")]
impl TryFrom<FieldMapSamples> for FieldMap {
    type Error = FieldError;

    fn try_from(raw: FieldMapSamples) -> FieldResult<Self> {
        if raw.field.len() != raw.potential.len() {
            return Err(FieldError::InvalidGeometry(format!(
                "{} field samples but {} potential samples",
                raw.field.len(),
                raw.potential.len()
            )));
        }
        if raw.dimension == Dimension::Planar && raw.field.iter().any(|e| e.z != 0.0) {
            return Err(FieldError::InvalidGeometry(
                "planar field samples have a z component".into(),
            ));
        }
        Ok(Self::new(raw.dimension, raw.field, raw.potential))
    }
}
