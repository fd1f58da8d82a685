use crate::math::{Dimension, Position, Scalar};

/// One discretized charge element: a point-like sample at `position` carrying `magnitude`
/// coulombs.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charge {
    position: Position,
    magnitude: Scalar,
}

impl Charge {
    /// Creates a charge sample. Magnitude may be zero or of either sign.
    #[must_use]
    pub const fn new(position: Position, magnitude: Scalar) -> Self {
        Self { position, magnitude }
    }

    /// Position of the sample.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Signed charge in coulombs.
    #[must_use]
    pub const fn magnitude(&self) -> Scalar {
        self.magnitude
    }

    /// Dimensionality of the sample's position.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.position.dimension()
    }

    /// Returns a copy with the magnitude multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: Scalar) -> Self {
        Self::new(self.position, self.magnitude * factor)
    }
}
