//! Regular rectangular observation grids.
//!
//! A [`Grid`] is built once from a [`GridConfig`] and can be reused across any number of charge
//! configurations; only the evaluation has to be repeated after an edit.

use crate::errors::{FieldError, FieldResult};
use crate::math::{Dimension, Position, Scalar, R2, R3};

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Bounds and sample count of one grid axis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    /// Lower bound.
    pub min: Scalar,
    /// Upper bound.
    pub max: Scalar,
    /// Number of samples, both bounds included.
    pub count: usize,
}

impl AxisRange {
    /// Creates an axis range.
    #[must_use]
    pub const fn new(min: Scalar, max: Scalar, count: usize) -> Self {
        Self { min, max, count }
    }

    fn validate(&self, axis: &str) -> FieldResult<()> {
        if self.count < 1 {
            return Err(FieldError::InvalidSampling(format!(
                "{axis} axis needs at least 1 point"
            )));
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(FieldError::InvalidGeometry(format!(
                "{axis} axis bounds must be finite"
            )));
        }
        if self.min > self.max {
            return Err(FieldError::InvalidGeometry(format!(
                "{axis} axis min {} exceeds max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    fn samples(&self) -> Vec<Scalar> {
        linspace(self.min, self.max, self.count)
    }
}

/// Grid knobs exposed to callers: bounds per axis and a shared point count.
///
/// `z` is `None` for a planar grid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Lower x bound.
    pub x_min: Scalar,
    /// Upper x bound.
    pub x_max: Scalar,
    /// Lower y bound.
    pub y_min: Scalar,
    /// Upper y bound.
    pub y_max: Scalar,
    /// Optional `(z_min, z_max)` for spatial grids.
    pub z: Option<(Scalar, Scalar)>,
    /// Points along every axis.
    pub points_per_axis: usize,
}

impl GridConfig {
    /// Planar grid configuration.
    #[must_use]
    pub const fn planar(
        x_min: Scalar,
        x_max: Scalar,
        y_min: Scalar,
        y_max: Scalar,
        points_per_axis: usize,
    ) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            z: None,
            points_per_axis,
        }
    }

    /// Spatial grid configuration.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn spatial(
        x_min: Scalar,
        x_max: Scalar,
        y_min: Scalar,
        y_max: Scalar,
        z_min: Scalar,
        z_max: Scalar,
        points_per_axis: usize,
    ) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            z: Some((z_min, z_max)),
            points_per_axis,
        }
    }

    /// Dimensionality of the grid this configuration builds.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        match self.z {
            Some(_) => Dimension::Spatial,
            None => Dimension::Planar,
        }
    }

    fn axes(&self) -> (AxisRange, AxisRange, Option<AxisRange>) {
        let n = self.points_per_axis;
        (
            AxisRange::new(self.x_min, self.x_max, n),
            AxisRange::new(self.y_min, self.y_max, n),
            self.z.map(|(lo, hi)| AxisRange::new(lo, hi, n)),
        )
    }

    /// Checks counts and bounds without building the grid.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidSampling`] for zero points per axis; [`FieldError::InvalidGeometry`]
    /// for non-finite or inverted bounds.
    pub fn validate(&self) -> FieldResult<()> {
        let (x, y, z) = self.axes();
        x.validate("x")?;
        y.validate("y")?;
        if let Some(z) = z {
            z.validate("z")?;
        }
        Ok(())
    }

    /// Builds the grid.
    ///
    /// # Errors
    ///
    /// See [`GridConfig::validate`].
    pub fn build(&self) -> FieldResult<Grid> {
        let (x, y, z) = self.axes();
        match z {
            Some(z) => Grid::spatial(x, y, z),
            None => Grid::planar(x, y),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::planar(-5.0, 5.0, -5.0, 5.0, 20)
    }
}

/// Cartesian product of evenly spaced axis samples.
///
/// Points are ordered with x varying fastest, then y, then z. Serialized grids carry only their
/// axis samples; the points are rebuilt on deserialization.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridAxes", into = "GridAxes")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    xs: Vec<Scalar>,
    ys: Vec<Scalar>,
    zs: Option<Vec<Scalar>>,
    points: Vec<Position>,
}

impl Grid {
    /// Planar grid over the given axes.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidSampling`] or [`FieldError::InvalidGeometry`] for a bad axis, or
    /// [`FieldError::InvalidSampling`] when the point count overflows `usize`.
    pub fn planar(x: AxisRange, y: AxisRange) -> FieldResult<Self> {
        x.validate("x")?;
        y.validate("y")?;
        Self::from_axes(x.samples(), y.samples(), None)
    }

    /// Spatial grid over the given axes.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidSampling`] or [`FieldError::InvalidGeometry`] for a bad axis, or
    /// [`FieldError::InvalidSampling`] when the point count overflows `usize`.
    pub fn spatial(x: AxisRange, y: AxisRange, z: AxisRange) -> FieldResult<Self> {
        x.validate("x")?;
        y.validate("y")?;
        z.validate("z")?;
        Self::from_axes(x.samples(), y.samples(), Some(z.samples()))
    }

    fn from_axes(xs: Vec<Scalar>, ys: Vec<Scalar>, zs: Option<Vec<Scalar>>) -> FieldResult<Self> {
        let nz = zs.as_ref().map_or(1, Vec::len);
        let count = xs
            .len()
            .checked_mul(ys.len())
            .and_then(|n| n.checked_mul(nz))
            .ok_or_else(|| {
                FieldError::InvalidSampling(format!(
                    "{} x {} x {nz} grid overflows usize",
                    xs.len(),
                    ys.len()
                ))
            })?;
        let mut points = Vec::with_capacity(count);
        match &zs {
            Some(zs) => {
                for &zv in zs {
                    for &yv in &ys {
                        for &xv in &xs {
                            points.push(Position::Spatial(R3::new(xv, yv, zv)));
                        }
                    }
                }
                log::debug!("built {}x{}x{} spatial grid", xs.len(), ys.len(), zs.len());
            }
            None => {
                for &yv in &ys {
                    for &xv in &xs {
                        points.push(Position::Planar(R2::new(xv, yv)));
                    }
                }
                log::debug!("built {}x{} planar grid", xs.len(), ys.len());
            }
        }
        Ok(Self { xs, ys, zs, points })
    }

    /// Dimensionality of the grid points.
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        if self.zs.is_some() {
            Dimension::Spatial
        } else {
            Dimension::Planar
        }
    }

    /// Observation points in grid order.
    #[must_use]
    pub fn points(&self) -> &[Position] {
        &self.points
    }

    /// Samples along x.
    #[must_use]
    pub fn xs(&self) -> &[Scalar] {
        &self.xs
    }

    /// Samples along y.
    #[must_use]
    pub fn ys(&self) -> &[Scalar] {
        &self.ys
    }

    /// Samples along z, for spatial grids.
    #[must_use]
    pub fn zs(&self) -> Option<&[Scalar]> {
        self.zs.as_deref()
    }

    /// `(nx, ny, nz)`; `nz` is 1 for planar grids.
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        (
            self.xs.len(),
            self.ys.len(),
            self.zs.as_ref().map_or(1, Vec::len),
        )
    }

    /// Flat index of grid node `(ix, iy, iz)`, or `None` when out of range.
    #[must_use]
    pub fn index(&self, ix: usize, iy: usize, iz: usize) -> Option<usize> {
        let (nx, ny, nz) = self.shape();
        (ix < nx && iy < ny && iz < nz).then(|| (iz * ny + iy) * nx + ix)
    }

    /// Total number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the grid has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Serialized form of [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridAxes {
    xs: Vec<Scalar>,
    ys: Vec<Scalar>,
    zs: Option<Vec<Scalar>>,
}

#[cfg(feature = "serde")]
impl From<Grid> for GridAxes {
    fn from(grid: Grid) -> Self {
        Self {
            xs: grid.xs,
            ys: grid.ys,
            zs: grid.zs,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GridAxes> for Grid {
    type Error = FieldError;

    fn try_from(axes: GridAxes) -> FieldResult<Self> {
        let named = [("x", Some(&axes.xs)), ("y", Some(&axes.ys)), ("z", axes.zs.as_ref())];
        for (axis, samples) in named {
            let Some(samples) = samples else {
                continue;
            };
            if samples.is_empty() {
                return Err(FieldError::InvalidSampling(format!(
                    "{axis} axis needs at least 1 point"
                )));
            }
            if samples.iter().any(|v| !v.is_finite()) || samples.windows(2).any(|w| w[0] > w[1]) {
                return Err(FieldError::InvalidGeometry(format!(
                    "{axis} axis samples must be finite and ascending"
                )));
            }
        }
        Self::from_axes(axes.xs, axes.ys, axes.zs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_basic() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(2.0, 3.0, 0).is_empty());
    }

    #[test]
    fn planar_grid_orders_x_fastest() {
        let grid = GridConfig::planar(0.0, 1.0, -1.0, 1.0, 3).build().unwrap();
        assert_eq!(grid.dimension(), Dimension::Planar);
        assert_eq!(grid.shape(), (3, 3, 1));
        assert_eq!(grid.len(), 9);
        assert_eq!(grid.points()[1], Position::planar(0.5, -1.0));
        assert_eq!(grid.points()[3], Position::planar(0.0, 0.0));
        assert_eq!(grid.index(2, 2, 0), Some(8));
        assert_eq!(grid.index(3, 0, 0), None);
        assert!(grid.zs().is_none());
    }

    #[test]
    fn spatial_grid_covers_all_nodes() {
        let grid = GridConfig::spatial(-1.0, 1.0, -1.0, 1.0, 0.0, 2.0, 2)
            .build()
            .unwrap();
        assert_eq!(grid.dimension(), Dimension::Spatial);
        assert_eq!(grid.shape(), (2, 2, 2));
        let idx = grid.index(1, 0, 1).unwrap();
        assert_eq!(grid.points()[idx], Position::spatial(1.0, -1.0, 2.0));
        assert_eq!(grid.zs(), Some(&[0.0, 2.0][..]));
    }

    #[test]
    fn mixed_axis_counts_are_supported() {
        let grid =
            Grid::planar(AxisRange::new(0.0, 4.0, 5), AxisRange::new(0.0, 1.0, 2)).unwrap();
        assert_eq!(grid.shape(), (5, 2, 1));
        assert_eq!(
            grid.points()[grid.index(4, 1, 0).unwrap()],
            Position::planar(4.0, 1.0)
        );
    }

    #[test]
    fn overflowing_point_count_is_rejected() {
        let axis = AxisRange::new(0.0, 1.0, 1 << 22);
        let err = Grid::spatial(axis, axis, axis).unwrap_err();
        assert!(matches!(err, FieldError::InvalidSampling(_)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_grid_rebuilds_points() {
        let grid = GridConfig::planar(0.0, 1.0, -1.0, 1.0, 3).build().unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert!(!json.contains("points"));
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);

        let spatial: Grid =
            serde_json::from_str(r#"{"xs":[0.0,1.0],"ys":[2.0],"zs":[-1.0,0.0,1.0]}"#).unwrap();
        assert_eq!(spatial.len(), 6);
        assert_eq!(spatial.points()[5], Position::spatial(1.0, 2.0, 1.0));

        for bad in [
            r#"{"xs":[],"ys":[0.0],"zs":null}"#,
            r#"{"xs":[1.0,0.0],"ys":[0.0],"zs":null}"#,
            r#"{"xs":[0.0],"ys":[0.0],"zs":[]}"#,
        ] {
            assert!(serde_json::from_str::<Grid>(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert!(matches!(
            GridConfig::planar(0.0, 1.0, 0.0, 1.0, 0).build(),
            Err(FieldError::InvalidSampling(_))
        ));
        assert!(matches!(
            GridConfig::planar(1.0, 0.0, 0.0, 1.0, 4).validate(),
            Err(FieldError::InvalidGeometry(_))
        ));
        assert!(matches!(
            GridConfig::spatial(0.0, 1.0, 0.0, 1.0, Scalar::NAN, 1.0, 4).build(),
            Err(FieldError::InvalidGeometry(_))
        ));
        assert!(GridConfig::default().validate().is_ok());
    }
}
