//! Convenience re-exports for building electrostatics experiments.

pub use crate::charges::{discretize_all, Charge, Distribution, InfiniteLineCharge};
pub use crate::constants::*;
pub use crate::errors::{FieldError, FieldResult};
pub use crate::fields::{
    electric_field, electric_field_from_lines, electric_potential, evaluate_distributions,
    field_and_potential, field_at, potential_at, FieldMap,
};
pub use crate::grid::{linspace, AxisRange, Grid, GridConfig};
pub use crate::io::{write_field_csv, write_vtk_polydata};
pub use crate::math::{Dimension, Position, Scalar, R2, R3};
pub use crate::scene::{Scene, SceneItem, DEFAULT_PICK_RADIUS};
