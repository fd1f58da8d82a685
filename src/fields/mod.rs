//! Field and potential evaluation by direct superposition.

mod electrostatic;
mod infinite_line;
mod map;

pub use electrostatic::{
    electric_field, electric_potential, evaluate_distributions, field_and_potential, field_at,
    potential_at,
};
pub use infinite_line::electric_field_from_lines;
pub use map::FieldMap;
