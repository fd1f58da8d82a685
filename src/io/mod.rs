//! I/O helpers for exporting sampled fields to plotting and visualization tools.

pub mod csv;
pub mod vtk;

pub use csv::write_field_csv;
pub use vtk::write_vtk_polydata;

use std::io;

use crate::fields::FieldMap;
use crate::math::Position;

fn ensure_same_len(points: &[Position], map: &FieldMap) -> io::Result<()> {
    if points.len() != map.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} points but {} field samples", points.len(), map.len()),
        ));
    }
    Ok(())
}
