//! VTK ASCII export utilities.
//!
//! Writes legacy-format `POLYDATA` files: one vertex per observation point with the potential as
//! point scalars and the electric field as point vectors. ParaView and VisIt read these directly.

use std::io::{self, Write};

use crate::fields::FieldMap;
use crate::math::Position;

use super::ensure_same_len;

/// Writes the VTK ASCII file header.
pub fn write_vtk_header<W: Write>(mut writer: W, title: &str) -> io::Result<()> {
    writeln!(writer, "# vtk DataFile Version 3.0")?;
    // The title line must fit on one line of at most 256 characters.
    let title: String = title.lines().next().unwrap_or_default().chars().take(255).collect();
    writeln!(writer, "{title}")?;
    writeln!(writer, "ASCII")?;
    Ok(())
}

/// Writes sampled field data as a legacy VTK `POLYDATA` dataset.
pub fn write_vtk_polydata<W: Write>(
    mut writer: W,
    title: &str,
    points: &[Position],
    map: &FieldMap,
) -> io::Result<()> {
    ensure_same_len(points, map)?;
    write_vtk_header(&mut writer, title)?;
    let n = points.len();
    writeln!(writer, "DATASET POLYDATA")?;
    writeln!(writer, "POINTS {n} double")?;
    for p in points {
        let p = p.to_spatial();
        writeln!(writer, "{:.16e} {:.16e} {:.16e}", p.x, p.y, p.z)?;
    }
    writeln!(writer, "VERTICES {n} {}", 2 * n)?;
    for i in 0..n {
        writeln!(writer, "1 {i}")?;
    }
    writeln!(writer, "POINT_DATA {n}")?;
    writeln!(writer, "SCALARS potential double 1")?;
    writeln!(writer, "LOOKUP_TABLE default")?;
    for v in map.potential() {
        writeln!(writer, "{v:.16e}")?;
    }
    writeln!(writer, "VECTORS electric_field double")?;
    for e in map.field() {
        writeln!(writer, "{:.16e} {:.16e} {:.16e}", e.x, e.y, e.z)?;
    }
    Ok(())
}
