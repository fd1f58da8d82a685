//! CSV export of sampled fields.

use std::io::{self, Write};

use crate::fields::FieldMap;
use crate::math::Position;

use super::ensure_same_len;

/// Writes one row per observation point: `x,y,z,ex,ey,ez,v`.
///
/// Planar points are written with `z = 0`.
pub fn write_field_csv<W: Write>(mut w: W, points: &[Position], map: &FieldMap) -> io::Result<()> {
    ensure_same_len(points, map)?;
    writeln!(w, "x,y,z,ex,ey,ez,v")?;
    for ((p, e), v) in points.iter().zip(map.field()).zip(map.potential()) {
        let p = p.to_spatial();
        writeln!(
            w,
            "{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e}",
            p.x, p.y, p.z, e.x, e.y, e.z, v
        )?;
    }
    Ok(())
}
