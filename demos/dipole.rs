use std::io;

use charge_fields::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Dipole: +1 C at the origin, -1 C one meter along x.
    let dipole = [
        Distribution::point(Position::planar(0.0, 0.0), 1.0),
        Distribution::point(Position::planar(1.0, 0.0), -1.0),
    ];
    let grid = GridConfig::planar(-2.0, 3.0, -2.0, 2.0, 71).build()?;
    let map = evaluate_distributions(&dipole, grid.points())?;

    write_field_csv(io::stdout().lock(), grid.points(), &map)?;
    Ok(())
}
