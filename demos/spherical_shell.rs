use std::io;

use charge_fields::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let shell =
        Distribution::spherical_shell(Position::spatial(0.0, 0.0, 0.0), 1.0, 1.0e-12, 50, 30);
    let charges = shell.discretize()?;
    let sampled: Scalar = charges.iter().map(Charge::magnitude).sum();
    log::info!(
        "{} samples carry {:.6e} C of {:.6e} C declared",
        charges.len(),
        sampled,
        shell.total_charge()
    );

    let grid = GridConfig::spatial(-2.0, 2.0, -2.0, 2.0, -2.0, 2.0, 10).build()?;
    let map = field_and_potential(&charges, grid.points())?;
    write_vtk_polydata(io::stdout().lock(), "spherical shell", grid.points(), &map)?;
    Ok(())
}
