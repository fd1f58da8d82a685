use std::io;

use charge_fields::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Two concentric rings of opposite charge, each sampled 128 times.
    let grid = GridConfig::planar(-3.0, 3.0, -3.0, 3.0, 128).build()?;
    let mut scene = Scene::new(grid);
    scene.add(Distribution::circle(Position::planar(0.0, 0.0), 1.0, 1.0, 128))?;
    scene.add(Distribution::circle(Position::planar(0.0, 0.0), 2.0, -1.0, 128))?;

    let map = scene.evaluate()?;
    log::info!(
        "peak |E| = {:.3e} V/m",
        map.field_magnitudes().into_iter().fold(0.0, Scalar::max)
    );
    write_field_csv(io::stdout().lock(), scene.grid().points(), &map)?;
    Ok(())
}
