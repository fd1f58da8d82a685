use charge_fields::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let grid = GridConfig::planar(-2.0, 2.0, -2.0, 2.0, 41).build()?;
    let mut scene = Scene::new(grid);
    let along_x = Position::planar(1.0, 0.0);
    scene.add(InfiniteLineCharge::new(Position::planar(0.0, 0.5), along_x, 1.0e-9)?)?;
    scene.add(InfiniteLineCharge::new(Position::planar(0.0, -0.5), along_x, -1.0e-9)?)?;
    scene.add(Distribution::point(Position::planar(1.0, 1.0), 1.0e-10))?;

    if let Err(err) = scene.evaluate() {
        log::warn!("{err}; sampling the field only");
    }
    let field = scene.evaluate_field()?;

    println!("x,y,ex,ey");
    for (p, e) in scene.grid().points().iter().zip(&field) {
        let p = p.to_spatial();
        println!("{:.6e},{:.6e},{:.6e},{:.6e}", p.x, p.y, e.x, e.y);
    }
    Ok(())
}
