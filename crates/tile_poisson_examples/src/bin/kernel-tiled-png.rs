use glam::Vec2;
use tile_poisson::prelude::*;
use tile_poisson_examples::{render_unit_points_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    let mut kernel = vec![Vec2::ZERO; 512];
    let count = PoissonSquare::new(30)
        .with_seed(7)
        .sample(&mut kernel)?;

    let config = RenderConfig::new((400, 400))
        .with_tiles(2, 2)
        .with_point_style([20, 60, 160], 3)
        .with_tile_borders([200, 80, 80]);

    let out = "kernel-tiled-png.png";
    render_unit_points_to_png(&kernel[..count], &config, out)?;
    println!("wrote {count} points as a 2x2 tiling to {out}");
    Ok(())
}
