use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tile_poisson::prelude::*;
use tile_poisson_examples::{render_domain_points_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    let domain_extent = Vec2::new(200.0, 100.0);
    let strategy: Box<dyn PositionSampling> =
        Box::new(TilePoissonSampling::new(800).with_num_probes(20));

    let mut rng = StdRng::seed_from_u64(2024);
    let positions: Vec<Vec2> = strategy
        .generate(domain_extent.into(), &mut rng)
        .into_iter()
        .map(Vec2::from)
        .collect();

    let config = RenderConfig::new((800, 400)).with_point_style([40, 120, 40], 3);
    let out = "sampling-domain-scatter.png";
    render_domain_points_to_png(&positions, domain_extent, &config, out)?;
    println!("wrote {} positions to {out}", positions.len());
    Ok(())
}
