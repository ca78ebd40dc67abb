use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tile_poisson::prelude::*;

fn main() -> anyhow::Result<()> {
    let capacity = 1024;
    let config = PoissonSquare::new(30);
    let mut kernel = vec![Vec2::ZERO; capacity];
    let mut rng = StdRng::seed_from_u64(42);

    let report = config.sample_with_rng(&mut kernel, &mut rng)?;
    let points = &kernel[..report.count];

    let mut nearest = f32::MAX;
    for (i, &p) in points.iter().enumerate() {
        for &q in &points[i + 1..] {
            nearest = nearest.min(toroidal_distance_squared(p, q));
        }
    }

    println!("kernel capacity:    {capacity}");
    println!("points placed:      {}", report.count);
    println!("min_dist:           {:.5}", report.min_dist);
    println!("closest pair:       {:.5}", nearest.sqrt());
    println!("grid side:          {}", report.grid_side);
    println!("rounds:             {}", report.rounds);
    println!(
        "probes rejected:    {} / {}",
        report.probes_rejected, report.probes_evaluated
    );
    println!("exhausted points:   {}", report.exhausted);
    Ok(())
}
