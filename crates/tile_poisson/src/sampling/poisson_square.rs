//! Tileable Poisson-disk sampling of the unit square into a fixed-capacity kernel.
//!
//! The sampler seeds the kernel with the square's center and grows an active
//! front: each round picks a random active point, casts `num_probes` candidates
//! into the annulus `[min_dist, 2·min_dist)` around it and keeps the nearest
//! one that respects the minimum distance. Active points whose round yields no
//! valid candidate are retired. Sampling stops when the front is empty or the
//! kernel is full.
//!
//! Distances wrap around the square's edges, so the output tiles seamlessly.
use std::f32::consts::{SQRT_2, TAU};

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::kernel::PointBuffer;
use crate::sampling::occupancy::OccupancyGrid;
use crate::sampling::rand01;
use crate::torus::{toroidal_distance_squared, wrap_point};

/// Probe count used by [`PoissonSquare::default`].
pub const DEFAULT_NUM_PROBES: u32 = 30;

/// Fruitless rounds tolerated while only a single point is left to grow from.
pub const DEFAULT_MAX_SEED_ROUNDS: u32 = 64;

/// Minimum distance that roughly packs `n` points into the unit square:
/// `1 / √(n · √2)`.
pub fn default_min_dist(n: usize) -> f32 {
    1.0 / ((n as f32) * SQRT_2).sqrt()
}

/// Fills `buffer` using [`default_min_dist`] for its capacity.
///
/// Returns the number of points written to `buffer[0..count)`.
pub fn poisson_square<B>(buffer: &mut B, num_probes: u32) -> Result<usize>
where
    B: PointBuffer + ?Sized,
{
    PoissonSquare::new(num_probes).sample(buffer)
}

/// Fills `buffer` with points no closer than `min_dist` on the unit torus.
///
/// Returns the number of points written to `buffer[0..count)`.
pub fn poisson_square_with_min_dist<B>(
    buffer: &mut B,
    min_dist: f32,
    num_probes: u32,
) -> Result<usize>
where
    B: PointBuffer + ?Sized,
{
    PoissonSquare::new(num_probes)
        .with_min_dist(min_dist)
        .sample(buffer)
}

/// Configuration for tileable Poisson-disk sampling of the unit square.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PoissonSquare {
    /// Minimum toroidal distance between points. `None` derives it from the
    /// kernel capacity with [`default_min_dist`].
    pub min_dist: Option<f32>,
    /// Candidates cast per round.
    pub num_probes: u32,
    /// Fixed RNG seed for [`PoissonSquare::sample`]. `None` seeds from the
    /// thread-local generator.
    pub seed: Option<u64>,
    /// Fruitless rounds allowed on a lone remaining point before it is retired.
    pub max_seed_rounds: u32,
}

impl Default for PoissonSquare {
    fn default() -> Self {
        Self {
            min_dist: None,
            num_probes: DEFAULT_NUM_PROBES,
            seed: None,
            max_seed_rounds: DEFAULT_MAX_SEED_ROUNDS,
        }
    }
}

/// Counters describing a finished sampling run.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleReport {
    /// Points written to the kernel, seed included.
    pub count: usize,
    /// Minimum distance the run used.
    pub min_dist: f32,
    /// Occupancy grid side length.
    pub grid_side: usize,
    /// Rounds executed (one active point probed per round).
    pub rounds: usize,
    /// Candidates cast over all rounds.
    pub probes_evaluated: usize,
    /// Candidates that violated the minimum distance.
    pub probes_rejected: usize,
    /// Active points retired without producing a candidate.
    pub exhausted: usize,
}

#[derive(Debug, Clone, Copy)]
struct Probe {
    point: Vec2,
    /// Squared toroidal distance to the generating point; `None` if rejected.
    distance_squared: Option<f32>,
}

impl PoissonSquare {
    /// Creates a configuration casting `num_probes` candidates per round.
    pub fn new(num_probes: u32) -> Self {
        Self {
            num_probes,
            ..Default::default()
        }
    }

    /// Sets an explicit minimum distance.
    pub fn with_min_dist(mut self, min_dist: f32) -> Self {
        self.min_dist = Some(min_dist);
        self
    }

    /// Sets the RNG seed used by [`PoissonSquare::sample`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the retry cap for a lone remaining point.
    pub fn with_max_seed_rounds(mut self, max_seed_rounds: u32) -> Self {
        self.max_seed_rounds = max_seed_rounds;
        self
    }

    /// Minimum distance used for a kernel of `capacity` points.
    pub fn resolved_min_dist(&self, capacity: usize) -> f32 {
        self.min_dist
            .unwrap_or_else(|| default_min_dist(capacity.max(1)))
    }

    /// Validates the configuration against a kernel capacity.
    pub fn validate(&self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(Error::EmptyKernel);
        }
        if self.num_probes == 0 {
            return Err(Error::InvalidConfig("num_probes must be >= 1".into()));
        }
        if self.max_seed_rounds == 0 {
            return Err(Error::InvalidConfig("max_seed_rounds must be >= 1".into()));
        }
        let min_dist = self.resolved_min_dist(capacity);
        if !min_dist.is_finite() || min_dist <= 0.0 || min_dist >= 1.0 {
            return Err(Error::InvalidConfig(format!(
                "min_dist must be in (0, 1), got {min_dist}"
            )));
        }
        OccupancyGrid::side_for(min_dist)?;

        Ok(())
    }

    /// Fills `buffer` and returns the number of points written.
    ///
    /// Uses the configured seed, or a nondeterministic one if none is set.
    pub fn sample<B>(&self, buffer: &mut B) -> Result<usize>
    where
        B: PointBuffer + ?Sized,
    {
        let seed = self.seed.unwrap_or_else(|| rand::rng().next_u64());
        let mut rng = StdRng::seed_from_u64(seed);
        self.sample_with_rng(buffer, &mut rng)
            .map(|report| report.count)
    }

    /// Fills `buffer` drawing from `rng`, returning run counters.
    ///
    /// Output is reproducible for a given RNG state.
    pub fn sample_with_rng<B, R>(&self, buffer: &mut B, rng: &mut R) -> Result<SampleReport>
    where
        B: PointBuffer + ?Sized,
        R: RngCore + ?Sized,
    {
        let num_probes = self.num_probes as usize;
        self.run(buffer, rng, |origin, min_dist, grid, kernel, rng, probes| {
            probes.clear();
            probes.extend(
                (0..num_probes).map(|_| cast_probe(origin, min_dist, grid, kernel, &mut *rng)),
            );
        })
    }

    /// Like [`PoissonSquare::sample_with_rng`], but evaluates each round's
    /// candidates on the rayon thread pool.
    ///
    /// Every round draws one seed from `rng` and gives each candidate its own
    /// stream, so output is reproducible for a given RNG state but differs
    /// from the sequential variant.
    #[cfg(feature = "parallel")]
    pub fn sample_par_with_rng<B, R>(&self, buffer: &mut B, rng: &mut R) -> Result<SampleReport>
    where
        B: PointBuffer + Sync + ?Sized,
        R: RngCore + ?Sized,
    {
        use rayon::prelude::*;

        let num_probes = self.num_probes as usize;
        self.run(buffer, rng, |origin, min_dist, grid, kernel, rng, probes| {
            let round_seed = rng.next_u64();
            probes.clear();
            probes.par_extend((0..num_probes).into_par_iter().map(|i| {
                let mut probe_rng = StdRng::seed_from_u64(round_seed ^ stream_offset(i));
                cast_probe(origin, min_dist, grid, kernel, &mut probe_rng)
            }));
        })
    }

    fn run<B, R, F>(&self, buffer: &mut B, rng: &mut R, mut cast: F) -> Result<SampleReport>
    where
        B: PointBuffer + ?Sized,
        R: RngCore + ?Sized,
        F: FnMut(Vec2, f32, &OccupancyGrid, &B, &mut R, &mut Vec<Probe>),
    {
        let capacity = buffer.len();
        self.validate(capacity)?;

        let min_dist = self.resolved_min_dist(capacity);
        let mut grid = OccupancyGrid::try_new(min_dist)?;
        debug!(
            capacity,
            min_dist,
            grid_side = grid.side(),
            num_probes = self.num_probes,
            "Poisson square sampling started."
        );

        let mut report = SampleReport {
            min_dist,
            grid_side: grid.side(),
            ..Default::default()
        };

        let center = Vec2::splat(0.5);
        let mut k = 0;
        buffer.write(k, center);
        grid.mark(center, k);

        let mut active: Vec<usize> = vec![k];
        let mut probes: Vec<Probe> = Vec::with_capacity(self.num_probes as usize);
        let mut lone_rounds = 0u32;

        while !active.is_empty() && k + 1 < capacity {
            let pick = (rng.next_u64() % active.len() as u64) as usize;
            let origin = buffer.read(active[pick]);

            cast(origin, min_dist, &grid, &*buffer, &mut *rng, &mut probes);
            report.rounds += 1;
            report.probes_evaluated += probes.len();
            report.probes_rejected += probes
                .iter()
                .filter(|p| p.distance_squared.is_none())
                .count();

            match nearest_probe(&probes) {
                Some(point) => {
                    k += 1;
                    buffer.write(k, point);
                    grid.mark(point, k);
                    active.push(k);
                    lone_rounds = 0;
                }
                None if active.len() > 1 || k > 1 => {
                    trace!(index = active[pick], "Active point exhausted.");
                    active.swap_remove(pick);
                    report.exhausted += 1;
                }
                None => {
                    lone_rounds += 1;
                    if lone_rounds >= self.max_seed_rounds {
                        warn!(
                            "Lone active point {} produced no candidate in {} rounds; retiring it.",
                            active[pick], lone_rounds
                        );
                        active.swap_remove(pick);
                        report.exhausted += 1;
                    }
                }
            }
        }

        report.count = k + 1;
        debug!(
            count = report.count,
            rounds = report.rounds,
            probes_rejected = report.probes_rejected,
            "Poisson square sampling finished."
        );

        Ok(report)
    }
}

/// Casts one candidate around `origin` and scores it against the grid.
fn cast_probe<B, R>(
    origin: Vec2,
    min_dist: f32,
    grid: &OccupancyGrid,
    kernel: &B,
    rng: &mut R,
) -> Probe
where
    B: PointBuffer + ?Sized,
    R: RngCore + ?Sized,
{
    let radius = min_dist + rand01(rng) * min_dist;
    let angle = rand01(rng) * TAU;

    let point = wrap_point(Vec2::new(
        origin.x + radius * angle.cos(),
        origin.y + radius * angle.sin(),
    ));

    let distance_squared = if grid.collides(point, kernel) {
        None
    } else {
        Some(toroidal_distance_squared(origin, point))
    };

    Probe {
        point,
        distance_squared,
    }
}

/// Nearest accepted candidate; ties keep the earliest.
fn nearest_probe(probes: &[Probe]) -> Option<Vec2> {
    let mut best: Option<(Vec2, f32)> = None;
    for probe in probes {
        let Some(d2) = probe.distance_squared else {
            continue;
        };
        if best.map_or(true, |(_, best_d2)| d2 < best_d2) {
            best = Some((probe.point, d2));
        }
    }
    best.map(|(point, _)| point)
}

#[cfg(feature = "parallel")]
#[inline]
fn stream_offset(i: usize) -> u64 {
    (i as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
