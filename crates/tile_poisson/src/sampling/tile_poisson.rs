//! Tileable Poisson disk position sampling strategy.
use glam::Vec2;
use mint::Vector2;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::sampling::poisson_square::{PoissonSquare, DEFAULT_NUM_PROBES};
use crate::sampling::PositionSampling;

/// Poisson disk sampling on the unit torus, stretched over a centered domain.
///
/// Layouts tile seamlessly when the domain is repeated. Distances are enforced
/// in unit-square space, so non-square domains scale the spacing per axis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct TilePoissonSampling {
    /// Kernel capacity; an upper bound on the number of positions.
    pub count: usize,
    /// Candidates cast per round.
    pub num_probes: u32,
    /// Minimum distance in unit-square space. `None` derives it from `count`.
    pub min_dist: Option<f32>,
}

impl TilePoissonSampling {
    /// Create a sampler for up to `count` points with the default probe count.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            num_probes: DEFAULT_NUM_PROBES,
            min_dist: None,
        }
    }

    /// Set the number of candidates cast per round.
    pub fn with_num_probes(mut self, num_probes: u32) -> Self {
        self.num_probes = num_probes;
        self
    }

    /// Set the minimum distance in unit-square space.
    pub fn with_min_dist(mut self, min_dist: f32) -> Self {
        self.min_dist = Some(min_dist);
        self
    }

    fn config(&self) -> PoissonSquare {
        let config = PoissonSquare::new(self.num_probes);
        match self.min_dist {
            Some(d) => config.with_min_dist(d),
            None => config,
        }
    }
}

impl PositionSampling for TilePoissonSampling {
    fn generate(&self, domain_extent: Vector2<f32>, rng: &mut dyn RngCore) -> Vec<Vector2<f32>> {
        let extent = Vec2::from(domain_extent);
        if self.count == 0 || extent.x <= 0.0 || extent.y <= 0.0 {
            return Vec::new();
        }

        let mut kernel = vec![Vec2::ZERO; self.count];
        let count = match self.config().sample_with_rng(&mut kernel, rng) {
            Ok(report) => report.count,
            Err(e) => {
                warn!("Tile Poisson sampling skipped: {}.", e);
                return Vec::new();
            }
        };

        kernel
            .into_iter()
            .take(count)
            .map(|u| ((u - Vec2::splat(0.5)) * extent).into())
            .collect()
    }
}
