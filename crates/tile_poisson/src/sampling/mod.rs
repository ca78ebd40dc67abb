//! Tileable Poisson-disk sampling of the unit square.
//!
//! [`poisson_square`] fills a fixed-capacity kernel; [`TilePoissonSampling`]
//! exposes the same sampler through the [`PositionSampling`] trait for
//! rectangular domains.
use mint::Vector2;
use rand::RngCore;

pub mod occupancy;
pub mod poisson_square;
pub mod tile_poisson;

pub use occupancy::OccupancyGrid;
pub use poisson_square::{
    default_min_dist, poisson_square, poisson_square_with_min_dist, PoissonSquare, SampleReport,
};
pub use tile_poisson::TilePoissonSampling;

/// Trait for position sampling.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, domain_extent: Vector2<f32>, rng: &mut dyn RngCore) -> Vec<Vector2<f32>>;
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01<R: RngCore + ?Sized>(rng: &mut R) -> f32 {
    // 24 random mantissa bits keep the result strictly below 1.0.
    (rng.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}

/// Compute the next smaller representable float value.
///
/// Returns a value that is strictly less than the input. Handles zero,
/// infinities and NaN.
#[inline]
pub(crate) fn next_down(val: f32) -> f32 {
    if val.is_nan() {
        return f32::NAN;
    }

    if val == f32::NEG_INFINITY {
        return f32::NEG_INFINITY;
    }

    if val == f32::INFINITY {
        return f32::MAX;
    }

    if val == 0.0 {
        return -f32::MIN_POSITIVE;
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits.saturating_sub(1))
    } else {
        f32::from_bits(bits.saturating_add(1))
    }
}
