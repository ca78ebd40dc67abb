#![forbid(unsafe_code)]
//! tile_poisson: Tileable Poisson-disk sampling of the unit square.
//!
//! Modules:
//! - kernel: the fixed-capacity point buffers the sampler fills
//! - sampling: occupancy grid, sampler driver, and a domain-mapping strategy
//! - torus: wrap-around geometry on the unit square
//!
//! For examples, see the `tile_poisson_examples` crate.
pub mod error;
pub mod kernel;
pub mod sampling;
pub mod torus;

/// Convenient re-exports for common types. Import with `use tile_poisson::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::kernel::PointBuffer;
    pub use crate::sampling::{
        default_min_dist, poisson_square, poisson_square_with_min_dist, OccupancyGrid,
        PoissonSquare, PositionSampling, SampleReport, TilePoissonSampling,
    };
    pub use crate::torus::{toroidal_distance_squared, wrap_point, wrap_unit};
}
