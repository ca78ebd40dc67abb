//! Occupancy grid for toroidal minimum-distance queries.
//!
//! The unit square is split into `S × S` cells with `S = ⌈√2 / min_dist⌉`, so a
//! cell's diagonal never exceeds `min_dist` and each cell holds at most one
//! accepted point. Cells store kernel indices; point coordinates stay in the
//! kernel.
use glam::Vec2;

use crate::error::{Error, Result};
use crate::kernel::PointBuffer;

/// Largest grid the sampler will allocate (1 GiB of cells).
pub const MAX_GRID_CELLS: usize = 1 << 28;

const EMPTY: u32 = u32::MAX;

/// Dense `S × S` index grid over the unit torus.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    side: usize,
    min_dist_squared: f32,
    cells: Vec<u32>,
}

impl OccupancyGrid {
    /// Creates an empty grid for the given minimum distance.
    ///
    /// Fails if `min_dist` is not a positive finite number, or if the grid
    /// would exceed [`MAX_GRID_CELLS`].
    pub fn try_new(min_dist: f32) -> Result<Self> {
        let side = Self::side_for(min_dist)?;

        Ok(Self {
            side,
            min_dist_squared: min_dist * min_dist,
            cells: vec![EMPTY; side * side],
        })
    }

    /// Grid side length `⌈√2 / min_dist⌉` for `min_dist`, checked against
    /// [`MAX_GRID_CELLS`].
    pub fn side_for(min_dist: f32) -> Result<usize> {
        if !min_dist.is_finite() || min_dist <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_dist must be positive and finite, got {min_dist}"
            )));
        }

        let side = (std::f64::consts::SQRT_2 / min_dist as f64).ceil().max(1.0);
        let cells = (side <= usize::MAX as f64)
            .then_some(side as usize)
            .and_then(|s| s.checked_mul(s).map(|cells| (s, cells)));
        match cells {
            Some((side, cells)) if cells <= MAX_GRID_CELLS => Ok(side),
            _ => Err(Error::InvalidConfig(format!(
                "min_dist {min_dist} needs a {side}x{side} occupancy grid, \
                 above the limit of {MAX_GRID_CELLS} cells"
            ))),
        }
    }

    /// Number of cells along each axis.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Cell coordinates of `point`, clamped into the grid.
    #[inline]
    pub fn cell_of(&self, point: Vec2) -> (usize, usize) {
        let s = self.side as f32;
        let max = self.side as isize - 1;
        let x = ((point.x * s).floor() as isize).clamp(0, max) as usize;
        let y = ((point.y * s).floor() as isize).clamp(0, max) as usize;
        (x, y)
    }

    /// Kernel index stored in cell `(x, y)`, if any.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<usize> {
        match self.cells[y * self.side + x] {
            EMPTY => None,
            index => Some(index as usize),
        }
    }

    /// Records that kernel slot `index` holds `point`.
    ///
    /// # Panics
    ///
    /// Panics if the cell containing `point` is already taken. Two accepted
    /// points can never share a cell, so this indicates a sampler bug.
    /// Also panics if `index` does not fit the 32-bit cell storage.
    pub fn mark(&mut self, point: Vec2, index: usize) {
        let Some(stored) = u32::try_from(index).ok().filter(|&i| i != EMPTY) else {
            panic!("point index {index} does not fit occupancy cell storage");
        };
        let (x, y) = self.cell_of(point);
        let slot = &mut self.cells[y * self.side + x];
        assert!(
            *slot == EMPTY,
            "occupancy cell ({x}, {y}) already holds point {}; cannot mark point {index}",
            *slot
        );
        *slot = stored;
    }

    /// Returns true if any marked point lies closer than `min_dist` to `probe`,
    /// measured across the torus seams.
    ///
    /// Scans the 5×5 block of cells around the probe. Neighbor points are
    /// shifted by whole tiles when their cell index wraps, so distances are
    /// taken against the image adjacent to the probe.
    pub fn collides<B: PointBuffer + ?Sized>(&self, probe: Vec2, kernel: &B) -> bool {
        let s = self.side as isize;
        let (cx, cy) = self.cell_of(probe);
        let (cx, cy) = (cx as isize, cy as isize);

        for j in (cy - 2)..=(cy + 2) {
            for i in (cx - 2)..=(cx + 2) {
                let corner = (i - cx).abs() == 2 && (j - cy).abs() == 2;
                if corner && self.cell_out_of_reach(probe, i, j) {
                    continue;
                }

                let wi = i.rem_euclid(s) as usize;
                let wj = j.rem_euclid(s) as usize;
                let index = self.cells[wj * self.side + wi];
                if index == EMPTY {
                    continue;
                }

                let tile = Vec2::new(i.div_euclid(s) as f32, j.div_euclid(s) as f32);
                let neighbor = kernel.read(index as usize) + tile;
                let delta = neighbor - probe;
                if delta.dot(delta) < self.min_dist_squared {
                    return true;
                }
            }
        }

        false
    }

    /// True if no position inside unwrapped cell `(i, j)` is within `min_dist`
    /// of `probe`.
    #[inline]
    fn cell_out_of_reach(&self, probe: Vec2, i: isize, j: isize) -> bool {
        let w = 1.0 / self.side as f32;
        let lo = Vec2::new(i as f32, j as f32) * w;
        let hi = lo + Vec2::splat(w);
        let gap = (lo - probe).max(probe - hi).max(Vec2::ZERO);
        gap.dot(gap) >= self.min_dist_squared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(min_dist: f32) -> OccupancyGrid {
        OccupancyGrid::try_new(min_dist).expect("representable grid")
    }

    #[test]
    fn side_uses_ceiling() {
        assert_eq!(grid(0.12).side(), 12);
        assert_eq!(grid(0.9).side(), 2);
        assert_eq!(grid(0.05).side(), 29);

        for d in [0.01_f32, 0.0264, 0.07, 0.3, 0.5] {
            let grid = grid(d);
            let cell = 1.0 / grid.side() as f32;
            assert!(cell * std::f32::consts::SQRT_2 <= d + 1e-6, "d = {d}");
        }
    }

    #[test]
    fn cell_of_clamps_to_grid() {
        let grid = grid(0.1);
        let s = grid.side();
        assert_eq!(grid.cell_of(Vec2::ZERO), (0, 0));
        assert_eq!(grid.cell_of(Vec2::splat(0.999_999)), (s - 1, s - 1));
        assert_eq!(grid.cell_of(Vec2::new(1.5, -0.5)), (s - 1, 0));
    }

    #[test]
    fn mark_stores_index_in_cell() {
        let mut grid = grid(0.1);
        let p = Vec2::new(0.5, 0.5);
        grid.mark(p, 7);
        let (x, y) = grid.cell_of(p);
        assert_eq!(grid.get(x, y), Some(7));
    }

    #[test]
    #[should_panic(expected = "already holds")]
    fn double_mark_panics() {
        let mut grid = grid(0.1);
        grid.mark(Vec2::new(0.5, 0.5), 0);
        grid.mark(Vec2::new(0.501, 0.501), 1);
    }

    #[test]
    fn collides_rejects_close_neighbors() {
        let kernel = vec![Vec2::new(0.5, 0.5)];
        let mut grid = grid(0.1);
        grid.mark(kernel[0], 0);

        assert!(grid.collides(Vec2::new(0.55, 0.5), &kernel));
        assert!(grid.collides(Vec2::new(0.5, 0.43), &kernel));
        assert!(!grid.collides(Vec2::new(0.61, 0.5), &kernel));
        assert!(!grid.collides(Vec2::new(0.58, 0.58), &kernel));
    }

    #[test]
    fn collides_across_seams() {
        let kernel = vec![Vec2::new(0.01, 0.5), Vec2::new(0.98, 0.98)];
        let mut grid = grid(0.05);
        grid.mark(kernel[0], 0);
        grid.mark(kernel[1], 1);

        assert!(grid.collides(Vec2::new(0.99, 0.5), &kernel));
        assert!(grid.collides(Vec2::new(0.01, 0.01), &kernel));
        assert!(!grid.collides(Vec2::new(0.9, 0.5), &kernel));
    }

    #[test]
    fn empty_grid_never_collides() {
        let kernel: Vec<Vec2> = Vec::new();
        let grid = grid(0.2);
        assert!(!grid.collides(Vec2::new(0.3, 0.7), &kernel));
    }

    #[test]
    fn corner_cells_within_reach_are_checked() {
        // d = 0.12 gives 12 cells; the neighbor sits two cells away on both
        // axes yet closer than d.
        let kernel = vec![Vec2::new(0.5834, 0.5834)];
        let mut grid = grid(0.12);
        grid.mark(kernel[0], 0);

        let probe = Vec2::new(0.4999, 0.4999);
        assert_eq!(grid.cell_of(probe), (5, 5));
        assert_eq!(grid.cell_of(kernel[0]), (7, 7));
        assert!(grid.collides(probe, &kernel));
    }

    #[test]
    fn small_grid_sees_every_image_of_the_seed() {
        let kernel = vec![Vec2::new(0.5, 0.5)];
        let mut grid = grid(0.9);
        grid.mark(kernel[0], 0);

        for probe in [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.99, 0.01),
            Vec2::new(0.25, 0.9),
            Vec2::new(0.75, 0.75),
        ] {
            assert!(grid.collides(probe, &kernel), "{probe:?}");
        }
    }

    #[test]
    fn tiny_min_dist_is_rejected_instead_of_overflowing() {
        for d in [1e-12_f32, 1e-20, f32::MIN_POSITIVE] {
            assert!(
                matches!(OccupancyGrid::try_new(d), Err(Error::InvalidConfig(_))),
                "min_dist = {d}"
            );
        }
        assert!(matches!(
            OccupancyGrid::side_for(0.0),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            OccupancyGrid::side_for(f32::NAN),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn side_for_accepts_grids_up_to_cell_limit() {
        let side = OccupancyGrid::side_for(1e-4).unwrap();
        assert_eq!(side, 14143);
        assert!(side * side <= MAX_GRID_CELLS);
        assert!(OccupancyGrid::side_for(5e-5).is_err());
    }

    #[test]
    fn cells_use_four_bytes() {
        let grid = grid(0.1);
        assert_eq!(std::mem::size_of_val(&grid.cells[0]), 4);
        assert_eq!(grid.cells.len(), 15 * 15);
        assert!(grid.cells.iter().all(|&c| c == EMPTY));
    }

    #[test]
    fn large_indices_round_trip_through_cells() {
        let mut grid = grid(0.1);
        let p = Vec2::new(0.2, 0.7);
        grid.mark(p, 3_000_000_000);
        let (x, y) = grid.cell_of(p);
        assert_eq!(grid.get(x, y), Some(3_000_000_000));
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn index_equal_to_sentinel_panics() {
        let mut grid = grid(0.1);
        grid.mark(Vec2::new(0.5, 0.5), u32::MAX as usize);
    }
}
