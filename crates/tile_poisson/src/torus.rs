//! Unit-torus geometry.
//!
//! Points live in `[0, 1)²` with opposite edges identified. Distances take the
//! shortest path across the seams.
use glam::Vec2;

use crate::sampling::next_down;

/// Wraps a coordinate into `[0, 1)`.
///
/// Values that round up to exactly `1.0` after wrapping are pulled back to the
/// largest float below one.
#[inline]
pub fn wrap_unit(v: f32) -> f32 {
    let w = v.rem_euclid(1.0);
    if w >= 1.0 {
        next_down(1.0)
    } else {
        w
    }
}

/// Wraps both components of `p` into `[0, 1)`.
#[inline]
pub fn wrap_point(p: Vec2) -> Vec2 {
    Vec2::new(wrap_unit(p.x), wrap_unit(p.y))
}

/// Component-wise shortest absolute offset between two points on the torus.
///
/// Both inputs must already lie in `[0, 1)²`; each component of the result is
/// in `[0, 0.5]`.
#[inline]
pub fn toroidal_delta(a: Vec2, b: Vec2) -> Vec2 {
    let d = (a - b).abs();
    d.min(Vec2::ONE - d)
}

/// Squared toroidal distance, i.e. the minimum of `|a - b + t|²` over
/// `t ∈ {-1, 0, 1}²`.
#[inline]
pub fn toroidal_distance_squared(a: Vec2, b: Vec2) -> f32 {
    let d = toroidal_delta(a, b);
    d.dot(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force_distance_squared(a: Vec2, b: Vec2) -> f32 {
        let mut best = f32::MAX;
        for tx in [-1.0, 0.0, 1.0] {
            for ty in [-1.0, 0.0, 1.0] {
                let d = a - b + Vec2::new(tx, ty);
                best = best.min(d.dot(d));
            }
        }
        best
    }

    #[test]
    fn wrap_unit_folds_into_half_open_range() {
        assert_eq!(wrap_unit(0.25), 0.25);
        assert!((wrap_unit(-0.25) - 0.75).abs() < 1e-6);
        assert!((wrap_unit(1.25) - 0.25).abs() < 1e-6);
        assert!((wrap_unit(2.5) - 0.5).abs() < 1e-6);
        assert_eq!(wrap_unit(1.0), 0.0);
    }

    #[test]
    fn wrap_unit_never_returns_one() {
        let tiny = -f32::EPSILON * 0.25;
        let w = wrap_unit(tiny);
        assert!((0.0..1.0).contains(&w), "wrap_unit({tiny}) = {w}");
    }

    #[test]
    fn distance_crosses_seams() {
        let a = Vec2::new(0.05, 0.5);
        let b = Vec2::new(0.95, 0.5);
        assert!((toroidal_distance_squared(a, b) - 0.01).abs() < 1e-6);

        let c = Vec2::new(0.02, 0.98);
        let d = Vec2::new(0.98, 0.02);
        assert!((toroidal_distance_squared(c, d) - 0.0032).abs() < 1e-6);
    }

    #[test]
    fn matches_brute_force_over_translations() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.5, 0.5),
            Vec2::new(0.9, 0.1),
            Vec2::new(0.3, 0.7),
            Vec2::new(0.99, 0.99),
        ];
        for &a in &pts {
            for &b in &pts {
                let fast = toroidal_distance_squared(a, b);
                let slow = brute_force_distance_squared(a, b);
                assert!((fast - slow).abs() < 1e-6, "{a:?} {b:?}: {fast} vs {slow}");
            }
        }
    }
}
