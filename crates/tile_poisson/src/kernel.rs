//! Fixed-capacity point buffers ("kernels") the sampler writes into.
//!
//! A kernel is any index-addressable sequence of 2D points whose length is
//! fixed for the duration of a sampling call. The sampler only reads slots it
//! has already written and never touches slots past the count it returns.
use glam::Vec2;
use mint::Vector2;

/// Mutable, fixed-length sequence of 2D points.
pub trait PointBuffer {
    /// Number of point slots.
    fn len(&self) -> usize;

    /// Reads slot `index`.
    fn read(&self, index: usize) -> Vec2;

    /// Overwrites slot `index`.
    fn write(&mut self, index: usize, point: Vec2);

    /// Returns true if the buffer has no slots.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PointBuffer for [Vec2] {
    #[inline]
    fn len(&self) -> usize {
        <[Vec2]>::len(self)
    }

    #[inline]
    fn read(&self, index: usize) -> Vec2 {
        self[index]
    }

    #[inline]
    fn write(&mut self, index: usize, point: Vec2) {
        self[index] = point;
    }
}

impl PointBuffer for Vec<Vec2> {
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn read(&self, index: usize) -> Vec2 {
        self[index]
    }

    #[inline]
    fn write(&mut self, index: usize, point: Vec2) {
        self[index] = point;
    }
}

impl PointBuffer for [Vector2<f32>] {
    #[inline]
    fn len(&self) -> usize {
        <[Vector2<f32>]>::len(self)
    }

    #[inline]
    fn read(&self, index: usize) -> Vec2 {
        Vec2::from(self[index])
    }

    #[inline]
    fn write(&mut self, index: usize, point: Vec2) {
        self[index] = point.into();
    }
}

impl PointBuffer for Vec<Vector2<f32>> {
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn read(&self, index: usize) -> Vec2 {
        Vec2::from(self[index])
    }

    #[inline]
    fn write(&mut self, index: usize, point: Vec2) {
        self[index] = point.into();
    }
}
