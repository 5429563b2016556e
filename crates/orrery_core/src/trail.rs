//! Orbit trail recording
//!
//! The trail belongs to the presentation side: it copies the orbiter's
//! position after each frame and never feeds back into the physics.

use std::collections::VecDeque;

use orrery_math::Vec3;

/// Number of points kept by default
pub const DEFAULT_TRAIL_CAPACITY: usize = 1000;

/// Bounded FIFO of positions, oldest first
#[derive(Clone, Debug)]
pub struct Trail {
    points: VecDeque<Vec3>,
    capacity: usize,
}

impl Trail {
    /// Create a trail keeping at most `capacity` points (0 disables recording)
    ///
    /// `capacity` only bounds eviction; storage grows as points arrive.
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity.min(DEFAULT_TRAIL_CAPACITY)),
            capacity,
        }
    }

    /// Record a point, dropping the oldest once full
    pub fn push(&mut self, point: Vec3) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent point
    pub fn latest(&self) -> Option<Vec3> {
        self.points.back().copied()
    }

    /// Iterate oldest to newest
    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.points.iter().copied()
    }

    /// Contiguous view of the points, oldest first
    pub fn as_slice(&mut self) -> &[Vec3] {
        self.points.make_contiguous()
    }

    /// Raw bytes of the points for a line-strip vertex buffer
    pub fn as_bytes(&mut self) -> &[u8] {
        bytemuck::cast_slice(self.points.make_contiguous())
    }

    /// Single precision vertices for renderers that want `[f32; 3]`
    pub fn vertices_f32(&self) -> Vec<[f32; 3]> {
        self.points.iter().map(|p| p.to_f32_array()).collect()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_latest() {
        let mut trail = Trail::new(3);
        assert!(trail.is_empty());
        assert_eq!(trail.latest(), None);

        trail.push(Vec3::X);
        trail.push(Vec3::Y);
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.latest(), Some(Vec3::Y));
    }

    #[test]
    fn test_drops_oldest_when_full() {
        let mut trail = Trail::new(3);
        for i in 0..5 {
            trail.push(Vec3::new(i as f64, 0.0, 0.0));
        }

        assert_eq!(trail.len(), 3);
        let xs: Vec<f64> = trail.points().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_zero_capacity_records_nothing() {
        let mut trail = Trail::new(0);
        trail.push(Vec3::X);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let mut trail = Trail::new(usize::MAX / 8);
        trail.push(Vec3::X);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.capacity(), usize::MAX / 8);
        assert_eq!(trail.latest(), Some(Vec3::X));
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(Trail::default().capacity(), 1000);
    }

    #[test]
    fn test_slice_stays_ordered_after_wrap() {
        let mut trail = Trail::new(2);
        trail.push(Vec3::X);
        trail.push(Vec3::Y);
        trail.push(Vec3::Z);
        assert_eq!(trail.as_slice(), &[Vec3::Y, Vec3::Z]);
    }

    #[test]
    fn test_byte_view() {
        let mut trail = Trail::new(4);
        trail.push(Vec3::new(1.0, 2.0, 3.0));
        trail.push(Vec3::ZERO);

        let bytes = trail.as_bytes();
        assert_eq!(bytes.len(), 2 * 3 * 8);
        assert_eq!(&bytes[0..8], &1.0f64.to_ne_bytes());
    }

    #[test]
    fn test_vertices_f32_and_clear() {
        let mut trail = Trail::new(4);
        trail.push(Vec3::new(-100.0, 0.5, 0.0));
        assert_eq!(trail.vertices_f32(), vec![[-100.0f32, 0.5, 0.0]]);

        trail.clear();
        assert!(trail.is_empty());
    }
}
