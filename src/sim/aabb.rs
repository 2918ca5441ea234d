//! Axis-aligned bounding volumes
//!
//! World axes: x is lateral (left negative), y is up (track surface at 0),
//! z is longitudinal (forward positive).

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its min and max corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered at `center` extending `half` along each axis
    pub fn from_center(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Overlap test; touching faces count as intersecting
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Copy of this box with its bottom face lowered by `amount`
    pub fn extended_down(&self, amount: f32) -> Self {
        Self {
            min: Vec3::new(self.min.x, self.min.y - amount, self.min.z),
            max: self.max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_overlap_and_touch() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5));
        let b = Aabb::from_center(Vec3::new(0.5, 0.0, 0.0), Vec3::splat(0.5));
        let touching = Aabb::from_center(Vec3::new(1.0, 0.0, 0.0), Vec3::splat(0.5));
        let apart = Aabb::from_center(Vec3::new(1.5, 0.0, 0.0), Vec3::splat(0.4));

        assert!(a.intersects(&a));
        assert!(a.intersects(&b));
        assert!(a.intersects(&touching));
        assert!(!a.intersects(&apart));
        assert!(!apart.intersects(&a));
    }

    #[test]
    fn test_separated_on_single_axis() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        // Overlaps on x and z but not y
        let above = Aabb::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 3.0, 1.0));
        assert!(!a.intersects(&above));
    }

    #[test]
    fn test_extended_down() {
        let a = Aabb::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 2.0, 1.0));
        let e = a.extended_down(0.25);
        assert_eq!(e.min.y, 0.75);
        assert_eq!(e.max, a.max);
        assert_eq!(a.center(), Vec3::new(0.5, 1.5, 0.5));
        assert_eq!(a.size(), Vec3::ONE);
    }
}
