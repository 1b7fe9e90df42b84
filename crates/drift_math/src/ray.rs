//! 2D ray used for obstacle sensing
//!
//! Rays are cast from an agent's position along a candidate heading.

use crate::vector::Vec2;

/// 2D ray for intersection testing
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray2 {
    /// Ray origin point
    pub origin: Vec2,
    /// Ray direction (unit length, or zero for a degenerate ray)
    pub direction: Vec2,
}

impl Ray2 {
    /// Create a new ray with normalized direction
    #[inline]
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a ray pointing along a world angle
    #[inline]
    pub fn from_angle(origin: Vec2, angle: f32) -> Self {
        Self {
            origin,
            direction: Vec2::from_angle(angle),
        }
    }

    /// Get a point at distance t along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec2 {
        self.origin + self.direction * t
    }

    /// Signed distance along the ray of the projection of `point`.
    ///
    /// Negative values lie behind the origin.
    #[inline]
    pub fn project(&self, point: Vec2) -> f32 {
        (point - self.origin).dot(self.direction)
    }

    /// Squared perpendicular distance from `point` to the infinite line
    /// carrying the ray.
    #[inline]
    pub fn perpendicular_distance_squared(&self, point: Vec2) -> f32 {
        let offset = point - self.origin;
        let t = offset.dot(self.direction);
        // Clamped at zero; rounding can push it slightly negative
        (offset.length_squared() - t * t).max(0.0)
    }

    /// Check if the ray direction is valid (non-zero length)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.direction.length_squared() > 1e-10
    }
}

impl Default for Ray2 {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            direction: Vec2::X,
        }
    }
}
