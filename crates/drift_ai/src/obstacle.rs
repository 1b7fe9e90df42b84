//! Static circular obstacles

use drift_math::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

/// Immutable circle that pedestrians route around
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    position: Vec2,
    radius: f32,
}

impl Obstacle {
    pub fn new(position: Vec2, radius: f32) -> Result<Self> {
        error::finite("position.x", position.x)?;
        error::finite("position.y", position.y)?;
        error::positive("radius", radius)?;
        Ok(Self { position, radius })
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Check whether a point lies inside the circle
    pub fn contains(&self, point: Vec2) -> bool {
        self.position.distance_squared(point) <= self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_validation() {
        assert!(Obstacle::new(Vec2::new(1.0, 2.0), 3.0).is_ok());
        assert!(Obstacle::new(Vec2::ZERO, 0.0).is_err());
        assert!(Obstacle::new(Vec2::new(f32::NAN, 0.0), 1.0).is_err());
    }

    #[test]
    fn test_obstacle_contains() {
        let obstacle = Obstacle::new(Vec2::new(10.0, 10.0), 2.0).unwrap();
        assert!(obstacle.contains(Vec2::new(11.0, 11.0)));
        assert!(!obstacle.contains(Vec2::new(13.0, 10.0)));
    }
}
