//! Agent and behavior configuration
//!
//! Every struct here is plain serde data with defaults matching the stock
//! scenarios. `validate` is called by the constructors that consume them, so
//! a bad parameter fails at construction and never mid-simulation.

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

/// Kinematic limits shared by every agent
///
/// All three fields are required when deserialized, since the sensible
/// defaults differ per agent kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Upper bound on |velocity| after integration
    pub max_speed: f32,
    /// Upper bound on each individual steering force
    pub max_force: f32,
    /// Body size, used for collision geometry as well as drawing
    pub size: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::boid()
    }
}

impl AgentConfig {
    /// Limits used by the flocking scenario
    pub fn boid() -> Self {
        Self {
            max_speed: 3.0,
            max_force: 0.1,
            size: 8.0,
        }
    }

    /// Limits used by the pedestrian scenario
    pub fn pedestrian() -> Self {
        Self {
            max_speed: 1.3,
            max_force: 0.35,
            size: 7.0,
        }
    }

    /// Limits used by the evader in pursuit-evasion
    pub fn evader() -> Self {
        Self {
            max_speed: 2.8,
            max_force: 0.35,
            size: 9.0,
        }
    }

    /// Limits used by pursuers in pursuit-evasion
    pub fn pursuer() -> Self {
        Self {
            max_speed: 3.5,
            max_force: 0.4,
            size: 9.0,
        }
    }

    /// Set max speed
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Set max force
    pub fn with_max_force(mut self, max_force: f32) -> Self {
        self.max_force = max_force;
        self
    }

    /// Set body size
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        error::positive("max_speed", self.max_speed)?;
        error::positive("max_force", self.max_force)?;
        error::positive("size", self.size)
    }
}

/// Boid neighbor rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockingConfig {
    /// Neighbors are peers strictly closer than this
    pub perception_radius: f32,
    /// Weight of the separation force
    pub separation_factor: f32,
    /// Weight of the alignment force
    pub alignment_factor: f32,
    /// Weight of the cohesion force
    pub cohesion_factor: f32,
}

impl Default for FlockingConfig {
    fn default() -> Self {
        Self {
            perception_radius: 70.0,
            separation_factor: 1.2,
            alignment_factor: 1.0,
            cohesion_factor: 1.2,
        }
    }
}

impl FlockingConfig {
    pub fn validate(&self) -> Result<()> {
        error::positive("perception_radius", self.perception_radius)?;
        error::non_negative("separation_factor", self.separation_factor)?;
        error::non_negative("alignment_factor", self.alignment_factor)?;
        error::non_negative("cohesion_factor", self.cohesion_factor)
    }
}

/// Evader threat response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaderConfig {
    /// Pursuers closer than this trigger a flee response
    pub flee_radius: f32,
    /// Jitter magnitude as a fraction of max force, applied when no flee force is active
    pub jitter_fraction: f32,
}

impl Default for EvaderConfig {
    fn default() -> Self {
        Self {
            flee_radius: 200.0,
            jitter_fraction: 0.1,
        }
    }
}

impl EvaderConfig {
    pub fn validate(&self) -> Result<()> {
        error::positive("flee_radius", self.flee_radius)?;
        error::in_range("jitter_fraction", self.jitter_fraction, 0.0, 1.0)
    }
}

/// Field-of-view navigation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PedestrianConfig {
    /// Full field of view in degrees, 0..=360
    pub fov_degrees: f32,
    /// Maximum ray sensing distance (d_max)
    pub sensing_distance: f32,
    /// Number of headings sampled across the field of view
    pub fov_samples: usize,
    /// Distance to the destination under which the agent has arrived
    pub arrival_threshold: f32,
}

impl Default for PedestrianConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 150.0,
            sensing_distance: 70.0,
            fov_samples: 25,
            arrival_threshold: 8.0,
        }
    }
}

impl PedestrianConfig {
    /// Half of the field of view, in radians
    pub fn half_fov(&self) -> f32 {
        drift_math::radians(self.fov_degrees / 2.0)
    }

    pub fn validate(&self) -> Result<()> {
        error::in_range("fov_degrees", self.fov_degrees, 0.0, 360.0)?;
        error::positive("sensing_distance", self.sensing_distance)?;
        error::positive("arrival_threshold", self.arrival_threshold)
    }
}

/// Toroidal world extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl WorldBounds {
    /// Create validated bounds
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let bounds = Self { width, height };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<()> {
        error::positive("width", self.width)?;
        error::positive("height", self.height)
    }

    /// Check that a point lies inside `[0, width] x [0, height]`
    pub fn contains(&self, point: drift_math::Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_defaults_validate() {
        assert!(AgentConfig::default().validate().is_ok());
        assert!(AgentConfig::pedestrian().validate().is_ok());
        assert!(AgentConfig::evader().validate().is_ok());
        assert!(AgentConfig::pursuer().validate().is_ok());
        assert!(FlockingConfig::default().validate().is_ok());
        assert!(EvaderConfig::default().validate().is_ok());
        assert!(PedestrianConfig::default().validate().is_ok());
        assert!(WorldBounds::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_agent_config() {
        let err = AgentConfig::boid().with_max_speed(-1.0).validate().unwrap_err();
        assert_eq!(err, ConfigError::NonPositive { field: "max_speed", value: -1.0 });

        let err = AgentConfig::boid().with_max_force(f32::INFINITY).validate().unwrap_err();
        assert_eq!(err, ConfigError::NonFinite { field: "max_force" });
    }

    #[test]
    fn test_fov_range() {
        let config = PedestrianConfig { fov_degrees: 361.0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange { field: "fov_degrees", .. })));

        let config = PedestrianConfig { fov_degrees: 360.0, ..Default::default() };
        assert!(config.validate().is_ok());
        assert!((config.half_fov() - std::f32::consts::PI).abs() < 1e-5);
    }

    #[test]
    fn test_world_bounds() {
        assert!(WorldBounds::new(0.0, 10.0).is_err());
        let bounds = WorldBounds::new(100.0, 50.0).unwrap();
        assert!(bounds.contains(drift_math::Vec2::new(100.0, 0.0)));
        assert!(!bounds.contains(drift_math::Vec2::new(101.0, 0.0)));
    }
}
