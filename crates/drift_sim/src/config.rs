//! Scenario configuration
//!
//! Loaded from a TOML file; every section and key is optional except that an
//! `agent` table, when present, must give all of its fields.
//!
//! # Example Config File
//!
//! ```toml
//! seed = 7
//!
//! [world]
//! width = 800.0
//! height = 600.0
//!
//! [boids]
//! num_agents = 100
//! agent = { max_speed = 3.0, max_force = 0.1, size = 8.0 }
//! flocking = { perception_radius = 70.0, separation_factor = 1.2 }
//!
//! [pedestrians.obstacles]
//! count = 5
//! min_radius = 10.0
//! max_radius = 18.0
//!
//! [pursuit.pursuers]
//! num_agents = 3
//! ```

use std::path::Path;

use drift_ai::config::{AgentConfig, EvaderConfig, FlockingConfig, PedestrianConfig, WorldBounds};
use drift_ai::ConfigError;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Flocking scenario parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoidsSettings {
    pub num_agents: usize,
    pub agent: AgentConfig,
    pub flocking: FlockingConfig,
}

impl Default for BoidsSettings {
    fn default() -> Self {
        Self {
            num_agents: 100,
            agent: AgentConfig::boid(),
            flocking: FlockingConfig::default(),
        }
    }
}

/// Static obstacle placement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleSettings {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for ObstacleSettings {
    fn default() -> Self {
        Self {
            count: 5,
            min_radius: 10.0,
            max_radius: 18.0,
        }
    }
}

/// Pedestrian scenario parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PedestrianSettings {
    pub num_agents: usize,
    /// Speed and force limits; `size` is replaced by a draw from `[min_size, max_size]`
    pub agent: AgentConfig,
    pub navigation: PedestrianConfig,
    pub min_size: f32,
    pub max_size: f32,
    pub obstacles: ObstacleSettings,
}

impl Default for PedestrianSettings {
    fn default() -> Self {
        Self {
            num_agents: 30,
            agent: AgentConfig::pedestrian(),
            navigation: PedestrianConfig::default(),
            min_size: 6.0,
            max_size: 9.0,
            obstacles: ObstacleSettings::default(),
        }
    }
}

/// The single evader
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaderSettings {
    pub agent: AgentConfig,
    pub behavior: EvaderConfig,
}

impl Default for EvaderSettings {
    fn default() -> Self {
        Self {
            agent: AgentConfig::evader(),
            behavior: EvaderConfig::default(),
        }
    }
}

/// The pursuer team
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuerSettings {
    pub num_agents: usize,
    pub agent: AgentConfig,
}

impl Default for PursuerSettings {
    fn default() -> Self {
        Self {
            num_agents: 3,
            agent: AgentConfig::pursuer(),
        }
    }
}

/// Pursuit-evasion scenario parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitSettings {
    pub evader: EvaderSettings,
    pub pursuers: PursuerSettings,
    /// Extra reach added to the evader's size when detecting contact
    pub contact_margin: f32,
}

impl Default for PursuitSettings {
    fn default() -> Self {
        Self {
            evader: EvaderSettings::default(),
            pursuers: PursuerSettings::default(),
            contact_margin: 10.0,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for every random draw in a run
    pub seed: u64,
    pub world: WorldBounds,
    pub boids: BoidsSettings,
    pub pedestrians: PedestrianSettings,
    pub pursuit: PursuitSettings,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            world: WorldBounds::default(),
            boids: BoidsSettings::default(),
            pedestrians: PedestrianSettings::default(),
            pursuit: PursuitSettings::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        log::info!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set world size
    pub fn with_world(mut self, width: f32, height: f32) -> Self {
        self.world = WorldBounds { width, height };
        self
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.world.validate()?;

        self.boids.agent.validate()?;
        self.boids.flocking.validate()?;

        let pedestrians = &self.pedestrians;
        pedestrians.agent.validate()?;
        pedestrians.navigation.validate()?;
        check_range("pedestrians size", pedestrians.min_size, pedestrians.max_size)?;
        check_range(
            "obstacle radius",
            pedestrians.obstacles.min_radius,
            pedestrians.obstacles.max_radius,
        )?;

        self.pursuit.evader.agent.validate()?;
        self.pursuit.evader.behavior.validate()?;
        self.pursuit.pursuers.agent.validate()?;
        if !(self.pursuit.contact_margin.is_finite() && self.pursuit.contact_margin >= 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "contact_margin",
                value: self.pursuit.contact_margin,
                min: 0.0,
                max: f32::INFINITY,
            });
        }
        Ok(())
    }
}

/// A `[min, max]` range of positive values
fn check_range(what: &str, min: f32, max: f32) -> std::result::Result<(), ConfigError> {
    let valid = min.is_finite() && max.is_finite() && min > 0.0 && min <= max;
    if valid {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{} range [{}, {}] must be positive and ordered",
            what, min, max
        )))
    }
}
