//! Scenario driver interface
//!
//! A scenario owns its population, its obstacles and a seeded RNG. Each
//! `step` processes agents strictly in order: an agent computes its
//! behavior, integrates and wraps before the next agent looks at the world,
//! so later agents see earlier agents' new state within the same tick.

use std::fmt;
use std::str::FromStr;

use drift_ai::{AgentView, Obstacle, Vec2, WorldBounds};
use rand::Rng;

use crate::boids::BoidsScenario;
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::pedestrians::PedestrianScenario;
use crate::pursuit::PursuitScenario;

/// A runnable, tick-driven simulation
pub trait Scenario {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Advance every agent by one tick
    fn step(&mut self);

    /// Number of completed ticks
    fn tick(&self) -> u64;

    fn bounds(&self) -> WorldBounds;

    /// Per-agent state for a renderer
    fn agents(&self) -> Vec<AgentView<'_>>;

    /// Static obstacles, if the scenario has any
    fn obstacles(&self) -> &[Obstacle] {
        &[]
    }

    /// One-line progress report
    fn status(&self) -> String;

    /// Step `ticks` times
    fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }
}

/// Uniform point in `[0, width) x [0, height)`
pub(crate) fn random_point<R: Rng + ?Sized>(rng: &mut R, bounds: &WorldBounds) -> Vec2 {
    Vec2::new(rng.gen_range(0.0..bounds.width), rng.gen_range(0.0..bounds.height))
}

/// Stock scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    Boids,
    Pedestrians,
    Pursuit,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] = [Self::Boids, Self::Pedestrians, Self::Pursuit];

    /// Build this scenario from a validated configuration
    pub fn build(self, config: &SimConfig) -> Result<Box<dyn Scenario>> {
        let scenario: Box<dyn Scenario> = match self {
            Self::Boids => Box::new(BoidsScenario::new(config)?),
            Self::Pedestrians => Box::new(PedestrianScenario::new(config)?),
            Self::Pursuit => Box::new(PursuitScenario::new(config)?),
        };
        Ok(scenario)
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boids => write!(f, "boids"),
            Self::Pedestrians => write!(f, "pedestrians"),
            Self::Pursuit => write!(f, "pursuit"),
        }
    }
}

impl FromStr for ScenarioKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "boids" | "flocking" | "1" => Ok(Self::Boids),
            "pedestrians" | "pedestrian" | "crowd" | "2" => Ok(Self::Pedestrians),
            "pursuit" | "pursuit-evasion" | "chase" | "3" => Ok(Self::Pursuit),
            _ => Err(SimError::UnknownScenario(s.to_string())),
        }
    }
}
