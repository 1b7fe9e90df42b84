//! Boid flocking: separation, alignment and cohesion
//!
//! Each rule produces its own force clamped to `max_force`. The three are
//! weighted and accumulated separately, so their sum may exceed
//! `max_force`; only the velocity is bounded, during integration.

use drift_math::Vec2;
use rand::{Rng, RngCore};

use crate::agent::{Agent, AgentSnapshot, ColorTag};
use crate::behavior::Behavior;
use crate::config::{AgentConfig, FlockingConfig};
use crate::error::Result;

/// The three weighted flocking forces for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlockForces {
    pub separation: Vec2,
    pub alignment: Vec2,
    pub cohesion: Vec2,
}

impl FlockForces {
    pub fn total(&self) -> Vec2 {
        self.separation + self.alignment + self.cohesion
    }
}

/// A flocking agent
#[derive(Debug, Clone)]
pub struct Boid {
    agent: Agent,
    config: FlockingConfig,
}

impl Boid {
    pub fn new(agent: Agent, config: FlockingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { agent, config })
    }

    /// Boid at `position` with a random initial velocity
    pub fn spawn<R: Rng + ?Sized>(
        agent_config: AgentConfig,
        config: FlockingConfig,
        position: Vec2,
        rng: &mut R,
    ) -> Result<Self> {
        let agent = Agent::spawn(agent_config, position, ColorTag::Cyan, rng)?;
        Self::new(agent, config)
    }

    pub fn config(&self) -> &FlockingConfig {
        &self.config
    }

    /// Peers strictly inside the perception radius, excluding coincident ones
    pub fn neighbors<'a>(&self, peers: &'a [AgentSnapshot]) -> Vec<&'a AgentSnapshot> {
        let position = self.agent.position;
        peers
            .iter()
            .filter(|other| {
                let distance = position.distance(other.position);
                distance > 0.0 && distance < self.config.perception_radius
            })
            .collect()
    }

    /// Distance-weighted repulsion from neighbors
    pub fn separation(&self, neighbors: &[&AgentSnapshot]) -> Vec2 {
        let position = self.agent.position;
        let mut sum = Vec2::ZERO;
        let mut count = 0usize;
        for other in neighbors {
            let distance = position.distance(other.position);
            if distance > 0.0 {
                sum += (position - other.position).normalize() / distance;
                count += 1;
            }
        }
        if count == 0 {
            return Vec2::ZERO;
        }
        self.agent.steer_toward((sum / count as f32).normalize())
    }

    /// Match the average neighbor velocity
    pub fn alignment(&self, neighbors: &[&AgentSnapshot]) -> Vec2 {
        if neighbors.is_empty() {
            return Vec2::ZERO;
        }
        let average = neighbors.iter().map(|other| other.velocity).sum::<Vec2>() / neighbors.len() as f32;
        self.agent.steer_toward(average.normalize())
    }

    /// Seek the neighbor centroid
    pub fn cohesion(&self, neighbors: &[&AgentSnapshot]) -> Vec2 {
        if neighbors.is_empty() {
            return Vec2::ZERO;
        }
        let centroid = neighbors.iter().map(|other| other.position).sum::<Vec2>() / neighbors.len() as f32;
        self.agent.seek(centroid)
    }

    /// Weighted forces against the given population
    pub fn flocking_forces(&self, peers: &[AgentSnapshot]) -> FlockForces {
        let neighbors = self.neighbors(peers);
        FlockForces {
            separation: self.separation(&neighbors) * self.config.separation_factor,
            alignment: self.alignment(&neighbors) * self.config.alignment_factor,
            cohesion: self.cohesion(&neighbors) * self.config.cohesion_factor,
        }
    }

    /// Apply the three flocking forces
    pub fn flock(&mut self, peers: &[AgentSnapshot]) -> FlockForces {
        let forces = self.flocking_forces(peers);
        self.agent.apply_force(forces.separation);
        self.agent.apply_force(forces.alignment);
        self.agent.apply_force(forces.cohesion);
        forces
    }
}

impl Behavior for Boid {
    type Context<'a> = &'a [AgentSnapshot];

    fn update_behavior(&mut self, peers: Self::Context<'_>, _rng: &mut dyn RngCore) {
        self.flock(peers);
    }

    fn agent(&self) -> &Agent {
        &self.agent
    }

    fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }
}
