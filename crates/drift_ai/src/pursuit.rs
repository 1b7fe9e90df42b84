//! Pursuit-evasion: a fleeing evader and naive seeking pursuers

use drift_math::Vec2;
use rand::{Rng, RngCore};

use crate::agent::{Agent, AgentSnapshot, ColorTag};
use crate::behavior::Behavior;
use crate::config::{AgentConfig, EvaderConfig};
use crate::error::Result;

/// Flee forces below this magnitude count as "no threat" and trigger jitter
const IDLE_FORCE: f32 = 0.01;

/// The closest pursuer found in a scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threat {
    pub index: usize,
    pub position: Vec2,
    pub distance: f32,
}

/// Agent that flees the nearest pursuer within its flee radius
#[derive(Debug, Clone)]
pub struct Evader {
    agent: Agent,
    config: EvaderConfig,
}

impl Evader {
    pub fn new(agent: Agent, config: EvaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { agent, config })
    }

    pub fn spawn<R: Rng + ?Sized>(
        agent_config: AgentConfig,
        config: EvaderConfig,
        position: Vec2,
        rng: &mut R,
    ) -> Result<Self> {
        let agent = Agent::spawn(agent_config, position, ColorTag::Red, rng)?;
        Self::new(agent, config)
    }

    pub fn flee_radius(&self) -> f32 {
        self.config.flee_radius
    }

    /// Globally nearest pursuer; ties keep the first in order
    pub fn nearest_threat(&self, pursuers: &[AgentSnapshot]) -> Option<Threat> {
        let position = self.agent.position;
        pursuers
            .iter()
            .enumerate()
            .fold(None, |best: Option<Threat>, (index, pursuer)| {
                let distance = position.distance(pursuer.position);
                match best {
                    Some(threat) if threat.distance <= distance => Some(threat),
                    _ => Some(Threat { index, position: pursuer.position, distance }),
                }
            })
    }

    /// Flee force from the nearest pursuer, zero when none is inside the flee radius
    pub fn flee_force(&self, pursuers: &[AgentSnapshot]) -> Vec2 {
        match self.nearest_threat(pursuers) {
            Some(threat) if threat.distance < self.config.flee_radius => {
                self.agent.flee(threat.position, self.config.flee_radius)
            }
            _ => Vec2::ZERO,
        }
    }

    /// Small force in a random direction
    pub fn jitter<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let angle = rng.gen_range(-std::f32::consts::PI..std::f32::consts::PI);
        Vec2::from_angle(angle) * (self.agent.max_force() * self.config.jitter_fraction)
    }
}

impl Behavior for Evader {
    type Context<'a> = &'a [AgentSnapshot];

    fn update_behavior(&mut self, pursuers: Self::Context<'_>, rng: &mut dyn RngCore) {
        let flee = self.flee_force(pursuers);
        if flee.length() < IDLE_FORCE {
            let jitter = self.jitter(rng);
            self.agent.apply_force(jitter);
        }
        self.agent.apply_force(flee);
    }

    fn agent(&self) -> &Agent {
        &self.agent
    }

    fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }
}

/// Agent that seeks the evader's current position every tick
#[derive(Debug, Clone)]
pub struct Pursuer {
    agent: Agent,
}

impl Pursuer {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }

    pub fn spawn<R: Rng + ?Sized>(agent_config: AgentConfig, position: Vec2, rng: &mut R) -> Result<Self> {
        Ok(Self::new(Agent::spawn(agent_config, position, ColorTag::Blue, rng)?))
    }

    /// Whether this pursuer is within touching range of `evader`, with `margin` slack
    pub fn in_contact(&self, evader: &AgentSnapshot, margin: f32) -> bool {
        drift_math::circles_overlap(
            self.agent.position,
            self.agent.size(),
            evader.position,
            evader.size + margin,
        )
    }
}

impl Behavior for Pursuer {
    type Context<'a> = AgentSnapshot;

    fn update_behavior(&mut self, evader: Self::Context<'_>, _rng: &mut dyn RngCore) {
        let force = self.agent.seek(evader.position);
        self.agent.apply_force(force);
    }

    fn agent(&self) -> &Agent {
        &self.agent
    }

    fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }
}
