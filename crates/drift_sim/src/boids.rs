//! Flocking scenario

use drift_ai::{AgentSnapshot, AgentView, Behavior, Boid, WorldBounds};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::SimConfig;
use crate::error::Result;
use crate::scenario::{random_point, Scenario};

/// A fixed population of boids in a toroidal world
pub struct BoidsScenario {
    boids: Vec<Boid>,
    bounds: WorldBounds,
    rng: ChaCha8Rng,
    tick: u64,
}

impl BoidsScenario {
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let settings = &config.boids;
        let bounds = config.world;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let boids = (0..settings.num_agents)
            .map(|_| {
                let position = random_point(&mut rng, &bounds);
                Boid::spawn(settings.agent, settings.flocking, position, &mut rng)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        log::info!(
            "Boids scenario: {} agents in {}x{} world (seed {})",
            boids.len(),
            bounds.width,
            bounds.height,
            config.seed
        );

        Ok(Self {
            boids,
            bounds,
            rng,
            tick: 0,
        })
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    /// Average speed across the flock
    pub fn mean_speed(&self) -> f32 {
        if self.boids.is_empty() {
            return 0.0;
        }
        let total: f32 = self.boids.iter().map(|b| b.agent().velocity.length()).sum();
        total / self.boids.len() as f32
    }
}

impl Scenario for BoidsScenario {
    fn name(&self) -> &'static str {
        "boids"
    }

    fn step(&mut self) {
        let mut snapshots: Vec<AgentSnapshot> = self.boids.iter().map(|b| b.agent().snapshot()).collect();
        for (index, boid) in self.boids.iter_mut().enumerate() {
            boid.step(snapshots.as_slice(), &self.bounds, &mut self.rng);
            snapshots[index] = boid.agent().snapshot();
        }
        self.tick += 1;
    }

    fn tick(&self) -> u64 {
        self.tick
    }

    fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    fn agents(&self) -> Vec<AgentView<'_>> {
        self.boids.iter().map(|b| b.agent().view()).collect()
    }

    fn status(&self) -> String {
        format!(
            "tick {}: {} boids, mean speed {:.2}",
            self.tick,
            self.boids.len(),
            self.mean_speed()
        )
    }
}
