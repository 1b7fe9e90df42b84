//! Pursuit-evasion scenario
//!
//! The evader moves first, reacting to where the pursuers stood at the end of
//! the previous tick; each pursuer then seeks the evader's updated position.

use drift_ai::{AgentSnapshot, AgentView, Behavior, Evader, Pursuer, WorldBounds};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::SimConfig;
use crate::error::Result;
use crate::scenario::{random_point, Scenario};

/// One evader chased by a team of pursuers
pub struct PursuitScenario {
    evader: Evader,
    pursuers: Vec<Pursuer>,
    bounds: WorldBounds,
    contact_margin: f32,
    rng: ChaCha8Rng,
    tick: u64,
    contacts: Vec<usize>,
    total_contacts: u64,
}

impl PursuitScenario {
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let settings = &config.pursuit;
        let bounds = config.world;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let position = random_point(&mut rng, &bounds);
        let evader = Evader::spawn(settings.evader.agent, settings.evader.behavior, position, &mut rng)?;

        let pursuers = (0..settings.pursuers.num_agents)
            .map(|_| {
                let position = random_point(&mut rng, &bounds);
                Pursuer::spawn(settings.pursuers.agent, position, &mut rng)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        log::info!(
            "Pursuit scenario: 1 evader, {} pursuers in {}x{} world (seed {})",
            pursuers.len(),
            bounds.width,
            bounds.height,
            config.seed
        );

        Ok(Self {
            evader,
            pursuers,
            bounds,
            contact_margin: settings.contact_margin,
            rng,
            tick: 0,
            contacts: Vec::new(),
            total_contacts: 0,
        })
    }

    pub fn evader(&self) -> &Evader {
        &self.evader
    }

    pub fn pursuers(&self) -> &[Pursuer] {
        &self.pursuers
    }

    /// Indices of pursuers touching the evader after the last tick
    pub fn contacts(&self) -> &[usize] {
        &self.contacts
    }

    /// Pursuer-ticks spent in contact since the start of the run
    pub fn total_contacts(&self) -> u64 {
        self.total_contacts
    }
}

impl Scenario for PursuitScenario {
    fn name(&self) -> &'static str {
        "pursuit"
    }

    fn step(&mut self) {
        let pursuer_snapshots: Vec<AgentSnapshot> =
            self.pursuers.iter().map(|p| p.agent().snapshot()).collect();
        self.evader.step(pursuer_snapshots.as_slice(), &self.bounds, &mut self.rng);

        let evader = self.evader.agent().snapshot();
        self.contacts.clear();
        for (index, pursuer) in self.pursuers.iter_mut().enumerate() {
            pursuer.step(evader, &self.bounds, &mut self.rng);
            if pursuer.in_contact(&evader, self.contact_margin) {
                self.contacts.push(index);
            }
        }

        if !self.contacts.is_empty() {
            log::debug!("Tick {}: pursuers {:?} in contact", self.tick, self.contacts);
        }
        self.total_contacts += self.contacts.len() as u64;
        self.tick += 1;
    }

    fn tick(&self) -> u64 {
        self.tick
    }

    fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    fn agents(&self) -> Vec<AgentView<'_>> {
        std::iter::once(self.evader.agent().view())
            .chain(self.pursuers.iter().map(|p| p.agent().view()))
            .collect()
    }

    fn status(&self) -> String {
        format!(
            "tick {}: {} pursuers, {} in contact, {} contact ticks total",
            self.tick,
            self.pursuers.len(),
            self.contacts.len(),
            self.total_contacts
        )
    }
}
