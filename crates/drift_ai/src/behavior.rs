//! The per-tick behavior capability shared by every agent kind

use rand::RngCore;

use crate::agent::Agent;
use crate::config::WorldBounds;

/// An agent that computes its own steering from what it can observe.
///
/// Implementations only ever write to their own agent's acceleration.
pub trait Behavior {
    /// What the behavior reads from the rest of the world
    type Context<'a>;

    /// Compute and accumulate this tick's steering forces
    fn update_behavior(&mut self, context: Self::Context<'_>, rng: &mut dyn RngCore);

    fn agent(&self) -> &Agent;

    fn agent_mut(&mut self) -> &mut Agent;

    /// Behavior, then integration, then boundary wrap, in that order
    fn step(&mut self, context: Self::Context<'_>, bounds: &WorldBounds, rng: &mut dyn RngCore) {
        self.update_behavior(context, rng);
        let agent = self.agent_mut();
        agent.integrate();
        agent.wrap(bounds);
    }
}
