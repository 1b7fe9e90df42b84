//! Drift AI - Steering Agents
//!
//! Force-based steering for autonomous 2D agents.
//!
//! # Features
//!
//! - Kinematic agents with bounded-speed integration and toroidal wrap
//! - Boid flocking (separation, alignment, cohesion)
//! - Pursuit-evasion (nearest-threat flee, naive seek)
//! - Field-of-view pedestrian navigation with ray-based obstacle sensing
//!
//! # Tick order
//!
//! For every agent, one at a time: `update_behavior`, then `integrate`, then
//! `wrap_boundaries`. [`Behavior::step`] runs all three.
//!
//! # Example
//!
//! ```ignore
//! use drift_ai::prelude::*;
//!
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
//! let mut boid = Boid::spawn(AgentConfig::boid(), FlockingConfig::default(), Vec2::new(10.0, 10.0), &mut rng)?;
//! let peers = vec![boid.agent().snapshot()];
//! boid.step(&peers, &WorldBounds::default(), &mut rng);
//! ```

pub mod agent;
pub mod behavior;
pub mod config;
pub mod error;
pub mod flocking;
pub mod navigation;
pub mod obstacle;
pub mod pursuit;

pub mod prelude {
    pub use crate::agent::{Agent, AgentSnapshot, AgentView, ColorTag, Trail, TRAIL_CAPACITY};
    pub use crate::behavior::Behavior;
    pub use crate::config::{AgentConfig, EvaderConfig, FlockingConfig, PedestrianConfig, WorldBounds};
    pub use crate::error::{ConfigError, Result};
    pub use crate::flocking::{Boid, FlockForces};
    pub use crate::navigation::{NavState, Pedestrian, Surroundings};
    pub use crate::obstacle::Obstacle;
    pub use crate::pursuit::{Evader, Pursuer, Threat};
    pub use drift_math::Vec2;
}

pub use prelude::*;
