//! Drift Sim - Scenario Drivers
//!
//! Headless drivers for the stock steering scenarios: flocking boids,
//! pedestrians navigating around obstacles, and pursuit-evasion. Each driver
//! owns a seeded RNG, so a configuration and a seed reproduce a run exactly.
//!
//! # Example
//!
//! ```ignore
//! use drift_sim::prelude::*;
//!
//! let config = SimConfig::default().with_seed(42);
//! let mut scenario = ScenarioKind::Pedestrians.build(&config)?;
//! scenario.run(200);
//! for agent in scenario.agents() {
//!     draw(agent.position, agent.heading(), agent.color, agent.trail);
//! }
//! ```

pub mod boids;
pub mod config;
pub mod error;
pub mod pedestrians;
pub mod pursuit;
pub mod scenario;

pub mod prelude {
    pub use crate::boids::BoidsScenario;
    pub use crate::config::{
        BoidsSettings, EvaderSettings, ObstacleSettings, PedestrianSettings, PursuerSettings,
        PursuitSettings, SimConfig,
    };
    pub use crate::error::{Result, SimError};
    pub use crate::pedestrians::PedestrianScenario;
    pub use crate::pursuit::PursuitScenario;
    pub use crate::scenario::{Scenario, ScenarioKind};
}

pub use prelude::*;
