//! Pedestrian crowd scenario
//!
//! Pedestrians walk to random destinations around static obstacles. A
//! pedestrian that arrives is handed a new destination at least a quarter of
//! the world width away, in the same tick.

use drift_ai::{AgentSnapshot, AgentView, Behavior, Obstacle, Pedestrian, Surroundings, Vec2, WorldBounds};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::SimConfig;
use crate::error::Result;
use crate::scenario::{random_point, Scenario};

/// Rejection-sampling budget for a new destination
const DESTINATION_ATTEMPTS: usize = 1_000;

/// Pedestrians and obstacles in a toroidal world
pub struct PedestrianScenario {
    pedestrians: Vec<Pedestrian>,
    obstacles: Vec<Obstacle>,
    bounds: WorldBounds,
    min_trip: f32,
    rng: ChaCha8Rng,
    tick: u64,
    arrivals: u64,
}

impl PedestrianScenario {
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let settings = &config.pedestrians;
        let bounds = config.world;
        let min_trip = bounds.width / 4.0;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let placement = &settings.obstacles;
        let mut obstacles = Vec::with_capacity(placement.count);
        for _ in 0..placement.count {
            let position = Vec2::new(
                rng.gen_range(0.1 * bounds.width..0.9 * bounds.width),
                rng.gen_range(0.1 * bounds.height..0.9 * bounds.height),
            );
            let radius = rng.gen_range(placement.min_radius..=placement.max_radius);
            obstacles.push(Obstacle::new(position, radius)?);
        }

        let mut pedestrians = Vec::with_capacity(settings.num_agents);
        for _ in 0..settings.num_agents {
            let start = random_point(&mut rng, &bounds);
            let destination = random_destination(&mut rng, &bounds, start, min_trip, &obstacles);
            let size = rng.gen_range(settings.min_size..=settings.max_size);
            let agent_config = settings.agent.with_size(size);
            pedestrians.push(Pedestrian::spawn(
                agent_config,
                settings.navigation,
                start,
                destination,
                &mut rng,
            )?);
        }

        log::info!(
            "Pedestrian scenario: {} agents, {} obstacles in {}x{} world (seed {})",
            pedestrians.len(),
            obstacles.len(),
            bounds.width,
            bounds.height,
            config.seed
        );

        Ok(Self {
            pedestrians,
            obstacles,
            bounds,
            min_trip,
            rng,
            tick: 0,
            arrivals: 0,
        })
    }

    pub fn pedestrians(&self) -> &[Pedestrian] {
        &self.pedestrians
    }

    /// Mutable access for drivers that assign their own destinations
    pub fn pedestrians_mut(&mut self) -> &mut [Pedestrian] {
        &mut self.pedestrians
    }

    /// Total arrivals since the start of the run
    pub fn arrivals(&self) -> u64 {
        self.arrivals
    }
}

impl Scenario for PedestrianScenario {
    fn name(&self) -> &'static str {
        "pedestrians"
    }

    fn step(&mut self) {
        let mut snapshots: Vec<AgentSnapshot> =
            self.pedestrians.iter().map(|p| p.agent().snapshot()).collect();

        for (index, pedestrian) in self.pedestrians.iter_mut().enumerate() {
            let surroundings = Surroundings::new(&self.obstacles, &snapshots);
            pedestrian.step(surroundings, &self.bounds, &mut self.rng);
            snapshots[index] = pedestrian.agent().snapshot();

            if pedestrian.is_arrived() {
                let destination = random_destination(
                    &mut self.rng,
                    &self.bounds,
                    pedestrian.agent().position,
                    self.min_trip,
                    &self.obstacles,
                );
                log::debug!(
                    "Pedestrian {} reassigned to ({:.1}, {:.1})",
                    index,
                    destination.x,
                    destination.y
                );
                pedestrian.set_destination(destination);
                self.arrivals += 1;
            }
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
        self.pedestrians.iter().map(|p| p.agent().view()).collect()
    }

    fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    fn status(&self) -> String {
        format!(
            "tick {}: {} pedestrians, {} arrivals",
            self.tick,
            self.pedestrians.len(),
            self.arrivals
        )
    }
}

/// Random point farther than `min_trip` from `from` and outside every obstacle.
///
/// Falls back to the world corner farthest from `from` when sampling keeps failing.
fn random_destination<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: &WorldBounds,
    from: Vec2,
    min_trip: f32,
    obstacles: &[Obstacle],
) -> Vec2 {
    for _ in 0..DESTINATION_ATTEMPTS {
        let candidate = random_point(rng, bounds);
        if candidate.distance(from) > min_trip && !obstacles.iter().any(|o| o.contains(candidate)) {
            return candidate;
        }
    }
    let corners = [
        Vec2::ZERO,
        Vec2::new(bounds.width, 0.0),
        Vec2::new(0.0, bounds.height),
        Vec2::new(bounds.width, bounds.height),
    ];
    corners
        .into_iter()
        .fold(Vec2::ZERO, |best, c| if c.distance(from) > best.distance(from) { c } else { best })
}
