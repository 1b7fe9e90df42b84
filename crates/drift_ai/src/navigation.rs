//! Field-of-view pedestrian navigation
//!
//! Each tick a traveling pedestrian samples headings across its field of
//! view, casts a ray along each one and scores it with
//!
//! ```text
//! cost(a) = d_max^2 + f(a)^2 - 2 * d_max * f(a) * cos(a - destination_angle)
//! ```
//!
//! where `f(a)` is the clear distance along heading `a`, capped at `d_max`.
//! By the law of cosines this is the squared distance between the point
//! `d_max` ahead toward the destination and the point `f(a)` ahead along the
//! candidate, so it rewards both clearance and alignment. Headings whose
//! clearance is below `0.75 * size` are penalized hard.

use drift_math::{angle_between, linspace, ray_circle, wrap_angle, Ray2, Vec2};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::agent::{Agent, AgentSnapshot, ColorTag};
use crate::behavior::Behavior;
use crate::config::{AgentConfig, PedestrianConfig};
use crate::error::{self, Result};
use crate::obstacle::Obstacle;

/// Distances below this count as already at the destination
const ARRIVAL_EPSILON: f32 = 1e-5;
/// Slower than this and the forward heading falls back to the destination
const MOVING_SPEED: f32 = 0.01;
/// Velocity multiplier per tick once arrived
const ARRIVED_DECAY: f32 = 0.8;
/// Arrived agents below this speed are stopped outright
const REST_SPEED: f32 = 0.1;
/// Clearance under `size * COLLISION_FRACTION` is a near collision
const COLLISION_FRACTION: f32 = 0.75;
/// Cost per unit of near-collision shortfall
const COLLISION_PENALTY: f32 = 10_000.0;
/// Chosen headings shorter than this are degenerate
const DEGENERATE_HEADING: f32 = 0.01;
/// Fraction of velocity opposed when braking on a degenerate heading
const BRAKE_FRACTION: f32 = 0.1;

/// Navigation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavState {
    Traveling,
    Arrived,
}

/// What a pedestrian senses during a tick
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a> {
    pub obstacles: &'a [Obstacle],
    /// Other pedestrians. May include the sensing agent itself: a body at the
    /// ray origin yields a negative near root and is ignored.
    pub peers: &'a [AgentSnapshot],
}

impl<'a> Surroundings<'a> {
    pub fn new(obstacles: &'a [Obstacle], peers: &'a [AgentSnapshot]) -> Self {
        Self { obstacles, peers }
    }

    pub fn empty() -> Self {
        Self { obstacles: &[], peers: &[] }
    }
}

/// Agent navigating toward a destination around obstacles and peers
#[derive(Debug, Clone)]
pub struct Pedestrian {
    agent: Agent,
    destination: Vec2,
    state: NavState,
    half_fov: f32,
    sensing_distance: f32,
    fov_samples: usize,
    arrival_threshold: f32,
}

impl Pedestrian {
    pub fn new(agent: Agent, destination: Vec2, config: PedestrianConfig) -> Result<Self> {
        config.validate()?;
        error::finite("destination.x", destination.x)?;
        error::finite("destination.y", destination.y)?;
        Ok(Self {
            agent,
            destination,
            state: NavState::Traveling,
            half_fov: config.half_fov(),
            sensing_distance: config.sensing_distance,
            fov_samples: config.fov_samples,
            arrival_threshold: config.arrival_threshold,
        })
    }

    pub fn spawn<R: Rng + ?Sized>(
        agent_config: AgentConfig,
        config: PedestrianConfig,
        position: Vec2,
        destination: Vec2,
        rng: &mut R,
    ) -> Result<Self> {
        let agent = Agent::spawn(agent_config, position, ColorTag::Green, rng)?;
        Self::new(agent, destination, config)
    }

    pub fn destination(&self) -> Vec2 {
        self.destination
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn is_arrived(&self) -> bool {
        self.state == NavState::Arrived
    }

    /// Half field of view in radians
    pub fn half_fov(&self) -> f32 {
        self.half_fov
    }

    pub fn sensing_distance(&self) -> f32 {
        self.sensing_distance
    }

    pub fn fov_samples(&self) -> usize {
        self.fov_samples
    }

    /// Assign a new destination and resume traveling
    pub fn set_destination(&mut self, destination: Vec2) {
        self.destination = destination;
        self.state = NavState::Traveling;
    }

    /// Assign a destination without touching the arrival flag
    pub fn retarget(&mut self, destination: Vec2) {
        self.destination = destination;
    }

    /// Clear the arrival flag so the next behavior call travels again
    pub fn resume(&mut self) {
        self.state = NavState::Traveling;
    }

    fn arrive(&mut self) {
        if self.state != NavState::Arrived {
            log::debug!(
                "Pedestrian arrived at ({:.1}, {:.1})",
                self.agent.position.x,
                self.agent.position.y
            );
        }
        self.state = NavState::Arrived;
    }

    /// Unit vector toward the destination, flipping to `Arrived` (and
    /// returning zero) once inside the arrival threshold
    pub fn direction_to_destination(&mut self) -> Vec2 {
        if self.is_arrived() {
            return Vec2::ZERO;
        }
        let offset = self.destination - self.agent.position;
        let distance = offset.length();
        if distance < self.arrival_threshold || distance < ARRIVAL_EPSILON {
            self.arrive();
            return Vec2::ZERO;
        }
        offset / distance
    }

    /// Velocity heading while moving, else the heading toward the destination
    pub fn forward_heading(&self, to_destination: Vec2) -> f32 {
        if self.agent.velocity.length() > MOVING_SPEED {
            self.agent.velocity.angle()
        } else {
            to_destination.angle()
        }
    }

    /// World headings sampled evenly over `[forward - phi, forward + phi]`
    pub fn candidate_headings(&self, forward: f32) -> Vec<f32> {
        linspace(-self.half_fov, self.half_fov, self.fov_samples)
            .into_iter()
            .map(|offset| wrap_angle(forward + offset))
            .collect()
    }

    /// `f(heading)`: clear distance along `heading`, capped at the sensing distance
    pub fn sense_clearance(&self, heading: f32, obstacles: &[Obstacle], peers: &[AgentSnapshot]) -> f32 {
        let ray = Ray2::from_angle(self.agent.position, heading);
        let half_size = self.agent.size() / 2.0;

        let static_hits = obstacles
            .iter()
            .filter_map(|obstacle| ray_circle(&ray, obstacle.position(), obstacle.radius() + half_size));
        let peer_hits = peers
            .iter()
            .filter_map(|peer| ray_circle(&ray, peer.position, (self.agent.size() + peer.size) / 2.0));

        static_hits
            .chain(peer_hits)
            .fold(self.sensing_distance, f32::min)
    }

    /// Law-of-cosines cost plus the near-collision penalty
    pub fn heading_cost(&self, heading: f32, clearance: f32, destination_angle: f32) -> f32 {
        let d_max = self.sensing_distance;
        let delta = angle_between(heading, destination_angle);
        let mut cost = d_max * d_max + clearance * clearance - 2.0 * d_max * clearance * delta.cos();

        let collision_distance = self.agent.size() * COLLISION_FRACTION;
        if clearance < collision_distance {
            cost += COLLISION_PENALTY * (collision_distance - clearance);
        }
        cost
    }

    /// Unit heading of least cost, the direct heading when no samples are
    /// configured, or zero once arrived
    pub fn best_heading(&mut self, surroundings: Surroundings<'_>) -> Vec2 {
        if self.is_arrived() {
            return Vec2::ZERO;
        }

        let to_destination = self.direction_to_destination();
        if to_destination.length() < ARRIVAL_EPSILON {
            self.arrive();
            return Vec2::ZERO;
        }
        if self.fov_samples == 0 {
            return to_destination;
        }

        let forward = self.forward_heading(to_destination);
        let destination_angle = to_destination.angle();

        let mut best_cost = f32::INFINITY;
        let mut chosen = to_destination;
        for heading in self.candidate_headings(forward) {
            let clearance = self.sense_clearance(heading, surroundings.obstacles, surroundings.peers);
            let cost = self.heading_cost(heading, clearance, destination_angle);
            if cost < best_cost {
                best_cost = cost;
                chosen = Vec2::from_angle(heading);
            }
        }
        chosen
    }

    /// Steering toward `heading`, or a gentle brake when the heading is degenerate
    pub fn steering_force(&self, heading: Vec2) -> Vec2 {
        if heading.length() < DEGENERATE_HEADING {
            (-self.agent.velocity * BRAKE_FRACTION).clamp_magnitude(self.agent.max_force())
        } else {
            self.agent.steer_toward(heading)
        }
    }
}

impl Behavior for Pedestrian {
    type Context<'a> = Surroundings<'a>;

    fn update_behavior(&mut self, surroundings: Self::Context<'_>, _rng: &mut dyn RngCore) {
        if self.is_arrived() {
            self.agent.velocity *= ARRIVED_DECAY;
            if self.agent.velocity.length() < REST_SPEED {
                self.agent.velocity = Vec2::ZERO;
            }
            self.agent.clear_acceleration();
            return;
        }

        let heading = self.best_heading(surroundings);
        let force = self.steering_force(heading);
        self.agent.apply_force(force);
    }

    fn agent(&self) -> &Agent {
        &self.agent
    }

    fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SIZE: f32 = 6.0;

    fn pedestrian(position: Vec2, velocity: Vec2, destination: Vec2, config: PedestrianConfig) -> Pedestrian {
        let agent_config = AgentConfig::pedestrian().with_size(SIZE);
        let agent = Agent::new(agent_config, position, velocity, ColorTag::Green).unwrap();
        Pedestrian::new(agent, destination, config).unwrap()
    }

    fn walker(destination: Vec2) -> Pedestrian {
        pedestrian(Vec2::ZERO, Vec2::new(1.0, 0.0), destination, PedestrianConfig::default())
    }

    #[test]
    fn test_clearance_obstacle_ahead() {
        let ped = walker(Vec2::new(500.0, 0.0));
        let obstacle = Obstacle::new(Vec2::new(40.0, 0.0), 10.0).unwrap();
        let clearance = ped.sense_clearance(0.0, &[obstacle], &[]);
        assert_abs_diff_eq!(clearance, 40.0 - 10.0 - SIZE / 2.0, epsilon = 1e-3);
    }

    #[test]
    fn test_clearance_obstacle_behind() {
        let ped = walker(Vec2::new(500.0, 0.0));
        let obstacle = Obstacle::new(Vec2::new(-40.0, 0.0), 10.0).unwrap();
        let clearance = ped.sense_clearance(0.0, &[obstacle], &[]);
        assert_eq!(clearance, ped.sensing_distance());
    }

    #[test]
    fn test_clearance_capped_and_nearest_wins() {
        let ped = walker(Vec2::new(500.0, 0.0));
        let far = Obstacle::new(Vec2::new(200.0, 0.0), 10.0).unwrap();
        assert_eq!(ped.sense_clearance(0.0, &[far], &[]), ped.sensing_distance());

        let near = Obstacle::new(Vec2::new(30.0, 0.0), 5.0).unwrap();
        let mid = Obstacle::new(Vec2::new(50.0, 0.0), 5.0).unwrap();
        let clearance = ped.sense_clearance(0.0, &[mid, near], &[]);
        assert_abs_diff_eq!(clearance, 30.0 - 5.0 - SIZE / 2.0, epsilon = 1e-3);
    }

    #[test]
    fn test_clearance_peers_and_self() {
        let ped = walker(Vec2::new(500.0, 0.0));
        let me = ped.agent().snapshot();
        assert_eq!(ped.sense_clearance(0.0, &[], &[me]), ped.sensing_distance());

        let other = AgentSnapshot { position: Vec2::new(0.0, 20.0), velocity: Vec2::ZERO, size: 8.0 };
        let up = std::f32::consts::FRAC_PI_2;
        assert_abs_diff_eq!(
            ped.sense_clearance(up, &[], &[me, other]),
            20.0 - (SIZE + 8.0) / 2.0,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_candidate_headings_span_fov() {
        let config = PedestrianConfig { fov_degrees: 90.0, fov_samples: 3, ..Default::default() };
        let ped = pedestrian(Vec2::ZERO, Vec2::ZERO, Vec2::new(100.0, 0.0), config);
        let headings = ped.candidate_headings(0.0);
        assert_eq!(headings.len(), 3);
        assert_abs_diff_eq!(headings[0], -std::f32::consts::FRAC_PI_4, epsilon = 1e-6);
        assert_abs_diff_eq!(headings[1], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(headings[2], std::f32::consts::FRAC_PI_4, epsilon = 1e-6);

        let wrapped = ped.candidate_headings(std::f32::consts::PI);
        assert!(wrapped.iter().all(|h| *h > -std::f32::consts::PI && *h <= std::f32::consts::PI));
    }

    #[test]
    fn test_clear_path_heads_to_destination() {
        let config = PedestrianConfig { fov_samples: 21, ..Default::default() };
        let mut ped = pedestrian(Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(300.0, 0.0), config);
        let heading = ped.best_heading(Surroundings::empty());
        assert_abs_diff_eq!(heading.x, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(heading.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_blocked_path_turns_aside() {
        let config = PedestrianConfig { fov_samples: 21, ..Default::default() };
        let mut ped = pedestrian(Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(300.0, 0.0), config);
        let obstacle = Obstacle::new(Vec2::new(15.0, 0.0), 8.0).unwrap();
        let heading = ped.best_heading(Surroundings::new(&[obstacle], &[]));
        assert_abs_diff_eq!(heading.length(), 1.0, epsilon = 1e-5);
        assert!(heading.y.abs() > 0.3, "expected a detour, got {:?}", heading);
    }

    #[test]
    fn test_zero_samples_goes_direct() {
        let config = PedestrianConfig { fov_samples: 0, ..Default::default() };
        let mut ped = pedestrian(Vec2::ZERO, Vec2::new(0.0, 1.0), Vec2::new(100.0, 100.0), config);
        let wall = Obstacle::new(Vec2::new(10.0, 10.0), 5.0).unwrap();
        let heading = ped.best_heading(Surroundings::new(&[wall], &[]));
        let direct = Vec2::new(1.0, 1.0).normalize();
        assert_abs_diff_eq!(heading.x, direct.x, epsilon = 1e-6);
        assert_abs_diff_eq!(heading.y, direct.y, epsilon = 1e-6);
    }

    #[test]
    fn test_collision_penalty() {
        let ped = walker(Vec2::new(500.0, 0.0));
        let safe = ped.heading_cost(0.0, SIZE, 0.0);
        let blocked = ped.heading_cost(0.0, 1.0, 0.0);
        assert!(blocked > safe + COLLISION_PENALTY);
    }

    #[test]
    fn test_arrival_transition() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut ped = walker(Vec2::new(7.9, 0.0));
        ped.update_behavior(Surroundings::empty(), &mut rng);
        assert!(ped.is_arrived());

        let mut ped = walker(Vec2::new(8.1, 0.0));
        ped.update_behavior(Surroundings::empty(), &mut rng);
        assert_eq!(ped.state(), NavState::Traveling);
    }

    #[test]
    fn test_arrived_decays_without_force() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut ped = walker(Vec2::ZERO);
        ped.update_behavior(Surroundings::empty(), &mut rng);
        assert!(ped.is_arrived());
        ped.agent_mut().clear_acceleration();

        ped.update_behavior(Surroundings::empty(), &mut rng);
        assert_abs_diff_eq!(ped.agent().velocity.x, 0.8, epsilon = 1e-6);
        assert_eq!(ped.agent().acceleration(), Vec2::ZERO);

        for _ in 0..20 {
            ped.update_behavior(Surroundings::empty(), &mut rng);
        }
        assert_eq!(ped.agent().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_new_destination_resumes_travel() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut ped = walker(Vec2::new(1.0, 0.0));
        ped.update_behavior(Surroundings::empty(), &mut rng);
        assert!(ped.is_arrived());

        ped.set_destination(Vec2::new(200.0, 0.0));
        assert_eq!(ped.state(), NavState::Traveling);
        ped.update_behavior(Surroundings::empty(), &mut rng);
        assert_eq!(ped.state(), NavState::Traveling);
        assert!(ped.agent().acceleration().length() > 0.0);
    }

    #[test]
    fn test_retarget_then_resume() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut ped = walker(Vec2::new(1.0, 0.0));
        ped.update_behavior(Surroundings::empty(), &mut rng);
        assert!(ped.is_arrived());

        // Destination alone does not restart travel
        ped.retarget(Vec2::new(200.0, 0.0));
        assert_eq!(ped.destination(), Vec2::new(200.0, 0.0));
        assert!(ped.is_arrived());
        ped.agent_mut().clear_acceleration();
        ped.update_behavior(Surroundings::empty(), &mut rng);
        assert!(ped.is_arrived());
        assert_eq!(ped.agent().acceleration(), Vec2::ZERO);

        ped.resume();
        assert_eq!(ped.state(), NavState::Traveling);
        ped.update_behavior(Surroundings::empty(), &mut rng);
        assert_eq!(ped.state(), NavState::Traveling);
        assert!(ped.agent().acceleration().x > 0.0);
    }

    #[test]
    fn test_steering_force_brakes_on_degenerate_heading() {
        let ped = pedestrian(Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(100.0, 0.0), PedestrianConfig::default());
        let force = ped.steering_force(Vec2::ZERO);
        assert_abs_diff_eq!(force.x, -0.1, epsilon = 1e-6);

        let force = ped.steering_force(Vec2::Y);
        assert!(force.length() <= AgentConfig::pedestrian().max_force + 1e-6);
    }

    #[test]
    fn test_coincident_everything_is_total() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut ped = pedestrian(Vec2::ZERO, Vec2::ZERO, Vec2::new(50.0, 0.0), PedestrianConfig::default());
        let obstacle = Obstacle::new(Vec2::ZERO, 4.0).unwrap();
        let peers = [ped.agent().snapshot(), ped.agent().snapshot()];
        ped.update_behavior(Surroundings::new(&[obstacle], &peers), &mut rng);
        assert!(ped.agent().acceleration().is_finite());
    }
}
