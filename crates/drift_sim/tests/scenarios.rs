//! End-to-end scenario tests
//!
//! Every stock scenario is run headless for a few hundred ticks and checked
//! against the properties that must hold for any seed.

use drift_ai::{Behavior, Vec2};
use drift_sim::*;

fn small_config(seed: u64) -> SimConfig {
    let mut config = SimConfig::default().with_seed(seed);
    config.boids.num_agents = 40;
    config.pedestrians.num_agents = 12;
    config
}

fn positions(scenario: &dyn Scenario) -> Vec<Vec2> {
    scenario.agents().iter().map(|a| a.position).collect()
}

#[test]
fn same_seed_same_run() {
    let config = small_config(17);
    for kind in ScenarioKind::ALL {
        let mut first = kind.build(&config).unwrap();
        let mut second = kind.build(&config).unwrap();
        first.run(150);
        second.run(150);
        assert_eq!(positions(first.as_ref()), positions(second.as_ref()), "{} diverged", kind);
    }
}

#[test]
fn different_seeds_differ() {
    let mut first = ScenarioKind::Boids.build(&small_config(1)).unwrap();
    let mut second = ScenarioKind::Boids.build(&small_config(2)).unwrap();
    first.run(10);
    second.run(10);
    assert_ne!(positions(first.as_ref()), positions(second.as_ref()));
}

#[test]
fn speeds_stay_bounded() {
    let config = small_config(5);
    let limits = [
        (ScenarioKind::Boids, config.boids.agent.max_speed),
        (ScenarioKind::Pedestrians, config.pedestrians.agent.max_speed),
        (
            ScenarioKind::Pursuit,
            config.pursuit.pursuers.agent.max_speed.max(config.pursuit.evader.agent.max_speed),
        ),
    ];
    for (kind, max_speed) in limits {
        let mut scenario = kind.build(&config).unwrap();
        for _ in 0..300 {
            scenario.step();
            for agent in scenario.agents() {
                assert!(
                    agent.velocity.length() <= max_speed + 1e-4,
                    "{} agent exceeded max speed: {}",
                    kind,
                    agent.velocity.length()
                );
                assert!(agent.position.is_finite());
            }
        }
    }
}

#[test]
fn agents_stay_in_world() {
    let config = small_config(9).with_world(300.0, 200.0);
    for kind in ScenarioKind::ALL {
        let mut scenario = kind.build(&config).unwrap();
        for _ in 0..400 {
            scenario.step();
            let bounds = scenario.bounds();
            assert!(scenario.agents().iter().all(|a| bounds.contains(a.position)));
        }
    }
}

#[test]
fn trails_are_capped() {
    let mut scenario = ScenarioKind::Boids.build(&small_config(3)).unwrap();
    scenario.run(200);
    for agent in scenario.agents() {
        assert!(agent.trail.len() <= drift_ai::TRAIL_CAPACITY);
    }
}

#[test]
fn tick_counter_advances() {
    let mut scenario = ScenarioKind::Pursuit.build(&small_config(0)).unwrap();
    assert_eq!(scenario.tick(), 0);
    scenario.run(25);
    assert_eq!(scenario.tick(), 25);
    assert!(scenario.status().contains("tick 25"));
}

#[test]
fn empty_flock_is_fine() {
    let mut config = small_config(4);
    config.boids.num_agents = 0;
    let mut scenario = BoidsScenario::new(&config).unwrap();
    scenario.run(10);
    assert!(scenario.agents().is_empty());
    assert_eq!(scenario.mean_speed(), 0.0);
}

#[test]
fn lone_boid_keeps_its_velocity() {
    let mut config = small_config(4);
    config.boids.num_agents = 1;
    let mut scenario = BoidsScenario::new(&config).unwrap();
    let before = scenario.boids()[0].agent().velocity;
    scenario.run(50);
    let after = scenario.boids()[0].agent().velocity;
    assert!((after - before).length() < 1e-5);
}

#[test]
fn lone_pedestrian_keeps_arriving() {
    let mut config = small_config(11);
    config.pedestrians.num_agents = 1;
    config.pedestrians.obstacles.count = 0;
    let mut scenario = PedestrianScenario::new(&config).unwrap();
    scenario.run(3_000);
    assert!(scenario.arrivals() >= 1);

    // Reassignment happens in the arrival tick
    assert!(!scenario.pedestrians()[0].is_arrived());
}

#[test]
fn pedestrians_go_direct_without_samples() {
    let mut config = small_config(12);
    config.pedestrians.num_agents = 1;
    config.pedestrians.obstacles.count = 0;
    config.pedestrians.navigation.fov_samples = 0;
    let mut scenario = PedestrianScenario::new(&config).unwrap();
    scenario.run(3_000);
    assert!(scenario.arrivals() >= 1);
}

#[test]
fn obstacles_placed_in_central_region() {
    let mut config = small_config(6);
    config.pedestrians.obstacles.count = 20;
    let scenario = PedestrianScenario::new(&config).unwrap();
    assert_eq!(scenario.obstacles().len(), 20);
    for obstacle in scenario.obstacles() {
        let p = obstacle.position();
        assert!(p.x >= 80.0 && p.x <= 720.0);
        assert!(p.y >= 60.0 && p.y <= 540.0);
        assert!(obstacle.radius() >= 10.0 && obstacle.radius() <= 18.0);
    }
}

#[test]
fn wide_contact_margin_touches_every_pursuer() {
    let mut config = small_config(8);
    config.pursuit.contact_margin = 2_000.0;
    let mut scenario = PursuitScenario::new(&config).unwrap();
    scenario.step();
    assert_eq!(scenario.contacts().len(), config.pursuit.pursuers.num_agents);
    assert_eq!(scenario.total_contacts(), config.pursuit.pursuers.num_agents as u64);
}

#[test]
fn pursuit_roster() {
    let config = small_config(8);
    let scenario = PursuitScenario::new(&config).unwrap();
    let agents = scenario.agents();
    assert_eq!(agents.len(), 1 + config.pursuit.pursuers.num_agents);
    assert_eq!(agents[0].color, drift_ai::ColorTag::Red);
    assert!(agents[1..].iter().all(|a| a.color == drift_ai::ColorTag::Blue));
}

#[test]
fn invalid_config_is_rejected() {
    let config = SimConfig::default().with_world(-1.0, 600.0);
    for kind in ScenarioKind::ALL {
        assert!(matches!(kind.build(&config), Err(SimError::Config(_))));
    }
}
