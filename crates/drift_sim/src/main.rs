//! Drift headless runner
//!
//! Runs one stock scenario and logs its progress.
//!
//! Usage: drift [boids|pedestrians|pursuit]
//!
//! Environment:
//! - `DRIFT_SCENARIO`: scenario when no argument is given (default `boids`)
//! - `DRIFT_CONFIG`: path to a TOML config file; an unreadable or invalid
//!   file aborts the run
//! - `DRIFT_TICKS`: number of ticks to run (default 200)
//! - `RUST_LOG`: log filter (default `info`)

use std::env;
use std::process;

use drift_sim::{Scenario, ScenarioKind, SimConfig};

const DEFAULT_TICKS: u64 = 200;

/// Ticks between progress reports
const REPORT_INTERVAL: u64 = 50;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        process::exit(1);
    }
}

fn run() -> drift_sim::Result<()> {
    let name = env::args()
        .nth(1)
        .or_else(|| env::var("DRIFT_SCENARIO").ok())
        .unwrap_or_else(|| "boids".to_string());
    let kind: ScenarioKind = name.parse()?;

    let config = load_config(env::var("DRIFT_CONFIG").ok().as_deref())?;
    let ticks = load_ticks();

    let mut scenario = kind.build(&config)?;
    log::info!("Running {} for {} ticks", scenario.name(), ticks);

    for _ in 0..ticks {
        scenario.step();
        if scenario.tick() % REPORT_INTERVAL == 0 {
            log::info!("{}", scenario.status());
        }
    }

    report(scenario.as_ref());
    Ok(())
}

/// Config from the file at `path`, or defaults when no path is set
fn load_config(path: Option<&str>) -> drift_sim::Result<SimConfig> {
    match path {
        Some(path) => SimConfig::load_from_file(path),
        None => {
            log::info!("DRIFT_CONFIG not set, using default configuration");
            Ok(SimConfig::default())
        }
    }
}

fn load_ticks() -> u64 {
    match env::var("DRIFT_TICKS") {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("Invalid DRIFT_TICKS '{}', using {}", value, DEFAULT_TICKS);
            DEFAULT_TICKS
        }),
        Err(_) => DEFAULT_TICKS,
    }
}

fn report(scenario: &dyn Scenario) {
    let agents = scenario.agents();
    let fastest = agents
        .iter()
        .map(|a| a.velocity.length())
        .fold(0.0_f32, f32::max);
    log::info!("Finished: {}", scenario.status());
    log::info!(
        "{} agents, {} obstacles, fastest speed {:.2}",
        agents.len(),
        scenario.obstacles().len(),
        fastest
    );
}
