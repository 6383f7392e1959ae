// Demonstration: load a household schedule and compare baseline agents.
//
// Build/run from this repo root:
//   RUST_LOG=hearth=debug cargo run --example oracle_demo -- --schedule data/house_schedule.json --episodes 20

use std::env;
use std::sync::Arc;

use hearth::rl::{
    Agent, EnvConfig, EvaluationMetrics, RandomAgent, ScheduleAgent, ScheduleEnvironment,
};
use hearth::{PointInTime, Policy};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let path = arg_value(&args, "--schedule").unwrap_or("data/house_schedule.json");
    let episodes: usize = arg_value(&args, "--episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);
    let minutes_per_step: u32 = arg_value(&args, "--step")
        .and_then(|s| s.parse().ok())
        .unwrap_or(15);

    let policy = match Policy::from_path(path) {
        Ok(policy) => Arc::new(policy),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };

    println!("Devices ({}):", policy.device_count());
    for (device, name) in policy.device_names().iter().enumerate() {
        let hours = policy
            .weekly_on_time(device)
            .map(|h| h.value())
            .unwrap_or(0.0);
        println!("  [{:>2}] {:<20} {:>5.1} h/week", device, name, hours);
    }

    if let Some(now) = PointInTime::new(0, 7, 0) {
        let flags: String = policy
            .expected_flags(now)
            .iter()
            .map(|on| if on { '1' } else { '0' })
            .collect();
        println!("Expected at {}: {}", now, flags);
    }

    let config = EnvConfig {
        episode_horizon: 96,
        minutes_per_step,
        seed: 1,
    };
    let mut env = match ScheduleEnvironment::new(policy.clone(), config.clone()) {
        Ok(env) => env,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };
    println!("Action space: {} actions", env.action_space().len());

    let mut agents: Vec<Box<dyn Agent>> = vec![
        Box::new(RandomAgent::new(config.seed)),
        Box::new(ScheduleAgent::new(policy, config.minutes_per_step)),
    ];
    for agent in agents.iter_mut() {
        let metrics = EvaluationMetrics::evaluate(&mut env, agent.as_mut(), episodes);
        println!("Agent: {}", agent.name());
        println!("{}", metrics);
    }
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
