//! Command-line entry point: runs the disaster relief dispatch simulation
//! against its built-in demo world and prints the accumulated statistics
//! ledger. Real deployments would load a graph from operational data; that
//! construction step is out of scope for this simulator (see `sim_core`'s
//! crate docs), so the CLI always runs the same scenario fixture, configured
//! by flags or an override file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use sim_core::config::SimConfig;
use sim_core::scenario;
use sim_core::simulation::Simulation;
use sim_core::stats::StatsLedger;

/// Runs one simulation against the built-in demo world.
#[derive(Parser, Debug)]
#[command(name = "sim_cli", version, about)]
struct Cli {
    /// JSON file overriding any subset of the recognized configuration
    /// options, applied before any flag below.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Raise the log level to debug.
    #[arg(short, long)]
    verbose: bool,

    #[arg(long)]
    num_cycles: Option<u32>,
    #[arg(long)]
    spawn_prob_event: Option<f64>,
    #[arg(long)]
    weather_tick_period: Option<u32>,
    #[arg(long)]
    refuel_trigger_fraction: Option<f64>,
    #[arg(long)]
    refuel_safety_fraction: Option<f64>,
    #[arg(long)]
    fuel_safety_margin: Option<f64>,
    #[arg(long)]
    event_failure_prob: Option<f64>,
    #[arg(long)]
    max_distance_km: Option<f64>,
    #[arg(long)]
    selector_trials: Option<u32>,
    /// Three comma-separated weights for (execution time, route time, route cost).
    #[arg(long, value_name = "EXEC,ROUTE,COST")]
    selector_weights: Option<String>,
    #[arg(long)]
    rng_seed: Option<u64>,
}

/// Mirrors `SimConfig` field-for-field; every field is optional so a partial
/// override file only touches what it names.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
struct ConfigOverride {
    num_cycles: Option<u32>,
    spawn_prob_event: Option<f64>,
    weather_tick_period: Option<u32>,
    refuel_trigger_fraction: Option<f64>,
    refuel_safety_fraction: Option<f64>,
    fuel_safety_margin: Option<f64>,
    event_failure_prob: Option<f64>,
    max_distance_km: Option<f64>,
    selector_trials: Option<u32>,
    selector_weights: Option<(f64, f64, f64)>,
    rng_seed: Option<u64>,
}

fn apply_override(mut config: SimConfig, over: ConfigOverride) -> SimConfig {
    if let Some(v) = over.num_cycles {
        config.num_cycles = v;
    }
    if let Some(v) = over.spawn_prob_event {
        config.spawn_prob_event = v;
    }
    if let Some(v) = over.weather_tick_period {
        config.weather_tick_period = v;
    }
    if let Some(v) = over.refuel_trigger_fraction {
        config.refuel_trigger_fraction = v;
    }
    if let Some(v) = over.refuel_safety_fraction {
        config.refuel_safety_fraction = v;
    }
    if let Some(v) = over.fuel_safety_margin {
        config.fuel_safety_margin = v;
    }
    if let Some(v) = over.event_failure_prob {
        config.event_failure_prob = v;
    }
    if let Some(v) = over.max_distance_km {
        config.max_distance_km = v;
    }
    if let Some(v) = over.selector_trials {
        config.selector_trials = v;
    }
    if let Some(v) = over.selector_weights {
        config.selector_weights = v;
    }
    if let Some(v) = over.rng_seed {
        config.rng_seed = v;
    }
    config
}

fn apply_cli_flags(mut config: SimConfig, cli: &Cli) -> Result<SimConfig, String> {
    if let Some(v) = cli.num_cycles {
        config.num_cycles = v;
    }
    if let Some(v) = cli.spawn_prob_event {
        config.spawn_prob_event = v;
    }
    if let Some(v) = cli.weather_tick_period {
        config.weather_tick_period = v;
    }
    if let Some(v) = cli.refuel_trigger_fraction {
        config.refuel_trigger_fraction = v;
    }
    if let Some(v) = cli.refuel_safety_fraction {
        config.refuel_safety_fraction = v;
    }
    if let Some(v) = cli.fuel_safety_margin {
        config.fuel_safety_margin = v;
    }
    if let Some(v) = cli.event_failure_prob {
        config.event_failure_prob = v;
    }
    if let Some(v) = cli.max_distance_km {
        config.max_distance_km = v;
    }
    if let Some(v) = cli.selector_trials {
        config.selector_trials = v;
    }
    if let Some(spec) = &cli.selector_weights {
        let parts: Vec<&str> = spec.split(',').collect();
        if parts.len() != 3 {
            return Err(format!(
                "--selector-weights expects 3 comma-separated values, got `{spec}`"
            ));
        }
        let mut weights = [0.0; 3];
        for (slot, part) in weights.iter_mut().zip(parts.iter()) {
            *slot = part
                .trim()
                .parse::<f64>()
                .map_err(|err| format!("--selector-weights: {err}"))?;
        }
        config.selector_weights = (weights[0], weights[1], weights[2]);
    }
    if let Some(v) = cli.rng_seed {
        config.rng_seed = v;
    }
    Ok(config)
}

fn print_report(stats: &StatsLedger) {
    println!("=== simulation report ===");
    println!("deliveries: {}", stats.deliveries);
    println!("total failures: {}", stats.total_failures());

    let mut causes: Vec<_> = stats.failures_by_cause.iter().collect();
    causes.sort_by_key(|(cause, _)| cause.to_string());
    for (cause, count) in causes {
        println!("  {cause}: {count}");
    }

    println!(
        "mean delivery time: {:.2}h",
        stats.mean_delivery_time_hours()
    );
    println!(
        "average remaining window at delivery: {:.2}h",
        stats.average_remaining_window_hours()
    );
    println!("critical window deliveries: {}", stats.critical_window_events);
    println!("fuel refueled (total): {:.1}", stats.fuel_refueled);

    let mut regions: Vec<_> = stats.refuels_by_region.iter().collect();
    regions.sort_by_key(|(region, _)| region.to_string());
    for (region, count) in regions {
        println!("  refuels in {region}: {count}");
    }

    let mut kinds: Vec<_> = stats.per_vehicle_kind.iter().collect();
    kinds.sort_by_key(|(kind, _)| format!("{kind:?}"));
    for (kind, outcomes) in kinds {
        println!(
            "  {kind:?}: {} successes, {} failures",
            outcomes.successes, outcomes.failures
        );
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = scenario::default_config();

    if let Some(path) = &cli.config {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<ConfigOverride>(&contents) {
                Ok(over) => config = apply_override(config, over),
                Err(err) => {
                    tracing::error!("failed to parse config file {}: {err}", path.display());
                    return ExitCode::FAILURE;
                }
            },
            Err(err) => {
                tracing::error!("failed to read config file {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        }
    }

    config = match apply_cli_flags(config, &cli) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let (graph, vehicles, zones) = scenario::demo_world();
    let mut sim = match Simulation::new(graph, vehicles, zones, config) {
        Ok(sim) => sim,
        Err(err) => {
            tracing::error!("configuration rejected: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(cycles = sim.tick(), "starting simulation run");
    sim.run();
    print_report(sim.stats());
    ExitCode::SUCCESS
}
