//! CLI entry point for the Tombs of Amascut simulator

use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;
use toa_sim::{
    config::{BossKind, ConfigError, LoadoutConfig, MeleeWeapon, DEFAULT_INVOCATION, DEFAULT_PATH},
    run_and_aggregate, AggregatedStats, SimError,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "toa-sim")]
#[command(version)]
#[command(about = "Monte Carlo simulator for Tombs of Amascut boss fights", long_about = None)]
struct Args {
    /// Boss to fight; all three when omitted
    #[arg(short, long, value_enum)]
    boss: Option<BossKind>,

    /// Number of fights per configuration
    #[arg(
        short = 'n',
        long,
        default_value_t = 1000,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    iterations: usize,

    /// Raid invocation level (multiple of 5)
    #[arg(short, long, default_value_t = DEFAULT_INVOCATION)]
    invocation: u32,

    /// Path level (0-6)
    #[arg(long, default_value_t = DEFAULT_PATH)]
    path: u32,

    /// Equip a Lightbearer
    #[arg(long)]
    lightbearer: bool,

    /// Bring surge potions
    #[arg(long)]
    surge_potions: bool,

    /// Bring liquid adrenaline
    #[arg(long)]
    liquid_adrenaline: bool,

    /// Run every on/off combination of the three consumable flags
    #[arg(long)]
    sweep: bool,

    /// Main melee weapon against Ba-Ba
    #[arg(long, value_enum, default_value = "fang")]
    melee: MeleeWeapon,

    /// Loadout file (YAML or JSON); overrides the loadout flags
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use parallel processing
    #[arg(short, long)]
    parallel: bool,

    /// Worker threads for parallel runs
    #[arg(long, default_value_t = num_cpus::get())]
    threads: usize,

    /// Base RNG seed, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Show timing information
    #[arg(short, long)]
    timing: bool,

    /// Log phase transitions (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Error loading config: {0}")]
    Config(#[from] ConfigError),
    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimError),
    #[error("Failed to start thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Results for one loadout
#[derive(Debug, Serialize)]
struct Report {
    config: LoadoutConfig,
    stats: AggregatedStats,
    #[serde(skip)]
    elapsed: Duration,
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loadouts to simulate, before sweeping
fn base_configs(args: &Args) -> Result<Vec<LoadoutConfig>, CliError> {
    if let Some(path) = &args.config {
        return Ok(vec![LoadoutConfig::from_file(path)?]);
    }

    let bosses = match args.boss {
        Some(boss) => vec![boss],
        None => BossKind::ALL.to_vec(),
    };
    let configs = bosses
        .into_iter()
        .map(|boss| LoadoutConfig {
            boss,
            invocation: args.invocation,
            path: args.path,
            lightbearer: args.lightbearer,
            surge_potions: args.surge_potions,
            liquid_adrenaline: args.liquid_adrenaline,
            melee: args.melee,
        })
        .collect::<Vec<_>>();
    for config in &configs {
        config.validate()?;
    }
    Ok(configs)
}

fn run(args: &Args) -> Result<Vec<Report>, CliError> {
    if args.parallel {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()?;
    }

    let mut configs = base_configs(args)?;
    if args.sweep {
        configs = configs.iter().flat_map(LoadoutConfig::flag_combinations).collect();
    }

    let mut reports = Vec::with_capacity(configs.len());
    for config in configs {
        let start = Instant::now();
        let stats = run_and_aggregate(&config, args.iterations, args.parallel, args.seed)?;
        let elapsed = start.elapsed();
        info!(
            boss = %config.boss,
            flags = %config.flags_label(),
            avg_ticks = stats.avg_ticks,
            elapsed_ms = elapsed.as_millis() as u64,
            "configuration finished"
        );
        reports.push(Report { config, stats, elapsed });
    }
    Ok(reports)
}

fn print_text(args: &Args, reports: &[Report]) {
    println!("=== Tombs of Amascut Simulation Results ===");
    println!("Iterations per configuration: {}", args.iterations);

    for report in reports {
        let config = &report.config;
        let stats = &report.stats;
        println!();
        println!(
            "--- {} (invocation {}, path {}) ---",
            config.boss, config.invocation, config.path
        );
        println!("Loadout: {}", config.flags_label());
        if config.boss == BossKind::Baba {
            println!("Melee: {:?}", config.melee);
        }
        println!("Average Ticks: {:.2} ± {:.2}", stats.avg_ticks, stats.std_ticks);
        println!("Tick Range: {} - {}", stats.min_ticks, stats.max_ticks);
        println!("Average Time: {:.2}s", stats.avg_seconds);

        if stats.spec_totals.is_empty() {
            println!("Special attacks: none");
        } else {
            println!("Special attacks (total / per fight):");
            for (weapon, total) in stats.spec_totals.uses() {
                let avg = stats.spec_averages.get(weapon).copied().unwrap_or(0.0);
                println!("  {:<18} {:>8} {:>8.2}", weapon, total, avg);
            }
        }

        if args.timing {
            let secs = report.elapsed.as_secs_f64();
            println!("Total time: {:.3}s", secs);
            println!("Per simulation: {:.3}ms", secs * 1000.0 / args.iterations as f64);
            println!("Simulations/sec: {:.0}", args.iterations as f64 / secs);
        }
    }
}

fn print_json(args: &Args, reports: &[Report], elapsed: Duration) -> Result<(), CliError> {
    let output = serde_json::json!({
        "iterations": args.iterations,
        "parallel": args.parallel,
        "seed": args.seed,
        "elapsed_seconds": elapsed.as_secs_f64(),
        "runs": reports,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let start = Instant::now();
    let result = run(&args).and_then(|reports| match args.output {
        OutputFormat::Text => {
            print_text(&args, &reports);
            Ok(())
        }
        OutputFormat::Json => print_json(&args, &reports, start.elapsed()),
    });

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["toa-sim"]).unwrap();
        assert_eq!(args.iterations, 1000);
        assert_eq!(args.invocation, DEFAULT_INVOCATION);
        assert_eq!(args.path, DEFAULT_PATH);
        assert!(args.boss.is_none());
    }

    #[test]
    fn test_iterations_must_be_positive() {
        assert!(Args::try_parse_from(["toa-sim", "-n", "0"]).is_err());
        let args = Args::try_parse_from(["toa-sim", "-n", "1"]).unwrap();
        assert_eq!(args.iterations, 1);
    }

    #[test]
    fn test_boss_alias() {
        let args = Args::try_parse_from(["toa-sim", "--boss", "ba-ba"]).unwrap();
        assert_eq!(args.boss, Some(BossKind::Baba));
    }
}
