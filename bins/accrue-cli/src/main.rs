//! accrue-cli — Command-line front end for the capitalization accrual engine.
//!
//! Evaluates the fixed-point power kernel, projects a compounded value over
//! an elapsed time, and replays simulation schedules from a config file.

mod config;
mod simulate;

use std::path::PathBuf;

use accrue_core::constants::DECIMAL;
use accrue_core::fixed::{format_fixed, parse_fixed};
use accrue_core::traits::CompoundingRate;
use accrue_core::types::CapitalizationState;
use accrue_core::{rpow, U256};
use accrue_keeper::CapitalizationKeeper;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::info;

use crate::config::SimulationConfig;

/// Compound capitalization accrual toolkit.
#[derive(Parser)]
#[command(name = "accrue-cli")]
#[command(version, about = "Fixed-point compound accrual calculator and simulator")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Raise a fixed-point value to an integer power.
    Rpow(RpowArgs),
    /// Compounded value of a rate after an elapsed time.
    Project(ProjectArgs),
    /// Replay a simulation schedule file, printing one JSON line per step.
    Simulate(SimulateArgs),
}

#[derive(Args)]
struct RpowArgs {
    /// Base as a decimal, e.g. 1.0001.
    #[arg(long)]
    base: String,

    /// Integer exponent.
    #[arg(long)]
    exp: u64,

    /// Treat the base as a raw scaled integer instead of a decimal.
    #[arg(long)]
    raw: bool,
}

#[derive(Args)]
struct ProjectArgs {
    /// Per-period rate as a decimal, e.g. 1.0001.
    #[arg(long)]
    rate: String,

    /// Capitalization period in seconds.
    #[arg(long)]
    period: u64,

    /// Seconds elapsed since the starting value was recorded.
    #[arg(long)]
    elapsed: u64,

    /// Starting value as a decimal.
    #[arg(long, default_value = "1")]
    initial: String,
}

#[derive(Args)]
struct SimulateArgs {
    /// Schedule file (TOML, JSON, or YAML).
    file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    match cli.command {
        Commands::Rpow(args) => cmd_rpow(args),
        Commands::Project(args) => cmd_project(args),
        Commands::Simulate(args) => cmd_simulate(args),
    }
}

fn cmd_rpow(args: RpowArgs) -> Result<()> {
    let base = if args.raw {
        args.base
            .parse::<U256>()
            .with_context(|| format!("invalid raw base {:?}", args.base))?
    } else {
        parse_fixed(&args.base).context("invalid base")?
    };

    let result = rpow(base, args.exp, DECIMAL).context("rpow failed")?;
    println!(
        "{}",
        json!({
            "base": format_fixed(base),
            "exp": args.exp,
            "value": format_fixed(result),
            "raw": result.to_string(),
        })
    );
    Ok(())
}

fn cmd_project(args: ProjectArgs) -> Result<()> {
    let rate = parse_fixed(&args.rate).context("invalid rate")?;
    let initial = parse_fixed(&args.initial).context("invalid initial value")?;

    let state = CapitalizationState {
        rate,
        period: args.period,
        last_update: 0,
        current_rate: initial,
    };
    let keeper = CapitalizationKeeper::from_state(state, args.elapsed)?;
    let periods = keeper.periods_elapsed(args.elapsed)?;
    let next_in = keeper.seconds_until_next(args.elapsed)?;
    let value = keeper
        .current_rate_at(args.elapsed)
        .context("projection overflowed")?;

    info!(periods, value = %value, "projected");
    println!(
        "{}",
        json!({
            "periods": periods,
            "next_capitalization_in": next_in,
            "value": format_fixed(value),
            "raw": value.to_string(),
        })
    );
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> Result<()> {
    let sim = SimulationConfig::load(&args.file)?;
    info!(steps = sim.steps.len(), file = %args.file.display(), "simulation loaded");

    let reports = simulate::run(&sim).context("simulation failed")?;
    for report in &reports {
        println!("{}", serde_json::to_string(report)?);
    }
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// `RUST_LOG` takes precedence over `level_str`. Pass `format = "json"` for
/// structured output; any other value selects human-readable text on stderr.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
