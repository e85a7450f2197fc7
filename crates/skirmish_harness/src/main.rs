//! Skirmish - Headless Match Runner
//!
//! Runs a scripted bot match over the in-process relay and prints a
//! JSON report.
//!
//! # Usage
//!
//! ```bash
//! # Two bots, 600 ticks, one late joiner
//! cargo run -p skirmish_harness
//!
//! # Bigger room, custom tuning, report to a file
//! cargo run -p skirmish_harness -- --bots 4 --ticks 2000 \
//!     --config tuning.ron --output report.json
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skirmish_core::config::MatchConfig;
use skirmish_harness::{MatchRunner, Result, Scenario};

#[derive(Parser)]
#[command(name = "skirmish_harness")]
#[command(about = "Headless bot match for replication verification")]
#[command(version)]
struct Args {
    /// Number of bots joining at tick zero.
    #[arg(long, default_value_t = 2)]
    bots: u8,

    /// Ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Seed for bot RNGs.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Tick at which one extra bot joins. Pass --no-late-join to skip.
    #[arg(long, default_value_t = 200)]
    late_join_tick: u64,

    /// Disable the late joiner.
    #[arg(long)]
    no_late_join: bool,

    /// RON match config file. Defaults to built-in tuning.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the JSON report here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => MatchConfig::from_ron_str(&std::fs::read_to_string(path)?)?,
        None => MatchConfig::default(),
    };

    let scenario = Scenario {
        bots: args.bots,
        ticks: args.ticks,
        seed: args.seed,
        late_join_tick: (!args.no_late_join).then_some(args.late_join_tick),
        ..Scenario::default()
    };

    tracing::info!(bots = scenario.bots, ticks = scenario.ticks, "starting match");
    let report = MatchRunner::new(scenario, config)?.run()?;
    let json = report.to_json_string()?;

    match &args.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
