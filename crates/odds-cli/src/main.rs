//! Command-line frontend for the combat odds engine.

mod commands;
mod montecarlo;
mod scenario;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "odds",
    about = "Exact hit point distributions for turn-based combat",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute outcome distributions for a scenario file
    Calc {
        /// JSON scenario with an attacker, a defender, and optional followups
        scenario: PathBuf,

        /// Print the outcomes as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Cross-check the engine against random simulation
    Validate {
        /// Scenario to check (default: random pairs)
        scenario: Option<PathBuf>,

        /// Random trials per pair
        #[arg(short, long, default_value_t = 20_000)]
        trials: u32,

        /// Seed for pair generation and sampling
        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        /// Number of random pairs when no scenario is given
        #[arg(short, long, default_value_t = 10)]
        pairs: u32,

        /// Largest accepted per-hp probability difference
        #[arg(long, default_value_t = 0.03)]
        tolerance: f64,
    },

    /// Time the engine on random fights
    Bench {
        /// Number of random fights
        #[arg(short, long, default_value_t = 1_000)]
        fights: u32,

        /// Seed for pair generation
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Calc { scenario, json } => commands::calc::run(&scenario, json),
        Commands::Validate {
            scenario,
            trials,
            seed,
            pairs,
            tolerance,
        } => commands::validate::run(scenario.as_deref(), trials, seed, pairs, tolerance),
        Commands::Bench { fights, seed } => commands::bench::run(fights, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
