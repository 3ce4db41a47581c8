//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod check;
mod value;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, PfxConfig};
use crate::parser::HeuristicProfile;

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Environment variable holding the log filter (e.g. `PFX_LOG=debug`)
pub const LOG_ENV: &str = "PFX_LOG";

/// pfx - Parse and evaluate particle effect value strings
#[derive(Parser)]
#[command(name = "pfx")]
#[command(about = "pfx - Parse, evaluate and check particle effect value strings")]
#[command(version)]
pub struct Cli {
    /// Path to pfx.toml (default: discovered from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a value string and print its canonical form
    Parse {
        /// Value string, e.g. "[0.7 0.9]" or "1,95 0"
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,

        /// Strict mode: treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Heuristic profile for keyframe sequences
        #[arg(long, value_enum)]
        profile: Option<HeuristicProfile>,

        /// Read double ranges as box widths instead of random samples
        #[arg(long, conflicts_with = "tracks")]
        width: bool,

        /// Print separate lower-bound and width tracks
        #[arg(long)]
        tracks: bool,

        /// Seed for random formats
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Evaluate a value string as a curve over normalized time
    Eval {
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Time to evaluate at (repeatable)
        #[arg(long = "at", allow_hyphen_values = true)]
        at: Vec<f64>,

        /// Number of evenly spaced steps across [0, 1] when no --at is given
        #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..=10_000))]
        steps: u32,

        /// Seed for random formats
        #[arg(long)]
        seed: Option<u64>,

        /// Heuristic profile for keyframe sequences
        #[arg(long, value_enum)]
        profile: Option<HeuristicProfile>,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Resolve a value string as a spawn-time range, repeatedly
    Sample {
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Number of samples to draw
        #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..=1_000_000))]
        count: u32,

        /// Seed for random formats
        #[arg(long)]
        seed: Option<u64>,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Compile and check effect definition files (JSON5)
    Check {
        /// Effect files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Strict mode: treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Heuristic profile for keyframe sequences
        #[arg(long, value_enum)]
        profile: Option<HeuristicProfile>,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Install the stderr log subscriber.
///
/// `-v` flags win over `PFX_LOG`; without either only warnings are shown.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn resolve_config(path: Option<&std::path::Path>, overrides: CliOverrides) -> Result<PfxConfig, ExitCode> {
    match load_config(path) {
        Ok(mut config) => {
            merge_cli_overrides(&mut config, &overrides);
            Ok(config)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let overrides = match &cli.command {
        Commands::Parse { profile, strict, seed, .. } => {
            CliOverrides { profile: *profile, strict: strict.then_some(true), seed: *seed }
        }
        Commands::Eval { profile, seed, .. } => CliOverrides { profile: *profile, strict: None, seed: *seed },
        Commands::Sample { seed, .. } => CliOverrides { profile: None, strict: None, seed: *seed },
        Commands::Check { profile, strict, .. } => {
            CliOverrides { profile: *profile, strict: strict.then_some(true), seed: None }
        }
    };
    let config = match resolve_config(cli.config.as_deref(), overrides) {
        Ok(config) => config,
        Err(code) => return code,
    };

    match cli.command {
        Commands::Parse { value, json, width, tracks, .. } => {
            value::run_parse(&value, &config, value::Reading::from_flags(width, tracks), json)
        }
        Commands::Eval { value, at, steps, json, .. } => value::run_eval(&value, &config, &at, steps, json),
        Commands::Sample { value, count, json, .. } => value::run_sample(&value, &config, count, json),
        Commands::Check { files, json, .. } => check::run_check(&files, &config, json),
    }
}
