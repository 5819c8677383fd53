//! # cascade CLI entry point
//!
//! Parses command-line arguments, loads the layered configuration and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cascade_cli::commands::{CheckArgs, PlanArgs, run_check, run_plan};
use cascade_cli::config::{Config, Overrides};

/// Synthesizes validators from type schemas and runs them.
#[derive(Parser, Debug)]
#[command(name = "cascade", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file [default: ./cascade.toml].
    #[arg(long, global = true, env = "CASCADE_CONFIG")]
    config: Option<PathBuf>,

    /// Report absent non-nullable members.
    #[arg(long, global = true)]
    strict_presence: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile validator plans and print or write them.
    Plan(PlanArgs),

    /// Validate one instance and print its violations.
    Check(CheckArgs),
}

impl Cli {
    fn overrides(&self) -> Overrides {
        let mut overrides = Overrides {
            strict_presence: self.strict_presence.then_some(true),
            log_level: verbosity_filter(self.verbose).map(str::to_owned),
            ..Overrides::default()
        };
        if let Commands::Check(args) = &self.command {
            overrides.fail_fast = args.fail_fast.then_some(true);
            overrides.format = args.format;
        }
        overrides
    }
}

fn verbosity_filter(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn init_tracing(config: &Config) {
    let filter = config
        .log_level
        .as_deref()
        .map(EnvFilter::try_new)
        .and_then(Result::ok)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref(), &cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(2);
        }
    };
    init_tracing(&config);
    tracing::debug!(?config, "configuration loaded");

    let result = match &cli.command {
        Commands::Plan(args) => run_plan(args, &config),
        Commands::Check(args) => run_check(args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
