//! FuzzGate CLI - pre-merge API fuzzing from the command line
//!
//! Runs the fuzz engine against a running service and turns the gate verdict
//! into a process exit code for CI pipelines.

mod commands;
mod context;
mod output;

pub use context::CliContext;
pub use output::{OutputFormat, OutputWriter};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// FuzzGate - fuzz your API endpoints before merging
#[derive(Parser, Debug)]
#[command(
    name = "fuzzgate",
    version,
    about = "Pre-merge API fuzz gate",
    long_about = "FuzzGate discovers the endpoints of a running HTTP service, sends boundary and \
                  malicious values to every parameter and fails the build when a finding meets \
                  the severity threshold.\n\n\
                  Exit codes: 0 pass, 1 findings at or above threshold, 2 configuration or \
                  discovery error, 99 internal error, 130 cancelled."
)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fuzz every endpoint of a running service
    #[command(visible_alias = "s")]
    Scan(commands::scan::ScanArgs),
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
    context: CliContext,
}

impl CliApp {
    /// Create a new CLI application instance
    pub fn new() -> anyhow::Result<Self> {
        let cli = Cli::parse();
        let context = CliContext::new(&cli)?;
        Ok(Self { cli, context })
    }

    /// Run the CLI application
    pub async fn run(self) -> anyhow::Result<i32> {
        let exit_code = match self.cli.command {
            Commands::Scan(ref args) => commands::scan::run(&self.context, &self.cli, args).await,
        }?;

        Ok(exit_code)
    }
}

/// Exit codes for CI integration
pub mod exit_codes {
    /// Gate passed
    pub const SUCCESS: i32 = 0;
    /// Findings at or above the severity threshold
    pub const FINDINGS_ABOVE_THRESHOLD: i32 = 1;
    /// Configuration, input or discovery error
    pub const CONFIG_ERROR: i32 = 2;
    /// Internal error
    pub const INTERNAL_ERROR: i32 = 99;
    /// Interrupted before the scan finished
    pub const CANCELLED: i32 = 130;
}
