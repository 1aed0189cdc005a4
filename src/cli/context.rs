//! CLI Context - configuration and output shared by commands

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use vulnera_core::config::{Config, LoggingConfig};
use vulnera_core::init_tracing;

use crate::cli::Cli;
use crate::cli::output::OutputWriter;

/// Context for CLI operations
pub struct CliContext {
    /// Application configuration
    pub config: Arc<Config>,

    /// Output writer configured based on CLI flags
    pub output: OutputWriter,

    /// Base for relative paths given on the command line
    pub working_dir: PathBuf,
}

impl CliContext {
    /// Load configuration and install tracing from parsed CLI arguments
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = Self::load_config(cli.config.as_deref())?;

        init_tracing(&Self::logging_for(cli, &config.logging))
            .context("Failed to initialize logging")?;

        let output = OutputWriter::new(cli.format, cli.quiet);

        let working_dir =
            std::env::current_dir().context("Failed to determine current working directory")?;

        Ok(Self {
            config: Arc::new(config),
            output,
            working_dir,
        })
    }

    /// Load configuration from an explicit file or the layered defaults
    fn load_config(config_path: Option<&Path>) -> Result<Config> {
        match config_path {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display())),
            None => Config::load().context("Failed to load configuration"),
        }
    }

    /// `--verbose` and `--quiet` override the configured level
    fn logging_for(cli: &Cli, logging: &LoggingConfig) -> LoggingConfig {
        let mut logging = logging.clone();
        if cli.verbose {
            logging.level = "debug".to_string();
        } else if cli.quiet {
            logging.level = "error".to_string();
        }
        logging
    }

    /// Resolve a command-line path against the working directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }
}
