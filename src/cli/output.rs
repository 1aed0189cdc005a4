//! Terminal output for CLI commands

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

/// Output format for CLI results
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report (default)
    #[default]
    Table,
    /// JSON output for machine processing
    Json,
}

/// Writes command output to stdout and errors to stderr
#[derive(Debug, Clone)]
pub struct OutputWriter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Section header, suppressed in quiet and JSON mode
    pub fn header(&self, title: &str) {
        if self.is_human() {
            println!("\u{1f50d} {}", title);
        }
    }

    pub fn info(&self, message: &str) {
        if self.is_human() {
            println!("{}", message);
        }
    }

    pub fn success(&self, message: &str) {
        if self.is_human() {
            println!("\u{2705} {}", message);
        }
    }

    pub fn warn(&self, message: &str) {
        if self.is_human() {
            println!("\u{26a0}\u{fe0f}  {}", message);
        }
    }

    /// Errors are always shown, on stderr
    pub fn error(&self, message: &str) {
        eprintln!("\u{274c} {}", message);
    }

    /// Raw text, shown unless quiet
    pub fn print(&self, message: &str) {
        if !self.quiet && self.format == OutputFormat::Table {
            println!("{}", message);
        }
    }

    /// Pretty JSON document on stdout, regardless of quiet
    pub fn json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn is_human(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Table
    }
}
