//! Scan Command - fuzz a running service and gate on the findings

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use vulnera_core::config::{FuzzConfig, Validate};
use vulnera_core::domain::FindingSeverity;
use vulnera_fuzz::FuzzGateModule;
use vulnera_fuzz::application::ScanResult;
use vulnera_fuzz::domain::Finding;
use vulnera_fuzz::infrastructure::{ScanSummary, format_report, write_json_report};

use crate::cli::Cli;
use crate::cli::context::CliContext;
use crate::cli::exit_codes;
use crate::cli::output::OutputFormat;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// OpenAPI document (file or directory); fetched from the service when omitted
    #[arg(long)]
    pub spec: Option<PathBuf>,

    /// Base URL of the service under test
    #[arg(long, env = "FUZZGATE_BASE_URL")]
    pub base_url: Option<String>,

    /// Maximum fuzz cases per endpoint
    #[arg(long)]
    pub max_cases: Option<usize>,

    /// Fail the gate at or above this severity (critical, high, medium, low)
    #[arg(long)]
    pub fail_on: Option<FindingSeverity>,

    /// Write the JSON report to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Cases of one endpoint kept in flight at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Skip endpoints whose path starts with this prefix
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,
}

impl ScanArgs {
    /// Configured values with command-line overrides applied
    fn apply(&self, base: &FuzzConfig) -> FuzzConfig {
        let mut config = base.clone();
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(max_cases) = self.max_cases {
            config.max_cases = max_cases;
        }
        if let Some(fail_on) = self.fail_on {
            config.fail_on = fail_on;
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_seconds = timeout;
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrency = concurrency;
        }
        config.exclude_paths.extend(self.exclude.iter().cloned());
        config
    }
}

/// Machine-readable scan output
#[derive(Debug, Serialize)]
struct ScanReport<'a> {
    passed: bool,
    cancelled: bool,
    threshold: FindingSeverity,
    summary: ScanSummary,
    findings: &'a [Finding],
}

/// Run the scan command
pub async fn run(ctx: &CliContext, _cli: &Cli, args: &ScanArgs) -> Result<i32> {
    let start = std::time::Instant::now();

    let config = args.apply(&ctx.config.fuzz);
    if let Err(e) = config.validate() {
        ctx.output.error(&format!("Invalid configuration: {}", e));
        return Ok(exit_codes::CONFIG_ERROR);
    }

    let spec = args.spec.as_deref().map(|p| ctx.resolve(p));
    if let Some(path) = spec.as_ref().filter(|p| !p.exists()) {
        ctx.output
            .error(&format!("Spec path does not exist: {}", path.display()));
        return Ok(exit_codes::CONFIG_ERROR);
    }

    ctx.output
        .header(&format!("FuzzGate scanning {} ...", config.base_url));

    let token = CancellationToken::new();
    let interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping scan");
            interrupt.cancel();
        }
    });

    let module = FuzzGateModule::with_config(&config);
    let result = match module.scan(spec.as_deref(), &token).await {
        Ok(result) => result,
        Err(e) => {
            ctx.output.error(&format!("Scan failed: {}", e));
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    let report_path = args.output.as_deref().map(|p| ctx.resolve(p));
    if let Some(path) = &report_path {
        if let Err(e) = write_json_report(path, &result.findings) {
            ctx.output.error(&format!("Failed to write report: {}", e));
            return Ok(exit_codes::INTERNAL_ERROR);
        }
    }

    match ctx.output.format() {
        OutputFormat::Json => {
            ctx.output.json(&ScanReport {
                passed: result.passed,
                cancelled: result.cancelled,
                threshold: result.threshold,
                summary: result.summary(),
                findings: &result.findings,
            })?;
        }
        OutputFormat::Table => {
            print_table(ctx, &result, start.elapsed());
            if let Some(path) = &report_path {
                ctx.output
                    .info(&format!("\n\u{1f4c4} Report saved to {}", path.display()));
            }
            if result.blocks_merge() {
                ctx.output.error(&format!(
                    "FuzzGate: merge blocked due to findings at or above {}!",
                    result.threshold
                ));
            }
        }
    }

    Ok(exit_code_for(&result))
}

fn print_table(ctx: &CliContext, result: &ScanResult, elapsed: std::time::Duration) {
    if result.findings.is_empty() {
        ctx.output.success("No issues found!");
    } else {
        ctx.output.warn(&format!(
            "{} issues found:\n\n{}",
            result.findings.len(),
            format_report(&result.findings)
        ));
    }

    let summary = result.summary();
    ctx.output.print(&format!(
        "\nSummary: {} total ({} critical, {} high, {} medium, {} low)",
        summary.total_findings, summary.critical, summary.high, summary.medium, summary.low
    ));
    ctx.output.print(&format!(
        "Scanned {} endpoints with {} cases in {:.2}s",
        summary.endpoints_scanned,
        summary.cases_executed,
        elapsed.as_secs_f64()
    ));

    if result.cancelled {
        ctx.output.warn("Scan cancelled before completion");
    }
}

fn exit_code_for(result: &ScanResult) -> i32 {
    if result.blocks_merge() {
        exit_codes::FINDINGS_ABOVE_THRESHOLD
    } else if result.cancelled {
        exit_codes::CANCELLED
    } else {
        exit_codes::SUCCESS
    }
}
