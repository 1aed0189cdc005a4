//! Finding reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::entities::{Finding, FindingCategory, FindingSeverity};

/// Serialized input is cut to this many characters in the text report
const INPUT_PREVIEW_CHARS: usize = 120;

/// Report error
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn severity_icon(severity: FindingSeverity) -> &'static str {
    match severity {
        FindingSeverity::Critical => "\u{1f534}",
        FindingSeverity::High => "\u{1f7e0}",
        _ => "\u{26aa}",
    }
}

fn input_preview(finding: &Finding) -> String {
    let json = serde_json::to_string(&finding.input_data)
        .unwrap_or_else(|_| format!("{:?}", finding.input_data));
    json.chars().take(INPUT_PREVIEW_CHARS).collect()
}

/// Human-readable report, three lines per finding
pub fn format_report(findings: &[Finding]) -> String {
    let mut lines = Vec::with_capacity(findings.len() * 3);
    for finding in findings {
        lines.push(format!(
            "{} [{}] {} {}",
            severity_icon(finding.severity),
            finding.severity.as_str().to_uppercase(),
            finding.method,
            finding.endpoint
        ));
        lines.push(format!("   Input: {}", input_preview(finding)));
        lines.push(format!("   {}", finding.detail));
    }
    lines.join("\n")
}

/// Canonical JSON report: a pretty-printed array of findings
pub fn to_json_report(findings: &[Finding]) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(findings)?)
}

pub fn from_json_report(content: &str) -> Result<Vec<Finding>, ReportError> {
    Ok(serde_json::from_str(content)?)
}

pub fn write_json_report(path: &Path, findings: &[Finding]) -> Result<(), ReportError> {
    std::fs::write(path, to_json_report(findings)?)?;
    Ok(())
}

pub fn read_json_report(path: &Path) -> Result<Vec<Finding>, ReportError> {
    from_json_report(&std::fs::read_to_string(path)?)
}

/// Aggregate counts for one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total_findings: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub by_category: BTreeMap<String, usize>,
    pub endpoints_scanned: usize,
    pub cases_executed: usize,
    pub generated_at: DateTime<Utc>,
}

impl ScanSummary {
    pub fn from_findings(findings: &[Finding], endpoints_scanned: usize, cases_executed: usize) -> Self {
        let mut summary = Self {
            total_findings: findings.len(),
            critical: 0,
            high: 0,
            medium: 0,
            low: 0,
            by_category: BTreeMap::new(),
            endpoints_scanned,
            cases_executed,
            generated_at: Utc::now(),
        };

        for finding in findings {
            match finding.severity {
                FindingSeverity::Critical => summary.critical += 1,
                FindingSeverity::High => summary.high += 1,
                FindingSeverity::Medium => summary.medium += 1,
                FindingSeverity::Low => summary.low += 1,
            }
            *summary
                .by_category
                .entry(finding.category.as_str().to_string())
                .or_insert(0) += 1;
        }

        summary
    }

    pub fn count_for(&self, category: FindingCategory) -> usize {
        self.by_category.get(category.as_str()).copied().unwrap_or(0)
    }
}
