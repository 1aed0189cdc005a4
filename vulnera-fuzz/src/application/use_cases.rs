//! API fuzzing use cases

use futures::stream::{self, StreamExt};
use std::pin::pin;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};
use vulnera_core::config::{FuzzConfig, Validate};

use crate::domain::entities::{Finding, FindingSeverity};
use crate::domain::value_objects::Endpoint;
use crate::infrastructure::classifier::ResponseClassifier;
use crate::infrastructure::client::ServiceClient;
use crate::infrastructure::discovery::{DiscoveryError, EndpointCatalog, ServiceDescription};
use crate::infrastructure::dispatcher::Dispatcher;
use crate::infrastructure::generator::CaseGenerator;
use crate::infrastructure::report::ScanSummary;

/// Result of one fuzz scan
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Findings in discovery order
    pub findings: Vec<Finding>,
    pub endpoints_scanned: usize,
    pub cases_executed: usize,
    /// Threshold the verdict was computed against
    pub threshold: FindingSeverity,
    /// Gate verdict; a cancelled scan never passes
    pub passed: bool,
    /// The scan was stopped before every endpoint was fuzzed
    pub cancelled: bool,
}

impl ScanResult {
    /// Whether the findings gathered so far meet the threshold
    pub fn blocks_merge(&self) -> bool {
        !SeverityGate::passes(&self.findings, self.threshold)
    }

    /// Most severe finding present
    pub fn worst_severity(&self) -> Option<FindingSeverity> {
        self.findings.iter().map(|f| f.severity).min()
    }

    pub fn summary(&self) -> ScanSummary {
        ScanSummary::from_findings(&self.findings, self.endpoints_scanned, self.cases_executed)
    }
}

/// Pass/fail decision against a severity threshold
pub struct SeverityGate;

impl SeverityGate {
    /// Fails when any finding is as severe as, or more severe than,
    /// `threshold`. An empty finding set always passes.
    pub fn passes(findings: &[Finding], threshold: FindingSeverity) -> bool {
        findings
            .iter()
            .map(|f| f.severity)
            .min()
            .is_none_or(|worst| !worst.meets(threshold))
    }
}

/// Use case for fuzzing every endpoint of a service
pub struct FuzzScanUseCase {
    config: FuzzConfig,
    dispatcher: Dispatcher,
}

impl FuzzScanUseCase {
    pub fn new(config: &FuzzConfig, client: Arc<dyn ServiceClient>) -> Self {
        Self {
            config: config.clone(),
            dispatcher: Dispatcher::new(client, config.request_timeout()),
        }
    }

    pub fn config(&self) -> &FuzzConfig {
        &self.config
    }

    /// Run the full endpoint × case matrix
    pub async fn execute(
        &self,
        description: &dyn ServiceDescription,
    ) -> Result<ScanResult, ScanError> {
        self.execute_with_cancellation(description, &CancellationToken::new())
            .await
    }

    /// Run the scan, checking `token` between cases and between endpoints.
    /// A cancelled scan returns the findings gathered so far.
    #[instrument(
        skip_all,
        fields(max_cases = self.config.max_cases, fail_on = %self.config.fail_on)
    )]
    pub async fn execute_with_cancellation(
        &self,
        description: &dyn ServiceDescription,
        token: &CancellationToken,
    ) -> Result<ScanResult, ScanError> {
        self.config
            .validate()
            .map_err(|e| ScanError::Configuration(e.to_string()))?;

        let endpoints = EndpointCatalog::extract(description).await.map_err(|e| {
            error!(error = %e, "Endpoint discovery failed");
            ScanError::Discovery(e)
        })?;

        let endpoints: Vec<Endpoint> = endpoints
            .into_iter()
            .filter(|endpoint| {
                let excluded = self.config.is_excluded(&endpoint.path);
                if excluded {
                    debug!(endpoint = %endpoint, "Endpoint excluded by configuration");
                }
                !excluded
            })
            .collect();

        info!(endpoint_count = endpoints.len(), "Starting API fuzz scan");

        let mut findings = Vec::new();
        let mut endpoints_scanned = 0;
        let mut cases_executed = 0;
        let mut cancelled = false;

        'endpoints: for endpoint in &endpoints {
            if token.is_cancelled() {
                cancelled = true;
                break;
            }

            let cases = CaseGenerator::generate_capped(&endpoint.params, self.config.max_cases);
            debug!(endpoint = %endpoint, case_count = cases.len(), "Fuzzing endpoint");

            // `buffered` yields in submission order, so findings keep the
            // sequential order whatever the concurrency.
            let mut outcomes = pin!(
                stream::iter(cases.iter())
                    .map(|case| async move {
                        let outcome = self.dispatcher.dispatch(endpoint, case).await;
                        (case, outcome)
                    })
                    .buffered(self.config.max_concurrency.max(1))
            );

            loop {
                if token.is_cancelled() {
                    cancelled = true;
                    break 'endpoints;
                }
                let Some((case, outcome)) = outcomes.next().await else {
                    break;
                };
                cases_executed += 1;

                if let Some(finding) = ResponseClassifier::classify(endpoint, case, &outcome) {
                    debug!(
                        endpoint = %endpoint,
                        severity = %finding.severity,
                        category = %finding.category,
                        "Finding recorded"
                    );
                    findings.push(finding);
                }
            }

            endpoints_scanned += 1;
        }

        if cancelled {
            warn!(
                endpoints_scanned,
                endpoint_count = endpoints.len(),
                "API fuzz scan cancelled"
            );
        }

        let threshold = self.config.fail_on;
        let passed = !cancelled && SeverityGate::passes(&findings, threshold);

        info!(
            finding_count = findings.len(),
            endpoints_scanned,
            cases_executed,
            passed,
            "API fuzz scan completed"
        );

        Ok(ScanResult {
            findings,
            endpoints_scanned,
            cases_executed,
            threshold,
            passed,
            cancelled,
        })
    }
}

/// Scan error with context
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Endpoint discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::FindingCategory;
    use crate::domain::value_objects::{FuzzCase, HttpMethod};

    fn finding(severity: FindingSeverity) -> Finding {
        Finding {
            endpoint: "/x".to_string(),
            method: HttpMethod::Get,
            input_data: FuzzCase::empty(),
            status_code: 200,
            severity,
            category: FindingCategory::InfoLeak,
            detail: String::new(),
        }
    }

    #[test]
    fn test_gate_empty_always_passes() {
        for threshold in FindingSeverity::ALL {
            assert!(SeverityGate::passes(&[], threshold));
        }
    }

    #[test]
    fn test_gate_critical_at_critical_fails() {
        let findings = vec![finding(FindingSeverity::High), finding(FindingSeverity::Critical)];
        assert!(!SeverityGate::passes(&findings, FindingSeverity::Critical));
    }

    #[test]
    fn test_gate_low_at_critical_passes() {
        let findings = vec![finding(FindingSeverity::Low), finding(FindingSeverity::Low)];
        assert!(SeverityGate::passes(&findings, FindingSeverity::Critical));
    }

    #[test]
    fn test_gate_threshold_is_inclusive() {
        let findings = vec![finding(FindingSeverity::High)];
        assert!(SeverityGate::passes(&findings, FindingSeverity::Critical));
        assert!(!SeverityGate::passes(&findings, FindingSeverity::High));
        assert!(!SeverityGate::passes(&findings, FindingSeverity::Low));
    }
}
