//! End-to-end scans against an in-process service

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;

use vulnera_core::config::FuzzConfig;
use vulnera_fuzz::FuzzGateModule;
use vulnera_fuzz::application::{FuzzScanUseCase, ScanError};
use vulnera_fuzz::domain::{
    FindingCategory, FindingSeverity, FuzzCase, FuzzValue, Parameter, ParameterKind, RouteDescriptor,
};
use vulnera_fuzz::infrastructure::{
    DiscoveryError, FuzzRequest, HandlerClient, RawResponse, ServiceDescription,
    StaticServiceDescription,
};

use common::{demo_description, demo_handler, test_config};

fn demo_use_case(config: &FuzzConfig) -> FuzzScanUseCase {
    FuzzScanUseCase::new(config, Arc::new(HandlerClient::new(demo_handler)))
}

#[tokio::test]
async fn test_negative_user_id_is_critical_server_error() {
    let result = demo_use_case(&test_config())
        .execute(&demo_description())
        .await
        .unwrap();

    let finding = result
        .findings
        .iter()
        .find(|f| f.input_data == FuzzCase::single("user_id", FuzzValue::Integer(-1)))
        .expect("expected a finding for user_id=-1");

    assert_eq!(finding.endpoint, "/users/{user_id}");
    assert_eq!(finding.status_code, 500);
    assert_eq!(finding.category, FindingCategory::ServerError);
    assert_eq!(finding.severity, FindingSeverity::Critical);
    assert_eq!(finding.detail, "HTTP 500");
    assert!(!result.passed);
}

#[tokio::test]
async fn test_healthy_endpoint_yields_no_findings() {
    let description = StaticServiceDescription::default().route("/health", &["GET"], vec![]);
    let result = demo_use_case(&test_config()).execute(&description).await.unwrap();

    assert!(result.findings.is_empty());
    assert_eq!(result.endpoints_scanned, 1);
    assert_eq!(result.cases_executed, 1);
    assert!(result.passed);
}

#[tokio::test]
async fn test_leak_is_high_and_passes_critical_gate() {
    let description = StaticServiceDescription::default().route("/debug", &["GET"], vec![]);
    let result = demo_use_case(&test_config()).execute(&description).await.unwrap();

    assert_eq!(result.findings.len(), 1);
    let finding = &result.findings[0];
    assert_eq!(finding.category, FindingCategory::InfoLeak);
    assert_eq!(finding.severity, FindingSeverity::High);
    assert_eq!(finding.status_code, 200);
    assert_eq!(finding.input_data, FuzzCase::empty());
    assert!(result.passed);

    let strict = FuzzConfig {
        fail_on: FindingSeverity::High,
        ..test_config()
    };
    let result = demo_use_case(&strict).execute(&description).await.unwrap();
    assert!(!result.passed);
}

#[tokio::test]
async fn test_case_counts_for_full_scan() {
    let result = demo_use_case(&test_config())
        .execute(&demo_description())
        .await
        .unwrap();

    // users: 1 + 10 integer values, health: 1, debug: 1
    assert_eq!(result.endpoints_scanned, 3);
    assert_eq!(result.cases_executed, 13);

    // -1 and i64::MIN crash the handler
    let server_errors = result
        .findings
        .iter()
        .filter(|f| f.category == FindingCategory::ServerError)
        .count();
    assert_eq!(server_errors, 2);
    assert_eq!(result.worst_severity(), Some(FindingSeverity::Critical));
}

#[tokio::test]
async fn test_max_cases_caps_each_endpoint() {
    let config = FuzzConfig {
        max_cases: 3,
        ..test_config()
    };
    let description = StaticServiceDescription::default().route(
        "/users/{user_id}",
        &["GET"],
        vec![Parameter::new("user_id", ParameterKind::Integer)],
    );

    let result = demo_use_case(&config).execute(&description).await.unwrap();

    // empty, 0, -1
    assert_eq!(result.cases_executed, 3);
    assert_eq!(result.findings.len(), 1);
}

#[tokio::test]
async fn test_excluded_paths_are_not_fuzzed() {
    let config = FuzzConfig {
        exclude_paths: vec!["/debug".to_string(), "/users".to_string()],
        ..test_config()
    };
    let result = demo_use_case(&config)
        .execute(&demo_description())
        .await
        .unwrap();

    assert_eq!(result.endpoints_scanned, 1);
    assert!(result.findings.is_empty());
}

#[tokio::test]
async fn test_concurrency_preserves_finding_order() {
    let sequential = demo_use_case(&test_config())
        .execute(&demo_description())
        .await
        .unwrap();

    let concurrent_config = FuzzConfig {
        max_concurrency: 8,
        ..test_config()
    };
    let concurrent = demo_use_case(&concurrent_config)
        .execute(&demo_description())
        .await
        .unwrap();

    assert_eq!(sequential.findings, concurrent.findings);
    assert_eq!(sequential.cases_executed, concurrent.cases_executed);
}

#[tokio::test]
async fn test_transport_failure_is_critical_crash() {
    let client = HandlerClient::new(|_: &FuzzRequest| {
        Err(vulnera_fuzz::infrastructure::TransportError::Request(
            "connection refused".to_string(),
        ))
    });
    let use_case = FuzzScanUseCase::new(&test_config(), Arc::new(client));
    let description = StaticServiceDescription::default().route("/health", &["POST"], vec![]);

    let result = use_case.execute(&description).await.unwrap();

    assert_eq!(result.findings.len(), 1);
    let finding = &result.findings[0];
    assert_eq!(finding.category, FindingCategory::Crash);
    assert_eq!(finding.severity, FindingSeverity::Critical);
    assert_eq!(finding.status_code, 0);
    assert_eq!(finding.detail, "connection refused");
}

#[tokio::test]
async fn test_each_case_dispatched_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let client = HandlerClient::new(move |_: &FuzzRequest| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(RawResponse::new(200, "ok"))
    });
    let use_case = FuzzScanUseCase::new(&test_config(), Arc::new(client));
    let description = StaticServiceDescription::default().route(
        "/items",
        &["GET", "POST"],
        vec![Parameter::new("amount", ParameterKind::Float)],
    );

    let result = use_case.execute(&description).await.unwrap();

    // (1 + 9 float values) per method
    assert_eq!(result.cases_executed, 20);
    assert_eq!(calls.load(Ordering::SeqCst), 20);
}

#[tokio::test]
async fn test_cancelled_scan_stops_early() {
    let token = CancellationToken::new();
    token.cancel();

    let result = demo_use_case(&test_config())
        .execute_with_cancellation(&demo_description(), &token)
        .await
        .unwrap();

    assert!(result.cancelled);
    assert_eq!(result.cases_executed, 0);
    assert_eq!(result.endpoints_scanned, 0);
    assert!(result.findings.is_empty());
    assert!(!result.passed);
    assert!(!result.blocks_merge());
}

struct FailingDescription;

#[async_trait::async_trait]
impl ServiceDescription for FailingDescription {
    async fn routes(&self) -> Result<Vec<RouteDescriptor>, DiscoveryError> {
        Err(DiscoveryError::Fetch {
            url: "http://127.0.0.1:8000/openapi.json".to_string(),
            message: "connection refused".to_string(),
        })
    }
}

#[tokio::test]
async fn test_discovery_failure_aborts_scan() {
    let result = demo_use_case(&test_config()).execute(&FailingDescription).await;
    assert!(matches!(
        result,
        Err(ScanError::Discovery(DiscoveryError::Fetch { .. }))
    ));
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let config = FuzzConfig {
        max_cases: 0,
        ..test_config()
    };
    let result = demo_use_case(&config).execute(&demo_description()).await;
    assert!(matches!(result, Err(ScanError::Configuration(_))));
}

#[tokio::test]
async fn test_module_scan_with_spec_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let spec = dir.path().join("openapi.json");
    std::fs::write(&spec, common::demo_openapi_json()).unwrap();

    let module = FuzzGateModule::with_client(&test_config(), Arc::new(HandlerClient::new(demo_handler)));
    let result = module
        .scan(Some(&spec), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.endpoints_scanned, 2);
    assert!(!result.passed);

    // Same result when handed the directory
    let from_dir = module
        .scan(Some(dir.path()), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(from_dir.findings, result.findings);
}
