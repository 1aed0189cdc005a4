//! FuzzGate module implementation

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use vulnera_core::config::FuzzConfig;

use crate::application::use_cases::{FuzzScanUseCase, ScanError, ScanResult};
use crate::infrastructure::client::{HttpServiceClient, ServiceClient};
use crate::infrastructure::discovery::{
    OpenApiDescription, RemoteOpenApiDescription, ServiceDescription,
};

/// File names tried when a directory is given
const SPEC_CANDIDATES: &[&str] = &[
    "openapi.json",
    "openapi.yaml",
    "openapi.yml",
    "api/openapi.json",
    "api/openapi.yaml",
    "api/openapi.yml",
    "docs/openapi.json",
    "docs/openapi.yaml",
    "docs/openapi.yml",
];

/// Pre-merge fuzz gate over one service
pub struct FuzzGateModule {
    config: FuzzConfig,
    use_case: Arc<FuzzScanUseCase>,
}

impl FuzzGateModule {
    /// Gate that talks HTTP to `config.base_url`
    pub fn with_config(config: &FuzzConfig) -> Self {
        let client = Arc::new(HttpServiceClient::new(
            config.base_url.clone(),
            config.request_timeout(),
        ));
        Self::with_client(config, client)
    }

    /// Gate over an arbitrary client, e.g. an in-process handler
    pub fn with_client(config: &FuzzConfig, client: Arc<dyn ServiceClient>) -> Self {
        Self {
            config: config.clone(),
            use_case: Arc::new(FuzzScanUseCase::new(config, client)),
        }
    }

    pub fn config(&self) -> &FuzzConfig {
        &self.config
    }

    /// Discover an OpenAPI document in a directory
    pub fn discover_openapi_spec(dir: &Path) -> Option<PathBuf> {
        SPEC_CANDIDATES
            .iter()
            .map(|candidate| dir.join(candidate))
            .find(|path| path.is_file())
            .inspect(|path| info!(spec = %path.display(), "Discovered OpenAPI specification"))
    }

    /// Where routes come from: a local document when given, otherwise the
    /// document served by the running service.
    pub fn description_for(
        &self,
        spec: Option<&Path>,
    ) -> Result<Box<dyn ServiceDescription>, ScanError> {
        match spec {
            Some(path) => {
                let file = if path.is_dir() {
                    Self::discover_openapi_spec(path).ok_or_else(|| {
                        ScanError::Configuration(format!(
                            "no OpenAPI document found in {}",
                            path.display()
                        ))
                    })?
                } else {
                    path.to_path_buf()
                };
                Ok(Box::new(OpenApiDescription::parse_file(&file)?))
            }
            None => Ok(Box::new(RemoteOpenApiDescription::new(
                self.config.openapi_url(),
                self.config.request_timeout(),
            ))),
        }
    }

    /// Fuzz every endpoint and compute the gate verdict
    pub async fn scan(
        &self,
        spec: Option<&Path>,
        token: &CancellationToken,
    ) -> Result<ScanResult, ScanError> {
        let description = self.description_for(spec)?;
        self.use_case
            .execute_with_cancellation(description.as_ref(), token)
            .await
    }

    /// Fuzz using a caller-supplied description
    pub async fn scan_description(
        &self,
        description: &dyn ServiceDescription,
        token: &CancellationToken,
    ) -> Result<ScanResult, ScanError> {
        self.use_case
            .execute_with_cancellation(description, token)
            .await
    }
}
