//! OpenAPI document served by the running service

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error};

use super::{DiscoveryError, OpenApiDescription, ServiceDescription};
use crate::domain::value_objects::RouteDescriptor;

/// Fetches the OpenAPI document from the service under test on every call
pub struct RemoteOpenApiDescription {
    url: String,
    client: reqwest::Client,
}

impl RemoteOpenApiDescription {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            url: url.into(),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn fetch_error(&self, message: String) -> DiscoveryError {
        error!(url = %self.url, error = %message, "Failed to fetch OpenAPI document");
        DiscoveryError::Fetch {
            url: self.url.clone(),
            message,
        }
    }
}

#[async_trait]
impl ServiceDescription for RemoteOpenApiDescription {
    async fn routes(&self) -> Result<Vec<RouteDescriptor>, DiscoveryError> {
        debug!(url = %self.url, "Fetching OpenAPI document");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.fetch_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.fetch_error(format!("HTTP {}", response.status().as_u16())));
        }

        let content = response
            .text()
            .await
            .map_err(|e| self.fetch_error(e.to_string()))?;

        OpenApiDescription::parse(&content, &self.url)?.routes().await
    }
}
