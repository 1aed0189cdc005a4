//! Endpoint discovery
//!
//! A [`ServiceDescription`] enumerates the routes of the service under test;
//! the [`EndpointCatalog`] turns those routes into fuzzable endpoints.

pub mod openapi;
pub mod remote;
pub mod static_description;

pub use openapi::*;
pub use remote::*;
pub use static_description::*;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::value_objects::{Endpoint, HttpMethod, RouteDescriptor};

/// Errors raised while obtaining the route list. Always fatal to a scan.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Failed to read service description {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch service description from {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Parse error: {message} (source: {source_name})")]
    Parse {
        message: String,
        source_name: String,
    },

    #[error("OpenAPI version not supported: {version} (supported: 3.0.0+)")]
    UnsupportedVersion { version: String },
}

/// Collaborator that can enumerate the routes of a service
#[async_trait]
pub trait ServiceDescription: Send + Sync {
    /// Routes in a stable order
    async fn routes(&self) -> Result<Vec<RouteDescriptor>, DiscoveryError>;
}

/// Turns service routes into endpoints
pub struct EndpointCatalog;

impl EndpointCatalog {
    /// Enumerate the description and expand its routes.
    /// Collaborator errors propagate unchanged.
    pub async fn extract(
        description: &dyn ServiceDescription,
    ) -> Result<Vec<Endpoint>, DiscoveryError> {
        let routes = description.routes().await?;
        Ok(Self::from_routes(&routes))
    }

    /// One endpoint per (route, method), HEAD/OPTIONS dropped, in route order
    /// then declared method order.
    pub fn from_routes(routes: &[RouteDescriptor]) -> Vec<Endpoint> {
        let mut endpoints = Vec::new();

        for route in routes {
            let mut seen: Vec<HttpMethod> = Vec::with_capacity(route.methods.len());
            for verb in &route.methods {
                match HttpMethod::from_verb(verb) {
                    Some(method) if !seen.contains(&method) => {
                        seen.push(method);
                        endpoints.push(Endpoint::new(
                            route.path.clone(),
                            method,
                            route.params.clone(),
                        ));
                    }
                    Some(_) => {}
                    None => {
                        if !verb.eq_ignore_ascii_case("HEAD") && !verb.eq_ignore_ascii_case("OPTIONS")
                        {
                            warn!(path = %route.path, verb = %verb, "Skipping unsupported HTTP verb");
                        }
                    }
                }
            }
        }

        debug!(
            route_count = routes.len(),
            endpoint_count = endpoints.len(),
            "Extracted endpoints"
        );
        endpoints
    }
}
