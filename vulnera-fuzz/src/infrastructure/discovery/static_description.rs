//! In-memory service description

use async_trait::async_trait;

use super::{DiscoveryError, ServiceDescription};
use crate::domain::value_objects::{Parameter, RouteDescriptor};

/// Route table supplied directly by the caller
#[derive(Debug, Clone, Default)]
pub struct StaticServiceDescription {
    routes: Vec<RouteDescriptor>,
}

impl StaticServiceDescription {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// Append a route, builder style
    pub fn route(mut self, path: &str, methods: &[&str], params: Vec<Parameter>) -> Self {
        self.routes.push(RouteDescriptor::new(path, methods, params));
        self
    }
}

#[async_trait]
impl ServiceDescription for StaticServiceDescription {
    async fn routes(&self) -> Result<Vec<RouteDescriptor>, DiscoveryError> {
        Ok(self.routes.clone())
    }
}
