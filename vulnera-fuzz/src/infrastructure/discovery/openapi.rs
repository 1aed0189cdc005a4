//! OpenAPI 3.x service description

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::path::Path;
use tracing::{debug, error, info, warn};

use super::{DiscoveryError, ServiceDescription};
use crate::domain::value_objects::{Parameter, ParameterKind, RouteDescriptor};

/// Verbs read from a path item, in emission order
const FUZZED_VERBS: [&str; 5] = ["get", "put", "post", "delete", "patch"];

const MAX_REF_DEPTH: usize = 16;

/// Routes parsed from an OpenAPI 3.x document (JSON or YAML)
#[derive(Debug, Clone)]
pub struct OpenApiDescription {
    version: String,
    routes: Vec<RouteDescriptor>,
}

impl OpenApiDescription {
    /// Parse an OpenAPI document from a file
    pub fn parse_file(file_path: &Path) -> Result<Self, DiscoveryError> {
        let content = std::fs::read_to_string(file_path).map_err(|e| {
            error!(
                error = %e,
                file = %file_path.display(),
                "Failed to read OpenAPI file"
            );
            DiscoveryError::Io {
                path: file_path.display().to_string(),
                source: e,
            }
        })?;
        Self::parse(&content, &file_path.display().to_string())
    }

    /// Parse an OpenAPI document from content. `source_name` is only used in
    /// diagnostics.
    pub fn parse(content: &str, source_name: &str) -> Result<Self, DiscoveryError> {
        info!(source = %source_name, "Parsing OpenAPI specification");

        let raw: JsonValue = if content.trim_start().starts_with('{') {
            serde_json::from_str(content).map_err(|e| DiscoveryError::Parse {
                message: format!("JSON parse error: {}", e),
                source_name: source_name.to_string(),
            })?
        } else {
            serde_yml::from_str(content).map_err(|e| DiscoveryError::Parse {
                message: format!("YAML parse error: {}", e),
                source_name: source_name.to_string(),
            })?
        };

        let version = match raw.get("openapi").and_then(JsonValue::as_str) {
            Some(version) => version.to_string(),
            None => {
                if let Some(swagger) = raw.get("swagger") {
                    return Err(DiscoveryError::UnsupportedVersion {
                        version: swagger
                            .as_str()
                            .map(str::to_string)
                            .unwrap_or_else(|| swagger.to_string()),
                    });
                }
                return Err(DiscoveryError::Parse {
                    message: "missing 'openapi' version field".to_string(),
                    source_name: source_name.to_string(),
                });
            }
        };

        if !version.starts_with("3.") {
            return Err(DiscoveryError::UnsupportedVersion { version });
        }

        let routes = Self::extract_routes(&raw);
        debug!(
            version = %version,
            route_count = routes.len(),
            "Parsed OpenAPI specification"
        );

        Ok(Self { version, routes })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn extract_routes(raw: &JsonValue) -> Vec<RouteDescriptor> {
        let Some(paths) = raw.get("paths").and_then(JsonValue::as_object) else {
            warn!("OpenAPI document declares no paths");
            return Vec::new();
        };

        let mut routes = Vec::new();
        for (path, item) in paths {
            let item = resolve_ref(raw, item);
            let path_params = collect_parameters(raw, item.get("parameters"));

            for verb in FUZZED_VERBS {
                let Some(operation) = item.get(verb) else {
                    continue;
                };

                let mut params = path_params.clone();
                for param in collect_parameters(raw, operation.get("parameters")) {
                    match params.iter_mut().find(|p| p.name == param.name) {
                        Some(existing) => existing.kind = param.kind,
                        None => params.push(param),
                    }
                }
                for param in collect_body_properties(raw, operation.get("requestBody")) {
                    if !params.iter().any(|p| p.name == param.name) {
                        params.push(param);
                    }
                }

                routes.push(RouteDescriptor {
                    path: path.clone(),
                    methods: vec![verb.to_ascii_uppercase()],
                    params,
                });
            }
        }

        routes
    }
}

#[async_trait]
impl ServiceDescription for OpenApiDescription {
    async fn routes(&self) -> Result<Vec<RouteDescriptor>, DiscoveryError> {
        Ok(self.routes.clone())
    }
}

/// Follow local `$ref` pointers; unresolved refs return the value unchanged
fn resolve_ref<'a>(raw: &'a JsonValue, value: &'a JsonValue) -> &'a JsonValue {
    let mut current = value;
    for _ in 0..MAX_REF_DEPTH {
        let Some(reference) = current.get("$ref").and_then(JsonValue::as_str) else {
            return current;
        };
        match reference.strip_prefix('#').and_then(|pointer| raw.pointer(pointer)) {
            Some(target) => current = target,
            None => {
                warn!(reference = %reference, "Unresolvable $ref in OpenAPI document");
                return current;
            }
        }
    }
    current
}

/// Path and query parameters; header and cookie parameters are not fuzzed
fn collect_parameters(raw: &JsonValue, parameters: Option<&JsonValue>) -> Vec<Parameter> {
    let Some(parameters) = parameters.and_then(JsonValue::as_array) else {
        return Vec::new();
    };

    parameters
        .iter()
        .map(|p| resolve_ref(raw, p))
        .filter_map(|p| {
            let name = p.get("name").and_then(JsonValue::as_str)?;
            let location = p.get("in").and_then(JsonValue::as_str).unwrap_or("query");
            if location != "path" && location != "query" {
                debug!(name = %name, location = %location, "Skipping non-fuzzable parameter");
                return None;
            }
            Some(Parameter::new(name, schema_kind(raw, p.get("schema"))))
        })
        .collect()
}

/// Top-level properties of a JSON request body object schema
fn collect_body_properties(raw: &JsonValue, request_body: Option<&JsonValue>) -> Vec<Parameter> {
    let Some(request_body) = request_body.map(|rb| resolve_ref(raw, rb)) else {
        return Vec::new();
    };
    let Some(content) = request_body.get("content").and_then(JsonValue::as_object) else {
        return Vec::new();
    };

    let media = content
        .get("application/json")
        .or_else(|| {
            content
                .iter()
                .find(|(media_type, _)| media_type.contains("json"))
                .map(|(_, media)| media)
        });
    let Some(schema) = media.and_then(|m| m.get("schema")).map(|s| resolve_ref(raw, s)) else {
        return Vec::new();
    };

    schema
        .get("properties")
        .and_then(JsonValue::as_object)
        .map(|properties| {
            properties
                .iter()
                .map(|(name, prop)| Parameter::new(name.clone(), schema_kind(raw, Some(prop))))
                .collect()
        })
        .unwrap_or_default()
}

fn kind_for_type(type_name: &str) -> ParameterKind {
    match type_name {
        "integer" => ParameterKind::Integer,
        "number" => ParameterKind::Float,
        _ => ParameterKind::Text,
    }
}

/// Kind from a schema's `type`; unions take the first non-null alternative
fn schema_kind(raw: &JsonValue, schema: Option<&JsonValue>) -> ParameterKind {
    let Some(schema) = schema.map(|s| resolve_ref(raw, s)) else {
        return ParameterKind::Text;
    };

    match schema.get("type") {
        Some(JsonValue::String(type_name)) => return kind_for_type(type_name),
        Some(JsonValue::Array(types)) => {
            if let Some(type_name) = types
                .iter()
                .filter_map(JsonValue::as_str)
                .find(|t| *t != "null")
            {
                return kind_for_type(type_name);
            }
        }
        _ => {}
    }

    for key in ["anyOf", "oneOf", "allOf"] {
        if let Some(alternatives) = schema.get(key).and_then(JsonValue::as_array) {
            let first_non_null = alternatives
                .iter()
                .map(|alt| resolve_ref(raw, alt))
                .find(|alt| alt.get("type").and_then(JsonValue::as_str) != Some("null"));
            if let Some(alt) = first_non_null {
                return schema_kind(raw, Some(alt));
            }
        }
    }

    ParameterKind::Text
}
