//! Shared fixtures for vulnera-fuzz integration tests

#![allow(dead_code)]

use vulnera_core::config::FuzzConfig;
use vulnera_fuzz::domain::{Parameter, ParameterKind};
use vulnera_fuzz::infrastructure::{
    FuzzRequest, RawResponse, StaticServiceDescription, TransportError,
};

/// Route table of the demo service
pub fn demo_description() -> StaticServiceDescription {
    StaticServiceDescription::default()
        .route(
            "/users/{user_id}",
            &["GET"],
            vec![Parameter::new("user_id", ParameterKind::Integer)],
        )
        .route("/health", &["GET", "HEAD"], vec![])
        .route("/debug", &["GET"], vec![])
}

/// Demo service: negative user ids crash, `/debug` leaks a stack trace
pub fn demo_handler(request: &FuzzRequest) -> Result<RawResponse, TransportError> {
    if let Some(raw_id) = request.path.strip_prefix("/users/") {
        return Ok(match raw_id.parse::<i64>() {
            Ok(id) if id < 0 => RawResponse::new(500, "Internal Server Error"),
            Ok(id) => RawResponse::new(200, format!("{{\"id\":{}}}", id)),
            Err(_) => RawResponse::new(422, "{\"detail\":\"invalid id\"}"),
        });
    }

    match request.path.as_str() {
        "/health" => Ok(RawResponse::new(200, "{\"status\":\"ok\"}")),
        "/debug" => Ok(RawResponse::new(
            200,
            "Traceback (most recent call last):\n  File \"/app/main.py\", line 3",
        )),
        _ => Ok(RawResponse::new(404, "Not Found")),
    }
}

pub fn test_config() -> FuzzConfig {
    FuzzConfig {
        request_timeout_seconds: 1,
        ..FuzzConfig::default()
    }
}

/// OpenAPI document equivalent to [`demo_description`]
pub fn demo_openapi_json() -> &'static str {
    r#"{
  "openapi": "3.1.0",
  "info": {"title": "Demo Vulnerable API", "version": "0.1.0"},
  "paths": {
    "/health": {"get": {"responses": {"200": {"description": "ok"}}}},
    "/users/{user_id}": {
      "get": {
        "parameters": [
          {"name": "user_id", "in": "path", "required": true, "schema": {"type": "integer"}}
        ],
        "responses": {"200": {"description": "ok"}}
      }
    }
  }
}"#
}
