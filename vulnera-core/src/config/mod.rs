//! Configuration management

pub mod validation;

pub use validation::{Validate, ValidationError};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::domain::FindingSeverity;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fuzz: FuzzConfig,
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Output format: json, pretty or compact
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// Fuzz scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzConfig {
    /// Maximum number of cases dispatched per endpoint (applied after generation)
    pub max_cases: usize,
    /// Findings at or above this severity fail the gate
    pub fail_on: FindingSeverity,
    /// Timeout for a single dispatched request (in seconds)
    pub request_timeout_seconds: u64,
    /// Number of cases of one endpoint kept in flight at once (1 = sequential)
    pub max_concurrency: usize,
    /// Base URL of the service under test
    pub base_url: String,
    /// Path of the OpenAPI document served by the service under test
    pub openapi_path: String,
    /// Path-template prefixes skipped during discovery ("*" skips everything)
    pub exclude_paths: Vec<String>,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            max_cases: 50,
            fail_on: FindingSeverity::Critical,
            request_timeout_seconds: 10,
            max_concurrency: 1,
            base_url: "http://127.0.0.1:8000".to_string(),
            openapi_path: "/openapi.json".to_string(),
            exclude_paths: Vec::new(),
        }
    }
}

impl FuzzConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Whether a path template is excluded from scanning
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude_paths
            .iter()
            .any(|excluded| excluded == "*" || path.starts_with(excluded.as_str()))
    }

    /// Absolute URL of the OpenAPI document on the service under test
    pub fn openapi_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.openapi_path.trim_start_matches('/')
        )
    }
}

impl Config {
    /// Load configuration from `config/default`, `config/{ENV}`, `config/local`
    /// and `VULNERA__*` environment variables, in increasing priority.
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        let env = std::env::var("ENV").ok();
        debug!(env = ?env, "Loading layered configuration");

        if let Some(env) = env {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("VULNERA").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(
            base_url = %config.fuzz.base_url,
            max_cases = config.fuzz.max_cases,
            fail_on = %config.fuzz.fail_on,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Load configuration from an explicit file, still honouring `VULNERA__*` overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigLoadError> {
        debug!(path = %path.display(), "Loading configuration file");
        let config: Config = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .add_source(config::Environment::with_prefix("VULNERA").separator("__"))
            .build()?
            .try_deserialize()?;
        config.validate()?;

        Ok(config)
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzz_defaults() {
        let config = FuzzConfig::default();
        assert_eq!(config.max_cases, 50);
        assert_eq!(config.fail_on, FindingSeverity::Critical);
        assert_eq!(config.max_concurrency, 1);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_exclusion_prefix_and_wildcard() {
        let mut config = FuzzConfig {
            exclude_paths: vec!["/admin".to_string()],
            ..Default::default()
        };
        assert!(config.is_excluded("/admin/users"));
        assert!(!config.is_excluded("/users"));

        config.exclude_paths = vec!["*".to_string()];
        assert!(config.is_excluded("/users"));
    }

    #[test]
    fn test_openapi_url_joins_slashes() {
        let config = FuzzConfig {
            base_url: "http://localhost:8000/".to_string(),
            openapi_path: "/openapi.json".to_string(),
            ..Default::default()
        };
        assert_eq!(config.openapi_url(), "http://localhost:8000/openapi.json");
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fuzzgate.toml");
        std::fs::write(
            &path,
            "[fuzz]\nmax_cases = 12\nfail_on = \"high\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.fuzz.max_cases, 12);
        assert_eq!(config.fuzz.fail_on, FindingSeverity::High);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.fuzz.request_timeout_seconds, 10);
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigLoadError::Config(_))));
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fuzzgate.toml");
        std::fs::write(&path, "[fuzz]\nmax_cases = 0\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigLoadError::Validation(_))));
    }
}
