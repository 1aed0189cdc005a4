//! Configuration validation module

use crate::config::{Config, FuzzConfig, LoggingConfig};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Fuzz configuration error: {message}")]
    Fuzz { message: String },

    #[error("Logging configuration error: {message}")]
    Logging { message: String },
}

impl ValidationError {
    pub fn fuzz(message: impl Into<String>) -> Self {
        Self::Fuzz {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

impl Validate for FuzzConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.max_cases == 0 {
            return Err(ValidationError::fuzz(
                "max_cases must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ValidationError::fuzz(
                "Request timeout must be greater than 0 seconds".to_string(),
            ));
        }

        if self.max_concurrency == 0 {
            return Err(ValidationError::fuzz(
                "max_concurrency must be greater than 0".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::fuzz(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.openapi_path.is_empty() {
            return Err(ValidationError::fuzz("openapi_path cannot be empty".to_string()));
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.format.as_str() {
            "json" | "pretty" | "compact" => {}
            other => {
                return Err(ValidationError::logging(format!(
                    "format must be one of json, pretty, compact, got: {}",
                    other
                )));
            }
        }

        if self.level.trim().is_empty() {
            return Err(ValidationError::logging("level cannot be empty".to_string()));
        }

        Ok(())
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.fuzz.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
