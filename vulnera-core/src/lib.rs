//! Vulnera Core - Foundation crate for the Vulnera fuzz gate
//!
//! This crate provides shared functionality used by the fuzzing engine and the CLI:
//!
//! # Modules
//!
//! - [`config`] - Strongly-typed configuration with file and environment variable support
//! - [`domain`] - Shared domain values (finding severity)
//! - [`logging`] - Structured logging with tracing
//!
//! # Configuration
//!
//! Load configuration from files and environment:
//!
//! ```rust,ignore
//! use vulnera_core::Config;
//!
//! let config = Config::load()?;
//! ```
//!
//! Environment variables use the `VULNERA__` prefix with double underscore separators:
//!
//! ```bash
//! VULNERA__FUZZ__MAX_CASES=20
//! VULNERA__FUZZ__FAIL_ON=high
//! ```
//!
//! # Logging
//!
//! ```rust,ignore
//! use vulnera_core::{init_tracing, config::LoggingConfig};
//!
//! init_tracing(&LoggingConfig::default())?;
//! ```

pub mod config;
pub mod domain;
pub mod logging;

pub use config::Config;
pub use domain::FindingSeverity;
pub use logging::init_tracing;
