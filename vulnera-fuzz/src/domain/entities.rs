//! API fuzzing domain entities

use serde::{Deserialize, Serialize};
use std::fmt;

use super::value_objects::{FuzzCase, HttpMethod};

pub use vulnera_core::domain::FindingSeverity;

/// What kind of failure a finding records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    /// The request never produced a response (client error, timeout)
    Crash,
    /// The service answered with a 5xx status
    ServerError,
    /// The response body matched a leak signature
    InfoLeak,
}

impl FindingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingCategory::Crash => "crash",
            FindingCategory::ServerError => "server_error",
            FindingCategory::InfoLeak => "info_leak",
        }
    }
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API fuzzing finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Path template of the endpoint, not the substituted path
    pub endpoint: String,
    pub method: HttpMethod,
    /// The case that triggered the finding
    pub input_data: FuzzCase,
    /// 0 when no response was obtained
    pub status_code: u16,
    pub severity: FindingSeverity,
    pub category: FindingCategory,
    pub detail: String,
}
