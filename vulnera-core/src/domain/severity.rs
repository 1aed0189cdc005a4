//! Finding severity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Finding severity
///
/// Variants are declared most severe first, so the derived ordering ranks
/// `Critical < High < Medium < Low`. A smaller value blocks more aggressively.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    /// Critical severity
    #[default]
    Critical,
    /// High severity
    High,
    /// Medium severity
    Medium,
    /// Low severity
    Low,
}

impl FindingSeverity {
    pub const ALL: [FindingSeverity; 4] = [
        FindingSeverity::Critical,
        FindingSeverity::High,
        FindingSeverity::Medium,
        FindingSeverity::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FindingSeverity::Critical => "critical",
            FindingSeverity::High => "high",
            FindingSeverity::Medium => "medium",
            FindingSeverity::Low => "low",
        }
    }

    /// Ordinal rank, 0 being the most severe
    pub fn rank(&self) -> u8 {
        match self {
            FindingSeverity::Critical => 0,
            FindingSeverity::High => 1,
            FindingSeverity::Medium => 2,
            FindingSeverity::Low => 3,
        }
    }

    /// Whether this severity is as severe as, or more severe than, `threshold`
    pub fn meets(&self, threshold: FindingSeverity) -> bool {
        self.rank() <= threshold.rank()
    }
}

impl fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a severity name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown severity '{0}' (expected one of: critical, high, medium, low)")]
pub struct ParseSeverityError(pub String);

impl FromStr for FindingSeverity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(FindingSeverity::Critical),
            "high" => Ok(FindingSeverity::High),
            "medium" => Ok(FindingSeverity::Medium),
            "low" => Ok(FindingSeverity::Low),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}
