//! Timing samples and their severity tiers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Sample ==
/// One recorded duration of a named operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub operation: String,
    pub duration_ms: u64,
    pub recorded_at: DateTime<Utc>,
}

impl Sample {
    pub fn new(operation: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            operation: operation.into(),
            duration_ms,
            recorded_at: Utc::now(),
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::classify(self.duration_ms)
    }
}

// == Severity ==
/// Speed tier of a measured duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Under 100 ms
    Fast,
    /// 100 ms up to, but excluding, 500 ms
    Warn,
    /// 500 ms or more
    Slow,
}

impl Severity {
    pub fn classify(duration_ms: u64) -> Self {
        match duration_ms {
            0..=99 => Severity::Fast,
            100..=499 => Severity::Warn,
            _ => Severity::Slow,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Fast => "fast",
            Severity::Warn => "warn",
            Severity::Slow => "slow",
        };
        f.write_str(label)
    }
}
