//! Request DTOs for the diagnostics API
//!
//! Query parameters and path validation.

use serde::Deserialize;

/// Number of slowest operations returned when the query omits it
pub const DEFAULT_SLOWEST: usize = 5;

/// Upper bound for the `slowest` query parameter
pub const MAX_SLOWEST: usize = 100;

/// Maximum accepted length of an actor or operation name
pub const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Query parameters for GET /stats
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsQuery {
    /// How many of the slowest operations to include
    #[serde(default)]
    pub slowest: Option<usize>,
}

impl StatsQuery {
    /// Validates the query
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match self.slowest {
            Some(n) if n > MAX_SLOWEST => Some(format!(
                "slowest must not exceed {}",
                MAX_SLOWEST
            )),
            _ => None,
        }
    }

    pub fn slowest_or_default(&self) -> usize {
        self.slowest.unwrap_or(DEFAULT_SLOWEST)
    }
}

/// Validates an actor or operation name taken from the request path
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_identifier(field: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{} cannot be empty", field));
    }
    if value.len() > MAX_IDENTIFIER_LENGTH {
        return Some(format!(
            "{} exceeds maximum length of {} characters",
            field, MAX_IDENTIFIER_LENGTH
        ));
    }
    None
}
