//! Per-operation admission limits.

use std::collections::HashMap;

/// Limit for operations missing from the table.
pub const DEFAULT_LIMIT: u32 = 50;

/// Maximum admitted calls per window, keyed by operation name.
///
/// Unregistered operations get [`DEFAULT_LIMIT`] rather than an error.
#[derive(Debug, Clone)]
pub struct RateLimits {
    limits: HashMap<String, u32>,
    default_limit: u32,
}

impl RateLimits {
    /// Creates an empty table where every operation gets `default_limit`.
    pub fn new(default_limit: u32) -> Self {
        Self {
            limits: HashMap::new(),
            default_limit,
        }
    }

    pub fn with_limit(mut self, operation: impl Into<String>, limit: u32) -> Self {
        self.limits.insert(operation.into(), limit);
        self
    }

    pub fn limit_for(&self, operation: &str) -> u32 {
        self.limits
            .get(operation)
            .copied()
            .unwrap_or(self.default_limit)
    }
}

impl Default for RateLimits {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
            .with_limit("login", 5)
            .with_limit("create_material", 20)
            .with_limit("create_movement", 30)
            .with_limit("create_transfer", 10)
            .with_limit("upload_photo", 10)
            .with_limit("export_pdf", 5)
            .with_limit("delete", 10)
            .with_limit("search", 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let limits = RateLimits::default();
        assert_eq!(limits.limit_for("login"), 5);
        assert_eq!(limits.limit_for("create_material"), 20);
        assert_eq!(limits.limit_for("create_movement"), 30);
        assert_eq!(limits.limit_for("create_transfer"), 10);
        assert_eq!(limits.limit_for("upload_photo"), 10);
        assert_eq!(limits.limit_for("export_pdf"), 5);
        assert_eq!(limits.limit_for("delete"), 10);
        assert_eq!(limits.limit_for("search"), 100);
    }

    #[test]
    fn test_unknown_operation_uses_default() {
        assert_eq!(RateLimits::default().limit_for("custom_operation"), 50);
        assert_eq!(RateLimits::new(3).limit_for("anything"), 3);
    }
}
