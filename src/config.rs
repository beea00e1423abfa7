//! Configuration Module
//!
//! Loads the support layer's runtime settings from environment variables.

use std::env;

/// Runtime configuration.
///
/// All values can be configured via environment variables with sensible defaults.
/// TTL and rate-limit tables are fixed at construction and are not part of this.
#[derive(Debug, Clone)]
pub struct Config {
    /// Diagnostics HTTP server port
    pub server_port: u16,
    /// Interval in seconds between background cleanup sweeps
    pub cleanup_interval: u64,
    /// Number of timing samples the performance monitor retains
    pub metrics_capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - Diagnostics server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 30)
    /// - `METRICS_CAPACITY` - Retained timing samples (default: 100)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cleanup_interval),
            metrics_capacity: parse_var("METRICS_CAPACITY")
                .filter(|cap| *cap > 0)
                .unwrap_or(defaults.metrics_capacity),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cleanup_interval: 30,
            metrics_capacity: crate::monitor::DEFAULT_CAPACITY,
        }
    }
}
