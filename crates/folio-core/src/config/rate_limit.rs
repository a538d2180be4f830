//! Request throttling configuration.

use serde::{Deserialize, Serialize};

/// Per-client token bucket settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether throttling is applied at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Tokens refilled per second.
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: f64,
    /// Bucket capacity.
    #[serde(default = "default_burst")]
    pub burst: u32,
    /// Buckets untouched for this long are evicted.
    #[serde(default = "default_idle_eviction")]
    pub idle_eviction_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            requests_per_second: default_requests_per_second(),
            burst: default_burst(),
            idle_eviction_seconds: default_idle_eviction(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_requests_per_second() -> f64 {
    10.0
}

fn default_burst() -> u32 {
    20
}

fn default_idle_eviction() -> u64 {
    600
}
