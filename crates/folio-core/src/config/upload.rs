//! Batch upload configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Worker pool sizing and deadline policy for batch certificate uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Worker count used when a request does not ask for one.
    #[serde(default = "default_workers")]
    pub default_workers: usize,
    /// Largest worker count a request may ask for.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    /// Batches with at most this many files get the short deadline.
    #[serde(default = "default_small_batch_threshold")]
    pub small_batch_threshold: usize,
    /// Deadline for small batches, in seconds.
    #[serde(default = "default_small_batch_timeout")]
    pub small_batch_timeout_seconds: u64,
    /// Deadline for large batches, in seconds.
    #[serde(default = "default_large_batch_timeout")]
    pub large_batch_timeout_seconds: u64,
    /// URL path under which stored files are served.
    #[serde(default = "default_public_path")]
    pub public_path: String,
}

impl UploadConfig {
    /// Deadline granted to a batch of `file_count` files.
    pub fn timeout_for(&self, file_count: usize) -> Duration {
        if file_count <= self.small_batch_threshold {
            Duration::from_secs(self.small_batch_timeout_seconds)
        } else {
            Duration::from_secs(self.large_batch_timeout_seconds)
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            default_workers: default_workers(),
            max_workers: default_max_workers(),
            small_batch_threshold: default_small_batch_threshold(),
            small_batch_timeout_seconds: default_small_batch_timeout(),
            large_batch_timeout_seconds: default_large_batch_timeout(),
            public_path: default_public_path(),
        }
    }
}

fn default_workers() -> usize {
    3
}

fn default_max_workers() -> usize {
    20
}

fn default_small_batch_threshold() -> usize {
    5
}

fn default_small_batch_timeout() -> u64 {
    30
}

fn default_large_batch_timeout() -> u64 {
    300
}

fn default_public_path() -> String {
    "/certifications".to_string()
}
