//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// Local object store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory where uploaded certificate files are written.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Maximum request body size accepted by upload endpoints, in bytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            max_upload_size_bytes: default_max_upload_size(),
        }
    }
}

fn default_upload_dir() -> String {
    "./uploads/certifications".to_string()
}

fn default_max_upload_size() -> u64 {
    64 * 1024 * 1024
}
