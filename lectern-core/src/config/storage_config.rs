use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector-store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path. `None` selects an in-memory store (tests).
    pub db_path: Option<PathBuf>,
    /// Number of read-only connections in the pool.
    pub read_pool_size: usize,
    /// Row count above which similarity queries go through the IVF index.
    pub ivf_min_rows: usize,
    /// Number of IVF lists probed per query.
    pub ivf_nprobe: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            read_pool_size: defaults::READ_POOL_SIZE,
            ivf_min_rows: defaults::IVF_MIN_ROWS,
            ivf_nprobe: defaults::IVF_NPROBE,
        }
    }
}
