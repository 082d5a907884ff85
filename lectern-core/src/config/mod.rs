//! Configuration for the pipeline, loaded once at process start and
//! passed down to each component. No ambient globals.

mod embedding_config;
mod generation_config;
mod retrieval_config;
mod storage_config;

pub use embedding_config::EmbeddingConfig;
pub use generation_config::GenerationConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{LecternError, LecternResult};

/// Top-level configuration, one section per subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LecternConfig {
    pub embedding: EmbeddingConfig,
    pub storage: StorageConfig,
    pub retrieval: RetrievalConfig,
    pub generation: GenerationConfig,
}

impl LecternConfig {
    /// Parse a TOML config string. Missing sections and fields fall back
    /// to defaults.
    pub fn from_toml_str(raw: &str) -> LecternResult<Self> {
        toml::from_str(raw).map_err(|e| LecternError::Config {
            reason: format!("invalid config TOML: {e}"),
        })
    }

    /// Load configuration from a TOML file on disk.
    pub fn load(path: &std::path::Path) -> LecternResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| LecternError::Config {
            reason: format!("cannot read config file {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&raw)
    }
}

/// Default values shared across config sections.
pub(crate) mod defaults {
    use crate::constants;

    pub const EMBEDDING_MODEL: &str = "text-embedding-004";
    pub const GENERATION_MODEL: &str = "gemini-1.5-flash";
    pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    pub const EMBEDDING_TIMEOUT_SECS: u64 = 15;
    pub const READ_POOL_SIZE: usize = 4;
    pub const DIMENSIONS: usize = constants::DEFAULT_DIMENSIONS;
    pub const CACHE_MAX_ENTRIES: u64 = 10_000;
    pub const TEXTBOOK_TOP_K: usize = constants::TEXTBOOK_TOP_K;
    pub const TEMPLATE_CANDIDATE_K: usize = constants::TEMPLATE_CANDIDATE_K;
    pub const BLOCK_CHAR_CAP: usize = 4_000;
    pub const IVF_MIN_ROWS: usize = 1_000;
    pub const IVF_NPROBE: usize = 4;
    pub const DEADLINE_SECS: u64 = constants::GENERATION_DEADLINE_SECS;
    pub const FALLBACK_CHUNK_LIMIT: usize = constants::FALLBACK_CHUNK_LIMIT;
    pub const TEMPERATURE: f32 = 0.3;
    pub const TOP_P: f32 = 0.95;
    pub const TOP_K: u32 = 40;
    pub const MAX_OUTPUT_TOKENS: u32 = 8_192;
}
