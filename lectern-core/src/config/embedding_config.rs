use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// API key for the embedding backend. `None` means the backend is
    /// unavailable and the engine fails fast at call time.
    pub api_key: Option<String>,
    /// Base URL of the embedding API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Embedding dimension D, fixed per corpus.
    pub dimensions: usize,
    /// Per-request HTTP timeout (seconds).
    pub request_timeout_secs: u64,
    /// Max entries in the in-memory embedding cache.
    pub cache_max_entries: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: defaults::API_BASE_URL.to_string(),
            model: defaults::EMBEDDING_MODEL.to_string(),
            dimensions: defaults::DIMENSIONS,
            request_timeout_secs: defaults::EMBEDDING_TIMEOUT_SECS,
            cache_max_entries: defaults::CACHE_MAX_ENTRIES,
        }
    }
}
