//! EmbeddingEngine — the main entry point for lectern-embeddings.
//!
//! Wraps a backend with caching and the degraded-but-available batch
//! policy: output is length- and order-preserving, and a single failing
//! text becomes a zero vector while the batch continues.

use std::sync::Mutex;

use tracing::{info, warn};

use lectern_core::config::EmbeddingConfig;
use lectern_core::errors::{EmbeddingError, LecternResult};
use lectern_core::models::DegradationEvent;
use lectern_core::traits::IEmbeddingBackend;

use crate::cache::EmbeddingCache;
use crate::providers::HttpEmbeddingBackend;

/// The main embedding engine.
pub struct EmbeddingEngine {
    backend: Box<dyn IEmbeddingBackend>,
    cache: EmbeddingCache,
    dimensions: usize,
    /// Accumulated degradation events for the current session.
    events: Mutex<Vec<DegradationEvent>>,
}

impl EmbeddingEngine {
    /// Create an engine over the HTTP backend from configuration.
    pub fn new(config: &EmbeddingConfig) -> Self {
        let backend = HttpEmbeddingBackend::new(config);
        info!(
            backend = backend.name(),
            dims = config.dimensions,
            available = backend.is_available(),
            "EmbeddingEngine initialized"
        );
        Self::with_backend(Box::new(backend), config.cache_max_entries)
    }

    /// Create an engine over an arbitrary backend (tests, local models).
    pub fn with_backend(backend: Box<dyn IEmbeddingBackend>, cache_max_entries: u64) -> Self {
        let dimensions = backend.dimensions();
        Self {
            backend,
            cache: EmbeddingCache::new(cache_max_entries),
            dimensions,
            events: Mutex::new(Vec::new()),
        }
    }

    /// Embed a batch of texts. Length- and order-preserving: output[i]
    /// corresponds to input[i]. A failing text degrades to a zero vector
    /// of dimension D and the batch continues.
    ///
    /// Fails fast with `BackendUnavailable` when the backend cannot be
    /// reached at all, so callers can decide whether to degrade.
    pub fn embed_batch(&self, texts: &[String]) -> LecternResult<Vec<Vec<f32>>> {
        if !self.backend.is_available() {
            return Err(EmbeddingError::BackendUnavailable {
                reason: format!("backend '{}' is not configured", self.backend.name()),
            }
            .into());
        }

        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed_one(text));
        }
        Ok(vectors)
    }

    /// Embed a single query string.
    pub fn embed_query(&self, query: &str) -> LecternResult<Vec<f32>> {
        if !self.backend.is_available() {
            return Err(EmbeddingError::BackendUnavailable {
                reason: format!("backend '{}' is not configured", self.backend.name()),
            }
            .into());
        }
        Ok(self.embed_one(query))
    }

    /// Embed one text with cache lookup and zero-vector degradation.
    fn embed_one(&self, text: &str) -> Vec<f32> {
        let key = EmbeddingCache::key_for(text);
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        match self.backend.embed(text) {
            Ok(vector) => {
                self.cache.insert(key, vector.clone());
                vector
            }
            Err(e) => {
                warn!(
                    backend = self.backend.name(),
                    error = %e,
                    "embedding failed, degrading to zero vector"
                );
                if let Ok(mut events) = self.events.lock() {
                    events.push(DegradationEvent::now(
                        "embeddings",
                        e.to_string(),
                        "zero-vector",
                    ));
                }
                vec![0.0; self.dimensions]
            }
        }
    }

    /// Drain accumulated degradation events.
    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    /// The configured embedding dimension.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// The engine is itself a backend, so retrieval components can take a
/// `&dyn IEmbeddingBackend` regardless of caching.
impl IEmbeddingBackend for EmbeddingEngine {
    fn embed(&self, text: &str) -> LecternResult<Vec<f32>> {
        self.embed_query(text)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        self.backend.name()
    }

    fn is_available(&self) -> bool {
        self.backend.is_available()
    }
}
