//! # lectern-embeddings
//!
//! Converts text to fixed-dimension vectors via an HTTP embedding
//! backend, with an in-memory cache and degraded-but-available batch
//! semantics: a single failing text becomes a zero vector, never an
//! aborted batch.

pub mod cache;
pub mod engine;
pub mod providers;

pub use engine::EmbeddingEngine;
