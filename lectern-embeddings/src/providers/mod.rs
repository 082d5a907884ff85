//! Embedding backend providers.

pub mod http_provider;

pub use http_provider::HttpEmbeddingBackend;
