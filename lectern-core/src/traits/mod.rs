//! Trait seams between the pipeline and its external collaborators.

mod corpus;
mod embedding;
mod generation;

pub use corpus::{ICorpusStore, QueryOptions, UpsertReport};
pub use embedding::IEmbeddingBackend;
pub use generation::IGenerationBackend;
