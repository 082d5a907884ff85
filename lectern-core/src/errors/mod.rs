//! Error taxonomy for the pipeline.
//!
//! Per-item failures (one text's embedding, one corpus's retrieval) are
//! isolated and never abort the overall request. Only schema-level and
//! configuration-level failures are fatal at startup.

mod embedding_error;
mod generation_error;
mod retrieval_error;
mod storage_error;

pub use embedding_error::EmbeddingError;
pub use generation_error::GenerationError;
pub use retrieval_error::RetrievalError;
pub use storage_error::StorageError;

/// Unified error type for the Lectern workspace.
#[derive(Debug, thiserror::Error)]
pub enum LecternError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Convenience result alias used across the workspace.
pub type LecternResult<T> = Result<T, LecternError>;
