//! # lectern-storage
//!
//! SQLite persistence for the three retrieval corpora. One writer
//! connection plus a round-robin read pool (WAL), per-corpus chunk
//! tables, cosine-distance similarity queries, and an inverted-file
//! coarse index built after bulk ingestion.

pub mod engine;
pub mod index;
pub mod pool;
pub mod queries;
pub mod schema;

pub use engine::VectorStore;

use lectern_core::errors::{LecternError, StorageError};

/// Wrap a low-level SQLite failure into the storage error type.
pub(crate) fn to_storage_err(message: impl Into<String>) -> LecternError {
    StorageError::SqliteError {
        message: message.into(),
    }
    .into()
}
