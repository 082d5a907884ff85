/// Storage-layer errors for the SQLite vector store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("schema conflict: corpus dimension established as {established}, requested {requested}")]
    SchemaConflict { established: usize, requested: usize },

    #[error("schema not initialized: call ensure_schema before querying")]
    SchemaNotInitialized,

    #[error("unknown corpus: {corpus}")]
    UnknownCorpus { corpus: String },

    #[error("query dimension mismatch: expected {expected}, got {got}")]
    QueryDimensionMismatch { expected: usize, got: usize },

    #[error("connection lock poisoned: {details}")]
    LockPoisoned { details: String },
}
