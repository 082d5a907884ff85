/// Retrieval / context-fusion errors.
///
/// These degrade to empty result sets at the fusion layer; they surface
/// only when a caller queries a corpus directly.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("corpus '{corpus}' unreachable: {reason}")]
    CorpusUnreachable { corpus: String, reason: String },

    #[error("query embedding failed: {reason}")]
    QueryEmbeddingFailed { reason: String },
}
