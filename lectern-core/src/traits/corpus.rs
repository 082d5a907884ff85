use crate::errors::LecternResult;
use crate::models::{ChunkRecord, RetrievalResult};

/// Options for a similarity query against one corpus.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Maximum number of results returned.
    pub k: usize,
    /// When set, only rows whose `metadata.user_id` equals this value match.
    pub user_id: Option<String>,
}

impl QueryOptions {
    pub fn top_k(k: usize) -> Self {
        Self { k, user_id: None }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Outcome of a multi-record upsert. Partial application is surfaced,
/// never silently swallowed.
#[derive(Debug, Clone, Default)]
pub struct UpsertReport {
    /// Number of rows written.
    pub written: usize,
    /// Per-row failures as (id, reason).
    pub failed: Vec<(String, String)>,
}

impl UpsertReport {
    pub fn all_ok(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Per-corpus persistence for chunk records with similarity search.
pub trait ICorpusStore: Send + Sync {
    /// Idempotently create corpus tables with a vector column of width
    /// `dim`. A different `dim` than previously established is a schema
    /// conflict and must be surfaced.
    fn ensure_schema(&self, dim: usize) -> LecternResult<()>;

    /// Write records keyed by id, replacing document/metadata/embedding
    /// atomically per id (last-write-wins).
    fn upsert(&self, corpus: &str, records: &[ChunkRecord]) -> LecternResult<UpsertReport>;

    /// Return up to `options.k` nearest rows by cosine distance, ascending.
    /// An empty corpus yields an empty sequence, not an error.
    fn similarity_query(
        &self,
        corpus: &str,
        query: &[f32],
        options: &QueryOptions,
    ) -> LecternResult<Vec<RetrievalResult>>;

    /// Bounded read of raw chunks (no embedding, no ranking) for the
    /// fallback path.
    fn raw_chunks(&self, corpus: &str, limit: usize) -> LecternResult<Vec<(String, String)>>;
}
