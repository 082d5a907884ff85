//! VectorStore — owns the ConnectionPool and implements ICorpusStore.
//!
//! Reads go through the read pool (file-backed) or the writer (in-memory
//! mode, where read-pool connections are isolated databases). Writes run
//! under the retry policy for transient SQLITE_BUSY failures.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use tracing::{info, warn};

use lectern_core::config::StorageConfig;
use lectern_core::errors::{LecternError, LecternResult, StorageError};
use lectern_core::models::{ChunkRecord, RetrievalResult};
use lectern_core::retry::RetryPolicy;
use lectern_core::traits::{ICorpusStore, QueryOptions, UpsertReport};

use crate::index::IvfIndex;
use crate::pool::ConnectionPool;
use crate::{queries, schema};

/// The SQLite-backed vector store for all three corpora.
pub struct VectorStore {
    pool: ConnectionPool,
    config: StorageConfig,
    retry: RetryPolicy,
    /// When true, use the read pool for reads (file-backed mode).
    use_read_pool: bool,
    /// IVF indexes by corpus, built on demand after bulk ingestion.
    /// Dropped on upsert to that corpus (stale lists must not serve).
    indexes: RwLock<HashMap<String, IvfIndex>>,
}

impl VectorStore {
    /// Open a store per configuration: file-backed when `db_path` is set,
    /// in-memory otherwise.
    pub fn open(config: &StorageConfig) -> LecternResult<Self> {
        match &config.db_path {
            Some(path) => Self::open_file(path, config),
            None => Self::open_in_memory_with(config),
        }
    }

    /// Open a store backed by a file on disk.
    pub fn open_file(path: &Path, config: &StorageConfig) -> LecternResult<Self> {
        let pool = ConnectionPool::open(path, config.read_pool_size)?;
        Ok(Self {
            pool,
            config: config.clone(),
            retry: RetryPolicy::default(),
            use_read_pool: true,
            indexes: RwLock::new(HashMap::new()),
        })
    }

    /// Open an in-memory store (for testing). Reads route through the
    /// writer since in-memory read-pool connections are isolated databases.
    pub fn open_in_memory() -> LecternResult<Self> {
        Self::open_in_memory_with(&StorageConfig::default())
    }

    fn open_in_memory_with(config: &StorageConfig) -> LecternResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        Ok(Self {
            pool,
            config: config.clone(),
            retry: RetryPolicy::default(),
            use_read_pool: false,
            indexes: RwLock::new(HashMap::new()),
        })
    }

    fn with_reader<F, T>(&self, f: F) -> LecternResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> LecternResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }

    fn with_writer_retrying<F, T>(&self, label: &str, f: F) -> LecternResult<T>
    where
        F: Fn(&rusqlite::Connection) -> LecternResult<T>,
    {
        self.retry.run(
            label,
            || self.pool.writer.with_conn_sync(&f),
            |e| {
                matches!(
                    e,
                    LecternError::Storage(StorageError::SqliteError { message })
                        if message.contains("locked") || message.contains("busy")
                )
            },
        )
    }

    fn established_dim(&self) -> LecternResult<usize> {
        self.with_reader(schema::established_dimensions)?
            .ok_or_else(|| StorageError::SchemaNotInitialized.into())
    }

    fn drop_index(&self, corpus: &str) {
        if let Ok(mut indexes) = self.indexes.write() {
            indexes.remove(corpus);
        }
    }

    /// Build the IVF index for a corpus after bulk ingestion.
    ///
    /// A no-op below the configured row threshold — small corpora stay on
    /// the exact scan. Returns the number of inverted lists built (0 when
    /// skipped).
    pub fn build_index(&self, corpus: &str) -> LecternResult<usize> {
        schema::validate_corpus(corpus)?;
        let rows = self.with_reader(|conn| queries::vector_search::load_embeddings(conn, corpus))?;

        match IvfIndex::build(&rows, self.config.ivf_min_rows, self.config.ivf_nprobe) {
            Some(index) => {
                let nlists = index.nlists();
                info!(corpus, rows = rows.len(), nlists, "IVF index built");
                self.indexes
                    .write()
                    .map_err(|e| StorageError::LockPoisoned {
                        details: e.to_string(),
                    })?
                    .insert(corpus.to_string(), index);
                Ok(nlists)
            }
            None => {
                info!(
                    corpus,
                    rows = rows.len(),
                    "corpus below IVF threshold, keeping exact scan"
                );
                Ok(0)
            }
        }
    }

    /// Upsert a batch under one transaction (all-or-nothing), for
    /// ingestion callers that need batch atomicity.
    pub fn upsert_in_txn(&self, corpus: &str, records: &[ChunkRecord]) -> LecternResult<usize> {
        schema::validate_corpus(corpus)?;
        let dim = self.established_dim()?;
        self.drop_index(corpus);
        self.with_writer_retrying("upsert_in_txn", |conn| {
            queries::chunk_upsert::upsert_chunks_in_txn(conn, corpus, records, dim)
        })
    }
}

impl ICorpusStore for VectorStore {
    fn ensure_schema(&self, dim: usize) -> LecternResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| schema::ensure_schema(conn, dim))
    }

    fn upsert(&self, corpus: &str, records: &[ChunkRecord]) -> LecternResult<UpsertReport> {
        schema::validate_corpus(corpus)?;
        let dim = self.established_dim()?;
        self.drop_index(corpus);

        let report = self.with_writer_retrying("upsert", |conn| {
            queries::chunk_upsert::upsert_chunks(conn, corpus, records, dim)
        })?;

        if !report.all_ok() {
            warn!(
                corpus,
                written = report.written,
                failed = report.failed.len(),
                "upsert applied partially"
            );
        }
        Ok(report)
    }

    fn similarity_query(
        &self,
        corpus: &str,
        query: &[f32],
        options: &QueryOptions,
    ) -> LecternResult<Vec<RetrievalResult>> {
        schema::validate_corpus(corpus)?;
        let dim = self.established_dim()?;
        if query.len() != dim {
            return Err(StorageError::QueryDimensionMismatch {
                expected: dim,
                got: query.len(),
            }
            .into());
        }

        // Filtered queries bypass the index: the filter selects a small
        // per-user subset and the exact scan already carries it in SQL.
        if options.user_id.is_none() {
            let candidates = {
                let indexes = self.indexes.read().map_err(|e| StorageError::LockPoisoned {
                    details: e.to_string(),
                })?;
                indexes.get(corpus).map(|index| index.probe(query))
            };
            if let Some(candidate_ids) = candidates {
                return self.with_reader(|conn| {
                    queries::vector_search::similarity_among(
                        conn,
                        corpus,
                        query,
                        &candidate_ids,
                        options.k,
                    )
                });
            }
        }

        self.with_reader(|conn| queries::vector_search::similarity_scan(conn, corpus, query, options))
    }

    fn raw_chunks(&self, corpus: &str, limit: usize) -> LecternResult<Vec<(String, String)>> {
        schema::validate_corpus(corpus)?;
        self.with_reader(|conn| queries::raw_chunks::read_raw_chunks(conn, corpus, limit))
    }
}
