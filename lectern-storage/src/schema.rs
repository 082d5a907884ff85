//! Corpus table creation and dimension pinning.
//!
//! Each corpus is a table `(id TEXT PRIMARY KEY, document, metadata JSON,
//! embedding BLOB, dimensions)`. The established embedding dimension is
//! pinned in `corpus_meta`; re-running with a different dimension is a
//! schema conflict, surfaced, never silently ignored.

use rusqlite::{params, Connection, OptionalExtension};

use lectern_core::constants::ALL_CORPORA;
use lectern_core::errors::{LecternResult, StorageError};

use crate::to_storage_err;

const DIMENSIONS_KEY: &str = "dimensions";

/// Idempotently create all corpus tables with the given embedding width.
pub fn ensure_schema(conn: &Connection, dim: usize) -> LecternResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS corpus_meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    if let Some(established) = established_dimensions(conn)? {
        if established != dim {
            return Err(StorageError::SchemaConflict {
                established,
                requested: dim,
            }
            .into());
        }
    } else {
        conn.execute(
            "INSERT INTO corpus_meta (key, value) VALUES (?1, ?2)",
            params![DIMENSIONS_KEY, dim.to_string()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    }

    for corpus in ALL_CORPORA {
        // Table names come from the fixed corpus list, never from callers.
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {corpus} (
                id TEXT PRIMARY KEY,
                document TEXT NOT NULL,
                metadata TEXT NOT NULL DEFAULT '{{}}',
                embedding BLOB NOT NULL,
                dimensions INTEGER NOT NULL
            );"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    }

    Ok(())
}

/// The dimension pinned at first `ensure_schema`, if any.
pub fn established_dimensions(conn: &Connection) -> LecternResult<Option<usize>> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM corpus_meta WHERE key = ?1",
            params![DIMENSIONS_KEY],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match value {
        Some(raw) => raw
            .parse::<usize>()
            .map(Some)
            .map_err(|e| to_storage_err(format!("corrupt corpus_meta dimensions: {e}"))),
        None => Ok(None),
    }
}

/// Reject corpus names outside the fixed set before they reach SQL.
pub fn validate_corpus(corpus: &str) -> LecternResult<()> {
    if ALL_CORPORA.contains(&corpus) {
        Ok(())
    } else {
        Err(StorageError::UnknownCorpus {
            corpus: corpus.to_string(),
        }
        .into())
    }
}
