//! Per-row chunk upserts: `INSERT .. ON CONFLICT(id) DO UPDATE`.
//!
//! Each row is written independently keyed by id; re-upsert fully replaces
//! document, metadata, and embedding. Per-row failures are collected in
//! the report, not swallowed.

use rusqlite::{params, Connection};

use lectern_core::errors::LecternResult;
use lectern_core::models::ChunkRecord;
use lectern_core::traits::UpsertReport;

use super::vector_search::f32_vec_to_bytes;
use crate::to_storage_err;

/// Upsert records into a corpus table, one row at a time.
///
/// Rows whose embedding width differs from `expected_dim` are rejected
/// per row and reported; the rest of the batch continues.
pub fn upsert_chunks(
    conn: &Connection,
    corpus: &str,
    records: &[ChunkRecord],
    expected_dim: usize,
) -> LecternResult<UpsertReport> {
    let mut report = UpsertReport::default();

    for record in records {
        if record.embedding.len() != expected_dim {
            report.failed.push((
                record.id.clone(),
                format!(
                    "embedding dimension {} does not match corpus dimension {expected_dim}",
                    record.embedding.len()
                ),
            ));
            continue;
        }

        match upsert_one(conn, corpus, record) {
            Ok(()) => report.written += 1,
            Err(e) => report.failed.push((record.id.clone(), e.to_string())),
        }
    }

    Ok(report)
}

/// Upsert records inside a single transaction: all-or-nothing for
/// ingestion callers that need batch atomicity. Any row failure,
/// including a dimension mismatch, rolls the whole batch back.
pub fn upsert_chunks_in_txn(
    conn: &Connection,
    corpus: &str,
    records: &[ChunkRecord],
    expected_dim: usize,
) -> LecternResult<usize> {
    conn.execute_batch("BEGIN IMMEDIATE")
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = (|| {
        for record in records {
            if record.embedding.len() != expected_dim {
                return Err(to_storage_err(format!(
                    "record '{}': embedding dimension {} does not match corpus dimension {expected_dim}",
                    record.id,
                    record.embedding.len()
                )));
            }
            upsert_one(conn, corpus, record)?;
        }
        Ok(records.len())
    })();

    match result {
        Ok(n) => {
            conn.execute_batch("COMMIT")
                .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(n)
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}

fn upsert_one(conn: &Connection, corpus: &str, record: &ChunkRecord) -> LecternResult<()> {
    let metadata = serde_json::to_string(&record.metadata)
        .map_err(|e| to_storage_err(format!("metadata serialization: {e}")))?;
    let blob = f32_vec_to_bytes(&record.embedding);

    conn.execute(
        &format!(
            "INSERT INTO {corpus} (id, document, metadata, embedding, dimensions)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                document = excluded.document,
                metadata = excluded.metadata,
                embedding = excluded.embedding,
                dimensions = excluded.dimensions"
        ),
        params![
            record.id,
            record.document,
            metadata,
            blob,
            record.embedding.len() as i64
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(())
}
