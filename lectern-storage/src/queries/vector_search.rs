//! Cosine-distance similarity queries over blob-encoded embeddings.
//!
//! The exact path scans the corpus table and ranks in Rust; the IVF index
//! narrows the scan to candidate ids first. Both paths share the same
//! distance function, so their ordering semantics are identical.

use rusqlite::{params, Connection};

use lectern_core::errors::LecternResult;
use lectern_core::models::{ChunkMetadata, RetrievalResult};
use lectern_core::traits::QueryOptions;

use crate::to_storage_err;

/// Exact k-nearest query by brute-force scan, ascending cosine distance.
///
/// Returns at most `options.k` rows; all rows when the corpus has fewer;
/// an empty sequence on an empty corpus. A zero-norm query has no defined
/// direction and yields an empty sequence.
pub fn similarity_scan(
    conn: &Connection,
    corpus: &str,
    query: &[f32],
    options: &QueryOptions,
) -> LecternResult<Vec<RetrievalResult>> {
    if options.k == 0 || norm_sq(query) == 0.0 {
        return Ok(Vec::new());
    }

    let (sql, filter) = match &options.user_id {
        Some(user_id) => (
            format!(
                "SELECT id, document, metadata, embedding, dimensions FROM {corpus}
                 WHERE json_extract(metadata, '$.user_id') = ?1"
            ),
            Some(user_id.clone()),
        ),
        None => (
            format!("SELECT id, document, metadata, embedding, dimensions FROM {corpus}"),
            None,
        ),
    };

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let map_row = |row: &rusqlite::Row<'_>| {
        let id: String = row.get(0)?;
        let document: String = row.get(1)?;
        let metadata: String = row.get(2)?;
        let blob: Vec<u8> = row.get(3)?;
        let dims: i64 = row.get(4)?;
        Ok((id, document, metadata, blob, dims))
    };

    let rows: Vec<_> = match filter {
        Some(user_id) => stmt
            .query_map(params![user_id], map_row)
            .map_err(|e| to_storage_err(e.to_string()))?
            .collect::<Result<_, _>>()
            .map_err(|e| to_storage_err(e.to_string()))?,
        None => stmt
            .query_map([], map_row)
            .map_err(|e| to_storage_err(e.to_string()))?
            .collect::<Result<_, _>>()
            .map_err(|e| to_storage_err(e.to_string()))?,
    };

    let mut results = Vec::new();
    for (id, document, metadata_raw, blob, dims) in rows {
        // Rows with a stale width cannot be compared to this query.
        if dims as usize != query.len() {
            continue;
        }
        let stored = bytes_to_f32_vec(&blob, dims as usize);
        let metadata: ChunkMetadata = serde_json::from_str(&metadata_raw)
            .map_err(|e| to_storage_err(format!("corrupt metadata for '{id}': {e}")))?;
        results.push(RetrievalResult {
            id,
            document,
            metadata,
            distance: cosine_distance(query, &stored),
        });
    }

    RetrievalResult::sort_ascending(&mut results);
    results.truncate(options.k);
    Ok(results)
}

/// Fetch and rank only the given candidate ids (IVF probe output).
pub fn similarity_among(
    conn: &Connection,
    corpus: &str,
    query: &[f32],
    candidate_ids: &[String],
    k: usize,
) -> LecternResult<Vec<RetrievalResult>> {
    if candidate_ids.is_empty() || k == 0 || norm_sq(query) == 0.0 {
        return Ok(Vec::new());
    }

    let placeholders = (1..=candidate_ids.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT id, document, metadata, embedding, dimensions FROM {corpus}
         WHERE id IN ({placeholders})"
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows: Vec<_> = stmt
        .query_map(rusqlite::params_from_iter(candidate_ids.iter()), |row| {
            let id: String = row.get(0)?;
            let document: String = row.get(1)?;
            let metadata: String = row.get(2)?;
            let blob: Vec<u8> = row.get(3)?;
            let dims: i64 = row.get(4)?;
            Ok((id, document, metadata, blob, dims))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<_, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for (id, document, metadata_raw, blob, dims) in rows {
        if dims as usize != query.len() {
            continue;
        }
        let stored = bytes_to_f32_vec(&blob, dims as usize);
        let metadata: ChunkMetadata = serde_json::from_str(&metadata_raw)
            .map_err(|e| to_storage_err(format!("corrupt metadata for '{id}': {e}")))?;
        results.push(RetrievalResult {
            id,
            document,
            metadata,
            distance: cosine_distance(query, &stored),
        });
    }

    RetrievalResult::sort_ascending(&mut results);
    results.truncate(k);
    Ok(results)
}

/// Load all (id, embedding) pairs from a corpus, for index building.
pub fn load_embeddings(conn: &Connection, corpus: &str) -> LecternResult<Vec<(String, Vec<f32>)>> {
    let mut stmt = conn
        .prepare(&format!("SELECT id, embedding, dimensions FROM {corpus}"))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows: Vec<_> = stmt
        .query_map([], |row| {
            let id: String = row.get(0)?;
            let blob: Vec<u8> = row.get(1)?;
            let dims: i64 = row.get(2)?;
            Ok((id, blob, dims))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<_, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(rows
        .into_iter()
        .map(|(id, blob, dims)| {
            let vec = bytes_to_f32_vec(&blob, dims as usize);
            (id, vec)
        })
        .collect())
}

/// Number of rows in a corpus table.
pub fn row_count(conn: &Connection, corpus: &str) -> LecternResult<usize> {
    let count: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {corpus}"), [], |row| {
            row.get(0)
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

/// Convert f32 slice to bytes (little-endian).
pub fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert bytes back to an f32 vec.
pub fn bytes_to_f32_vec(bytes: &[u8], expected_dims: usize) -> Vec<f32> {
    let mut result = Vec::with_capacity(expected_dims);
    for chunk in bytes.chunks_exact(4) {
        result.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    result
}

fn norm_sq(v: &[f32]) -> f64 {
    v.iter().map(|x| (*x as f64) * (*x as f64)).sum()
}

/// Cosine distance: 1 − cosine similarity. 0 = identical direction.
/// A zero-norm stored vector (degraded embedding) ranks as orthogonal.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let norm_a = norm_sq(a).sqrt();
    let norm_b = norm_sq(b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}
