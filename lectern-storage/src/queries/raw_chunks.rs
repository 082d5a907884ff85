//! Row-limit reads for the fallback generator: no embedding, no ranking.

use rusqlite::{params, Connection};

use lectern_core::errors::LecternResult;

use crate::to_storage_err;

/// Read up to `limit` (id, document) pairs from a corpus table in
/// storage order. Bounded, synchronous, single statement.
pub fn read_raw_chunks(
    conn: &Connection,
    corpus: &str,
    limit: usize,
) -> LecternResult<Vec<(String, String)>> {
    let mut stmt = conn
        .prepare(&format!("SELECT id, document FROM {corpus} LIMIT ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(rows)
}
