//! SQL query modules, one per concern.

pub mod chunk_upsert;
pub mod raw_chunks;
pub mod vector_search;
