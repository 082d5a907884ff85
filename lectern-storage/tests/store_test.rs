//! Integration tests for the vector store against the ICorpusStore contract.

use lectern_core::config::StorageConfig;
use lectern_core::constants::{CORPUS_TEMPLATES, CORPUS_TEXTBOOKS, CORPUS_USER_TEMPLATES};
use lectern_core::errors::{LecternError, StorageError};
use lectern_core::models::{ChunkMetadata, ChunkRecord};
use lectern_core::traits::{ICorpusStore, QueryOptions};
use lectern_storage::VectorStore;

const DIM: usize = 4;

fn store() -> VectorStore {
    let store = VectorStore::open_in_memory().expect("in-memory store");
    store.ensure_schema(DIM).expect("schema");
    store
}

fn record(id: &str, embedding: Vec<f32>) -> ChunkRecord {
    ChunkRecord::new(id, format!("document for {id}"), embedding)
}

#[test]
fn upsert_then_query_returns_record_first_with_zero_distance() {
    let store = store();
    let v = vec![0.2, 0.4, 0.6, 0.8];
    store
        .upsert(CORPUS_TEXTBOOKS, &[record("t1", v.clone())])
        .unwrap();

    let hits = store
        .similarity_query(CORPUS_TEXTBOOKS, &v, &QueryOptions::top_k(1))
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "t1");
    assert!(hits[0].distance.abs() < 1e-6);
}

#[test]
fn reupsert_replaces_instead_of_duplicating() {
    let store = store();
    let first = record("t1", vec![1.0, 0.0, 0.0, 0.0]);
    let mut second = record("t1", vec![0.0, 1.0, 0.0, 0.0]);
    second.document = "rewritten".to_string();
    second.metadata = ChunkMetadata::from_pairs(&[("subject", "math")]);

    store.upsert(CORPUS_TEXTBOOKS, &[first]).unwrap();
    store.upsert(CORPUS_TEXTBOOKS, &[second]).unwrap();

    let hits = store
        .similarity_query(
            CORPUS_TEXTBOOKS,
            &[0.0, 1.0, 0.0, 0.0],
            &QueryOptions::top_k(10),
        )
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document, "rewritten");
    assert_eq!(hits[0].metadata.subject(), Some("math"));
    assert!(hits[0].distance.abs() < 1e-6);
}

#[test]
fn query_respects_k_and_orders_ascending() {
    let store = store();
    store
        .upsert(
            CORPUS_TEXTBOOKS,
            &[
                record("near", vec![1.0, 0.05, 0.0, 0.0]),
                record("far", vec![0.0, 1.0, 0.0, 0.0]),
                record("mid", vec![0.7, 0.7, 0.0, 0.0]),
            ],
        )
        .unwrap();

    let hits = store
        .similarity_query(
            CORPUS_TEXTBOOKS,
            &[1.0, 0.0, 0.0, 0.0],
            &QueryOptions::top_k(2),
        )
        .unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, "near");
    assert_eq!(hits[1].id, "mid");
    assert!(hits[0].distance <= hits[1].distance);
}

#[test]
fn fewer_rows_than_k_returns_all() {
    let store = store();
    store
        .upsert(CORPUS_TEMPLATES, &[record("only", vec![0.5; 4])])
        .unwrap();
    let hits = store
        .similarity_query(CORPUS_TEMPLATES, &[0.5; 4], &QueryOptions::top_k(10))
        .unwrap();
    assert_eq!(hits.len(), 1);
}

#[test]
fn empty_corpus_returns_empty_not_error() {
    let store = store();
    let hits = store
        .similarity_query(CORPUS_TEMPLATES, &[1.0, 0.0, 0.0, 0.0], &QueryOptions::top_k(3))
        .unwrap();
    assert!(hits.is_empty());
}

#[test]
fn schema_conflict_on_different_dim() {
    let store = store();
    let err = store.ensure_schema(DIM + 1).unwrap_err();
    assert!(matches!(
        err,
        LecternError::Storage(StorageError::SchemaConflict { .. })
    ));
}

#[test]
fn query_dimension_mismatch_rejected() {
    let store = store();
    let err = store
        .similarity_query(CORPUS_TEXTBOOKS, &[1.0, 0.0], &QueryOptions::top_k(1))
        .unwrap_err();
    assert!(matches!(
        err,
        LecternError::Storage(StorageError::QueryDimensionMismatch { expected: 4, got: 2 })
    ));
}

#[test]
fn unknown_corpus_rejected() {
    let store = store();
    let err = store
        .similarity_query("not_a_corpus", &[0.0; 4], &QueryOptions::top_k(1))
        .unwrap_err();
    assert!(matches!(
        err,
        LecternError::Storage(StorageError::UnknownCorpus { .. })
    ));
}

#[test]
fn partial_upsert_surfaces_per_row_failures() {
    let store = store();
    let report = store
        .upsert(
            CORPUS_TEXTBOOKS,
            &[
                record("good", vec![1.0, 0.0, 0.0, 0.0]),
                record("bad_dim", vec![1.0, 0.0]),
            ],
        )
        .unwrap();
    assert_eq!(report.written, 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "bad_dim");
}

#[test]
fn txn_upsert_rolls_back_on_any_bad_row() {
    let store = store();
    let err = store.upsert_in_txn(
        CORPUS_TEXTBOOKS,
        &[
            record("good", vec![1.0, 0.0, 0.0, 0.0]),
            record("bad_dim", vec![1.0]),
        ],
    );
    assert!(err.is_err());

    let hits = store
        .similarity_query(
            CORPUS_TEXTBOOKS,
            &[1.0, 0.0, 0.0, 0.0],
            &QueryOptions::top_k(10),
        )
        .unwrap();
    assert!(hits.is_empty(), "rolled-back rows must not be visible");
}

#[test]
fn user_id_filter_scopes_results() {
    let store = store();
    let alice = record("a1", vec![1.0, 0.0, 0.0, 0.0])
        .with_metadata(ChunkMetadata::from_pairs(&[("user_id", "alice")]));
    let bob = record("b1", vec![1.0, 0.0, 0.0, 0.0])
        .with_metadata(ChunkMetadata::from_pairs(&[("user_id", "bob")]));
    store.upsert(CORPUS_USER_TEMPLATES, &[alice, bob]).unwrap();

    let hits = store
        .similarity_query(
            CORPUS_USER_TEMPLATES,
            &[1.0, 0.0, 0.0, 0.0],
            &QueryOptions::top_k(10).with_user_id("alice"),
        )
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "a1");
}

#[test]
fn raw_chunks_bounded_read() {
    let store = store();
    store
        .upsert(
            CORPUS_TEXTBOOKS,
            &[
                record("r1", vec![1.0, 0.0, 0.0, 0.0]),
                record("r2", vec![0.0, 1.0, 0.0, 0.0]),
                record("r3", vec![0.0, 0.0, 1.0, 0.0]),
            ],
        )
        .unwrap();
    let chunks = store.raw_chunks(CORPUS_TEXTBOOKS, 2).unwrap();
    assert_eq!(chunks.len(), 2);
}

#[test]
fn ivf_index_agrees_with_exact_scan() {
    let config = StorageConfig {
        ivf_min_rows: 10,
        ivf_nprobe: 64,
        ..Default::default()
    };
    let store = VectorStore::open(&config).unwrap();
    store.ensure_schema(DIM).unwrap();

    let mut records = Vec::new();
    for i in 0..60 {
        let angle = i as f32 * 0.1;
        records.push(record(
            &format!("c{i}"),
            vec![angle.cos(), angle.sin(), 0.0, 0.0],
        ));
    }
    store.upsert(CORPUS_TEXTBOOKS, &records).unwrap();

    let query = [1.0, 0.1, 0.0, 0.0];
    let exact = store
        .similarity_query(CORPUS_TEXTBOOKS, &query, &QueryOptions::top_k(5))
        .unwrap();

    let nlists = store.build_index(CORPUS_TEXTBOOKS).unwrap();
    assert!(nlists > 0);

    // With nprobe covering all lists, the indexed path must reproduce
    // the exact ordering.
    let indexed = store
        .similarity_query(CORPUS_TEXTBOOKS, &query, &QueryOptions::top_k(5))
        .unwrap();
    let exact_ids: Vec<_> = exact.iter().map(|r| r.id.as_str()).collect();
    let indexed_ids: Vec<_> = indexed.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(exact_ids, indexed_ids);
}

#[test]
fn upsert_after_index_build_drops_stale_index() {
    let config = StorageConfig {
        ivf_min_rows: 4,
        ivf_nprobe: 1,
        ..Default::default()
    };
    let store = VectorStore::open(&config).unwrap();
    store.ensure_schema(DIM).unwrap();

    let records: Vec<_> = (0..8)
        .map(|i| record(&format!("c{i}"), vec![i as f32, 1.0, 0.0, 0.0]))
        .collect();
    store.upsert(CORPUS_TEXTBOOKS, &records).unwrap();
    store.build_index(CORPUS_TEXTBOOKS).unwrap();

    // New row lands after the index was built; it must still be findable.
    let fresh = record("fresh", vec![0.0, 0.0, 0.0, 1.0]);
    store.upsert(CORPUS_TEXTBOOKS, &[fresh]).unwrap();

    let hits = store
        .similarity_query(
            CORPUS_TEXTBOOKS,
            &[0.0, 0.0, 0.0, 1.0],
            &QueryOptions::top_k(1),
        )
        .unwrap();
    assert_eq!(hits[0].id, "fresh");
}

#[test]
fn file_backed_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        db_path: Some(dir.path().join("lectern.db")),
        ..Default::default()
    };
    let store = VectorStore::open(&config).unwrap();
    store.ensure_schema(DIM).unwrap();
    store
        .upsert(CORPUS_TEXTBOOKS, &[record("persisted", vec![1.0, 0.0, 0.0, 0.0])])
        .unwrap();

    let hits = store
        .similarity_query(
            CORPUS_TEXTBOOKS,
            &[1.0, 0.0, 0.0, 0.0],
            &QueryOptions::top_k(1),
        )
        .unwrap();
    assert_eq!(hits[0].id, "persisted");
}
