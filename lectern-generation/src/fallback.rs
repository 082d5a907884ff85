//! Degraded lesson generation for when the backend cannot answer.
//!
//! Reads a bounded number of raw stored chunks (no embedding, no
//! ranking) and renders a clearly-labeled skeleton lesson plan around
//! them. This path performs only synchronous row-limited reads, so it
//! cannot hang.

use tracing::warn;

use lectern_core::constants::CORPUS_TEXTBOOKS;
use lectern_core::traits::ICorpusStore;

const EXCERPT_CHARS: usize = 300;

/// Render the fallback lesson for a prompt.
///
/// Store failures degrade to a skeleton with no reference excerpts; the
/// text is always non-empty.
pub fn fallback_lesson(store: &dyn ICorpusStore, prompt: &str, chunk_limit: usize) -> String {
    let chunks = match store.raw_chunks(CORPUS_TEXTBOOKS, chunk_limit) {
        Ok(chunks) => chunks,
        Err(e) => {
            warn!(error = %e, "raw chunk read failed, fallback proceeds without excerpts");
            Vec::new()
        }
    };

    let mut text = String::new();
    text.push_str("**Lesson Plan (generated offline)**\n\n");
    text.push_str(&format!("**Based on your request:** {prompt}\n\n"));

    text.push_str("**Learning Objectives**\n\n");
    text.push_str("- Students will understand key concepts related to the topic\n");
    text.push_str("- Students will be able to apply critical thinking skills\n");
    text.push_str("- Students will demonstrate understanding through activities\n\n");

    text.push_str("**Lesson Activities**\n\n");
    text.push_str("**Opening (10 minutes)**\n");
    text.push_str("Introduction and engagement activity to activate prior knowledge.\n\n");
    text.push_str("**Main Activity (30 minutes)**\n");
    text.push_str("Core learning experience with hands-on exploration.\n\n");
    text.push_str("**Closure (10 minutes)**\n");
    text.push_str("Reflection and summary of key learning points.\n\n");

    text.push_str("**Assessment**\n\n");
    text.push_str("- **Formative:** Observation and questioning during activities\n");
    text.push_str("- **Summative:** Exit ticket or short quiz\n");

    if !chunks.is_empty() {
        text.push_str("\n**Reference Material**\n\n");
        for (id, document) in &chunks {
            text.push_str(&format!("- [{id}] {}\n", excerpt(document)));
        }
    }

    text
}

fn excerpt(document: &str) -> String {
    let flat = document.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= EXCERPT_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(EXCERPT_CHARS).collect();
        format!("{}…", cut.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_core::errors::{LecternResult, StorageError};
    use lectern_core::models::{ChunkRecord, RetrievalResult};
    use lectern_core::traits::{QueryOptions, UpsertReport};

    struct FixedStore {
        rows: Vec<(String, String)>,
    }

    impl ICorpusStore for FixedStore {
        fn ensure_schema(&self, _dim: usize) -> LecternResult<()> {
            Ok(())
        }
        fn upsert(&self, _corpus: &str, _records: &[ChunkRecord]) -> LecternResult<UpsertReport> {
            Ok(UpsertReport::default())
        }
        fn similarity_query(
            &self,
            _corpus: &str,
            _query: &[f32],
            _options: &QueryOptions,
        ) -> LecternResult<Vec<RetrievalResult>> {
            Ok(Vec::new())
        }
        fn raw_chunks(&self, _corpus: &str, limit: usize) -> LecternResult<Vec<(String, String)>> {
            Ok(self.rows.iter().take(limit).cloned().collect())
        }
    }

    struct FailingStore;

    impl ICorpusStore for FailingStore {
        fn ensure_schema(&self, _dim: usize) -> LecternResult<()> {
            Ok(())
        }
        fn upsert(&self, _corpus: &str, _records: &[ChunkRecord]) -> LecternResult<UpsertReport> {
            Ok(UpsertReport::default())
        }
        fn similarity_query(
            &self,
            _corpus: &str,
            _query: &[f32],
            _options: &QueryOptions,
        ) -> LecternResult<Vec<RetrievalResult>> {
            Ok(Vec::new())
        }
        fn raw_chunks(&self, _corpus: &str, _limit: usize) -> LecternResult<Vec<(String, String)>> {
            Err(StorageError::SqliteError {
                message: "disk I/O error".to_string(),
            }
            .into())
        }
    }

    #[test]
    fn fallback_is_labeled_and_quotes_the_request() {
        let store = FixedStore { rows: Vec::new() };
        let text = fallback_lesson(&store, "Explain photosynthesis", 3);
        assert!(text.contains("generated offline"));
        assert!(text.contains("Explain photosynthesis"));
        assert!(text.contains("**Assessment**"));
    }

    #[test]
    fn stored_chunks_appear_as_reference_material() {
        let store = FixedStore {
            rows: vec![
                ("t1".to_string(), "Photosynthesis converts light".to_string()),
                ("t2".to_string(), "Cells contain chloroplasts".to_string()),
            ],
        };
        let text = fallback_lesson(&store, "photosynthesis", 3);
        assert!(text.contains("[t1] Photosynthesis converts light"));
        assert!(text.contains("[t2] Cells contain chloroplasts"));
    }

    #[test]
    fn chunk_limit_bounds_the_read() {
        let rows = (0..10)
            .map(|i| (format!("c{i}"), format!("document {i}")))
            .collect();
        let store = FixedStore { rows };
        let text = fallback_lesson(&store, "anything", 3);
        assert!(text.contains("[c2]"));
        assert!(!text.contains("[c3]"));
    }

    #[test]
    fn store_failure_still_yields_full_skeleton() {
        let text = fallback_lesson(&FailingStore, "anything", 3);
        assert!(text.contains("**Learning Objectives**"));
        assert!(!text.contains("Reference Material"));
    }

    #[test]
    fn long_documents_are_excerpted() {
        let store = FixedStore {
            rows: vec![("t1".to_string(), "word ".repeat(200))],
        };
        let text = fallback_lesson(&store, "anything", 1);
        assert!(text.contains('…'));
    }
}
