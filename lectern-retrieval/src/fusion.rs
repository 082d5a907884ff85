//! Multi-corpus result fusion.
//!
//! Candidate lists from the system and user template corpora are merged,
//! re-sorted ascending by distance, and truncated to the active `k` —
//! distances from both corpora share the same query embedding, so they
//! are directly comparable.

use lectern_core::models::RetrievalResult;

/// Merge ranked lists, re-sort ascending by distance, truncate to `k`.
pub fn merge_ranked(lists: Vec<Vec<RetrievalResult>>, k: usize) -> Vec<RetrievalResult> {
    let mut merged: Vec<RetrievalResult> = lists.into_iter().flatten().collect();
    RetrievalResult::sort_ascending(&mut merged);
    merged.truncate(k);
    merged
}

/// Keep only candidates whose id equals `template_id`. An empty result
/// is a valid outcome (the caller omits the block), not an error.
pub fn select_by_id(candidates: Vec<RetrievalResult>, template_id: &str) -> Vec<RetrievalResult> {
    candidates
        .into_iter()
        .filter(|c| c.id == template_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_core::models::ChunkMetadata;

    fn hit(id: &str, distance: f64) -> RetrievalResult {
        RetrievalResult {
            id: id.to_string(),
            document: format!("doc {id}"),
            metadata: ChunkMetadata::new(),
            distance,
        }
    }

    #[test]
    fn merge_resorts_across_lists_and_truncates() {
        let system = vec![hit("s1", 0.3), hit("s2", 0.6)];
        let user = vec![hit("u1", 0.1), hit("u2", 0.5)];
        let merged = merge_ranked(vec![system, user], 3);
        let ids: Vec<&str> = merged.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "s1", "u2"]);
    }

    #[test]
    fn select_by_id_keeps_only_matches() {
        let candidates = vec![hit("a", 0.2), hit("b", 0.4), hit("a", 0.9)];
        let selected = select_by_id(candidates, "a");
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|c| c.id == "a"));
    }

    #[test]
    fn select_by_id_no_match_is_empty() {
        let candidates = vec![hit("a", 0.2)];
        assert!(select_by_id(candidates, "zzz").is_empty());
    }
}
