//! Labeled block assembly with the per-block character cap.
//!
//! Candidate documents enter in ascending-distance order; when a block
//! would exceed the cap, the lowest-ranked documents are dropped first.
//! A single document larger than the cap is hard-truncated at a char
//! boundary rather than dropped, so the block is never empty when a
//! candidate exists.

use tracing::debug;

use lectern_core::models::{ContextBlock, RetrievalResult};

/// Join ranked documents into one block body, separated by blank lines,
/// keeping the total under `char_cap`.
pub fn build_block(label: &str, ranked: &[RetrievalResult], char_cap: usize) -> ContextBlock {
    let mut kept: Vec<&str> = Vec::new();
    let mut used = 0usize;

    for candidate in ranked {
        let doc = candidate.document.trim();
        if doc.is_empty() {
            continue;
        }
        let cost = doc.chars().count() + if kept.is_empty() { 0 } else { 2 };
        if used + cost > char_cap {
            if kept.is_empty() {
                // Sole oversized document: truncate instead of dropping.
                let truncated: String = doc.chars().take(char_cap).collect();
                debug!(label, id = %candidate.id, cap = char_cap, "document truncated to block cap");
                return ContextBlock::new(label, truncated);
            }
            debug!(
                label,
                dropped = ranked.len() - kept.len(),
                cap = char_cap,
                "lowest-ranked documents dropped to fit block cap"
            );
            break;
        }
        used += cost;
        kept.push(doc);
    }

    ContextBlock::new(label, kept.join("\n\n"))
}

/// A block holding caller-supplied text verbatim (no cap applies).
pub fn verbatim_block(label: &str, text: &str) -> ContextBlock {
    ContextBlock::new(label, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_core::models::ChunkMetadata;

    fn hit(id: &str, document: &str, distance: f64) -> RetrievalResult {
        RetrievalResult {
            id: id.to_string(),
            document: document.to_string(),
            metadata: ChunkMetadata::new(),
            distance,
        }
    }

    #[test]
    fn all_documents_fit_under_cap() {
        let block = build_block(
            "Textbook Knowledge",
            &[hit("a", "first", 0.1), hit("b", "second", 0.2)],
            100,
        );
        assert_eq!(block.body, "first\n\nsecond");
    }

    #[test]
    fn lowest_ranked_dropped_first() {
        let block = build_block(
            "Textbook Knowledge",
            &[
                hit("a", "0123456789", 0.1),
                hit("b", "0123456789", 0.2),
                hit("c", "0123456789", 0.3),
            ],
            25,
        );
        // Two documents (10 + 2 + 10 = 22 chars) fit; the third does not.
        assert_eq!(block.body, "0123456789\n\n0123456789");
    }

    #[test]
    fn sole_oversized_document_is_truncated_not_dropped() {
        let long = "x".repeat(50);
        let block = build_block("Template", &[hit("a", &long, 0.1)], 10);
        assert_eq!(block.body.chars().count(), 10);
    }

    #[test]
    fn empty_candidates_make_empty_block() {
        let block = build_block("Template", &[], 100);
        assert!(block.is_empty());
    }
}
