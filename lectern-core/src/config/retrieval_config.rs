use serde::{Deserialize, Serialize};

use super::defaults;

/// Context-fusion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Textbook chunks retrieved per prompt.
    pub textbook_top_k: usize,
    /// Candidate pool size when resolving a selected template id.
    pub template_candidate_k: usize,
    /// Per-block character cap on assembled context. Lowest-ranked
    /// candidate documents are dropped first when a block exceeds it.
    pub block_char_cap: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            textbook_top_k: defaults::TEXTBOOK_TOP_K,
            template_candidate_k: defaults::TEMPLATE_CANDIDATE_K,
            block_char_cap: defaults::BLOCK_CHAR_CAP,
        }
    }
}
