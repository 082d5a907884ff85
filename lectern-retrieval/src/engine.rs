//! ContextFusionEngine: turns a generation request into an ordered
//! sequence of labeled context blocks.
//!
//! Policy order: textbook knowledge (subject-gated), template selection
//! (explicit id or best default), caller-supplied extra context. Every
//! retrieval failure degrades to an empty block.

use tracing::{debug, warn};

use lectern_core::config::RetrievalConfig;
use lectern_core::constants::{CORPUS_TEMPLATES, CORPUS_TEXTBOOKS, CORPUS_USER_TEMPLATES};
use lectern_core::models::{ContextBlock, GenerationRequest, RetrievalResult};
use lectern_core::traits::{ICorpusStore, IEmbeddingBackend, QueryOptions};

use crate::{blocks, fusion, keywords};

/// Section label for textbook context.
pub const LABEL_TEXTBOOKS: &str = "Textbook Knowledge";
/// Section label for the template the user explicitly selected.
pub const LABEL_SELECTED_TEMPLATE: &str = "Teacher-Selected Template";
/// Section label for the default inspirational template.
pub const LABEL_TEMPLATE: &str = "Lesson Plan Template";
/// Section label for caller-supplied extra context.
pub const LABEL_ADDITIONAL: &str = "Additional Context";

/// Builds the ranked, multi-source retrieval context for one request.
pub struct ContextFusionEngine<'a> {
    store: &'a dyn ICorpusStore,
    embedder: &'a dyn IEmbeddingBackend,
    config: RetrievalConfig,
}

impl<'a> ContextFusionEngine<'a> {
    pub fn new(
        store: &'a dyn ICorpusStore,
        embedder: &'a dyn IEmbeddingBackend,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            config,
        }
    }

    /// Build the ordered context blocks for a request.
    ///
    /// Never fails: an unreachable corpus or a failed query embedding
    /// degrades to fewer blocks, and generation proceeds on what's left.
    pub fn build_context(&self, request: &GenerationRequest) -> Vec<ContextBlock> {
        let mut context = Vec::new();

        let query = match self.embedder.embed(&request.prompt) {
            Ok(vector) => Some(vector),
            Err(e) => {
                warn!(error = %e, "query embedding failed, retrieval skipped");
                None
            }
        };

        if let Some(query) = &query {
            // Textbook selection, gated on the subject vocabulary so
            // unrelated prompts are not polluted with textbook noise.
            if keywords::has_subject_keyword(&request.prompt) {
                let hits = self.query_corpus(
                    CORPUS_TEXTBOOKS,
                    query,
                    &QueryOptions::top_k(self.config.textbook_top_k),
                );
                context.push(blocks::build_block(
                    LABEL_TEXTBOOKS,
                    &hits,
                    self.config.block_char_cap,
                ));
            } else {
                debug!("no subject keyword in prompt, textbook block omitted");
            }

            context.push(self.template_block(request, query));
        }

        if let Some(extra) = &request.additional_context {
            context.push(blocks::verbatim_block(LABEL_ADDITIONAL, extra));
        }

        context.retain(|block| !block.is_empty());
        debug!(blocks = context.len(), "context assembled");
        context
    }

    /// Template selection: explicit id wins, else the single best system
    /// template serves as default inspiration.
    fn template_block(&self, request: &GenerationRequest, query: &[f32]) -> ContextBlock {
        match &request.selected_template_id {
            Some(template_id) => {
                let system = self.query_corpus(
                    CORPUS_TEMPLATES,
                    query,
                    &QueryOptions::top_k(self.config.template_candidate_k),
                );

                let user = match &request.user_id {
                    Some(user_id) => self.query_corpus(
                        CORPUS_USER_TEMPLATES,
                        query,
                        &QueryOptions::top_k(self.config.template_candidate_k)
                            .with_user_id(user_id.clone()),
                    ),
                    None => Vec::new(),
                };

                let merged =
                    fusion::merge_ranked(vec![system, user], self.config.template_candidate_k);
                let selected = fusion::select_by_id(merged, template_id);
                if selected.is_empty() {
                    debug!(template_id, "selected template not found among candidates");
                }
                blocks::build_block(LABEL_SELECTED_TEMPLATE, &selected, self.config.block_char_cap)
            }
            None => {
                let best = self.query_corpus(CORPUS_TEMPLATES, query, &QueryOptions::top_k(1));
                blocks::build_block(LABEL_TEMPLATE, &best, self.config.block_char_cap)
            }
        }
    }

    /// Query one corpus, degrading to an empty result on failure.
    fn query_corpus(
        &self,
        corpus: &str,
        query: &[f32],
        options: &QueryOptions,
    ) -> Vec<RetrievalResult> {
        match self.store.similarity_query(corpus, query, options) {
            Ok(hits) => hits,
            Err(e) => {
                warn!(corpus, error = %e, "corpus query failed, treating as empty");
                Vec::new()
            }
        }
    }
}
