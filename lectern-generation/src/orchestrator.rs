//! GenerationOrchestrator: the full request pipeline.
//!
//! Derives lesson attributes, fuses retrieval context, assembles the
//! backend prompt, and runs the backend call under a per-request
//! wall-clock deadline. Timeout, backend failure, and empty output all
//! land on the fallback path; the caller always receives an outcome
//! with non-empty text.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use lectern_core::config::{GenerationConfig, RetrievalConfig};
use lectern_core::errors::{GenerationError, LecternError, LecternResult};
use lectern_core::models::{
    BackendResponse, FallbackReason, GenerationOutcome, GenerationParams, GenerationRequest,
};
use lectern_core::traits::{ICorpusStore, IEmbeddingBackend, IGenerationBackend};
use lectern_retrieval::{keywords, ContextFusionEngine};

use crate::fallback::fallback_lesson;
use crate::normalize::normalize_output;
use crate::prompt::{assemble_prompt, LessonAttributes};

/// Default estimated lesson length for the prompt header, matching the
/// opening/main/closure split of the fallback skeleton.
const DEFAULT_LESSON_MINUTES: u32 = 50;

/// Derive the header attributes for a request. Explicit fields win;
/// otherwise grade and subject come from prompt keyword matching, and
/// absence leaves them unset.
pub fn derive_attributes(request: &GenerationRequest) -> LessonAttributes {
    LessonAttributes {
        grade: request
            .grade
            .clone()
            .or_else(|| keywords::derive_grade(&request.prompt)),
        subject: keywords::derive_subject(&request.prompt).map(str::to_string),
        topic: request.prompt.clone(),
        estimated_duration_minutes: DEFAULT_LESSON_MINUTES,
    }
}

/// Drives one generation request end to end.
pub struct GenerationOrchestrator {
    store: Arc<dyn ICorpusStore>,
    embedder: Arc<dyn IEmbeddingBackend>,
    backend: Arc<dyn IGenerationBackend>,
    config: GenerationConfig,
    retrieval: RetrievalConfig,
}

impl GenerationOrchestrator {
    pub fn new(
        store: Arc<dyn ICorpusStore>,
        embedder: Arc<dyn IEmbeddingBackend>,
        backend: Arc<dyn IGenerationBackend>,
        config: GenerationConfig,
        retrieval: RetrievalConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            backend,
            config,
            retrieval,
        }
    }

    /// Run the pipeline for one request.
    ///
    /// Never fails: timeouts and backend errors degrade to the fallback
    /// lesson, signaled through `origin` and `fallback_reason`.
    pub fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
        let attributes = derive_attributes(request);
        debug!(
            grade = attributes.grade.as_deref().unwrap_or("not specified"),
            subject = attributes.subject.as_deref().unwrap_or("not specified"),
            "attributes derived"
        );

        let fusion =
            ContextFusionEngine::new(&*self.store, &*self.embedder, self.retrieval.clone());
        let context = fusion.build_context(request);

        let prompt = assemble_prompt(&attributes, &context, &request.prompt);
        let params = self.config.params_with_temperature(request.temperature);

        match self.call_with_deadline(prompt, params) {
            Ok(response) => match response.into_text() {
                Some(text) => {
                    info!(backend = self.backend.name(), "generation succeeded");
                    GenerationOutcome::primary(normalize_output(&text))
                }
                None => {
                    warn!(backend = self.backend.name(), "backend returned no text");
                    self.degrade(request, FallbackReason::EmptyResponse)
                }
            },
            Err(e) => {
                let reason = classify_failure(&e);
                warn!(backend = self.backend.name(), error = %e, "generation failed");
                self.degrade(request, reason)
            }
        }
    }

    /// Invoke the backend on a worker thread and wait up to the
    /// configured deadline. On timeout the worker is abandoned; its
    /// eventual result is discarded.
    fn call_with_deadline(
        &self,
        prompt: String,
        params: GenerationParams,
    ) -> LecternResult<BackendResponse> {
        let deadline = Duration::from_secs(self.config.deadline_secs);
        let backend = Arc::clone(&self.backend);
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = backend.generate(&prompt, &params);
            // The receiver is gone after a timeout; nothing to do then.
            let _ = tx.send(result);
        });

        match rx.recv_timeout(deadline) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(GenerationError::BackendTimeout {
                deadline_secs: self.config.deadline_secs,
            }
            .into()),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(GenerationError::BackendFailed {
                reason: "backend worker exited without a result".to_string(),
            }
            .into()),
        }
    }

    fn degrade(&self, request: &GenerationRequest, reason: FallbackReason) -> GenerationOutcome {
        let text = fallback_lesson(
            &*self.store,
            &request.prompt,
            self.config.fallback_chunk_limit,
        );
        GenerationOutcome::fallback(text, reason)
    }
}

fn classify_failure(error: &LecternError) -> FallbackReason {
    match error {
        LecternError::Generation(GenerationError::BackendTimeout { .. }) => FallbackReason::Timeout,
        LecternError::Generation(GenerationError::BackendUnavailable { .. }) => {
            FallbackReason::BackendUnavailable
        }
        LecternError::Generation(GenerationError::EmptyResponse) => FallbackReason::EmptyResponse,
        _ => FallbackReason::BackendError,
    }
}
