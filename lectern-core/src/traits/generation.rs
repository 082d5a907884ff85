use crate::errors::LecternResult;
use crate::models::{BackendResponse, GenerationParams};

/// A text-generation backend. One blocking call per request; the
/// orchestrator enforces the wall-clock deadline around it.
pub trait IGenerationBackend: Send + Sync {
    /// Generate content for an assembled prompt.
    fn generate(&self, prompt: &str, params: &GenerationParams) -> LecternResult<BackendResponse>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
