//! Data model shared across the pipeline.

mod chunk;
mod context_block;
mod degradation_event;
mod generation;
mod retrieval_result;

pub use chunk::{ChunkMetadata, ChunkRecord};
pub use context_block::ContextBlock;
pub use degradation_event::DegradationEvent;
pub use generation::{
    BackendResponse, FallbackReason, GenerationOutcome, GenerationParams, GenerationRequest, Origin,
};
pub use retrieval_result::RetrievalResult;
