//! # lectern-core
//!
//! Foundation crate for the Lectern lesson-plan generation pipeline.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod models;
pub mod retry;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::LecternConfig;
pub use errors::{LecternError, LecternResult};
pub use models::{
    ChunkMetadata, ChunkRecord, ContextBlock, GenerationOutcome, GenerationRequest, Origin,
    RetrievalResult,
};
