//! # lectern-generation
//!
//! The generation half of the pipeline: prompt assembly from fused
//! context, a deadline-bounded call to the generation backend, output
//! normalization, and the fallback path that produces a labeled
//! degraded lesson from raw stored chunks when the backend cannot.
//!
//! `generate()` never fails from the caller's perspective: every path
//! ends in a [`GenerationOutcome`](lectern_core::models::GenerationOutcome)
//! with non-empty text, and degradation is signaled through `origin`
//! and `fallback_reason` rather than error prose in the payload.

pub mod fallback;
pub mod normalize;
pub mod orchestrator;
pub mod prompt;
pub mod providers;

pub use orchestrator::GenerationOrchestrator;
