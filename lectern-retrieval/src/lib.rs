//! # lectern-retrieval
//!
//! The context-fusion half of the pipeline: retrieval queries against the
//! three corpora, per-corpus selection policy, and assembly of a bounded,
//! labeled context for generation. Retrieval failure degrades context
//! quality; it never aborts generation.

pub mod blocks;
pub mod engine;
pub mod fusion;
pub mod keywords;
pub mod templates;

pub use engine::ContextFusionEngine;
