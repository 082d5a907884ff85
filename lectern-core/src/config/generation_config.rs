use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::GenerationParams;

/// Generation-orchestrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// API key for the generation backend.
    pub api_key: Option<String>,
    /// Base URL of the generation API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Hard wall-clock deadline for one backend call (seconds).
    pub deadline_secs: u64,
    /// Raw chunks read by the fallback generator.
    pub fallback_chunk_limit: usize,
    /// Default sampling temperature (a request may override it).
    pub temperature: f32,
    /// Nucleus sampling top-p.
    pub top_p: f32,
    /// Sampling top-k.
    pub top_k: u32,
    /// Max output length in tokens.
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: defaults::API_BASE_URL.to_string(),
            model: defaults::GENERATION_MODEL.to_string(),
            deadline_secs: defaults::DEADLINE_SECS,
            fallback_chunk_limit: defaults::FALLBACK_CHUNK_LIMIT,
            temperature: defaults::TEMPERATURE,
            top_p: defaults::TOP_P,
            top_k: defaults::TOP_K,
            max_output_tokens: defaults::MAX_OUTPUT_TOKENS,
        }
    }
}

impl GenerationConfig {
    /// Build backend sampling params, letting a request override temperature.
    pub fn params_with_temperature(&self, temperature: f32) -> GenerationParams {
        GenerationParams {
            temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            max_output_tokens: self.max_output_tokens,
        }
    }
}
