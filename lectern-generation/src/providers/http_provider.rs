//! HTTP generation backend (Gemini-shaped `:generateContent` wire format).
//!
//! The response is either a direct text field or a structured
//! candidates/content/parts tree; parsing resolves both shapes into a
//! tagged [`BackendResponse`] so call sites never probe attributes.

use std::time::Duration;

use serde_json::json;
use tracing::debug;

use lectern_core::config::GenerationConfig;
use lectern_core::errors::{GenerationError, LecternResult};
use lectern_core::models::{BackendResponse, GenerationParams};
use lectern_core::traits::IGenerationBackend;

/// Blocking HTTP client for the generation API.
pub struct HttpGenerationBackend {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpGenerationBackend {
    /// Build a backend from configuration. Construction never fails;
    /// a missing API key surfaces as `BackendUnavailable` at call time.
    pub fn new(config: &GenerationConfig) -> Self {
        // The orchestrator's deadline is the real bound; the socket
        // timeout sits slightly past it so the worker thread unblocks
        // once the caller has already moved on.
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.deadline_secs + 5))
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: format!("{}/models/{}:generateContent", config.base_url, config.model),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn parse_response(payload: &serde_json::Value) -> BackendResponse {
        if let Some(text) = payload.get("text").and_then(|t| t.as_str()) {
            if !text.trim().is_empty() {
                return BackendResponse::DirectText(text.to_string());
            }
        }

        let parts: Vec<String> = payload
            .pointer("/candidates/0/content/parts")
            .and_then(|p| p.as_array())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if parts.is_empty() {
            BackendResponse::Empty
        } else {
            BackendResponse::StructuredParts(parts)
        }
    }
}

impl IGenerationBackend for HttpGenerationBackend {
    fn generate(&self, prompt: &str, params: &GenerationParams) -> LecternResult<BackendResponse> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            GenerationError::BackendUnavailable {
                reason: "no API key configured".to_string(),
            }
        })?;

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": params.temperature,
                "topP": params.top_p,
                "topK": params.top_k,
                "maxOutputTokens": params.max_output_tokens,
            },
        });

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| GenerationError::BackendFailed {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(GenerationError::BackendFailed {
                reason: format!("HTTP {}", response.status()),
            }
            .into());
        }

        let payload: serde_json::Value =
            response.json().map_err(|e| GenerationError::BackendFailed {
                reason: e.to_string(),
            })?;

        let parsed = Self::parse_response(&payload);
        debug!(model = %self.model, shape = ?std::mem::discriminant(&parsed), "backend answered");
        Ok(parsed)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_text_field_wins() {
        let payload = json!({
            "text": "a direct lesson",
            "candidates": [{ "content": { "parts": [{ "text": "ignored" }] } }],
        });
        assert_eq!(
            HttpGenerationBackend::parse_response(&payload),
            BackendResponse::DirectText("a direct lesson".to_string())
        );
    }

    #[test]
    fn structured_parts_are_collected_in_order() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "first" }, { "text": "second" }] }
            }],
        });
        assert_eq!(
            HttpGenerationBackend::parse_response(&payload),
            BackendResponse::StructuredParts(vec!["first".to_string(), "second".to_string()])
        );
    }

    #[test]
    fn textless_payload_is_empty() {
        let payload = json!({ "candidates": [] });
        assert_eq!(
            HttpGenerationBackend::parse_response(&payload),
            BackendResponse::Empty
        );
    }

    #[test]
    fn blank_direct_text_falls_through_to_parts() {
        let payload = json!({
            "text": "   ",
            "candidates": [{ "content": { "parts": [{ "text": "real body" }] } }],
        });
        assert_eq!(
            HttpGenerationBackend::parse_response(&payload),
            BackendResponse::StructuredParts(vec!["real body".to_string()])
        );
    }
}
