//! HTTP embedding backend (Gemini-shaped `:embedContent` wire format).
//!
//! One text per request; the response carries `{"embedding": {"values":
//! [...]}}`. Dimension mismatches are reported, not papered over.

use std::time::Duration;

use serde_json::json;
use tracing::debug;

use lectern_core::config::EmbeddingConfig;
use lectern_core::errors::{EmbeddingError, LecternResult};
use lectern_core::traits::IEmbeddingBackend;

/// Blocking HTTP client for the embedding API.
pub struct HttpEmbeddingBackend {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    dimensions: usize,
}

impl HttpEmbeddingBackend {
    /// Build a backend from configuration. Construction never fails;
    /// a missing API key makes the backend report unavailable and callers
    /// decide whether to degrade.
    pub fn new(config: &EmbeddingConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: format!("{}/models/{}:embedContent", config.base_url, config.model),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            dimensions: config.dimensions,
        }
    }

    /// Extract the vector from a `:embedContent` response body. Missing
    /// or non-numeric entries are malformed, not silently zeroed.
    fn parse_response(payload: &serde_json::Value) -> LecternResult<Vec<f32>> {
        let values = payload
            .pointer("/embedding/values")
            .and_then(|v| v.as_array())
            .ok_or_else(|| EmbeddingError::MalformedResponse {
                reason: "missing embedding.values".to_string(),
            })?;

        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_f64().map(|f| f as f32).ok_or_else(|| {
                    EmbeddingError::MalformedResponse {
                        reason: format!("non-numeric value at index {i}: {v}"),
                    }
                    .into()
                })
            })
            .collect()
    }
}

impl IEmbeddingBackend for HttpEmbeddingBackend {
    fn embed(&self, text: &str) -> LecternResult<Vec<f32>> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            EmbeddingError::BackendUnavailable {
                reason: "no API key configured".to_string(),
            }
        })?;

        let body = json!({
            "model": format!("models/{}", self.model),
            "content": { "parts": [{ "text": text }] },
            "taskType": "RETRIEVAL_DOCUMENT",
        });

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| EmbeddingError::RequestFailed {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(EmbeddingError::RequestFailed {
                reason: format!("HTTP {}", response.status()),
            }
            .into());
        }

        let payload: serde_json::Value =
            response.json().map_err(|e| EmbeddingError::MalformedResponse {
                reason: e.to_string(),
            })?;

        let vector = Self::parse_response(&payload)?;

        if vector.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                got: vector.len(),
            }
            .into());
        }

        debug!(model = %self.model, dims = vector.len(), "embedding created");
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_core::errors::LecternError;

    #[test]
    fn parse_extracts_vector() {
        let payload = json!({ "embedding": { "values": [0.25, -1.0, 3.5] } });
        let vector = HttpEmbeddingBackend::parse_response(&payload).unwrap();
        assert_eq!(vector, vec![0.25, -1.0, 3.5]);
    }

    #[test]
    fn parse_rejects_missing_values() {
        let payload = json!({ "embedding": {} });
        let err = HttpEmbeddingBackend::parse_response(&payload).unwrap_err();
        assert!(matches!(
            err,
            LecternError::Embedding(EmbeddingError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn parse_rejects_non_numeric_entries() {
        let payload = json!({ "embedding": { "values": [0.5, "oops", 1.0] } });
        let err = HttpEmbeddingBackend::parse_response(&payload).unwrap_err();
        match err {
            LecternError::Embedding(EmbeddingError::MalformedResponse { reason }) => {
                assert!(reason.contains("index 1"), "unexpected reason: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
