use serde::{Deserialize, Serialize};

/// A request to generate lesson-plan content from a free-text prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The raw user prompt.
    pub prompt: String,
    /// Explicit grade level. When absent it is derived from the prompt.
    #[serde(default)]
    pub grade: Option<String>,
    /// Requesting user, used to scope user-template retrieval.
    #[serde(default)]
    pub user_id: Option<String>,
    /// When set, template context is restricted to this exact template id.
    #[serde(default)]
    pub selected_template_id: Option<String>,
    /// Caller-supplied context appended verbatim under its own label.
    #[serde(default)]
    pub additional_context: Option<String>,
    /// Sampling temperature passed through to the backend.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    0.3
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            grade: None,
            user_id: None,
            selected_template_id: None,
            additional_context: None,
            temperature: default_temperature(),
        }
    }
}

/// Which path produced the outcome text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Primary,
    Fallback,
}

/// Why the fallback path ran, when it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    Timeout,
    BackendError,
    BackendUnavailable,
    EmptyResponse,
}

/// The result of a generation request. Always carries non-empty text;
/// degraded outcomes are signaled by `origin` and `fallback_reason`
/// rather than by error prose in the text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub text: String,
    pub origin: Origin,
    #[serde(default)]
    pub fallback_reason: Option<FallbackReason>,
}

impl GenerationOutcome {
    pub fn primary(text: String) -> Self {
        Self {
            text,
            origin: Origin::Primary,
            fallback_reason: None,
        }
    }

    pub fn fallback(text: String, reason: FallbackReason) -> Self {
        Self {
            text,
            origin: Origin::Fallback,
            fallback_reason: Some(reason),
        }
    }
}

/// Sampling parameters forwarded to the generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
        }
    }
}

/// A generation backend response, normalized to an explicit shape.
///
/// Backends answer either with a direct text field or with a structured
/// multi-part body; parsing resolves to one of these variants instead of
/// probing attributes at use sites.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendResponse {
    DirectText(String),
    StructuredParts(Vec<String>),
    Empty,
}

impl BackendResponse {
    /// Flatten to a single text payload. Prefers direct text; concatenates
    /// all text-bearing parts of a structured response. `None` when the
    /// response carries no usable text.
    pub fn into_text(self) -> Option<String> {
        match self {
            BackendResponse::DirectText(text) if !text.trim().is_empty() => Some(text),
            BackendResponse::StructuredParts(parts) => {
                let joined = parts
                    .iter()
                    .filter(|p| !p.trim().is_empty())
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("\n");
                if joined.trim().is_empty() {
                    None
                } else {
                    Some(joined)
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_text_preferred() {
        let resp = BackendResponse::DirectText("plan".to_string());
        assert_eq!(resp.into_text(), Some("plan".to_string()));
    }

    #[test]
    fn structured_parts_concatenated() {
        let resp = BackendResponse::StructuredParts(vec![
            "part one".to_string(),
            "  ".to_string(),
            "part two".to_string(),
        ]);
        assert_eq!(resp.into_text(), Some("part one\npart two".to_string()));
    }

    #[test]
    fn empty_and_blank_yield_none() {
        assert_eq!(BackendResponse::Empty.into_text(), None);
        assert_eq!(
            BackendResponse::DirectText("   ".to_string()).into_text(),
            None
        );
        assert_eq!(
            BackendResponse::StructuredParts(vec![String::new()]).into_text(),
            None
        );
    }

    #[test]
    fn outcome_constructors_set_origin() {
        let ok = GenerationOutcome::primary("text".to_string());
        assert_eq!(ok.origin, Origin::Primary);
        assert!(ok.fallback_reason.is_none());

        let degraded = GenerationOutcome::fallback("text".to_string(), FallbackReason::Timeout);
        assert_eq!(degraded.origin, Origin::Fallback);
        assert_eq!(degraded.fallback_reason, Some(FallbackReason::Timeout));
    }
}
