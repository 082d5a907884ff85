/// Generation backend errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation backend timed out after {deadline_secs}s")]
    BackendTimeout { deadline_secs: u64 },

    #[error("generation backend failed: {reason}")]
    BackendFailed { reason: String },

    #[error("generation backend unavailable: {reason}")]
    BackendUnavailable { reason: String },

    #[error("generation backend returned an empty response")]
    EmptyResponse,
}
