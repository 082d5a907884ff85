use crate::errors::LecternResult;

/// A backend that turns one text into a fixed-length vector.
pub trait IEmbeddingBackend: Send + Sync {
    /// Embed a single text, returning a vector of `dimensions()` floats.
    fn embed(&self, text: &str) -> LecternResult<Vec<f32>>;

    /// The dimensionality of vectors produced by this backend.
    fn dimensions(&self) -> usize;

    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Whether this backend is currently available.
    fn is_available(&self) -> bool;
}
