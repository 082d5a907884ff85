/// Lectern system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Corpus holding reference-material chunks extracted from textbooks.
pub const CORPUS_TEXTBOOKS: &str = "textbooks";

/// Corpus holding curated system-authored lesson-plan templates.
pub const CORPUS_TEMPLATES: &str = "templates";

/// Corpus holding per-user-authored templates, scoped by `metadata.user_id`.
pub const CORPUS_USER_TEMPLATES: &str = "user_templates";

/// All corpora managed by the vector store, in schema-creation order.
pub const ALL_CORPORA: [&str; 3] = [CORPUS_TEXTBOOKS, CORPUS_TEMPLATES, CORPUS_USER_TEMPLATES];

/// Default embedding dimension (text-embedding-004).
pub const DEFAULT_DIMENSIONS: usize = 768;

/// Default number of textbook chunks retrieved per prompt.
pub const TEXTBOOK_TOP_K: usize = 3;

/// Candidate pool size when resolving a selected template by id.
pub const TEMPLATE_CANDIDATE_K: usize = 10;

/// Subject keywords that open the textbook-context gate and drive
/// subject derivation. First match wins for derivation.
pub const SUBJECT_KEYWORDS: [&str; 13] = [
    "math",
    "science",
    "biology",
    "chemistry",
    "physics",
    "history",
    "geography",
    "algebra",
    "geometry",
    "literature",
    "english",
    "art",
    "music",
];

/// Hard wall-clock deadline for a single generation backend call (seconds).
pub const GENERATION_DEADLINE_SECS: u64 = 40;

/// Number of raw chunks read by the fallback generator.
pub const FALLBACK_CHUNK_LIMIT: usize = 3;
