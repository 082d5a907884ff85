//! Template and textbook ingestion helpers.
//!
//! These are the direct-entry producers of corpus records: a user
//! authoring a template, system-template seeding, and filename-based
//! subject/grade detection for textbook batches.

use tracing::info;

use lectern_core::constants::{CORPUS_TEMPLATES, CORPUS_USER_TEMPLATES};
use lectern_core::errors::LecternResult;
use lectern_core::models::{ChunkMetadata, ChunkRecord};
use lectern_core::traits::{ICorpusStore, IEmbeddingBackend};

/// A curated system template to seed.
#[derive(Debug, Clone)]
pub struct SeedTemplate {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub content: String,
}

/// Embed and store a user-authored template, scoped to its author.
///
/// The stored id is `user-<template_id>` so user templates never collide
/// with system ones when candidate lists are merged.
pub fn store_user_template(
    store: &dyn ICorpusStore,
    embedder: &dyn IEmbeddingBackend,
    template_id: &str,
    user_id: &str,
    title: &str,
    content: &str,
) -> LecternResult<String> {
    let embedding = embedder.embed(content)?;
    let doc_id = format!("user-{template_id}");
    let metadata = ChunkMetadata::from_pairs(&[
        ("type", "template"),
        ("title", title),
        ("user_id", user_id),
        ("source", "user"),
    ]);

    let record = ChunkRecord::new(doc_id.clone(), content, embedding).with_metadata(metadata);
    let report = store.upsert(CORPUS_USER_TEMPLATES, &[record])?;
    if let Some((id, reason)) = report.failed.first() {
        return Err(lectern_core::errors::StorageError::SqliteError {
            message: format!("user template '{id}' not stored: {reason}"),
        }
        .into());
    }

    info!(user_id, title, "user template embedded and stored");
    Ok(doc_id)
}

/// Embed and store the curated system templates in one transaction-like
/// batch; the report surfaces any per-row failure.
pub fn seed_templates(
    store: &dyn ICorpusStore,
    embedder: &dyn IEmbeddingBackend,
    templates: &[SeedTemplate],
) -> LecternResult<usize> {
    let mut records = Vec::with_capacity(templates.len());
    for template in templates {
        let embedding = embedder.embed(&template.content)?;
        let metadata = ChunkMetadata::from_pairs(&[
            ("type", "template"),
            ("title", &template.title),
            ("subject", &template.subject),
            ("source", "system"),
        ]);
        records.push(
            ChunkRecord::new(template.id.clone(), template.content.clone(), embedding)
                .with_metadata(metadata),
        );
    }

    let report = store.upsert(CORPUS_TEMPLATES, &records)?;
    info!(
        written = report.written,
        failed = report.failed.len(),
        "system templates seeded"
    );
    Ok(report.written)
}

/// The curated starter set used to bootstrap an empty templates corpus.
pub fn builtin_seed_templates() -> Vec<SeedTemplate> {
    vec![
        SeedTemplate {
            id: "template-generic-lessonplan".to_string(),
            title: "Generic Lesson Plan".to_string(),
            subject: "general".to_string(),
            content: "Standard lesson plan template.\n\n\
                1. Learning Objectives\n\
                2. Key Terms & Concepts\n\
                3. Introduction / Warm-up\n\
                4. Main Activities (step by step)\n\
                5. Materials Needed\n\
                6. Assessment (formative + summative)\n\
                7. Closure/Reflection\n\
                8. Differentiation strategies"
                .to_string(),
        },
        SeedTemplate {
            id: "template-science-experiment".to_string(),
            title: "Science Experiment Template".to_string(),
            subject: "science".to_string(),
            content: "Hands-on experiment activity for science.\n\
                Objectives: Students will practice hypothesis formation and experimental design.\n\
                Activities: teacher demonstration, small-group experiment, results discussion.\n\
                Assessment: lab report with hypothesis, method, and conclusion."
                .to_string(),
        },
        SeedTemplate {
            id: "template-history-debate".to_string(),
            title: "History Debate Activity".to_string(),
            subject: "history".to_string(),
            content: "Debate activity for history lessons.\n\
                Objectives: Students will analyze a historical conflict by role-playing as leaders.\n\
                Activities: assign roles, present arguments, discuss perspectives.\n\
                Assessment: reflection essay or peer review."
                .to_string(),
        },
        SeedTemplate {
            id: "template-math-problem-solving".to_string(),
            title: "Math Problem-Solving Session".to_string(),
            subject: "math".to_string(),
            content: "Structured problem-solving session for math.\n\
                Objectives: Students will apply strategies to multi-step problems.\n\
                Activities: worked example, paired practice, independent challenge set.\n\
                Assessment: exit ticket with one problem per strategy."
                .to_string(),
        },
    ]
}

/// Detect subject and grade from a textbook filename, e.g.
/// `science_grade8_unit2.pdf` → ("science", Some("8")).
pub fn detect_subject_and_grade(filename: &str) -> (Option<&'static str>, Option<String>) {
    let subject = crate::keywords::derive_subject(filename);
    let grade = crate::keywords::derive_grade(filename);
    (subject, grade)
}
