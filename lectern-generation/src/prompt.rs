//! Backend prompt assembly.
//!
//! Layout is fixed: an instruction header carrying the derived lesson
//! attributes and the output-format rules, then the rendered retrieval
//! context, then the raw user request.

use lectern_core::models::ContextBlock;

/// Attributes derived (or passed through) for the header.
#[derive(Debug, Clone)]
pub struct LessonAttributes {
    pub grade: Option<String>,
    pub subject: Option<String>,
    /// Topic line; defaults to the request prompt itself.
    pub topic: String,
    pub estimated_duration_minutes: u32,
}

/// Assemble the full backend prompt.
pub fn assemble_prompt(
    attributes: &LessonAttributes,
    context: &[ContextBlock],
    user_request: &str,
) -> String {
    let mut prompt = String::new();

    prompt.push_str("You are a lesson-planning assistant.\n\n");
    prompt.push_str(
        "Create a comprehensive, detailed lesson plan based on the user's request.\n",
    );
    prompt.push_str(&format!(
        "Grade level: {}\n",
        attributes.grade.as_deref().unwrap_or("not specified")
    ));
    prompt.push_str(&format!(
        "Subject: {}\n",
        attributes.subject.as_deref().unwrap_or("not specified")
    ));
    prompt.push_str(&format!("Topic: {}\n", attributes.topic));
    prompt.push_str(&format!(
        "Estimated duration: {} minutes\n",
        attributes.estimated_duration_minutes
    ));
    prompt.push_str("Use the provided context as inspiration but create original content.\n\n");
    prompt.push_str("IMPORTANT: Return ONLY in Markdown format.\n");
    prompt.push_str("- Bold for section titles (e.g., **Lesson Title:** Photosynthesis)\n");
    prompt.push_str("- Blank lines between sections\n");
    prompt.push_str("- Bulleted lists or numbered lists where appropriate\n");
    prompt.push_str("- No HTML, XML, or other markup (no < or >)\n");

    let rendered = ContextBlock::render_all(context);
    if !rendered.is_empty() {
        prompt.push('\n');
        prompt.push_str(&rendered);
        prompt.push('\n');
    }

    prompt.push_str(&format!("\nUser request: {user_request}\n"));
    prompt
}
