//! Backend output normalization.
//!
//! Generation backends wrap Markdown in code fences, leak HTML markup,
//! and pad output with runs of blank lines. Normalization strips all
//! three so the outcome text is plain structured Markdown.

use regex::Regex;
use std::sync::LazyLock;

/// Opening code fence with an optional language tag, e.g. ```` ```html ````.
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[a-zA-Z]*\n?").unwrap());

/// Heading tags; their content becomes a bold line of its own.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h[1-6][^>]*>(.*?)</h[1-6]>").unwrap());

/// List items; their content becomes a bullet line.
static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<li[^>]*>(.*?)</li>").unwrap());

/// `<strong>`/`<b>` pairs map to Markdown bold.
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)</?(strong|b)>").unwrap());

/// Any remaining tag is dropped outright.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").unwrap());

/// Three or more consecutive blank lines collapse to exactly one.
/// Shorter runs are valid spacing and pass through untouched.
static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n([ \t]*\n){3,}").unwrap());

/// Normalize raw backend text into clean Markdown.
pub fn normalize_output(text: &str) -> String {
    let cleaned = strip_fences(text);
    let cleaned = if looks_like_html(&cleaned) {
        html_to_text(&cleaned)
    } else {
        cleaned
    };
    collapse_blank_runs(&cleaned).trim().to_string()
}

/// Remove code-fence markers while keeping the fenced content.
pub fn strip_fences(text: &str) -> String {
    FENCE_RE.replace_all(text, "").replace("```", "").trim().to_string()
}

fn looks_like_html(text: &str) -> bool {
    TAG_RE.is_match(text)
}

/// Best-effort HTML to structured text: headings become bold lines,
/// list items become bullets, every other tag is dropped.
fn html_to_text(text: &str) -> String {
    let step = HEADING_RE.replace_all(text, "\n**$1**\n");
    let step = LIST_ITEM_RE.replace_all(&step, "\n- $1");
    let step = BOLD_RE.replace_all(&step, "**");
    let step = TAG_RE.replace_all(&step, "");
    step.lines()
        .map(str::trim_end)
        .map(|line| line.trim_start().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_blank_runs(text: &str) -> String {
    BLANK_RUN_RE.replace_all(text, "\n\n").to_string()
}
