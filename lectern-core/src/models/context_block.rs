use serde::{Deserialize, Serialize};

/// Visible delimiter between rendered context blocks.
pub const BLOCK_DELIMITER: &str = "\n\n---\n\n";

/// A labeled block of retrieved or caller-supplied context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextBlock {
    pub label: String,
    pub body: String,
}

impl ContextBlock {
    pub fn new(label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            body: body.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Render non-empty blocks as `Label:\n\nbody`, separated by the
    /// section delimiter. Empty blocks are omitted entirely — a section
    /// header is never emitted without content.
    pub fn render_all(blocks: &[ContextBlock]) -> String {
        blocks
            .iter()
            .filter(|b| !b.is_empty())
            .map(|b| format!("{}:\n\n{}", b.label, b.body.trim()))
            .collect::<Vec<_>>()
            .join(BLOCK_DELIMITER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_skips_empty_blocks() {
        let blocks = vec![
            ContextBlock::new("Textbook Knowledge", "photosynthesis basics"),
            ContextBlock::new("Template", "   "),
            ContextBlock::new("Additional Context", "use lab equipment"),
        ];
        let rendered = ContextBlock::render_all(&blocks);
        assert!(rendered.contains("Textbook Knowledge:"));
        assert!(rendered.contains("Additional Context:"));
        assert!(!rendered.contains("Template:"));
        assert_eq!(rendered.matches("---").count(), 1);
    }

    #[test]
    fn render_all_empty_is_empty_string() {
        assert_eq!(ContextBlock::render_all(&[]), "");
    }
}
