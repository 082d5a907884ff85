//! Keyword matching: the subject vocabulary gate and grade derivation.

use lectern_core::constants::SUBJECT_KEYWORDS;

/// First subject keyword found in the prompt, if any. Matching is
/// case-insensitive and whole-word: the prompt is split on
/// non-alphanumeric characters so "party" never matches "art".
/// First match in vocabulary order wins.
pub fn derive_subject(prompt: &str) -> Option<&'static str> {
    let lowered = prompt.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();
    SUBJECT_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| tokens.iter().any(|token| token == keyword))
}

/// Whether the prompt contains any recognized subject keyword.
/// This gate keeps textbook context out of unrelated prompts.
pub fn has_subject_keyword(prompt: &str) -> bool {
    derive_subject(prompt).is_some()
}

/// Derive a grade level ("1"–"12") from the prompt, first match wins.
/// Accepts "grade 8", "grade8", and "8th grade" spellings.
pub fn derive_grade(prompt: &str) -> Option<String> {
    let lowered = prompt.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    for (i, token) in tokens.iter().enumerate() {
        // "grade 8" or "grade8".
        if *token == "grade" {
            if let Some(next) = tokens.get(i + 1) {
                if let Some(n) = parse_grade_number(next) {
                    return Some(n.to_string());
                }
            }
        } else if let Some(rest) = token.strip_prefix("grade") {
            if let Some(n) = parse_grade_number(rest) {
                return Some(n.to_string());
            }
        }

        // "8th grade" (ordinal before the word).
        if tokens.get(i + 1) == Some(&"grade") {
            let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
            let suffix = &token[digits.len()..];
            if matches!(suffix, "st" | "nd" | "rd" | "th") {
                if let Some(n) = parse_grade_number(&digits) {
                    return Some(n.to_string());
                }
            }
        }
    }

    None
}

fn parse_grade_number(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|n| (1..=12).contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_first_match_wins() {
        assert_eq!(
            derive_subject("a science lesson with some history"),
            Some("science")
        );
        assert_eq!(derive_subject("Explain PHYSICS simply"), Some("physics"));
        assert_eq!(derive_subject("write something fun"), None);
    }

    #[test]
    fn gate_opens_only_on_subject_vocabulary() {
        assert!(has_subject_keyword(
            "Explain photosynthesis for grade 8 science"
        ));
        assert!(!has_subject_keyword("Write something fun"));
    }

    #[test]
    fn embedded_keyword_fragments_do_not_match() {
        assert_eq!(derive_subject("plan a birthday party"), None);
        assert_eq!(derive_subject("start with an icebreaker"), None);
        assert_eq!(derive_subject("down to earth activities"), None);
        assert_eq!(derive_subject("an art project"), Some("art"));
    }

    #[test]
    fn grade_spellings() {
        assert_eq!(derive_grade("for grade 8 science"), Some("8".to_string()));
        assert_eq!(derive_grade("grade10 revision"), Some("10".to_string()));
        assert_eq!(derive_grade("my 3rd grade class"), Some("3".to_string()));
        assert_eq!(derive_grade("no level here"), None);
    }

    #[test]
    fn grade_ten_not_mistaken_for_one() {
        assert_eq!(derive_grade("a grade 10 physics quiz"), Some("10".to_string()));
        assert_eq!(derive_grade("grade 12 calculus"), Some("12".to_string()));
    }
}
