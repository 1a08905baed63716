pub mod builtin;

use crate::error::{BlockswapError, BlockswapResult};

pub use builtin::{builtin_patches, find_builtin};

/// A named pair of literal text blocks
///
/// Matching is exact and byte-for-byte: no whitespace tolerance, no regex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub name: String,
    pub description: Option<String>,
    pub old_text: String,
    pub new_text: String,
}

/// Result of applying a patch to one piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The old block was found and every occurrence was replaced
    Replaced { content: String, occurrences: usize },
    /// The old block does not occur in the text
    NoMatch,
}

impl Patch {
    pub fn new(
        name: impl Into<String>,
        old_text: impl Into<String>,
        new_text: impl Into<String>,
    ) -> BlockswapResult<Self> {
        let name = name.into();
        let old_text = old_text.into();

        if name.trim().is_empty() {
            return Err(BlockswapError::invalid_patch("patch name is empty"));
        }
        if old_text.is_empty() {
            return Err(BlockswapError::invalid_patch(format!(
                "patch '{}' has an empty old text block",
                name
            )));
        }

        Ok(Self {
            name,
            description: None,
            old_text,
            new_text: new_text.into(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True when the patch removes its block outright
    pub fn is_deletion(&self) -> bool {
        self.new_text.is_empty()
    }

    /// Replace every non-overlapping occurrence of the old block
    pub fn apply(&self, content: &str) -> PatchOutcome {
        let occurrences = content.matches(self.old_text.as_str()).count();
        if occurrences == 0 {
            return PatchOutcome::NoMatch;
        }

        PatchOutcome::Replaced {
            content: content.replace(self.old_text.as_str(), &self.new_text),
            occurrences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_old_text_rejected() {
        let result = Patch::new("noop", "", "x");
        assert!(matches!(result, Err(BlockswapError::InvalidPatch { .. })));
    }

    #[test]
    fn test_single_occurrence_keeps_surroundings() {
        let patch = Patch::new("p", "int a = 1;\n", "int a = 2;\n").unwrap();
        let content = "// head\r\nint a = 1;\n\ttail \u{00e9}";

        match patch.apply(content) {
            PatchOutcome::Replaced {
                content,
                occurrences,
            } => {
                assert_eq!(occurrences, 1);
                assert_eq!(content, "// head\r\nint a = 2;\n\ttail \u{00e9}");
            }
            PatchOutcome::NoMatch => panic!("expected a match"),
        }
    }

    #[test]
    fn test_all_occurrences_replaced() {
        let patch = Patch::new("p", "foo", "bar").unwrap();
        let outcome = patch.apply("foo foo foofoo");
        assert_eq!(
            outcome,
            PatchOutcome::Replaced {
                content: "bar bar barbar".to_string(),
                occurrences: 4
            }
        );
    }

    #[test]
    fn test_overlapping_candidates_are_left_to_right() {
        let patch = Patch::new("p", "aa", "b").unwrap();
        assert_eq!(
            patch.apply("aaa"),
            PatchOutcome::Replaced {
                content: "ba".to_string(),
                occurrences: 1
            }
        );
    }

    #[test]
    fn test_no_match() {
        let patch = Patch::new("p", "needle", "pin").unwrap();
        assert_eq!(patch.apply("haystack"), PatchOutcome::NoMatch);
    }

    #[test]
    fn test_near_miss_whitespace_is_no_match() {
        let patch = Patch::new("p", "a  b", "c").unwrap();
        assert_eq!(patch.apply("a b"), PatchOutcome::NoMatch);
    }

    #[test]
    fn test_deletion() {
        let patch = Patch::new("p", "drop me\n", "").unwrap();
        assert!(patch.is_deletion());
        assert_eq!(
            patch.apply("keep\ndrop me\nkeep\n"),
            PatchOutcome::Replaced {
                content: "keep\nkeep\n".to_string(),
                occurrences: 1
            }
        );
    }
}
