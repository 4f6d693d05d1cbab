//! Optional free-text comment line.

use crate::layout::LineBuilder;
use crate::record::Record;
use crate::validation::{check_fields, FieldRules, Rule, Validatable, Violations, ALPHANUMERIC_SPACE};

pub static COMMENT_RULES: &[FieldRules] = &[FieldRules {
    field: "comment",
    rules: &[
        Rule::Length { min: 0, max: 95 },
        Rule::Pattern {
            regex: &ALPHANUMERIC_SPACE,
            message: "must be Alphanumeric",
        },
    ],
}];

/// A free-text comment of at most 95 letters, digits and spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentRecord {
    pub comment: Option<String>,
}

impl CommentRecord {
    pub fn new(comment: impl Into<String>) -> Self {
        CommentRecord {
            comment: Some(comment.into()),
        }
    }

    /// A comment line with no text.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl Validatable for CommentRecord {
    fn validate(&self) -> Violations {
        check_fields(COMMENT_RULES, |_| self.comment.as_deref())
    }
}

impl Record for CommentRecord {
    const MARKER: &'static str = "XX000";
    const NAME: &'static str = "comment record";

    fn layout(&self) -> String {
        LineBuilder::new(Self::MARKER)
            .raw(self.comment.as_deref().unwrap_or_default())
            .build_verbatim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FepError;

    const NINETY_FIVE: &str = "07a13316123cf7ec72a6f2e344127592ebb4c3000cbbad729c8101bd043f21420f39ad6db3381111fdcbeda1dd12345";
    const ONE_HUNDRED: &str = "07a13316123cf7ec72a6f2e344127592ebb4c3000cbbad729c8101bd043f21420f39ad6db3381111fdcbeda1dd1234567890";

    #[test]
    fn test_absent_and_empty_comments_are_valid() {
        assert!(CommentRecord::empty().is_valid());
        assert!(CommentRecord::new("").is_valid());
    }

    #[test]
    fn test_length_boundary() {
        assert!(CommentRecord::new(NINETY_FIVE).is_valid());
        let violations = CommentRecord::new(ONE_HUNDRED).validate();
        assert_eq!(
            violations.get("comment").unwrap(),
            ["is too long (maximum is 95 characters)"]
        );
    }

    #[test]
    fn test_rejects_punctuation() {
        assert!(!CommentRecord::new("Hello, world!").is_valid());
    }

    #[test]
    fn test_encode_pads_with_fill() {
        let line = CommentRecord::new("12345678901234567890").encode().unwrap();
        assert_eq!(
            line,
            "XX00012345678901234567890000000000000000000000000000000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_encode_full_width_comment() {
        let line = CommentRecord::new(NINETY_FIVE).encode().unwrap();
        assert_eq!(line, format!("XX000{}", NINETY_FIVE));
        assert_eq!(line.len(), 100);
    }

    #[test]
    fn test_encode_keeps_spaces_inside_comment() {
        let line = CommentRecord::new("This Is My Very Cool Comment").encode().unwrap();
        assert!(line.starts_with("XX000This Is My Very Cool Comment000"));
        assert_eq!(line.len(), 100);
    }

    #[test]
    fn test_encode_absent_comment() {
        let line = CommentRecord::empty().encode().unwrap();
        assert_eq!(line, format!("XX000{}", "0".repeat(95)));
    }

    #[test]
    fn test_encode_invalid_fails() {
        let err = CommentRecord::new(ONE_HUNDRED).encode().unwrap_err();
        assert!(matches!(err, FepError::Encoding { record: "comment record", .. }));
    }
}
