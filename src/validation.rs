//! Field-level validation.
//!
//! Each record type describes its fields as a table of [`FieldRules`]. The
//! tables are plain data so they can be enumerated; [`check_fields`] runs
//! every rule of every field and collects all failures instead of stopping
//! at the first one.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

pub static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]*$").expect("valid regex"));

/// Letters, digits and the space character.
pub static ALPHANUMERIC_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9 ]*$").expect("valid regex"));

pub static UPPERCASE_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]$").expect("valid regex"));

/// YYYYMMDD for years 1900-2999. Day 30 and 31 pass for every month.
pub static YYYYMMDD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(19[0-9]{2}|2[0-9]{3})(0[1-9]|1[012])([123]0|[012][1-9]|31)$")
        .expect("valid regex")
});

/// Up to 8 integer digits, exactly 2 fractional digits.
pub static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,8}\.[0-9]{2}$").expect("valid regex"));

/// A single check applied to one field value.
///
/// Every rule except [`Rule::Required`] ignores an absent value, so optional
/// fields are only checked when the caller supplied them.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Must be present and not blank.
    Required,
    /// Character count within `min..=max`.
    Length { min: usize, max: usize },
    /// Character count exactly `n`.
    ExactLength(usize),
    /// ASCII digits only, at least one.
    Numeric,
    /// Must match a regular expression.
    Pattern {
        regex: &'static LazyLock<Regex>,
        message: &'static str,
    },
    /// Must equal one of the listed values.
    OneOf {
        values: &'static [&'static str],
        message: &'static str,
    },
}

impl Rule {
    /// Applies the rule, returning the violation message on failure.
    pub fn check(&self, value: Option<&str>) -> Option<String> {
        match (self, value) {
            (Rule::Required, None) => Some("can't be blank".to_string()),
            (Rule::Required, Some(v)) if v.trim().is_empty() => {
                Some("can't be blank".to_string())
            }
            (Rule::Required, Some(_)) | (_, None) => None,
            (Rule::Length { min, max }, Some(v)) => {
                let len = v.chars().count();
                if len < *min {
                    Some(format!("is too short (minimum is {} characters)", min))
                } else if len > *max {
                    Some(format!("is too long (maximum is {} characters)", max))
                } else {
                    None
                }
            }
            (Rule::ExactLength(n), Some(v)) => (v.chars().count() != *n)
                .then(|| format!("is the wrong length (should be {} characters)", n)),
            (Rule::Numeric, Some(v)) => (v.is_empty() || !v.bytes().all(|b| b.is_ascii_digit()))
                .then(|| "is not a number".to_string()),
            (Rule::Pattern { regex, message }, Some(v)) => {
                (!regex.is_match(v)).then(|| message.to_string())
            }
            (Rule::OneOf { values, message }, Some(v)) => {
                (!values.iter().any(|allowed| *allowed == v)).then(|| message.to_string())
            }
        }
    }
}

/// The rules attached to one named field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [Rule],
}

/// Violation messages grouped by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(BTreeMap<&'static str, Vec<String>>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation for `field`.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct fields with at least one violation.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages prefixed with the humanized field name, e.g.
    /// `"Routing number is not a number"`.
    pub fn full_messages(&self) -> Vec<String> {
        self.0
            .iter()
            .flat_map(|(field, messages)| {
                let name = humanize(field);
                messages.iter().map(move |m| format!("{} {}", name, m))
            })
            .collect()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_messages().join(", "))
    }
}

fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Runs every rule in `table` against the values returned by `lookup`.
pub fn check_fields<'a, F>(table: &[FieldRules], lookup: F) -> Violations
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut violations = Violations::new();
    for entry in table {
        let value = lookup(entry.field);
        for rule in entry.rules {
            if let Some(message) = rule.check(value) {
                violations.add(entry.field, message);
            }
        }
    }
    violations
}

/// Capability shared by every record type.
pub trait Validatable {
    /// Collects every violation of every field.
    fn validate(&self) -> Violations;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_absent_and_blank() {
        assert!(Rule::Required.check(None).is_some());
        assert!(Rule::Required.check(Some("  ")).is_some());
        assert!(Rule::Required.check(Some("A")).is_none());
    }

    #[test]
    fn test_optional_rules_skip_absent_values() {
        assert!(Rule::Length { min: 1, max: 3 }.check(None).is_none());
        assert!(Rule::Numeric.check(None).is_none());
    }

    #[test]
    fn test_length_messages() {
        let rule = Rule::Length { min: 5, max: 17 };
        assert_eq!(
            rule.check(Some("1234")).unwrap(),
            "is too short (minimum is 5 characters)"
        );
        assert_eq!(
            rule.check(Some("123456789012345678")).unwrap(),
            "is too long (maximum is 17 characters)"
        );
        assert!(Rule::ExactLength(9).check(Some("12345678")).is_some());
    }

    #[test]
    fn test_numeric() {
        assert!(Rule::Numeric.check(Some("0123456789")).is_none());
        assert!(Rule::Numeric.check(Some("12a")).is_some());
        assert!(Rule::Numeric.check(Some("-12")).is_some());
        assert!(Rule::Numeric.check(Some("")).is_some());
    }

    #[test]
    fn test_date_pattern_keeps_loose_day_check() {
        assert!(YYYYMMDD.is_match("20240131"));
        // Day 30/31 is accepted regardless of month length
        assert!(YYYYMMDD.is_match("20240231"));
        assert!(YYYYMMDD.is_match("20240430"));
        assert!(!YYYYMMDD.is_match("20241301"));
        assert!(!YYYYMMDD.is_match("20240100"));
        assert!(!YYYYMMDD.is_match("20240132"));
        assert!(!YYYYMMDD.is_match("18991231"));
    }

    #[test]
    fn test_amount_pattern() {
        assert!(AMOUNT.is_match("12.75"));
        assert!(AMOUNT.is_match("99999999.99"));
        assert!(!AMOUNT.is_match("123456789.00"));
        assert!(!AMOUNT.is_match("12.7"));
        assert!(!AMOUNT.is_match("1,200.00"));
        assert!(!AMOUNT.is_match("$12.00"));
    }

    #[test]
    fn test_check_fields_reports_every_field() {
        static TABLE: &[FieldRules] = &[
            FieldRules {
                field: "first",
                rules: &[Rule::Required, Rule::Numeric],
            },
            FieldRules {
                field: "second",
                rules: &[Rule::ExactLength(2)],
            },
        ];
        let violations = check_fields(TABLE, |field| match field {
            "first" => Some("x"),
            _ => Some("abc"),
        });
        assert_eq!(violations.len(), 2);
        assert_eq!(violations.get("first").unwrap(), ["is not a number"]);
        assert_eq!(
            violations.full_messages(),
            vec![
                "First is not a number",
                "Second is the wrong length (should be 2 characters)"
            ]
        );
    }
}
