//! Validation rule grammar.
//!
//! Rule strings use the familiar comma-separated tag form
//! (`"required,min=1,oneof=json yaml"`). They are parsed exactly once, when a
//! [`TypeDescriptor`](crate::TypeDescriptor) is built, and every consumer —
//! the rule evaluator, the unknown-key scanner's required-field awareness,
//! and the skeleton renderer — reads the same parsed [`Rule`] set.
//!
//! # Examples
//!
//! ```
//! use confspec_core::{Rule, parse_rules};
//!
//! let rules = parse_rules("required,min=1,max=65535").unwrap();
//! assert_eq!(rules.len(), 3);
//! assert!(rules.contains(&Rule::Required));
//! assert!(parse_rules("frobnicate").is_err());
//! ```

use std::fmt;

use thiserror::Error;

/// A single parsed validation rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// The value must be present and non-blank.
    Required,
    /// Numeric lower bound (string and sequence values compare by length).
    Min(f64),
    /// Numeric upper bound (string and sequence values compare by length).
    Max(f64),
    /// Minimum length for strings and sequences.
    MinLen(usize),
    /// Maximum length for strings and sequences.
    MaxLen(usize),
    /// The scalar's textual form must be one of the listed alternatives.
    OneOf(Vec<String>),
}

impl Rule {
    /// Returns the rule name reported in validation issues.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
            Rule::MinLen(_) => "min_len",
            Rule::MaxLen(_) => "max_len",
            Rule::OneOf(_) => "oneof",
        }
    }
}

impl fmt::Display for Rule {
    /// Renders the canonical token form, used in descriptor signatures.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => write!(f, "required"),
            Rule::Min(n) => write!(f, "min={n}"),
            Rule::Max(n) => write!(f, "max={n}"),
            Rule::MinLen(n) => write!(f, "min_len={n}"),
            Rule::MaxLen(n) => write!(f, "max_len={n}"),
            Rule::OneOf(options) => write!(f, "oneof={}", options.join(" ")),
        }
    }
}

/// Errors produced while parsing a rule string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The rule token is not part of the grammar.
    #[error("unknown validation rule: {0}")]
    UnknownRule(String),
    /// The rule's argument could not be parsed (e.g., `min=abc`).
    #[error("invalid argument for rule {rule}: {value}")]
    InvalidArgument { rule: &'static str, value: String },
}

/// Parses a comma-separated rule string into typed rules.
///
/// Empty input and empty tokens are allowed and contribute nothing.
pub fn parse_rules(input: &str) -> Result<Vec<Rule>, RuleError> {
    let mut rules = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let (name, arg) = match token.split_once('=') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (token, None),
        };
        rules.push(parse_one(name, arg, token)?);
    }
    Ok(rules)
}

fn parse_one(name: &str, arg: Option<&str>, token: &str) -> Result<Rule, RuleError> {
    match (name, arg) {
        ("required", None) => Ok(Rule::Required),
        ("min", Some(arg)) => Ok(Rule::Min(parse_number("min", arg)?)),
        ("max", Some(arg)) => Ok(Rule::Max(parse_number("max", arg)?)),
        ("min_len", Some(arg)) => Ok(Rule::MinLen(parse_length("min_len", arg)?)),
        ("max_len", Some(arg)) => Ok(Rule::MaxLen(parse_length("max_len", arg)?)),
        ("oneof", Some(arg)) => {
            let options: Vec<String> = arg.split_whitespace().map(String::from).collect();
            if options.is_empty() {
                return Err(RuleError::InvalidArgument {
                    rule: "oneof",
                    value: arg.to_string(),
                });
            }
            Ok(Rule::OneOf(options))
        }
        _ => Err(RuleError::UnknownRule(token.to_string())),
    }
}

fn parse_number(rule: &'static str, value: &str) -> Result<f64, RuleError> {
    value.parse().map_err(|_| RuleError::InvalidArgument {
        rule,
        value: value.to_string(),
    })
}

fn parse_length(rule: &'static str, value: &str) -> Result<usize, RuleError> {
    value.parse().map_err(|_| RuleError::InvalidArgument {
        rule,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_grammar() {
        let rules = parse_rules("required,min=1,max=10,min_len=2,max_len=8,oneof=a b c").unwrap();
        assert_eq!(
            rules,
            vec![
                Rule::Required,
                Rule::Min(1.0),
                Rule::Max(10.0),
                Rule::MinLen(2),
                Rule::MaxLen(8),
                Rule::OneOf(vec!["a".into(), "b".into(), "c".into()]),
            ]
        );
    }

    #[test]
    fn test_parse_empty_and_whitespace_tokens() {
        assert!(parse_rules("").unwrap().is_empty());
        assert_eq!(parse_rules(" required , ").unwrap(), vec![Rule::Required]);
    }

    #[test]
    fn test_parse_rejects_unknown_rule() {
        let err = parse_rules("required,frobnicate").unwrap_err();
        assert_eq!(err, RuleError::UnknownRule("frobnicate".to_string()));
    }

    #[test]
    fn test_parse_rejects_bad_argument() {
        let err = parse_rules("min=abc").unwrap_err();
        assert!(matches!(err, RuleError::InvalidArgument { rule: "min", .. }));
    }

    #[test]
    fn test_required_with_argument_is_unknown() {
        assert!(parse_rules("required=yes").is_err());
    }

    #[test]
    fn test_display_round_trips_tokens() {
        for token in ["required", "min=2", "max_len=4", "oneof=json yaml"] {
            let rules = parse_rules(token).unwrap();
            assert_eq!(rules[0].to_string(), token);
        }
    }
}
