//! Rule evaluation with structural path mapping.
//!
//! [`validate`] walks a [`BoundValue`] in lockstep with its
//! [`TypeDescriptor`] and evaluates each field's parsed rules, emitting one
//! [`Issue`] per violation. Paths use the document convention — dot
//! separated, with flattened fields contributing no segment — and are
//! derived directly from the descriptor being walked, never recovered from
//! error-message text.

use confspec_core::{FieldShape, Node, Rule, TypeDescriptor};
use serde::Serialize;

use crate::path::join;
use crate::populate::{BoundValue, ScalarValue};

/// One violated rule at a document path. Issues are data, not failures:
/// the check operation collects them and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Dot-separated path, relative to the requirement's key.
    pub path: String,
    /// Name of the violated rule (`required`, `min`, `oneof`, ...).
    pub rule: String,
}

/// Evaluates every field's rules against a bound value.
pub fn validate(value: &BoundValue, descriptor: &TypeDescriptor) -> Vec<Issue> {
    let mut issues = Vec::new();
    walk(value, descriptor, "", &mut issues);
    issues
}

fn walk(value: &BoundValue, descriptor: &TypeDescriptor, prefix: &str, issues: &mut Vec<Issue>) {
    let BoundValue::Struct(entries) = value else {
        return;
    };
    for (field, (_, bound)) in descriptor.fields.iter().zip(entries) {
        let path = if field.flatten {
            prefix.to_string()
        } else {
            join(prefix, &field.name)
        };
        for rule in &field.rules {
            if violated(rule, bound) {
                issues.push(Issue {
                    path: path.clone(),
                    rule: rule.name().to_string(),
                });
            }
        }
        if let FieldShape::Struct(nested) = &field.shape {
            walk(bound, nested, &path, issues);
        }
    }
}

fn violated(rule: &Rule, value: &BoundValue) -> bool {
    match rule {
        Rule::Required => is_blank(value),
        // All other rules pass on absent values; only `required` polices
        // presence.
        _ if matches!(value, BoundValue::Missing) => false,
        Rule::Min(bound) => magnitude(value).is_some_and(|m| m < *bound),
        Rule::Max(bound) => magnitude(value).is_some_and(|m| m > *bound),
        Rule::MinLen(bound) => length(value).is_some_and(|l| l < *bound),
        Rule::MaxLen(bound) => length(value).is_some_and(|l| l > *bound),
        Rule::OneOf(options) => match textual(value) {
            Some(text) => !options.iter().any(|o| *o == text),
            None => false,
        },
    }
}

fn is_blank(value: &BoundValue) -> bool {
    match value {
        BoundValue::Missing => true,
        BoundValue::Scalar(ScalarValue::String(s)) => s.is_empty(),
        BoundValue::Scalar(_) => false,
        BoundValue::Struct(entries) => entries.iter().all(|(_, v)| is_blank(v)),
        BoundValue::Opaque(node) => match node {
            Node::Scalar(s) => s.is_empty(),
            Node::Mapping(entries) => entries.is_empty(),
            Node::Sequence(items) => items.is_empty(),
        },
    }
}

/// The value a numeric bound compares against: the number itself for
/// numeric scalars, seconds for durations, and the length for strings and
/// free-form collections.
fn magnitude(value: &BoundValue) -> Option<f64> {
    match value {
        BoundValue::Scalar(ScalarValue::Int(n)) => Some(*n as f64),
        BoundValue::Scalar(ScalarValue::Float(n)) => Some(*n),
        BoundValue::Scalar(ScalarValue::Duration(d)) => Some(d.as_secs_f64()),
        BoundValue::Scalar(ScalarValue::String(s)) => Some(s.chars().count() as f64),
        BoundValue::Opaque(node) => length_of_node(node).map(|l| l as f64),
        _ => None,
    }
}

fn length(value: &BoundValue) -> Option<usize> {
    match value {
        BoundValue::Scalar(ScalarValue::String(s)) => Some(s.chars().count()),
        BoundValue::Opaque(node) => length_of_node(node),
        _ => None,
    }
}

fn length_of_node(node: &Node) -> Option<usize> {
    match node {
        Node::Sequence(items) => Some(items.len()),
        Node::Mapping(entries) => Some(entries.len()),
        Node::Scalar(_) => None,
    }
}

fn textual(value: &BoundValue) -> Option<String> {
    match value {
        BoundValue::Scalar(ScalarValue::String(s)) => Some(s.clone()),
        BoundValue::Scalar(ScalarValue::Int(n)) => Some(n.to_string()),
        _ => None,
    }
}
