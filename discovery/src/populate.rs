//! Binding a document subtree into a declared shape.
//!
//! [`populate`] converts a raw [`Node`] subtree into a [`BoundValue`] tree
//! that mirrors the requirement's [`TypeDescriptor`] field for field. Absent
//! subtrees and fields bind as [`BoundValue::Missing`] so the `required`
//! rule can report them as issues; genuine shape mismatches (a scalar where
//! a mapping is declared, an unparseable number) are [`PopulateError`]s
//! carrying the exact document path.

use std::time::Duration;

use confspec_core::{FieldShape, Node, PrimitiveKind, TypeDescriptor};
use thiserror::Error;

use crate::path::join;

/// A primitive value after binding.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// String leaf, as written.
    String(String),
    /// Parsed integer.
    Int(i64),
    /// Parsed float.
    Float(f64),
    /// Parsed boolean.
    Bool(bool),
    /// Parsed duration.
    Duration(Duration),
}

/// A document subtree bound against a descriptor.
///
/// `Struct` entries parallel the descriptor's fields in declaration order,
/// including one entry per flattened field (holding that field's own bound
/// struct).
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    /// The field (or subtree) was absent from the document.
    Missing,
    /// A bound primitive leaf.
    Scalar(ScalarValue),
    /// A bound structured value, one entry per descriptor field.
    Struct(Vec<(String, BoundValue)>),
    /// A free-form map or sequence, carried without introspection.
    Opaque(Node),
}

/// Errors raised when a subtree cannot bind into the declared shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PopulateError {
    /// A structured field found a scalar or sequence.
    #[error("expected mapping at {path:?}, found {found}")]
    ExpectedMapping {
        /// Document path of the mismatch (relative to the requirement key).
        path: String,
        /// Kind actually found.
        found: &'static str,
    },
    /// A primitive field found a mapping or sequence.
    #[error("expected scalar at {path:?}, found {found}")]
    ExpectedScalar {
        /// Document path of the mismatch.
        path: String,
        /// Kind actually found.
        found: &'static str,
    },
    /// A scalar's text could not be parsed as the declared primitive kind.
    #[error("invalid {kind} value {value:?} at {path:?}")]
    InvalidScalar {
        /// Document path of the leaf.
        path: String,
        /// Declared primitive kind.
        kind: &'static str,
        /// The offending text.
        value: String,
    },
}

/// Binds `subtree` (or its absence) into the shape described by
/// `descriptor`. The returned value is always a [`BoundValue::Struct`]
/// mirroring the descriptor's fields.
pub fn populate(
    subtree: Option<&Node>,
    descriptor: &TypeDescriptor,
) -> Result<BoundValue, PopulateError> {
    bind_struct(subtree, descriptor, "")
}

fn bind_struct(
    node: Option<&Node>,
    descriptor: &TypeDescriptor,
    prefix: &str,
) -> Result<BoundValue, PopulateError> {
    let mapping = match node {
        None => None,
        Some(Node::Mapping(_)) => node,
        Some(other) => {
            return Err(PopulateError::ExpectedMapping {
                path: prefix.to_string(),
                found: other.kind(),
            });
        }
    };

    let mut entries = Vec::with_capacity(descriptor.fields.len());
    for field in &descriptor.fields {
        let path = if field.flatten {
            prefix.to_string()
        } else {
            join(prefix, &field.name)
        };
        let raw = if field.flatten {
            mapping
        } else {
            mapping.and_then(|m| m.get(&field.name))
        };
        let bound = match &field.shape {
            FieldShape::Struct(nested) => bind_struct(raw, nested, &path)?,
            FieldShape::Primitive(kind) => bind_primitive(raw, *kind, &path)?,
            FieldShape::Map | FieldShape::Sequence => match raw {
                Some(node) => BoundValue::Opaque(node.clone()),
                None => BoundValue::Missing,
            },
        };
        entries.push((field.name.clone(), bound));
    }
    Ok(BoundValue::Struct(entries))
}

fn bind_primitive(
    node: Option<&Node>,
    kind: PrimitiveKind,
    path: &str,
) -> Result<BoundValue, PopulateError> {
    let text = match node {
        None => return Ok(BoundValue::Missing),
        Some(Node::Scalar(text)) => text,
        Some(other) => {
            return Err(PopulateError::ExpectedScalar {
                path: path.to_string(),
                found: other.kind(),
            });
        }
    };

    let invalid = || PopulateError::InvalidScalar {
        path: path.to_string(),
        kind: kind.as_str(),
        value: text.clone(),
    };

    let value = match kind {
        PrimitiveKind::String => ScalarValue::String(text.clone()),
        PrimitiveKind::Int => ScalarValue::Int(text.trim().parse().map_err(|_| invalid())?),
        PrimitiveKind::Float => ScalarValue::Float(text.trim().parse().map_err(|_| invalid())?),
        PrimitiveKind::Bool => match text.trim() {
            t if t.eq_ignore_ascii_case("true") => ScalarValue::Bool(true),
            t if t.eq_ignore_ascii_case("false") => ScalarValue::Bool(false),
            _ => return Err(invalid()),
        },
        PrimitiveKind::Duration => {
            ScalarValue::Duration(parse_duration(text.trim()).ok_or_else(invalid)?)
        }
    };
    Ok(BoundValue::Scalar(value))
}

/// Parses duration literals of the form `<number><unit>` with units
/// `ns`, `us`, `ms`, `s`, `m`, and `h` (e.g. `250ms`, `1.5s`, `2h`).
fn parse_duration(text: &str) -> Option<Duration> {
    let split = text.find(|c: char| !c.is_ascii_digit() && c != '.')?;
    let (number, unit) = text.split_at(split);
    let value: f64 = number.parse().ok()?;
    let unit_seconds = match unit {
        "ns" => 1e-9,
        "us" => 1e-6,
        "ms" => 1e-3,
        "s" => 1.0,
        "m" => 60.0,
        "h" => 3600.0,
        _ => return None,
    };
    Duration::try_from_secs_f64(value * unit_seconds).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use confspec_core::Field;

    fn descriptor() -> TypeDescriptor {
        let limits = TypeDescriptor::builder("Limits")
            .field(Field::int("max_conns"))
            .build()
            .unwrap();
        TypeDescriptor::builder("db.Config")
            .field(Field::string("host").rules("required"))
            .field(Field::int("port"))
            .field(Field::duration("timeout"))
            .field(Field::nested("limits", limits))
            .field(Field::map("params"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_binds_present_fields_and_marks_absent_ones() {
        let subtree = Node::mapping([
            ("host", Node::scalar("localhost")),
            ("port", Node::scalar("5432")),
        ]);

        let BoundValue::Struct(entries) = populate(Some(&subtree), &descriptor()).unwrap() else {
            panic!("expected struct");
        };
        assert_eq!(
            entries[0].1,
            BoundValue::Scalar(ScalarValue::String("localhost".into()))
        );
        assert_eq!(entries[1].1, BoundValue::Scalar(ScalarValue::Int(5432)));
        assert_eq!(entries[2].1, BoundValue::Missing);
    }

    #[test]
    fn test_absent_subtree_binds_as_all_missing() {
        let BoundValue::Struct(entries) = populate(None, &descriptor()).unwrap() else {
            panic!("expected struct");
        };
        assert!(entries.iter().take(3).all(|(_, v)| *v == BoundValue::Missing));
        // Nested structs still materialize so required rules can fire inside.
        assert!(matches!(entries[3].1, BoundValue::Struct(_)));
    }

    #[test]
    fn test_scalar_where_mapping_expected_is_bind_error() {
        let err = populate(Some(&Node::scalar("oops")), &descriptor()).unwrap_err();
        assert_eq!(
            err,
            PopulateError::ExpectedMapping {
                path: String::new(),
                found: "scalar",
            }
        );
    }

    #[test]
    fn test_mapping_where_scalar_expected_reports_path() {
        let subtree = Node::mapping([("port", Node::mapping([("v", Node::scalar("1"))]))]);
        let err = populate(Some(&subtree), &descriptor()).unwrap_err();
        assert_eq!(
            err,
            PopulateError::ExpectedScalar {
                path: "port".to_string(),
                found: "mapping",
            }
        );
    }

    #[test]
    fn test_unparseable_int_reports_value_and_path() {
        let subtree = Node::mapping([("port", Node::scalar("not-a-number"))]);
        let err = populate(Some(&subtree), &descriptor()).unwrap_err();
        assert!(matches!(
            err,
            PopulateError::InvalidScalar { kind: "int", .. }
        ));
    }

    #[test]
    fn test_flatten_binds_against_parent_mapping() {
        let common = TypeDescriptor::builder("Common")
            .field(Field::string("name"))
            .build()
            .unwrap();
        let outer = TypeDescriptor::builder("Outer")
            .field(Field::nested("common", common).flatten())
            .build()
            .unwrap();

        let subtree = Node::mapping([("name", Node::scalar("svc"))]);
        let BoundValue::Struct(entries) = populate(Some(&subtree), &outer).unwrap() else {
            panic!("expected struct");
        };
        let BoundValue::Struct(inner) = &entries[0].1 else {
            panic!("expected nested struct");
        };
        assert_eq!(
            inner[0].1,
            BoundValue::Scalar(ScalarValue::String("svc".into()))
        );
    }

    #[test]
    fn test_free_form_map_is_opaque() {
        let subtree = Node::mapping([(
            "params",
            Node::mapping([("anything", Node::scalar("goes"))]),
        )]);
        let BoundValue::Struct(entries) = populate(Some(&subtree), &descriptor()).unwrap() else {
            panic!("expected struct");
        };
        assert!(matches!(entries[4].1, BoundValue::Opaque(_)));
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("250ms"), Some(Duration::from_millis(250)));
        assert_eq!(parse_duration("1.5s"), Some(Duration::from_millis(1500)));
        assert_eq!(parse_duration("2m"), Some(Duration::from_secs(120)));
        assert_eq!(parse_duration("1h"), Some(Duration::from_secs(3600)));
        assert_eq!(parse_duration("10"), None);
        assert_eq!(parse_duration("10x"), None);
        assert_eq!(parse_duration("s"), None);
    }

    #[test]
    fn test_overflowing_duration_is_bind_error_not_panic() {
        assert_eq!(parse_duration("99999999999999999999s"), None);

        let subtree = Node::mapping([("timeout", Node::scalar("99999999999999999999s"))]);
        let err = populate(Some(&subtree), &descriptor()).unwrap_err();
        assert!(matches!(
            err,
            PopulateError::InvalidScalar {
                kind: "duration",
                ..
            }
        ));
    }
}
