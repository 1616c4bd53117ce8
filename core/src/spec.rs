//! Field specifications and example skeleton rendering.
//!
//! [`field_specs`] flattens a [`TypeDescriptor`] into one [`FieldSpec`] per
//! leaf, using document-path notation (dot-separated, with flattened fields
//! contributing no segment). [`skeleton`] turns those specs into an example
//! document with kind-appropriate placeholders and `# required` markers.
//!
//! # Examples
//!
//! ```
//! use confspec_core::{Field, TypeDescriptor, field_specs, skeleton};
//!
//! let descriptor = TypeDescriptor::builder("db.Config")
//!     .field(Field::string("host").rules("required"))
//!     .field(Field::int("port"))
//!     .build()
//!     .unwrap();
//!
//! let specs = field_specs(&descriptor);
//! assert_eq!(specs[0].path, "host");
//! assert!(specs[0].required);
//!
//! let text = skeleton("db", &descriptor);
//! assert_eq!(text, "db:\n  host: \"\"  # required\n  port: 0\n");
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::descriptor::{FieldShape, TypeDescriptor};

/// One flattened leaf of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Dot-separated document path, relative to the requirement's key.
    pub path: String,
    /// Kind name (`string`, `int`, `float`, `bool`, `duration`, `map`,
    /// `sequence`).
    pub kind: String,
    /// Whether the field's rules contain `required`.
    pub required: bool,
}

/// Flattens a descriptor into leaf field specs, depth first.
///
/// Structured fields recurse; flattened fields contribute no path segment;
/// free-form maps and sequences are leaves of their collection kind.
pub fn field_specs(descriptor: &TypeDescriptor) -> Vec<FieldSpec> {
    let mut out = Vec::new();
    collect(descriptor, "", &mut out);
    out
}

fn collect(descriptor: &TypeDescriptor, prefix: &str, out: &mut Vec<FieldSpec>) {
    for field in &descriptor.fields {
        let path = if field.flatten {
            prefix.to_string()
        } else {
            join(prefix, &field.name)
        };
        match &field.shape {
            FieldShape::Struct(nested) => collect(nested, &path, out),
            FieldShape::Primitive(kind) => out.push(FieldSpec {
                path,
                kind: kind.as_str().to_string(),
                required: field.required(),
            }),
            FieldShape::Map => out.push(FieldSpec {
                path,
                kind: "map".to_string(),
                required: field.required(),
            }),
            FieldShape::Sequence => out.push(FieldSpec {
                path,
                kind: "sequence".to_string(),
                required: field.required(),
            }),
        }
    }
}

/// Joins a path prefix and a segment with a dot.
pub(crate) fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

enum SkeletonNode {
    Leaf(String),
    Branch(BTreeMap<String, SkeletonNode>),
}

/// Renders an example document for a descriptor.
///
/// Keys are sorted for stable output, nesting is two spaces per level, and
/// the whole tree sits under `key:` when the key is non-root.
pub fn skeleton(key: &str, descriptor: &TypeDescriptor) -> String {
    let mut root = BTreeMap::new();
    for spec in field_specs(descriptor) {
        if spec.path.is_empty() {
            continue;
        }
        let placeholder = placeholder(&spec);
        let segments: Vec<&str> = spec.path.split('.').collect();
        insert(&mut root, &segments, placeholder);
    }

    let mut out = String::new();
    if key.is_empty() {
        render(&root, 0, &mut out);
    } else {
        out.push_str(key);
        out.push_str(":\n");
        render(&root, 2, &mut out);
    }
    out
}

fn insert(children: &mut BTreeMap<String, SkeletonNode>, segments: &[&str], value: String) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        children.insert((*head).to_string(), SkeletonNode::Leaf(value));
        return;
    }
    let entry = children
        .entry((*head).to_string())
        .or_insert_with(|| SkeletonNode::Branch(BTreeMap::new()));
    if let SkeletonNode::Leaf(_) = entry {
        *entry = SkeletonNode::Branch(BTreeMap::new());
    }
    if let SkeletonNode::Branch(nested) = entry {
        insert(nested, rest, value);
    }
}

fn render(children: &BTreeMap<String, SkeletonNode>, indent: usize, out: &mut String) {
    let pad = " ".repeat(indent);
    for (name, node) in children {
        match node {
            SkeletonNode::Branch(nested) => {
                out.push_str(&pad);
                out.push_str(name);
                out.push_str(":\n");
                render(nested, indent + 2, out);
            }
            SkeletonNode::Leaf(value) => {
                out.push_str(&pad);
                out.push_str(name);
                out.push_str(": ");
                out.push_str(value);
                out.push('\n');
            }
        }
    }
}

fn placeholder(spec: &FieldSpec) -> String {
    let literal = match spec.kind.as_str() {
        "string" => "\"\"",
        "int" => "0",
        "float" => "0.0",
        "bool" => "false",
        "duration" => "\"1s\"",
        "map" => "{}",
        "sequence" => "[]",
        _ => "<value>",
    };
    if spec.required {
        format!("{literal}  # required")
    } else {
        literal.to_string()
    }
}
