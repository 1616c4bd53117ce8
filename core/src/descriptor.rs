//! Structural type descriptors.
//!
//! A [`TypeDescriptor`] is the explicit, introspection-free schema of a
//! configuration shape: an ordered list of fields with external names,
//! flattening, parsed validation rules, and nested descriptors for
//! structured fields. It is built once per shape through
//! [`TypeDescriptor::builder`] and is the single source of truth for
//! population, validation, unknown-key scanning, and documentation output.
//!
//! # Example
//!
//! ```
//! use confspec_core::{Field, TypeDescriptor};
//!
//! let descriptor = TypeDescriptor::builder("db.Config")
//!     .field(Field::string("host").rules("required"))
//!     .field(Field::int("port"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(descriptor.type_name, "db.Config");
//! assert!(descriptor.fields[0].required());
//! assert!(!descriptor.fields[1].required());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::rule::{Rule, RuleError, parse_rules};
use crate::spec::field_specs;

/// Kind tag carried by primitive (leaf) fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Free text.
    String,
    /// Signed integer.
    Int,
    /// Floating-point number.
    Float,
    /// Boolean (`true`/`false`).
    Bool,
    /// Duration literal such as `250ms`, `1s`, or `2h`.
    Duration,
}

impl PrimitiveKind {
    /// Returns the kind name used in field specs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Duration => "duration",
        }
    }
}

/// The shape of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldShape {
    /// A leaf value of the tagged primitive kind.
    Primitive(PrimitiveKind),
    /// A nested structured shape with its own descriptor.
    Struct(TypeDescriptor),
    /// A free-form mapping; its contents are never introspected.
    Map,
    /// A free-form sequence; its contents are never introspected.
    Sequence,
}

/// One declared field of a structured shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// External (document) name of the field.
    pub name: String,
    /// When set, the field's sub-fields are promoted to the parent's path
    /// level and contribute no path segment of their own.
    pub flatten: bool,
    /// Parsed validation rules.
    pub rules: Vec<Rule>,
    /// The field's shape.
    pub shape: FieldShape,
}

impl FieldDescriptor {
    /// Returns `true` if the field's rules contain `required`.
    pub fn required(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, Rule::Required))
    }
}

/// Structural schema for one configuration shape.
///
/// Fields keep their declaration order; `type_name` is the human-readable
/// shape name reported alongside requirement keys (e.g. `"http.Config"`).
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// Human-readable name of the described shape.
    pub type_name: String,
    /// Declared fields, in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Returns a builder for a shape with the given type name.
    pub fn builder(type_name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Renders a stable textual form of the descriptor, used to deduplicate
    /// registrations of the same shape under the same key.
    pub fn signature(&self) -> String {
        let mut out = String::new();
        self.write_signature(&mut out);
        out
    }

    fn write_signature(&self, out: &mut String) {
        out.push_str(&self.type_name);
        out.push('{');
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&field.name);
            if field.flatten {
                out.push('*');
            }
            out.push(':');
            match &field.shape {
                FieldShape::Primitive(kind) => out.push_str(kind.as_str()),
                FieldShape::Struct(nested) => nested.write_signature(out),
                FieldShape::Map => out.push_str("map"),
                FieldShape::Sequence => out.push_str("sequence"),
            }
            if !field.rules.is_empty() {
                out.push('[');
                for (j, rule) in field.rules.iter().enumerate() {
                    if j > 0 {
                        out.push(';');
                    }
                    out.push_str(&rule.to_string());
                }
                out.push(']');
            }
        }
        out.push('}');
    }
}

/// Errors raised while building a [`TypeDescriptor`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DescriptorError {
    /// A field's rule string failed to parse.
    #[error("field {field}: {source}")]
    Rule {
        /// External name of the offending field.
        field: String,
        /// The underlying parse failure.
        source: RuleError,
    },
    /// Two leaves of the shape flatten to the same document path.
    #[error("duplicate field path: {0}")]
    DuplicatePath(String),
}

/// A field under construction; see [`TypeDescriptor::builder`].
///
/// Constructors name the field's shape; `rules` and `flatten` chain in the
/// usual builder style. The raw rule string is parsed when the enclosing
/// descriptor is built.
///
/// # Examples
///
/// ```
/// use confspec_core::{Field, TypeDescriptor};
///
/// let addr = TypeDescriptor::builder("net.Addr")
///     .field(Field::string("host").rules("required"))
///     .field(Field::int("port").rules("min=1,max=65535"))
///     .build()
///     .unwrap();
///
/// let descriptor = TypeDescriptor::builder("server.Config")
///     .field(Field::nested("listen", addr))
///     .field(Field::duration("timeout"))
///     .field(Field::map("labels"))
///     .build()
///     .unwrap();
/// assert_eq!(descriptor.fields.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    flatten: bool,
    rules: String,
    shape: FieldShape,
}

impl Field {
    fn new(name: impl Into<String>, shape: FieldShape) -> Self {
        Self {
            name: name.into(),
            flatten: false,
            rules: String::new(),
            shape,
        }
    }

    /// A string leaf.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldShape::Primitive(PrimitiveKind::String))
    }

    /// An integer leaf.
    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, FieldShape::Primitive(PrimitiveKind::Int))
    }

    /// A float leaf.
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldShape::Primitive(PrimitiveKind::Float))
    }

    /// A boolean leaf.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldShape::Primitive(PrimitiveKind::Bool))
    }

    /// A duration leaf (`250ms`, `1s`, `2m`, `1h`).
    pub fn duration(name: impl Into<String>) -> Self {
        Self::new(name, FieldShape::Primitive(PrimitiveKind::Duration))
    }

    /// A nested structured field with its own descriptor.
    pub fn nested(name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        Self::new(name, FieldShape::Struct(descriptor))
    }

    /// A free-form mapping; nested keys are never validated or reported.
    pub fn map(name: impl Into<String>) -> Self {
        Self::new(name, FieldShape::Map)
    }

    /// A free-form sequence; elements are never introspected.
    pub fn sequence(name: impl Into<String>) -> Self {
        Self::new(name, FieldShape::Sequence)
    }

    /// Attaches a rule string (e.g. `"required,min=1"`), parsed at build
    /// time.
    pub fn rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = rules.into();
        self
    }

    /// Promotes this field's sub-fields to the parent's path level.
    pub fn flatten(mut self) -> Self {
        self.flatten = true;
        self
    }
}

/// Builder returned by [`TypeDescriptor::builder`].
pub struct TypeDescriptorBuilder {
    type_name: String,
    fields: Vec<Field>,
}

impl TypeDescriptorBuilder {
    /// Adds a field in declaration order.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Parses every field's rule string and checks that no two leaves
    /// flatten to the same document path.
    pub fn build(self) -> Result<TypeDescriptor, DescriptorError> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for field in self.fields {
            let rules = parse_rules(&field.rules).map_err(|source| DescriptorError::Rule {
                field: field.name.clone(),
                source,
            })?;
            fields.push(FieldDescriptor {
                name: field.name,
                flatten: field.flatten,
                rules,
                shape: field.shape,
            });
        }

        let descriptor = TypeDescriptor {
            type_name: self.type_name,
            fields,
        };

        let mut seen = HashSet::new();
        for spec in field_specs(&descriptor) {
            if !seen.insert(spec.path.clone()) {
                return Err(DescriptorError::DuplicatePath(spec.path));
            }
        }

        Ok(descriptor)
    }
}
