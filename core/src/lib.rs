//! Core types for layered configuration contracts.
//!
//! This crate defines the foundational types shared by the loader and
//! discovery crates:
//!
//! - [`Node`] / [`Document`] — the tagged in-memory form of a parsed
//!   configuration document (scalar, ordered mapping, sequence) and the
//!   merged tree built from an ordered source stack.
//! - [`TypeDescriptor`] / [`Field`] — an explicit structural schema for a
//!   configuration shape, built once per shape, replacing any reliance on
//!   runtime type introspection.
//! - [`Rule`] — the parsed validation rule grammar (`required`, numeric and
//!   length bounds, enumerations), shared by validation, unknown-key
//!   scanning, and documentation output.
//! - [`FieldSpec`] / [`field_specs`] / [`skeleton`] — machine-derived
//!   documentation: flattened leaf specifications and rendered example
//!   documents.
//! - [`redact`] — secret masking for safe display of configuration values.
//!
//! # Example
//!
//! ```
//! use confspec_core::{Field, Node, TypeDescriptor, field_specs, skeleton};
//!
//! let descriptor = TypeDescriptor::builder("db.Config")
//!     .field(Field::string("host").rules("required"))
//!     .field(Field::int("port").rules("min=1,max=65535"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(field_specs(&descriptor).len(), 2);
//! assert!(skeleton("db", &descriptor).starts_with("db:\n"));
//! ```

mod descriptor;
mod node;
mod redact;
mod rule;
mod spec;

pub use descriptor::{
    DescriptorError, Field, FieldDescriptor, FieldShape, PrimitiveKind, TypeDescriptor,
    TypeDescriptorBuilder,
};
pub use node::{Document, Node};
pub use redact::{MASK, redact};
pub use rule::{Rule, RuleError, parse_rules};
pub use spec::{FieldSpec, field_specs, skeleton};
