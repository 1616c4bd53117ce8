//! Requirement registry and validation for layered configuration.
//!
//! Modules declare, at bootstrap, which configuration subtree they need and
//! what shape it must have. This crate collects those declarations in a
//! [`RequirementRegistry`] and offers two operations over them:
//!
//! - [`check`]: bind every requirement against a merged document, evaluate
//!   the declared rules, and scan for keys nothing declared. One
//!   [`CheckResult`] per requirement; a failure in one never hides another.
//! - [`discovery_report`]: render what the binary expects as data, with a
//!   flattened field specification and a ready-to-paste skeleton snippet
//!   per requirement.
//!
//! # Examples
//!
//! ```
//! use confspec_core::{Document, Field, Node, TypeDescriptor};
//! use confspec_discovery::{RequirementRegistry, check};
//!
//! let registry = RequirementRegistry::new();
//! registry.register(
//!     "db",
//!     TypeDescriptor::builder("db.Config")
//!         .field(Field::string("host").rules("required"))
//!         .build()
//!         .unwrap(),
//! );
//!
//! let document = Document::new(Node::mapping([(
//!     "db",
//!     Node::mapping([("host", Node::scalar("localhost"))]),
//! )]));
//!
//! let results = check(&registry, &document);
//! assert!(results.iter().all(|r| r.ok));
//! ```

mod check;
mod path;
mod populate;
mod registry;
mod unknown;
mod validate;

pub use check::{CheckResult, DiscoveryReport, RequirementDoc, check, discovery_report};
pub use populate::{BoundValue, PopulateError, ScalarValue, populate};
pub use registry::{Requirement, RequirementRegistry, SpecError};
pub use unknown::find_unknown;
pub use validate::{Issue, validate};
