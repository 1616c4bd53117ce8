//! Layered configuration source stacks.
//!
//! This crate turns an ordered list of configuration sources into a single
//! merged [`Document`](confspec_core::Document):
//!
//! - [`DocumentBuilder`] — collects sources from lowest to highest
//!   precedence (defaults, standard config files, caller overrides) and
//!   builds the merged tree.
//! - [`merge`] — deterministic precedence merge: mappings union per key,
//!   everything else is replaced wholesale by the higher-precedence source.
//! - [`expand`] — a single post-merge pass resolving `${NAME:default}`
//!   placeholders in scalar leaves against an environment lookup.
//!
//! # Example
//!
//! ```no_run
//! use confspec_loader::DocumentBuilder;
//!
//! let document = DocumentBuilder::standard("config", Some("billing"))
//!     .with_file("overrides.yml")
//!     .build()
//!     .unwrap();
//! assert!(document.subtree("http").is_some());
//! ```

mod error;
mod expand;
mod merge;
mod source;

pub use error::{LoaderError, Result};
pub use expand::expand;
pub use merge::merge;
pub use source::{DocumentBuilder, Source, parse_yaml};
