//! Error types for source stack construction.
//!
//! Only building a [`Document`](confspec_core::Document) can abort a whole
//! check/discovery run; everything downstream reports problems as data.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a configuration document.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// A required file source could not be read.
    #[error("cannot read config source {path}: {source}")]
    Source {
        /// Path of the unreadable source.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// A source contained invalid YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Merge logic cannot proceed (e.g., a mapping key that is not a
    /// scalar). Kind conflicts between sources are not merge errors; the
    /// higher-precedence value replaces the lower one wholesale.
    #[error("cannot merge config: {0}")]
    Merge(String),

    /// A `${NAME}` placeholder had no environment value and no default.
    #[error("unresolved placeholder ${{{name}}} at {path}")]
    UnresolvedPlaceholder {
        /// The placeholder's variable name.
        name: String,
        /// Dot-separated document path of the scalar holding it.
        path: String,
    },

    /// The builder was given no sources at all.
    #[error("no configuration sources available")]
    NoSources,
}

/// Convenience alias for results with [`LoaderError`].
pub type Result<T> = std::result::Result<T, LoaderError>;
