//! Ordered configuration sources and document construction.
//!
//! A [`DocumentBuilder`] collects sources from lowest to highest precedence
//! and builds a single merged [`Document`]. The standard application layout
//! is: compiled-in defaults, then `config.yml`, `config.local.yml`, and an
//! optional service-specific file in the config directory (each skipped when
//! absent), then caller-supplied sources on top. Placeholder expansion runs
//! once over the merged tree.
//!
//! # Examples
//!
//! ```
//! use confspec_loader::DocumentBuilder;
//!
//! let document = DocumentBuilder::new()
//!     .with_inline("db:\n  host: localhost\n")
//!     .with_inline("db:\n  port: 5432\n")
//!     .build_with(|_| None)
//!     .unwrap();
//!
//! assert!(document.subtree("db.host").is_some());
//! assert!(document.subtree("db.port").is_some());
//! ```

use std::path::{Path, PathBuf};

use confspec_core::{Document, Node};

use crate::error::{LoaderError, Result};
use crate::expand::expand;
use crate::merge::merge;

/// One configuration source, from which a [`Node`] tree can be produced.
#[derive(Debug, Clone)]
pub enum Source {
    /// A YAML file that must exist and be readable.
    File(PathBuf),
    /// A YAML file that is silently skipped when absent.
    OptionalFile(PathBuf),
    /// Inline YAML text (e.g., embedded defaults).
    Inline(String),
    /// An already-built node tree (e.g., compiled-in defaults).
    Value(Node),
}

/// Builds a [`Document`] from an ordered stack of sources.
///
/// Sources are added lowest precedence first; later sources override
/// earlier ones per the merge rules in [`merge`](crate::merge).
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    sources: Vec<Source>,
}

impl DocumentBuilder {
    /// Creates a builder with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder pre-loaded with the standard file layering for an
    /// application config directory:
    ///
    /// 1. `<dir>/config.yml` (base)
    /// 2. `<dir>/config.local.yml` (local overrides)
    /// 3. `<dir>/<service>.yml` (service-specific overrides, when a service
    ///    name is given)
    ///
    /// All three are optional files; callers layer defaults below and
    /// explicit sources above.
    pub fn standard(dir: impl AsRef<Path>, service: Option<&str>) -> Self {
        let dir = dir.as_ref();
        let mut builder = Self::new()
            .with_optional_file(dir.join("config.yml"))
            .with_optional_file(dir.join("config.local.yml"));
        if let Some(service) = service {
            let service = service.trim();
            if !service.is_empty() {
                builder = builder.with_optional_file(dir.join(format!("{service}.yml")));
            }
        }
        builder
    }

    /// Adds a source at the current (highest so far) precedence level.
    pub fn with_source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds a required YAML file.
    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        self.with_source(Source::File(path.into()))
    }

    /// Adds a YAML file that is skipped when absent.
    pub fn with_optional_file(self, path: impl Into<PathBuf>) -> Self {
        self.with_source(Source::OptionalFile(path.into()))
    }

    /// Adds inline YAML text.
    pub fn with_inline(self, yaml: impl Into<String>) -> Self {
        self.with_source(Source::Inline(yaml.into()))
    }

    /// Adds an already-built node tree.
    pub fn with_value(self, node: Node) -> Self {
        self.with_source(Source::Value(node))
    }

    /// Adds an override file named by an environment-style value, as used by
    /// command-line front ends (`CONFIG=path`). Unlike
    /// [`with_optional_file`](Self::with_optional_file), an explicitly named
    /// file that is missing is an error rather than a silent skip.
    pub fn with_override_path(self, path: Option<impl Into<PathBuf>>) -> Result<Self> {
        match path {
            None => Ok(self),
            Some(path) => {
                let path = path.into();
                if !path.is_file() {
                    return Err(LoaderError::Source {
                        source: std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "override path not found or not a file",
                        ),
                        path,
                    });
                }
                Ok(self.with_file(path))
            }
        }
    }

    /// Builds the merged document, expanding placeholders against the
    /// process environment.
    pub fn build(self) -> Result<Document> {
        self.build_with(|name| std::env::var(name).ok())
    }

    /// Builds the merged document with an explicit environment lookup.
    ///
    /// # Errors
    ///
    /// Fails with [`LoaderError::NoSources`] when the builder holds no
    /// sources, [`LoaderError::Source`]/[`LoaderError::Yaml`] when a source
    /// cannot be read or parsed, [`LoaderError::Merge`] when a document
    /// cannot be represented (non-scalar mapping keys), and
    /// [`LoaderError::UnresolvedPlaceholder`] per the expansion rules.
    pub fn build_with(self, lookup: impl Fn(&str) -> Option<String>) -> Result<Document> {
        if self.sources.is_empty() {
            return Err(LoaderError::NoSources);
        }

        let mut merged: Option<Node> = None;
        for source in self.sources {
            let Some(node) = load_source(source)? else {
                continue;
            };
            merged = Some(match merged {
                Some(base) => merge(base, node),
                None => node,
            });
        }

        let root = merged.unwrap_or_else(|| Node::Mapping(Vec::new()));
        Ok(Document::new(expand(root, &lookup)?))
    }
}

fn load_source(source: Source) -> Result<Option<Node>> {
    let text = match source {
        Source::Value(node) => return Ok(Some(node)),
        Source::Inline(text) => text,
        Source::OptionalFile(path) => {
            if !path.is_file() {
                return Ok(None);
            }
            read(&path)?
        }
        Source::File(path) => read(&path)?,
    };
    parse_yaml(&text)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| LoaderError::Source {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses YAML text into a node tree. Empty documents contribute nothing.
pub fn parse_yaml(text: &str) -> Result<Option<Node>> {
    let value: serde_yaml::Value = serde_yaml::from_str(text)?;
    if matches!(value, serde_yaml::Value::Null) {
        return Ok(None);
    }
    value_to_node(value).map(Some)
}

fn value_to_node(value: serde_yaml::Value) -> Result<Node> {
    use serde_yaml::Value;

    Ok(match value {
        Value::Null => Node::scalar(""),
        Value::Bool(b) => Node::scalar(b.to_string()),
        Value::Number(n) => Node::scalar(n.to_string()),
        Value::String(s) => Node::Scalar(s),
        Value::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(value_to_node(item)?);
            }
            Node::Sequence(out)
        }
        Value::Mapping(entries) => {
            let mut node = Node::Mapping(Vec::new());
            for (key, value) in entries {
                node.insert(key_to_string(key)?, value_to_node(value)?);
            }
            node
        }
        Value::Tagged(tagged) => value_to_node(tagged.value)?,
    })
}

fn key_to_string(key: serde_yaml::Value) -> Result<String> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(LoaderError::Merge(format!(
            "unsupported mapping key: {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_shapes() {
        let node = parse_yaml("a: 1\nb: [x, y]\nc:\n  d: true\n")
            .unwrap()
            .unwrap();
        assert_eq!(node.get("a"), Some(&Node::scalar("1")));
        assert_eq!(
            node.get("b"),
            Some(&Node::sequence([Node::scalar("x"), Node::scalar("y")]))
        );
        assert_eq!(node.at_path("c.d"), Some(&Node::scalar("true")));
    }

    #[test]
    fn test_parse_yaml_empty_document_is_none() {
        assert!(parse_yaml("").unwrap().is_none());
        assert!(parse_yaml("# only a comment\n").unwrap().is_none());
    }

    #[test]
    fn test_parse_yaml_rejects_complex_keys() {
        let err = parse_yaml("? [a, b]\n: 1\n").unwrap_err();
        assert!(matches!(err, LoaderError::Merge(_)));
    }

    #[test]
    fn test_build_requires_sources() {
        let err = DocumentBuilder::new().build_with(|_| None).unwrap_err();
        assert!(matches!(err, LoaderError::NoSources));
    }

    #[test]
    fn test_later_sources_take_precedence() {
        let document = DocumentBuilder::new()
            .with_inline("x: 1\nm:\n  a: 1\n")
            .with_inline("x: 2\nm:\n  b: 2\n")
            .build_with(|_| None)
            .unwrap();

        assert_eq!(document.subtree("x"), Some(&Node::scalar("2")));
        assert_eq!(document.subtree("m.a"), Some(&Node::scalar("1")));
        assert_eq!(document.subtree("m.b"), Some(&Node::scalar("2")));
    }

    #[test]
    fn test_empty_source_does_not_wipe_earlier_layers() {
        let document = DocumentBuilder::new()
            .with_inline("x: 1\n")
            .with_inline("# empty override\n")
            .build_with(|_| None)
            .unwrap();

        assert_eq!(document.subtree("x"), Some(&Node::scalar("1")));
    }

    #[test]
    fn test_placeholders_expand_after_merge() {
        let document = DocumentBuilder::new()
            .with_inline("db:\n  host: ${DB_HOST:localhost}\n")
            .build_with(|name| (name == "DB_HOST").then(|| "db.prod".to_string()))
            .unwrap();

        assert_eq!(document.subtree("db.host"), Some(&Node::scalar("db.prod")));
    }
}
