//! In-memory representation of a parsed configuration document.
//!
//! A [`Node`] is the tagged value every other component consumes: a scalar
//! leaf, an ordered mapping with unique string keys, or a sequence. Raw
//! documents, merged documents, and redacted views all share this shape.
//!
//! # Examples
//!
//! ```
//! use confspec_core::Node;
//!
//! let doc = Node::mapping([
//!     ("host", Node::scalar("localhost")),
//!     ("port", Node::scalar("5432")),
//! ]);
//!
//! assert_eq!(doc.get("host"), Some(&Node::scalar("localhost")));
//! assert_eq!(doc.at_path("port"), Some(&Node::scalar("5432")));
//! ```

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A parsed configuration value.
///
/// Mappings preserve insertion order and keep keys unique; inserting an
/// existing key replaces its value in place.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A leaf value, stored in its textual form.
    Scalar(String),
    /// An ordered set of `(key, value)` entries with unique keys.
    Mapping(Vec<(String, Node)>),
    /// An ordered list of values.
    Sequence(Vec<Node>),
}

impl Node {
    /// Creates a scalar leaf.
    pub fn scalar(value: impl Into<String>) -> Self {
        Node::Scalar(value.into())
    }

    /// Creates a mapping from `(key, value)` pairs.
    ///
    /// Later duplicates replace earlier entries, preserving the original
    /// position, so mapping keys stay unique.
    pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, Node)>) -> Self {
        let mut node = Node::Mapping(Vec::new());
        for (key, value) in entries {
            node.insert(key.into(), value);
        }
        node
    }

    /// Creates a sequence from values.
    pub fn sequence(items: impl IntoIterator<Item = Node>) -> Self {
        Node::Sequence(items.into_iter().collect())
    }

    /// Returns a short name for this node's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Scalar(_) => "scalar",
            Node::Mapping(_) => "mapping",
            Node::Sequence(_) => "sequence",
        }
    }

    /// Looks up a direct child of a mapping. Returns `None` for scalars and
    /// sequences.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Walks a dot-separated path (`"a.b.c"`). The empty path resolves to
    /// the node itself.
    pub fn at_path(&self, path: &str) -> Option<&Node> {
        if path.is_empty() {
            return Some(self);
        }
        let mut current = self;
        for segment in path.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Inserts or replaces a mapping entry. No-op on scalars and sequences.
    pub fn insert(&mut self, key: String, value: Node) {
        if let Node::Mapping(entries) = self {
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some((_, existing)) => *existing = value,
                None => entries.push((key, value)),
            }
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(value) => serializer.serialize_str(value),
            Node::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Node::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// The single node tree produced by merging an ordered source stack.
///
/// Immutable once built; subtree lookups address declared requirements by
/// their dot-separated key, with the root key `""` meaning the whole
/// document.
///
/// # Examples
///
/// ```
/// use confspec_core::{Document, Node};
///
/// let doc = Document::new(Node::mapping([(
///     "db",
///     Node::mapping([("host", Node::scalar("localhost"))]),
/// )]));
///
/// assert!(doc.subtree("db").is_some());
/// assert_eq!(doc.subtree(""), Some(doc.root()));
/// assert!(doc.subtree("http").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Wraps a merged root node.
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Returns the whole document tree.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Resolves a dot-separated subtree key. `""` addresses the root.
    pub fn subtree(&self, key: &str) -> Option<&Node> {
        self.root.at_path(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_keeps_keys_unique() {
        let node = Node::mapping([
            ("a", Node::scalar("1")),
            ("b", Node::scalar("2")),
            ("a", Node::scalar("3")),
        ]);

        let Node::Mapping(entries) = &node else {
            panic!("expected mapping");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(node.get("a"), Some(&Node::scalar("3")));
        assert_eq!(entries[0].0, "a");
    }

    #[test]
    fn test_at_path_walks_nested_mappings() {
        let node = Node::mapping([(
            "a",
            Node::mapping([("b", Node::mapping([("c", Node::scalar("x"))]))]),
        )]);

        assert_eq!(node.at_path("a.b.c"), Some(&Node::scalar("x")));
        assert_eq!(node.at_path(""), Some(&node));
        assert!(node.at_path("a.b.missing").is_none());
    }

    #[test]
    fn test_at_path_stops_at_non_mapping() {
        let node = Node::mapping([("a", Node::scalar("x"))]);
        assert!(node.at_path("a.b").is_none());
    }

    #[test]
    fn test_serialize_preserves_shape_and_order() {
        let node = Node::mapping([
            ("z", Node::scalar("last")),
            ("a", Node::sequence([Node::scalar("1"), Node::scalar("2")])),
        ]);

        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"z":"last","a":["1","2"]}"#);
    }

    #[test]
    fn test_document_root_key_is_whole_tree() {
        let doc = Document::new(Node::mapping([("k", Node::scalar("v"))]));
        assert_eq!(doc.subtree(""), Some(doc.root()));
    }
}
