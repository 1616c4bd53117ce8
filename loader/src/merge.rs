//! Precedence merge of document trees.
//!
//! Merging is deterministic: for two sources defining the same path, the
//! higher-precedence value wins outright. Mappings union their keys with
//! per-key precedence; scalars and sequences replace wholesale, even when
//! the kinds differ.
//!
//! # Examples
//!
//! ```
//! use confspec_core::Node;
//! use confspec_loader::merge;
//!
//! let base = Node::mapping([("m", Node::mapping([("a", Node::scalar("1"))]))]);
//! let overlay = Node::mapping([("m", Node::mapping([("b", Node::scalar("2"))]))]);
//!
//! let merged = merge(base, overlay);
//! let m = merged.get("m").unwrap();
//! assert_eq!(m.get("a"), Some(&Node::scalar("1")));
//! assert_eq!(m.get("b"), Some(&Node::scalar("2")));
//! ```

use confspec_core::Node;

/// Merges `overlay` (higher precedence) onto `base`.
pub fn merge(base: Node, overlay: Node) -> Node {
    match (base, overlay) {
        (Node::Mapping(base_entries), Node::Mapping(overlay_entries)) => {
            let mut merged = Node::Mapping(base_entries);
            for (key, overlay_value) in overlay_entries {
                let combined = match merged.get(&key) {
                    Some(base_value) => merge(base_value.clone(), overlay_value),
                    None => overlay_value,
                };
                merged.insert(key, combined);
            }
            merged
        }
        (_, overlay) => overlay,
    }
}
