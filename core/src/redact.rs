//! Secret masking for rendered configuration values.
//!
//! [`redact`] walks a [`Node`] tree and replaces the value of every mapping
//! entry whose key looks secret-bearing with a fixed mask, without recursing
//! into the masked value. It never fails; anything that is not a mapping or
//! sequence passes through unchanged.
//!
//! # Examples
//!
//! ```
//! use confspec_core::{Node, redact};
//!
//! let value = Node::mapping([
//!     ("user", Node::scalar("svc")),
//!     ("password", Node::scalar("secret")),
//! ]);
//!
//! let safe = redact(&value);
//! assert_eq!(safe.get("user"), Some(&Node::scalar("svc")));
//! assert_eq!(safe.get("password"), Some(&Node::scalar("***")));
//! ```

use crate::node::Node;

/// Replacement literal for masked values.
pub const MASK: &str = "***";

const SECRET_TERMS: [&str; 8] = [
    "password", "secret", "token", "apikey", "key", "dsn", "cookie", "bearer",
];

/// Masks secret-looking values within `value` for safe logging and display.
pub fn redact(value: &Node) -> Node {
    match value {
        Node::Mapping(entries) => Node::Mapping(
            entries
                .iter()
                .map(|(key, child)| {
                    if is_secret_key(key) {
                        (key.clone(), Node::scalar(MASK))
                    } else {
                        (key.clone(), redact(child))
                    }
                })
                .collect(),
        ),
        Node::Sequence(items) => Node::Sequence(items.iter().map(redact).collect()),
        Node::Scalar(_) => value.clone(),
    }
}

fn is_secret_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    SECRET_TERMS.iter().any(|term| lower.contains(term))
}
