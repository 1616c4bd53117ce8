//! Detection of document keys no registered shape accounts for.
//!
//! [`find_unknown`] walks a document subtree against its descriptor and
//! reports every mapping key that does not correspond to a declared field.
//! Flattened fields promote their inner field names to the enclosing level,
//! so a key consumed through flattening is never reported. Free-form map
//! fields accept arbitrary keys and are not descended into.

use std::collections::BTreeMap;

use confspec_core::{FieldShape, Node, TypeDescriptor};

use crate::path::join;

/// Returns the full paths of mapping keys in `subtree` that no field of
/// `descriptor` declares, sorted lexicographically. `prefix` seeds the
/// reported paths and is usually the requirement's key.
pub fn find_unknown(subtree: &Node, descriptor: &TypeDescriptor, prefix: &str) -> Vec<String> {
    let mut unknown = Vec::new();
    scan(subtree, descriptor, prefix, &mut unknown);
    unknown.sort();
    unknown
}

fn scan(node: &Node, descriptor: &TypeDescriptor, prefix: &str, unknown: &mut Vec<String>) {
    let Node::Mapping(entries) = node else {
        return;
    };
    let fields = visible_fields(descriptor);
    for (key, value) in entries {
        match fields.get(key.as_str()) {
            None => unknown.push(join(prefix, key)),
            Some(Some(nested)) => scan(value, nested, &join(prefix, key), unknown),
            Some(None) => {}
        }
    }
}

/// Maps each externally visible field name to the descriptor to descend
/// into, or `None` for leaves and free-form fields. Flattened struct fields
/// contribute their inner names at this level instead of their own.
fn visible_fields(descriptor: &TypeDescriptor) -> BTreeMap<&str, Option<&TypeDescriptor>> {
    let mut fields = BTreeMap::new();
    collect_visible(descriptor, &mut fields);
    fields
}

fn collect_visible<'a>(
    descriptor: &'a TypeDescriptor,
    fields: &mut BTreeMap<&'a str, Option<&'a TypeDescriptor>>,
) {
    for field in &descriptor.fields {
        match &field.shape {
            FieldShape::Struct(nested) if field.flatten => collect_visible(nested, fields),
            FieldShape::Struct(nested) => {
                fields.insert(field.name.as_str(), Some(nested));
            }
            _ => {
                fields.insert(field.name.as_str(), None);
            }
        }
    }
}
