//! Document-path helpers shared by the binding and validation walks.

/// Joins a dot-separated path prefix and a segment.
pub(crate) fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}
