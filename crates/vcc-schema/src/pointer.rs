//! JSON Pointer (RFC 6901) path building.

/// Append one reference token to a pointer, escaping `~` and `/`.
pub(crate) fn push(base: &str, token: &str) -> String {
    let escaped = token.replace('~', "~0").replace('/', "~1");
    format!("{base}/{escaped}")
}

/// Append an array index to a pointer.
pub(crate) fn push_index(base: &str, index: usize) -> String {
    format!("{base}/{index}")
}
