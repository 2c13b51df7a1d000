//! Walks a [`FieldPath`] through a data document.
use crate::ast::FieldPath;
use crate::parser::parse_path;
use serde_json::Value;

/// The single capability path resolution needs from a data tree.
///
/// A node either owns a named child directly or it does not. Sequences and
/// scalars never own named children, so a walk that meets one stops there.
pub trait DataNode {
    fn own_child(&self, key: &str) -> Option<&Self>;

    fn is_null(&self) -> bool;
}

impl DataNode for Value {
    fn own_child(&self, key: &str) -> Option<&Self> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    fn is_null(&self) -> bool {
        Value::is_null(self)
    }
}

/// Follows `path` from `node`, returning the node it lands on.
///
/// Returns `None` if any segment is missing or the final node is null. An
/// empty path selects nothing.
pub fn select<'a, N: DataNode>(node: &'a N, path: &FieldPath) -> Option<&'a N> {
    if path.is_empty() {
        return None;
    }
    let mut current = node;
    for segment in path.segments() {
        current = current.own_child(segment)?;
    }
    if current.is_null() { None } else { Some(current) }
}

/// Resolves a mapping string against `document`, falling back to `fallback`.
///
/// The found value keeps its JSON type; only absence (missing key, a
/// non-mapping node mid-path, a blank path, or an explicit `null`) yields
/// the fallback. `0`, `false` and `""` are real values.
pub fn resolve(document: &Value, path: &str, fallback: &str) -> Value {
    resolve_path(document, &parse_path(path), fallback)
}

/// Like [`resolve`] for an already parsed path.
pub fn resolve_path(document: &Value, path: &FieldPath, fallback: &str) -> Value {
    select(document, path)
        .cloned()
        .unwrap_or_else(|| Value::String(fallback.to_string()))
}
