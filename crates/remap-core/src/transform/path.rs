//! Dotted-path navigation over JSON value graphs
//!
//! Paths are opaque dot-separated strings ("user.address.city"). They are
//! never pre-validated: an empty path is a single empty-string segment, and
//! traversal indexes object keys only. Array-index segments are not
//! supported.
//!
//! Copyright (c) 2026 Remap Team
//! Licensed under the Apache-2.0 license

use crate::{Error, Result};
use serde_json::{Map, Value};

/// Split a dotted path into its ordered segments.
///
/// The empty path yields a single empty-string segment rather than an empty
/// list; the segment is then looked up like any other key.
///
/// # Example
///
/// ```
/// use remap_core::transform::path::split;
///
/// assert_eq!(split("user.name"), vec!["user", "name"]);
/// assert_eq!(split("name"), vec!["name"]);
/// assert_eq!(split(""), vec![""]);
/// ```
pub fn split(path: &str) -> Vec<&str> {
    path.split('.').collect()
}

/// Resolve a dotted path against a value graph, leniently.
///
/// Descends segment by segment, indexing object keys. A missing key, or a
/// non-object node reached before the final segment, is a miss and yields
/// `None`; no error is raised for well-formed paths with wrong keys.
///
/// # Example
///
/// ```
/// use remap_core::transform::path::resolve;
/// use serde_json::json;
///
/// let doc = json!({"a": {"b": {"c": 42}}});
/// assert_eq!(resolve(&doc, "a.b.c"), Some(&json!(42)));
/// assert_eq!(resolve(&doc, "a.missing.c"), None);
/// ```
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        match current {
            Value::Object(map) => current = map.get(segment)?,
            _ => return None,
        }
    }
    Some(current)
}

/// Resolve a dotted path against a value graph, failing fast.
///
/// The strict counterpart of [`resolve`]: the first segment that does not
/// exist on the current node aborts the traversal with
/// [`Error::PathResolution`] naming the offending segment and its depth.
pub fn resolve_strict<'a>(root: &'a Value, path: &str) -> Result<&'a Value> {
    let mut current = root;
    for (depth, segment) in path.split('.').enumerate() {
        current = match current {
            Value::Object(map) => map.get(segment),
            _ => None,
        }
        .ok_or_else(|| Error::PathResolution {
            path: path.to_string(),
            segment: segment.to_string(),
            depth,
        })?;
    }
    Ok(current)
}

/// Build a nested object skeleton holding `value` at the end of `path`.
///
/// A single-segment path degenerates to a flat one-key object; a longer
/// path produces a chain of single-key objects, one per segment, with
/// `value` at the innermost position. The skeleton is always a brand-new
/// structure sized exactly to the path; no existing document is touched.
///
/// # Example
///
/// ```
/// use remap_core::transform::path::build_skeleton;
/// use serde_json::json;
///
/// assert_eq!(build_skeleton("a.b.c", json!(1)), json!({"a": {"b": {"c": 1}}}));
/// assert_eq!(build_skeleton("a", json!(1)), json!({"a": 1}));
/// ```
pub fn build_skeleton(path: &str, value: Value) -> Value {
    let mut node = value;
    for segment in split(path).into_iter().rev() {
        let mut map = Map::new();
        map.insert(segment.to_string(), node);
        node = Value::Object(map);
    }
    node
}
