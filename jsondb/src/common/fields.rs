use crate::collection::Document;
use crate::common::{Value, FIELD_SEPARATOR};

/// Resolves a dotted field path against a document.
///
/// Each segment of `path` steps one level into a nested document. The lookup
/// stops with `None` as soon as a segment is missing or the value reached so far
/// is not a document; arrays are not traversed.
///
/// A path that resolves to an explicit `null` returns `Some(&Value::Null)`, so
/// callers can tell "present but null" apart from "absent".
///
/// # Examples
///
/// ```rust
/// use jsondb::common::{resolve, Value};
/// use jsondb::doc;
///
/// let document = doc! { a: { b: 3 } };
/// assert_eq!(resolve(&document, "a.b"), Some(&Value::I64(3)));
/// assert_eq!(resolve(&document, "a.c"), None);
/// ```
pub fn resolve<'a>(document: &'a Document, path: &str) -> Option<&'a Value> {
    let mut segments = path.split(FIELD_SEPARATOR);
    let first = segments.next()?;
    let mut current = document.get_field(first)?;
    for segment in segments {
        current = current.as_document()?.get_field(segment)?;
    }
    Some(current)
}

/// Splits a field path into its segments, rejecting empty segments.
///
/// Returns `None` for `""`, `"a..b"`, `".a"` and `"a."`.
pub(crate) fn split_path(path: &str) -> Option<Vec<&str>> {
    let segments: Vec<&str> = path.split(FIELD_SEPARATOR).collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        None
    } else {
        Some(segments)
    }
}
