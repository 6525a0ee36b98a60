use crate::common::{resolve, split_path, Value, DOC_ID};
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use indexmap::IndexMap;
use itertools::Itertools;
use std::borrow::Cow;
use std::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};

/// Represents a schema-less JSON document.
///
/// A document is an insertion-ordered mapping from field name to [Value].
/// Nested documents are addressed with dotted paths: for `{"a": {"b": 1}}`,
/// `document.get("a.b")` returns `1`.
///
/// The `_id` field is reserved. It always holds a string once the document has
/// been stored in a collection, and it never changes afterwards.
///
/// Two documents are equal when they hold the same fields with equal values,
/// whatever the field order.
#[derive(Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Document {
    data: IndexMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: IndexMap::new(),
        }
    }

    /// Parses a document from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::EncodingError] if the text is not valid JSON or is
    /// not an object.
    pub fn from_json(json: &str) -> JsonDbResult<Document> {
        let value: Value = serde_json::from_str(json)?;
        match value {
            Value::Document(document) => Ok(document),
            other => {
                log::error!("Expected a JSON object, found {}", other.type_name());
                Err(JsonDbError::new(
                    &format!("Expected a JSON object, found {}", other.type_name()),
                    ErrorKind::EncodingError,
                ))
            }
        }
    }

    /// Serializes the document as compact JSON.
    pub fn to_json(&self) -> JsonDbResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the document as indented JSON.
    pub fn to_pretty_json(&self) -> JsonDbResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates `value` with the top-level field `key`.
    ///
    /// The key is stored verbatim; a dot in the key does not create nested
    /// documents. Use [Document::put_path] for that.
    ///
    /// # Errors
    ///
    /// * [ErrorKind::InvalidFieldName] if the key is empty
    /// * [ErrorKind::InvalidId] if the key is `_id` and the value is not a string
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsondb::collection::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.put("name", "Alice").unwrap();
    /// doc.put("age", 30).unwrap();
    /// assert_eq!(doc.size(), 2);
    /// assert!(doc.put("_id", 1).is_err());
    /// ```
    pub fn put<'a, T: Into<Value>>(&mut self, key: impl Into<Cow<'a, str>>, value: T) -> JsonDbResult<()> {
        let key = key.into();
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(JsonDbError::new(
                "Document does not support empty key",
                ErrorKind::InvalidFieldName,
            ));
        }

        let value = value.into();
        if key == DOC_ID && !value.is_string() {
            log::error!("Document id must be a string, found {}", value.type_name());
            return Err(JsonDbError::new(
                &format!("Document id must be a string, found {}", value.type_name()),
                ErrorKind::InvalidId,
            ));
        }

        self.data.insert(key.into_owned(), value);
        Ok(())
    }

    /// Writes `value` at a dotted path, creating intermediate documents as
    /// needed. A non-document value sitting on the path is replaced by a
    /// document.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsondb::collection::Document;
    /// use jsondb::common::Value;
    ///
    /// let mut doc = Document::new();
    /// doc.put_path("address.city", "Paris").unwrap();
    /// assert_eq!(doc.get("address.city"), Some(&Value::from("Paris")));
    /// ```
    pub fn put_path<T: Into<Value>>(&mut self, path: &str, value: T) -> JsonDbResult<()> {
        let segments = split_path(path).ok_or_else(|| {
            log::error!("Invalid field path '{}'", path);
            JsonDbError::new(
                &format!("Invalid field path '{}'", path),
                ErrorKind::InvalidFieldName,
            )
        })?;

        if segments.len() == 1 {
            return self.put(path, value);
        }
        self.deep_put(&segments, value.into());
        Ok(())
    }

    /// Returns the value at a dotted path, or `None` if the path does not
    /// resolve. See [crate::common::resolve].
    pub fn get(&self, path: &str) -> Option<&Value> {
        resolve(self, path)
    }

    /// Returns the value of a top-level field. The key is not split on dots.
    pub fn get_field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Returns the `_id` of the document, if it has a string one.
    pub fn id(&self) -> Option<&str> {
        self.data.get(DOC_ID).and_then(|id| id.as_str())
    }

    pub fn has_id(&self) -> bool {
        self.data.contains_key(DOC_ID)
    }

    /// Removes a top-level field, keeping the order of the remaining fields.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Checks whether a dotted path resolves, even to `null`.
    pub fn contains_field(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Top-level field names in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    fn deep_put(&mut self, segments: &[&str], value: Value) {
        match segments {
            [] => {}
            [last] => {
                self.data.insert(last.to_string(), value);
            }
            [head, rest @ ..] => {
                let entry = self
                    .data
                    .entry(head.to_string())
                    .or_insert_with(|| Value::Document(Document::new()));
                match entry {
                    Value::Document(nested) => nested.deep_put(rest, value),
                    other => {
                        let mut nested = Document::new();
                        nested.deep_put(rest, value);
                        *other = Value::Document(nested);
                    }
                }
            }
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality ignores insertion order
        self.data == other.data
    }
}

impl Eq for Document {}

impl Hash for Document {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.data.len());
        for (key, value) in self.data.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = self.to_json().map_err(|_| std::fmt::Error)?;
        write!(f, "{}", json)
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Document] with JSON-like syntax.
///
/// Keys may be identifiers or string literals (needed for `$`-operators and
/// `_id`). Negative numbers and other compound expressions go in parentheses.
///
/// # Examples
///
/// ```rust
/// use jsondb::doc;
///
/// let empty = doc!{};
/// assert!(empty.is_empty());
///
/// let filter = doc!{ age: { "$gt": 25, "$lt": 40 } };
/// let person = doc!{
///     name: "Alice",
///     age: 30,
///     balance: (-12.5),
///     address: { city: "London" },
///     tags: ["admin", "user"]
/// };
/// assert_eq!(person.size(), 5);
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document (with braces)
    ({}) => {
        $crate::collection::Document::new()
    };

    // match an empty document
    () => {
        $crate::collection::Document::new()
    };

    // match a document with key value pairs (with outer braces)
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    // match a document with key value pairs
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put($crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
#[macro_export]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, function call, parenthesized arithmetic, literals)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
