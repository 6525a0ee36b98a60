use crate::common::Value;

/// One bucket of a persisted index: a value and the ids of the documents
/// holding it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct IndexBucket {
    pub value: Value,
    pub ids: Vec<String>,
}

/// The storable form of a single-field index.
///
/// Persisted buckets are a cache. An index restored from them is considered
/// stale and is rebuilt from the documents before it answers a lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistedIndex {
    pub field: String,
    pub buckets: Vec<IndexBucket>,
}

impl PersistedIndex {
    pub fn new(field: impl Into<String>, buckets: Vec<IndexBucket>) -> Self {
        PersistedIndex {
            field: field.into(),
            buckets,
        }
    }
}
