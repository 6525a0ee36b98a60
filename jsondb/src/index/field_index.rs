use super::{IndexBucket, PersistedIndex};
use crate::collection::Document;
use crate::common::{resolve, Value};
use indexmap::{IndexMap, IndexSet};

/// A single-field equality index.
///
/// Maps each value found at the field path to the ids of the documents holding
/// it. Documents where the path does not resolve are left out of every bucket.
/// Buckets are keyed by [Value] itself, so numerically equal integers and
/// floats share a bucket, exactly as they compare equal during a scan.
///
/// The index records the collection generation it was built at. `None` means
/// it has never been built against the current documents (for example, it was
/// restored from disk).
#[derive(Clone, Debug)]
pub struct FieldIndex {
    field: String,
    buckets: IndexMap<Value, IndexSet<String>>,
    generation: Option<u64>,
}

impl FieldIndex {
    pub fn new(field: impl Into<String>) -> Self {
        FieldIndex {
            field: field.into(),
            buckets: IndexMap::new(),
            generation: None,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    /// Whether the index was built at the given collection generation.
    #[inline]
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == Some(generation)
    }

    /// Rebuilds all buckets with one scan over the documents.
    pub fn build(&mut self, documents: &[Document], generation: u64) {
        self.buckets.clear();
        for document in documents {
            self.add(document);
        }
        self.generation = Some(generation);
    }

    /// Adds one document to the bucket of its field value, if it has one.
    pub fn add(&mut self, document: &Document) {
        let (Some(value), Some(id)) = (resolve(document, &self.field), document.id()) else {
            return;
        };
        self.buckets
            .entry(value.clone())
            .or_default()
            .insert(id.to_string());
    }

    pub(crate) fn stamp(&mut self, generation: u64) {
        self.generation = Some(generation);
    }

    /// Ids of the documents whose field equals `value`.
    pub fn lookup(&self, value: &Value) -> Option<&IndexSet<String>> {
        self.buckets.get(value)
    }

    /// Number of distinct values in the index.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn to_persisted(&self) -> PersistedIndex {
        let buckets = self
            .buckets
            .iter()
            .map(|(value, ids)| IndexBucket {
                value: value.clone(),
                ids: ids.iter().cloned().collect(),
            })
            .collect();
        PersistedIndex::new(self.field.clone(), buckets)
    }

    pub fn from_persisted(persisted: PersistedIndex) -> Self {
        let buckets = persisted
            .buckets
            .into_iter()
            .map(|bucket| (bucket.value, bucket.ids.into_iter().collect()))
            .collect();
        FieldIndex {
            field: persisted.field,
            buckets,
            generation: None,
        }
    }
}
