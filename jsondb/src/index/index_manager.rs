use super::{FieldIndex, PersistedIndex};
use crate::collection::Document;
use crate::common::{split_path, Value};
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use indexmap::IndexMap;

/// Owns the single-field indexes of one collection.
///
/// The manager never decides on its own when an index is out of date; the
/// caller passes the current collection generation and the manager rebuilds
/// any index stamped with a different one.
#[derive(Clone, Debug, Default)]
pub struct IndexManager {
    indexes: IndexMap<String, FieldIndex>,
}

impl IndexManager {
    pub fn new() -> Self {
        IndexManager::default()
    }

    /// Builds an index over `field` with one scan of the documents. An
    /// existing index on the same field is rebuilt.
    pub fn create_index(
        &mut self,
        field: &str,
        documents: &[Document],
        generation: u64,
    ) -> JsonDbResult<()> {
        if split_path(field).is_none() {
            log::error!("Cannot create index on invalid field path '{}'", field);
            return Err(JsonDbError::new(
                &format!("Cannot create index on invalid field path '{}'", field),
                ErrorKind::InvalidFieldName,
            ));
        }

        let mut index = FieldIndex::new(field);
        index.build(documents, generation);
        log::debug!(
            "Built index on '{}' with {} distinct values",
            field,
            index.bucket_count()
        );
        self.indexes.insert(field.to_string(), index);
        Ok(())
    }

    pub fn drop_index(&mut self, field: &str) -> JsonDbResult<()> {
        match self.indexes.shift_remove(field) {
            Some(_) => Ok(()),
            None => {
                log::error!("No index found on field '{}'", field);
                Err(JsonDbError::new(
                    &format!("No index found on field '{}'", field),
                    ErrorKind::IndexNotFound,
                ))
            }
        }
    }

    pub fn has_index(&self, field: &str) -> bool {
        self.indexes.contains_key(field)
    }

    /// Indexed field paths in creation order.
    pub fn fields(&self) -> Vec<String> {
        self.indexes.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&FieldIndex> {
        self.indexes.get(field)
    }

    /// Rebuilds the index on `field` if it was built at another generation.
    /// Returns `true` if a rebuild happened.
    pub fn ensure_current(&mut self, field: &str, documents: &[Document], generation: u64) -> bool {
        match self.indexes.get_mut(field) {
            Some(index) if !index.is_current(generation) => {
                log::debug!(
                    "Rebuilding stale index on '{}' (built at {:?}, collection at {})",
                    field,
                    index.generation(),
                    generation
                );
                index.build(documents, generation);
                true
            }
            _ => false,
        }
    }

    /// Rebuilds every stale index.
    pub fn refresh_all(&mut self, documents: &[Document], generation: u64) {
        for index in self.indexes.values_mut() {
            if !index.is_current(generation) {
                log::debug!("Rebuilding stale index on '{}'", index.field());
                index.build(documents, generation);
            }
        }
    }

    /// Rebuilds every index unconditionally.
    pub fn rebuild_all(&mut self, documents: &[Document], generation: u64) {
        for index in self.indexes.values_mut() {
            index.build(documents, generation);
        }
    }

    /// Ids whose value at `field` equals `value`. Empty when the field is not
    /// indexed or no document holds the value.
    pub fn lookup<'a>(&'a self, field: &str, value: &Value) -> impl Iterator<Item = &'a str> + 'a {
        self.indexes
            .get(field)
            .and_then(|index| index.lookup(value))
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Applies a freshly inserted document to the indexes that were current
    /// before the insert, moving them to the new generation. Stale indexes are
    /// left for the next rebuild.
    pub fn on_insert(&mut self, document: &Document, previous_generation: u64, generation: u64) {
        for index in self.indexes.values_mut() {
            if index.is_current(previous_generation) {
                index.add(document);
                index.stamp(generation);
            }
        }
    }

    /// Replaces all indexes with ones restored from storage. Restored indexes
    /// are stale until rebuilt.
    pub fn restore(&mut self, persisted: Vec<PersistedIndex>) {
        self.indexes = persisted
            .into_iter()
            .map(|index| (index.field.clone(), FieldIndex::from_persisted(index)))
            .collect();
    }

    pub fn snapshot(&self) -> Vec<PersistedIndex> {
        self.indexes.values().map(FieldIndex::to_persisted).collect()
    }
}
