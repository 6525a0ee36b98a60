use super::CollectionStoreProvider;
use crate::collection::Document;
use crate::errors::JsonDbResult;
use crate::index::PersistedIndex;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Clone, Default)]
struct StoredCollection {
    documents: Vec<Document>,
    indexes: Vec<PersistedIndex>,
}

/// A store that keeps collection snapshots in process memory.
///
/// Nothing survives the process, but the snapshots go through the same
/// save/load cycle as the file store.
#[derive(Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, StoredCollection>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore::default()
    }
}

impl CollectionStoreProvider for InMemoryStore {
    fn collection_names(&self) -> JsonDbResult<Vec<String>> {
        let mut names: Vec<String> = self.collections.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn has_collection(&self, name: &str) -> JsonDbResult<bool> {
        Ok(self.collections.read().contains_key(name))
    }

    fn load_collection(&self, name: &str) -> JsonDbResult<Vec<Document>> {
        Ok(self
            .collections
            .read()
            .get(name)
            .map(|stored| stored.documents.clone())
            .unwrap_or_default())
    }

    fn save_collection(&self, name: &str, documents: &[Document]) -> JsonDbResult<()> {
        self.collections
            .write()
            .entry(name.to_string())
            .or_default()
            .documents = documents.to_vec();
        Ok(())
    }

    fn load_indexes(&self, name: &str) -> JsonDbResult<Vec<PersistedIndex>> {
        Ok(self
            .collections
            .read()
            .get(name)
            .map(|stored| stored.indexes.clone())
            .unwrap_or_default())
    }

    /// Indexes are only kept alongside a saved collection.
    fn save_indexes(&self, name: &str, indexes: &[PersistedIndex]) -> JsonDbResult<()> {
        if let Some(stored) = self.collections.write().get_mut(name) {
            stored.indexes = indexes.to_vec();
        }
        Ok(())
    }

    fn remove_collection(&self, name: &str) -> JsonDbResult<()> {
        self.collections.write().remove(name);
        Ok(())
    }
}
