use crate::collection::Document;
use crate::errors::JsonDbResult;
use crate::index::PersistedIndex;
use std::ops::Deref;
use std::sync::Arc;

/// Durable storage for collections and their index files.
///
/// A store only moves snapshots in and out; it knows nothing about filters or
/// indexes beyond their storable form. Loading a collection that was never
/// saved yields an empty snapshot rather than an error.
///
/// # Implementations
/// - [super::JsonFileStore]: one JSON file per collection in a directory
/// - [super::InMemoryStore]: a process-local map, for tests and scratch data
///
/// Implementers must be `Send + Sync`; every [CollectionStore] clone shares
/// the same provider.
pub trait CollectionStoreProvider: Send + Sync {
    /// Names of all stored collections, sorted.
    fn collection_names(&self) -> JsonDbResult<Vec<String>>;

    fn has_collection(&self, name: &str) -> JsonDbResult<bool>;

    fn load_collection(&self, name: &str) -> JsonDbResult<Vec<Document>>;

    /// Replaces the stored documents of a collection.
    fn save_collection(&self, name: &str, documents: &[Document]) -> JsonDbResult<()>;

    fn load_indexes(&self, name: &str) -> JsonDbResult<Vec<PersistedIndex>>;

    /// Replaces the stored indexes of a collection.
    fn save_indexes(&self, name: &str, indexes: &[PersistedIndex]) -> JsonDbResult<()>;

    /// Removes the documents and indexes of a collection. Removing a
    /// collection that does not exist is not an error.
    fn remove_collection(&self, name: &str) -> JsonDbResult<()>;
}

/// Cheaply cloneable handle to a [CollectionStoreProvider].
#[derive(Clone)]
pub struct CollectionStore {
    inner: Arc<dyn CollectionStoreProvider>,
}

impl CollectionStore {
    pub fn new<T: CollectionStoreProvider + 'static>(inner: T) -> Self {
        CollectionStore {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for CollectionStore {
    type Target = Arc<dyn CollectionStoreProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
