use super::{Collection, Document};
use crate::aggregate::GroupResult;
use crate::common::Value;
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use crate::filter::IntoFilter;
use crate::store::CollectionStore;
use parking_lot::Mutex;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared handle to a stored collection.
///
/// All access to the collection goes through one lock, so index rebuilds and
/// writes never interleave. Every write is saved through the store before the
/// call returns: the documents first, then the index buckets.
///
/// Handles are obtained from [crate::jsondb::JsonDb::collection]. They stop
/// working once the collection is dropped or the database is closed.
///
/// ```rust
/// use jsondb::doc;
/// use jsondb::jsondb::JsonDb;
///
/// let db = JsonDb::builder().open().unwrap();
/// let people = db.collection("people").unwrap();
/// people.insert_one(doc! { name: "Alice", age: 30 }).unwrap();
/// people.insert_one(doc! { name: "Bob", age: 20 }).unwrap();
/// people.create_index("name").unwrap();
///
/// assert_eq!(people.find(doc! { name: "Alice" }).unwrap().len(), 1);
/// assert_eq!(people.aggregate("age", "avg").unwrap(), Some(25.0.into()));
/// ```
#[derive(Clone)]
pub struct JsonCollection {
    inner: Arc<JsonCollectionInner>,
}

impl JsonCollection {
    /// Loads a collection and its indexes from the store, creating an empty
    /// stored collection if none exists.
    pub(crate) fn open(name: &str, store: CollectionStore) -> JsonDbResult<Self> {
        let exists = store.has_collection(name)?;
        let documents = store.load_collection(name)?;
        let mut collection = Collection::with_documents(name, documents)?;
        collection.restore_indexes(store.load_indexes(name)?);

        if !exists {
            store.save_collection(name, collection.documents())?;
        }
        log::debug!(
            "Opened collection '{}' with {} document(s) and {} index(es)",
            name,
            collection.len(),
            collection.indexed_fields().len()
        );

        Ok(JsonCollection {
            inner: Arc::new(JsonCollectionInner {
                name: name.to_string(),
                collection: Mutex::new(collection),
                store,
                open: AtomicBool::new(true),
            }),
        })
    }
}

impl Deref for JsonCollection {
    type Target = Arc<JsonCollectionInner>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct JsonCollectionInner {
    name: String,
    collection: Mutex<Collection>,
    store: CollectionStore,
    open: AtomicBool,
}

impl JsonCollectionInner {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Relaxed)
    }

    pub fn insert_one(&self, document: Document) -> JsonDbResult<String> {
        self.ensure_opened()?;
        let mut collection = self.collection.lock();
        let id = collection.insert_one(document)?;
        self.persist(&mut collection)?;
        Ok(id)
    }

    pub fn find<F: IntoFilter>(&self, filter: F) -> JsonDbResult<Vec<Document>> {
        self.ensure_opened()?;
        self.collection.lock().find(filter)
    }

    pub fn find_one<F: IntoFilter>(&self, filter: F) -> JsonDbResult<Option<Document>> {
        self.ensure_opened()?;
        self.collection.lock().find_one(filter)
    }

    /// See [Collection::update].
    pub fn update<F: IntoFilter>(&self, filter: F, patch: &Document) -> JsonDbResult<usize> {
        self.ensure_opened()?;
        let mut collection = self.collection.lock();
        let updated = collection.update(filter, patch)?;
        if updated > 0 {
            self.persist(&mut collection)?;
        }
        Ok(updated)
    }

    pub fn delete<F: IntoFilter>(&self, filter: F) -> JsonDbResult<usize> {
        self.ensure_opened()?;
        let mut collection = self.collection.lock();
        let deleted = collection.delete(filter)?;
        if deleted > 0 {
            self.persist(&mut collection)?;
        }
        Ok(deleted)
    }

    pub fn count(&self) -> JsonDbResult<usize> {
        self.ensure_opened()?;
        Ok(self.collection.lock().len())
    }

    pub fn create_index(&self, field: &str) -> JsonDbResult<()> {
        self.ensure_opened()?;
        let mut collection = self.collection.lock();
        collection.create_index(field)?;
        self.persist_indexes(&mut collection)
    }

    pub fn drop_index(&self, field: &str) -> JsonDbResult<()> {
        self.ensure_opened()?;
        let mut collection = self.collection.lock();
        collection.drop_index(field)?;
        self.persist_indexes(&mut collection)
    }

    pub fn has_index(&self, field: &str) -> JsonDbResult<bool> {
        self.ensure_opened()?;
        Ok(self.collection.lock().has_index(field))
    }

    pub fn indexed_fields(&self) -> JsonDbResult<Vec<String>> {
        self.ensure_opened()?;
        Ok(self.collection.lock().indexed_fields())
    }

    pub fn rebuild_indexes(&self) -> JsonDbResult<()> {
        self.ensure_opened()?;
        let mut collection = self.collection.lock();
        collection.rebuild_indexes();
        self.persist_indexes(&mut collection)
    }

    pub fn group_by(&self, field: &str) -> JsonDbResult<GroupResult> {
        self.ensure_opened()?;
        Ok(self.collection.lock().group_by(field))
    }

    /// See [Collection::aggregate].
    pub fn aggregate(&self, field: &str, op: &str) -> JsonDbResult<Option<Value>> {
        self.ensure_opened()?;
        self.collection.lock().aggregate(field, op)
    }

    pub(crate) fn close(&self) {
        self.open.store(false, Ordering::Relaxed);
    }

    fn persist(&self, collection: &mut Collection) -> JsonDbResult<()> {
        self.store
            .save_collection(&self.name, collection.documents())
            .map_err(|e| {
                log::error!("Failed to save collection '{}': {}", self.name, e);
                JsonDbError::new_with_cause(
                    &format!("Failed to save collection '{}'", self.name),
                    e.kind().clone(),
                    e,
                )
            })?;
        self.persist_indexes(collection)
    }

    fn persist_indexes(&self, collection: &mut Collection) -> JsonDbResult<()> {
        let snapshot = collection.index_snapshot();
        self.store.save_indexes(&self.name, &snapshot).map_err(|e| {
            log::error!("Failed to save indexes of collection '{}': {}", self.name, e);
            JsonDbError::new_with_cause(
                &format!("Failed to save indexes of collection '{}'", self.name),
                e.kind().clone(),
                e,
            )
        })
    }

    fn ensure_opened(&self) -> JsonDbResult<()> {
        if !self.is_open() {
            log::error!("Collection '{}' is closed or dropped", self.name);
            return Err(JsonDbError::new(
                &format!("Collection '{}' is closed or dropped", self.name),
                ErrorKind::CollectionNotFound,
            ));
        }
        Ok(())
    }
}
