use crate::collection::JsonCollection;
use crate::common::INDEX_FILE_SUFFIX;
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use crate::jsondb_builder::JsonDbBuilder;
use crate::jsondb_config::JsonDbConfig;
use crate::store::CollectionStore;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A database: a set of named collections sharing one store.
///
/// # Examples
///
/// ```rust
/// use jsondb::doc;
/// use jsondb::jsondb::JsonDb;
///
/// let db = JsonDb::builder().in_memory().open().unwrap();
/// let users = db.collection("users").unwrap();
/// users.insert_one(doc! { name: "Alice" }).unwrap();
///
/// assert!(db.has_collection("users").unwrap());
/// assert_eq!(db.list_collections().unwrap(), vec!["users"]);
/// db.close().unwrap();
/// ```
#[derive(Clone)]
pub struct JsonDb {
    inner: Arc<JsonDbInner>,
}

impl JsonDb {
    pub fn builder() -> JsonDbBuilder {
        JsonDbBuilder::new()
    }

    pub(crate) fn new(config: JsonDbConfig) -> JsonDbResult<Self> {
        let store = config.open_store()?;
        Ok(JsonDb {
            inner: Arc::new(JsonDbInner {
                config,
                store,
                collections: DashMap::new(),
                closed: AtomicBool::new(false),
            }),
        })
    }
}

impl Deref for JsonDb {
    type Target = Arc<JsonDbInner>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct JsonDbInner {
    config: JsonDbConfig,
    store: CollectionStore,
    collections: DashMap<String, JsonCollection>,
    closed: AtomicBool,
}

impl JsonDbInner {
    pub fn config(&self) -> &JsonDbConfig {
        &self.config
    }

    /// Opens the named collection, creating it if it does not exist. Every
    /// call for the same name returns a handle to the same collection.
    ///
    /// # Errors
    ///
    /// [ErrorKind::InvalidOperation] for an invalid name, and any error
    /// raised while loading the stored collection.
    pub fn collection(&self, name: &str) -> JsonDbResult<JsonCollection> {
        self.ensure_opened()?;
        validate_collection_name(name)?;

        match self.collections.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let collection = JsonCollection::open(name, self.store.clone())?;
                entry.insert(collection.clone());
                Ok(collection)
            }
        }
    }

    /// Names of all stored collections, sorted.
    pub fn list_collections(&self) -> JsonDbResult<Vec<String>> {
        self.ensure_opened()?;
        self.store.collection_names()
    }

    pub fn has_collection(&self, name: &str) -> JsonDbResult<bool> {
        self.ensure_opened()?;
        Ok(self.collections.contains_key(name) || self.store.has_collection(name)?)
    }

    /// Removes a collection with its documents and indexes. Open handles to
    /// it stop working.
    ///
    /// # Errors
    ///
    /// [ErrorKind::CollectionNotFound] if no such collection exists.
    pub fn drop_collection(&self, name: &str) -> JsonDbResult<()> {
        self.ensure_opened()?;
        let cached = self.collections.remove(name);
        if cached.is_none() && !self.store.has_collection(name)? {
            log::error!("Collection '{}' does not exist", name);
            return Err(JsonDbError::new(
                &format!("Collection '{}' does not exist", name),
                ErrorKind::CollectionNotFound,
            ));
        }

        if let Some((_, collection)) = cached {
            collection.close();
        }
        self.store.remove_collection(name)?;
        log::debug!("Dropped collection '{}'", name);
        Ok(())
    }

    /// Closes the database. Every write has already been saved, so closing
    /// only invalidates the open handles. Closing twice is a no-op.
    pub fn close(&self) -> JsonDbResult<()> {
        if self.closed.swap(true, Ordering::Relaxed) {
            return Ok(());
        }
        for entry in self.collections.iter() {
            entry.value().close();
        }
        self.collections.clear();
        log::debug!("Database closed");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }

    fn ensure_opened(&self) -> JsonDbResult<()> {
        if self.is_closed() {
            log::error!("Database is already closed");
            return Err(JsonDbError::new(
                "Database is already closed",
                ErrorKind::StoreAlreadyClosed,
            ));
        }
        Ok(())
    }
}

fn validate_collection_name(name: &str) -> JsonDbResult<()> {
    let index_stem = INDEX_FILE_SUFFIX.trim_end_matches(".json");
    let reason = if name.trim().is_empty() {
        Some("must not be empty")
    } else if name.contains(['/', '\\']) || name == "." || name == ".." {
        Some("must not contain a path separator")
    } else if name.ends_with(index_stem) {
        Some("must not end with '.index'")
    } else {
        None
    };

    match reason {
        Some(reason) => {
            log::error!("Invalid collection name '{}': {}", name, reason);
            Err(JsonDbError::new(
                &format!("Invalid collection name '{}': {}", name, reason),
                ErrorKind::InvalidOperation,
            ))
        }
        None => Ok(()),
    }
}
