use super::{new_id, Document};
use crate::common::{Value, DOC_ID};
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use crate::index::IndexManager;
use std::collections::HashMap;

/// An in-memory collection of documents together with its indexes.
///
/// `Collection` is the query, index and aggregation engine. It never touches
/// storage: it is given an already loaded snapshot of documents and callers
/// persist its state themselves (see [super::JsonCollection]).
///
/// Documents are kept in insertion order and are unique by `_id`. Every write
/// bumps a generation counter; an index built at an older generation is
/// rebuilt before it is used again.
///
/// ```rust
/// use jsondb::collection::Collection;
/// use jsondb::doc;
///
/// let mut users = Collection::new("users");
/// users.insert_one(doc! { name: "Alice", age: 30 }).unwrap();
/// users.insert_one(doc! { name: "Bob", age: 20 }).unwrap();
/// users.create_index("name").unwrap();
///
/// let found = users.find(doc! { name: "Alice" }).unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!(users.aggregate("age", "sum").unwrap(), Some(50.into()));
/// ```
#[derive(Clone, Debug)]
pub struct Collection {
    pub(crate) name: String,
    pub(crate) documents: Vec<Document>,
    /// `_id` -> position in `documents`
    pub(crate) positions: HashMap<String, usize>,
    pub(crate) generation: u64,
    pub(crate) indexes: IndexManager,
}

impl Collection {
    /// Creates an empty collection.
    pub fn new(name: &str) -> Self {
        Collection {
            name: name.to_string(),
            documents: Vec::new(),
            positions: HashMap::new(),
            generation: 0,
            indexes: IndexManager::new(),
        }
    }

    /// Creates a collection from an existing snapshot of documents.
    ///
    /// A document without `_id` is given a new one.
    ///
    /// # Errors
    ///
    /// * [ErrorKind::InvalidId] if a document has a non-string `_id`
    /// * [ErrorKind::UniqueConstraintViolation] if two documents share an `_id`
    pub fn with_documents(name: &str, documents: Vec<Document>) -> JsonDbResult<Self> {
        let mut collection = Collection::new(name);
        for mut document in documents {
            if !document.has_id() {
                let id = new_id();
                log::warn!(
                    "Document without _id found in collection '{}', assigned {}",
                    name,
                    id
                );
                document.put(DOC_ID, id)?;
            }
            let id = collection.validate_new_id(&document)?;
            collection.positions.insert(id, collection.documents.len());
            collection.documents.push(document);
        }
        Ok(collection)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// All documents in collection order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The write generation; it changes on every insert, update and delete.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the document with the given `_id`.
    pub fn get_by_id(&self, id: &str) -> Option<&Document> {
        self.positions.get(id).map(|position| &self.documents[*position])
    }

    /// Moves to the next generation and returns the previous one.
    pub(crate) fn bump_generation(&mut self) -> u64 {
        let previous = self.generation;
        self.generation = self.generation.wrapping_add(1);
        previous
    }

    pub(crate) fn rebuild_positions(&mut self) {
        self.positions = self
            .documents
            .iter()
            .enumerate()
            .filter_map(|(position, document)| document.id().map(|id| (id.to_string(), position)))
            .collect();
    }

    /// Checks the `_id` of a document about to be added and returns it.
    pub(crate) fn validate_new_id(&self, document: &Document) -> JsonDbResult<String> {
        let id = match document.get_field(DOC_ID) {
            Some(Value::String(id)) => id,
            Some(other) => {
                log::error!("Document id must be a string, found {}", other.type_name());
                return Err(JsonDbError::new(
                    &format!("Document id must be a string, found {}", other.type_name()),
                    ErrorKind::InvalidId,
                ));
            }
            None => {
                log::error!("Document has no id");
                return Err(JsonDbError::new("Document has no id", ErrorKind::InvalidId));
            }
        };

        if self.positions.contains_key(id) {
            log::error!(
                "A document with id {} already exists in collection '{}'",
                id,
                self.name
            );
            return Err(JsonDbError::new(
                &format!("A document with id {} already exists in collection '{}'", id, self.name),
                ErrorKind::UniqueConstraintViolation,
            ));
        }
        Ok(id.clone())
    }
}
