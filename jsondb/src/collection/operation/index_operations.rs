use crate::collection::Collection;
use crate::errors::JsonDbResult;
use crate::index::PersistedIndex;

impl Collection {
    /// Creates a single-field index over `field`, a dotted path. Creating an
    /// index that already exists rebuilds it.
    pub fn create_index(&mut self, field: &str) -> JsonDbResult<()> {
        self.indexes
            .create_index(field, &self.documents, self.generation)
    }

    /// # Errors
    ///
    /// [crate::errors::ErrorKind::IndexNotFound] if `field` is not indexed.
    pub fn drop_index(&mut self, field: &str) -> JsonDbResult<()> {
        self.indexes.drop_index(field)
    }

    pub fn has_index(&self, field: &str) -> bool {
        self.indexes.has_index(field)
    }

    pub fn indexed_fields(&self) -> Vec<String> {
        self.indexes.fields()
    }

    /// Rebuilds every index from the documents.
    pub fn rebuild_indexes(&mut self) {
        self.indexes.rebuild_all(&self.documents, self.generation);
    }

    /// Installs indexes loaded from storage. They stay stale until first used.
    pub fn restore_indexes(&mut self, persisted: Vec<PersistedIndex>) {
        self.indexes.restore(persisted);
    }

    /// Brings stale indexes up to date and returns their storable form.
    pub fn index_snapshot(&mut self) -> Vec<PersistedIndex> {
        self.indexes.refresh_all(&self.documents, self.generation);
        self.indexes.snapshot()
    }
}
