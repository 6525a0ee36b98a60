use crate::errors::JsonDbError;
use crate::{errors::JsonDbResult, jsondb::JsonDb, jsondb_config::JsonDbConfig};
use std::path::Path;

/// Builder for opening a [JsonDb].
///
/// Errors raised by a setter are remembered and returned from [open], so the
/// chain can be written without checking each step.
///
/// ```rust
/// use jsondb::jsondb::JsonDb;
///
/// let db = JsonDb::builder().in_memory().open().unwrap();
/// assert!(db.list_collections().unwrap().is_empty());
/// ```
///
/// [open]: JsonDbBuilder::open
#[derive(Default)]
pub struct JsonDbBuilder {
    error: Option<JsonDbError>,
    config: JsonDbConfig,
}

impl JsonDbBuilder {
    pub fn new() -> Self {
        JsonDbBuilder {
            error: None,
            config: JsonDbConfig::new(),
        }
    }

    /// Stores collections as JSON files in this directory.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_db_path(path) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Keeps everything in memory. This is the default when no path is given,
    /// and overrides a path given earlier in the chain.
    pub fn in_memory(mut self) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_in_memory() {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn pretty_print(mut self, pretty_print: bool) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_pretty_print(pretty_print) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn create_if_missing(mut self, create_if_missing: bool) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_create_if_missing(create_if_missing) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn open(self) -> JsonDbResult<JsonDb> {
        if let Some(error) = self.error {
            return Err(error);
        }
        JsonDb::new(self.config)
    }
}
