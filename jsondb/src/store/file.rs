use super::CollectionStoreProvider;
use crate::collection::Document;
use crate::common::{COLLECTION_FILE_EXTENSION, INDEX_FILE_SUFFIX, TEMP_FILE_SUFFIX};
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use crate::index::{IndexBucket, PersistedIndex};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The per-field entry of an index file.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredIndex {
    Buckets(Vec<IndexBucket>),
    /// `{ "<value as text>": [ids] }`, as written by older versions
    ValueMap(IndexMap<String, Vec<String>>),
}

impl StoredIndex {
    fn into_buckets(self) -> Vec<IndexBucket> {
        match self {
            StoredIndex::Buckets(buckets) => buckets,
            StoredIndex::ValueMap(map) => map
                .into_iter()
                .map(|(value, ids)| IndexBucket {
                    value: value.into(),
                    ids,
                })
                .collect(),
        }
    }
}

/// Stores each collection as a pair of JSON files in one directory:
///
/// * `<name>.json`: an array of the collection's documents
/// * `<name>.index.json`: `{ "<field>": [ { "value": v, "ids": [..] }, .. ] }`
///
/// Files are written to a temporary sibling and renamed into place, so a
/// crash mid-write leaves the previous snapshot intact.
pub struct JsonFileStore {
    directory: PathBuf,
    pretty_print: bool,
}

impl JsonFileStore {
    /// Creates a store over an existing directory.
    pub fn new(directory: impl Into<PathBuf>, pretty_print: bool) -> Self {
        JsonFileStore {
            directory: directory.into(),
            pretty_print,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn collection_path(&self, name: &str) -> PathBuf {
        self.directory
            .join(format!("{}.{}", name, COLLECTION_FILE_EXTENSION))
    }

    pub fn index_path(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{}{}", name, INDEX_FILE_SUFFIX))
    }

    fn read_json<T: DeserializeOwned + Default>(&self, path: &Path) -> JsonDbResult<T> {
        if !path.exists() {
            return Ok(T::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            log::error!("Failed to read {}: {}", path.display(), e);
            JsonDbError::new_with_cause(
                &format!("Failed to read {}", path.display()),
                ErrorKind::IOError,
                e.into(),
            )
        })?;

        if contents.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&contents).map_err(|e| {
            log::error!("Failed to decode {}: {}", path.display(), e);
            JsonDbError::new_with_cause(
                &format!("Failed to decode {}", path.display()),
                ErrorKind::EncodingError,
                e.into(),
            )
        })
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> JsonDbResult<()> {
        let contents = if self.pretty_print {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        let mut temp = path.as_os_str().to_owned();
        temp.push(TEMP_FILE_SUFFIX);
        let temp = PathBuf::from(temp);

        fs::write(&temp, contents)
            .and_then(|_| fs::rename(&temp, path))
            .map_err(|e| {
                log::error!("Failed to write {}: {}", path.display(), e);
                let _ = fs::remove_file(&temp);
                JsonDbError::new_with_cause(
                    &format!("Failed to write {}", path.display()),
                    ErrorKind::IOError,
                    e.into(),
                )
            })
    }

    fn remove_file(path: &Path) -> JsonDbResult<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                log::error!("Failed to remove {}: {}", path.display(), e);
                Err(e.into())
            }
        }
    }
}

impl CollectionStoreProvider for JsonFileStore {
    fn collection_names(&self) -> JsonDbResult<Vec<String>> {
        let suffix = format!(".{}", COLLECTION_FILE_EXTENSION);
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.directory)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if file_name.ends_with(INDEX_FILE_SUFFIX) {
                continue;
            }
            if let Some(name) = file_name.strip_suffix(&suffix) {
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn has_collection(&self, name: &str) -> JsonDbResult<bool> {
        Ok(self.collection_path(name).is_file())
    }

    fn load_collection(&self, name: &str) -> JsonDbResult<Vec<Document>> {
        self.read_json(&self.collection_path(name))
    }

    fn save_collection(&self, name: &str, documents: &[Document]) -> JsonDbResult<()> {
        self.write_json(&self.collection_path(name), documents)
    }

    /// An index file that cannot be decoded is ignored; the indexes it named
    /// are lost and have to be created again.
    fn load_indexes(&self, name: &str) -> JsonDbResult<Vec<PersistedIndex>> {
        let path = self.index_path(name);
        let stored: IndexMap<String, StoredIndex> = match self.read_json(&path) {
            Ok(stored) => stored,
            Err(e) if e.kind() == &ErrorKind::EncodingError => {
                log::warn!("Ignoring unreadable index file {}: {}", path.display(), e);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        Ok(stored
            .into_iter()
            .map(|(field, index)| PersistedIndex::new(field, index.into_buckets()))
            .collect())
    }

    fn save_indexes(&self, name: &str, indexes: &[PersistedIndex]) -> JsonDbResult<()> {
        let stored: IndexMap<&str, &Vec<IndexBucket>> = indexes
            .iter()
            .map(|index| (index.field.as_str(), &index.buckets))
            .collect();
        self.write_json(&self.index_path(name), &stored)
    }

    fn remove_collection(&self, name: &str) -> JsonDbResult<()> {
        Self::remove_file(&self.collection_path(name))?;
        Self::remove_file(&self.index_path(name))
    }
}
