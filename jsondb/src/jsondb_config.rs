use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use crate::store::{CollectionStore, InMemoryStore, JsonFileStore};
use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Configuration of a [crate::jsondb::JsonDb] instance.
///
/// Settings can be changed until the database is opened; afterwards the
/// configuration is frozen and setters fail with
/// [ErrorKind::InvalidOperation]. Cloning is cheap and clones share state.
///
/// | setting | default |
/// |---|---|
/// | `db_path` | none (in-memory) |
/// | `pretty_print` | `true` |
/// | `create_if_missing` | `true` |
#[derive(Clone)]
pub struct JsonDbConfig {
    inner: Arc<JsonDbConfigInner>,
}

impl Default for JsonDbConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonDbConfig {
    pub fn new() -> Self {
        JsonDbConfig {
            inner: Arc::new(JsonDbConfigInner::new()),
        }
    }
}

impl Deref for JsonDbConfig {
    type Target = Arc<JsonDbConfigInner>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct JsonDbConfigInner {
    configured: AtomicBool,
    db_path: OnceLock<PathBuf>,
    in_memory: AtomicBool,
    pretty_print: AtomicBool,
    create_if_missing: AtomicBool,
}

impl JsonDbConfigInner {
    fn new() -> Self {
        JsonDbConfigInner {
            configured: AtomicBool::new(false),
            db_path: OnceLock::new(),
            in_memory: AtomicBool::new(false),
            pretty_print: AtomicBool::new(true),
            create_if_missing: AtomicBool::new(true),
        }
    }

    /// The storage directory, or `None` for an in-memory database.
    pub fn db_path(&self) -> Option<PathBuf> {
        self.storage_path().cloned()
    }

    pub fn is_in_memory(&self) -> bool {
        self.storage_path().is_none()
    }

    pub fn pretty_print(&self) -> bool {
        self.pretty_print.load(Ordering::Relaxed)
    }

    pub fn create_if_missing(&self) -> bool {
        self.create_if_missing.load(Ordering::Relaxed)
    }

    /// Sets the storage directory. It can be set only once.
    pub fn set_db_path(&self, path: impl AsRef<Path>) -> JsonDbResult<()> {
        self.ensure_not_configured("database path")?;
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            log::error!("Database path cannot be empty");
            return Err(JsonDbError::new(
                "Database path cannot be empty",
                ErrorKind::InvalidOperation,
            ));
        }

        self.db_path.set(path.to_path_buf()).map_err(|_| {
            log::error!("Database path is already set");
            JsonDbError::new("Database path is already set", ErrorKind::InvalidOperation)
        })?;
        self.in_memory.store(false, Ordering::Relaxed);
        Ok(())
    }

    /// Keeps the database in memory, overriding a path set earlier. A path
    /// set afterwards takes effect again.
    pub fn set_in_memory(&self) -> JsonDbResult<()> {
        self.ensure_not_configured("in-memory mode")?;
        self.in_memory.store(true, Ordering::Relaxed);
        Ok(())
    }

    pub fn set_pretty_print(&self, pretty_print: bool) -> JsonDbResult<()> {
        self.ensure_not_configured("pretty print")?;
        self.pretty_print.store(pretty_print, Ordering::Relaxed);
        Ok(())
    }

    pub fn set_create_if_missing(&self, create_if_missing: bool) -> JsonDbResult<()> {
        self.ensure_not_configured("create if missing")?;
        self.create_if_missing
            .store(create_if_missing, Ordering::Relaxed);
        Ok(())
    }

    /// Freezes the configuration and opens the store it describes, creating
    /// the storage directory if allowed.
    pub(crate) fn open_store(&self) -> JsonDbResult<CollectionStore> {
        self.configured.store(true, Ordering::Relaxed);

        let Some(path) = self.storage_path() else {
            log::debug!("Opening in-memory database");
            return Ok(CollectionStore::new(InMemoryStore::new()));
        };

        if !path.exists() {
            if !self.create_if_missing() {
                log::error!("Database directory {} does not exist", path.display());
                return Err(JsonDbError::new(
                    &format!("Database directory {} does not exist", path.display()),
                    ErrorKind::FileNotFound,
                ));
            }
            fs::create_dir_all(path).map_err(|e| {
                log::error!("Failed to create database directory {}: {}", path.display(), e);
                JsonDbError::new_with_cause(
                    &format!("Failed to create database directory {}", path.display()),
                    ErrorKind::IOError,
                    e.into(),
                )
            })?;
        } else if !path.is_dir() {
            log::error!("Database path {} is not a directory", path.display());
            return Err(JsonDbError::new(
                &format!("Database path {} is not a directory", path.display()),
                ErrorKind::InvalidOperation,
            ));
        }

        log::debug!("Opening database at {}", path.display());
        Ok(CollectionStore::new(JsonFileStore::new(
            path.clone(),
            self.pretty_print(),
        )))
    }

    fn storage_path(&self) -> Option<&PathBuf> {
        if self.in_memory.load(Ordering::Relaxed) {
            None
        } else {
            self.db_path.get()
        }
    }

    fn ensure_not_configured(&self, setting: &str) -> JsonDbResult<()> {
        if self.configured.load(Ordering::Relaxed) {
            log::error!("Cannot change {} after the database is opened", setting);
            return Err(JsonDbError::new(
                &format!("Cannot change {} after the database is opened", setting),
                ErrorKind::InvalidOperation,
            ));
        }
        Ok(())
    }
}
