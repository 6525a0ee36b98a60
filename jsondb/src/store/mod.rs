//! Storage backends for collection snapshots.
//!
//! The engine never performs I/O itself. A [CollectionStore] loads a
//! collection's documents and index buckets when the collection is opened and
//! saves them again after every write.
//!
//! - [JsonFileStore]: `<name>.json` and `<name>.index.json` files in a directory
//! - [InMemoryStore]: process-local, used by in-memory databases and tests

mod collection_store;
mod file;
mod memory;

pub use collection_store::*;
pub use file::*;
pub use memory::*;
