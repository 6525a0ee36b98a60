//! Single-field equality indexes.
//!
//! An index maps the value found at one field path to the ids of the
//! documents holding it. Indexes are derived data: they can always be rebuilt
//! from the documents, and each one carries the collection generation it was
//! built at so that a stale index is rebuilt before it is consulted.

mod field_index;
mod index_manager;
mod persisted_index;

pub use field_index::*;
pub use index_manager::*;
pub use persisted_index::*;
