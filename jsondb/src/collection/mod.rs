//! Documents and collections.
//!
//! A [Document] is an insertion-ordered map from field name to
//! [crate::common::Value]. Nested documents are addressed with dotted paths.
//!
//! A [Collection] is the in-memory engine: an ordered set of documents unique
//! by `_id`, its single-field indexes, and the find / update / delete /
//! aggregate operations over them. A [JsonCollection] is the shared handle a
//! database hands out; it serializes access to one `Collection` and saves
//! every write through the store.
//!
//! ```rust
//! use jsondb::doc;
//! use jsondb::jsondb::JsonDb;
//!
//! let db = JsonDb::builder().open().unwrap();
//! let users = db.collection("users").unwrap();
//!
//! users.insert_one(doc! { name: "Alice", address: { city: "London" } }).unwrap();
//! users.update(doc! { name: "Alice" }, &doc! { "address.city": "Paris" }).unwrap();
//!
//! let alice = users.find_one(doc! { "address.city": "Paris" }).unwrap();
//! assert!(alice.is_some());
//! ```
//!
//! # Document IDs
//!
//! Each stored document has a string `_id`. It is a random UUID unless the
//! caller supplied one, and it never changes.

mod collection;
mod document;
mod document_id;
mod find_plan;
mod json_collection;
mod operation;

pub use collection::*;
pub use document::*;
pub use document_id::*;
pub use find_plan::*;
pub use json_collection::*;
