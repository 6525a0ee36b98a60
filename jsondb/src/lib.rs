//! # jsondb - a file-backed JSON document store
//!
//! jsondb keeps schema-less JSON documents in named collections, one JSON
//! file per collection. Documents are queried with MongoDB-style filters over
//! nested fields, equality lookups can be served from single-field indexes,
//! and collections can be grouped and aggregated.
//!
//! ## Quick Start
//!
//! ```rust
//! use jsondb::doc;
//! use jsondb::jsondb::JsonDb;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // in-memory here; use `.path(dir)` to store files
//! let db = JsonDb::builder().open()?;
//! let people = db.collection("people")?;
//!
//! people.insert_one(doc! { name: "Alice", age: 30, address: { city: "London" } })?;
//! people.insert_one(doc! { name: "Bob", age: 20, address: { city: "Paris" } })?;
//! people.create_index("name")?;
//!
//! let adults = people.find(doc! { age: { "$gte": 21 } })?;
//! assert_eq!(adults.len(), 1);
//!
//! let by_city = people.group_by("address.city")?;
//! assert_eq!(by_city.len(), 2);
//!
//! assert_eq!(people.aggregate("age", "sum")?, Some(50.into()));
//! db.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`aggregate`] - grouping and sum/avg/min/max
//! - [`collection`] - documents, the collection engine and collection handles
//! - [`common`] - values, field paths and constants
//! - [`errors`] - error types and result definitions
//! - [`filter`] - filter compilation and matching
//! - [`index`] - single-field indexes
//! - [`jsondb`] - the database handle
//! - [`jsondb_builder`] - database builder
//! - [`jsondb_config`] - database configuration
//! - [`store`] - storage backends

pub mod aggregate;
pub mod collection;
pub mod common;
pub mod errors;
pub mod filter;
pub mod index;
pub mod jsondb;
pub mod jsondb_builder;
pub mod jsondb_config;
pub mod store;
