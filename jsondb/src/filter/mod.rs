//! Query filters for selecting documents from collections.
//!
//! A filter is written as a document mapping field paths to either a literal
//! (equality) or an operator clause:
//!
//! ```rust
//! use jsondb::doc;
//! use jsondb::filter::{field, Filter};
//!
//! let by_document = Filter::compile(&doc! {
//!     age: { "$gt": 20, "$lt": 40 },
//!     "address.city": "London"
//! }).unwrap();
//!
//! let by_builder = field("age").gt(20)
//!     .and(field("age").lt(40))
//!     .and(field("address.city").eq("London"));
//!
//! let alice = doc! { age: 30, address: { city: "London" } };
//! assert!(by_document.matches(&alice));
//! assert!(by_builder.matches(&alice));
//! ```
//!
//! # Supported Operators
//!
//! - **Equality**: literal value, `$ne`
//! - **Comparison**: `$gt`, `$gte`, `$lt`, `$lte`
//! - **Membership**: `$in`
//! - **Pattern**: `$regex`
//!
//! Top-level keys are combined with AND. Comparing values of different kinds
//! is not an error; the clause simply does not match.

mod clause;
mod filter;
mod fluent;
mod operator;

pub use clause::*;
pub use filter::*;
pub use fluent::*;
pub use operator::*;
