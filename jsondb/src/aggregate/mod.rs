//! Grouping and numeric aggregation over documents.
//!
//! Both functions work on any sequence of documents, so they can be applied to
//! a whole collection or to the result of a `find`.

mod group;
mod reducer;

pub use group::*;
pub use reducer::*;
