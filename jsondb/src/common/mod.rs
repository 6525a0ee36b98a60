//! Common types shared by every layer of the store.
//!
//! - [`Value`] - the recursive value type held by documents
//! - [`resolve`] - dotted path lookup into nested documents
//! - constants such as [`DOC_ID`] and [`FIELD_SEPARATOR`]

mod constants;
mod fields;
mod value;

pub use constants::*;
pub use fields::*;
pub use value::*;
