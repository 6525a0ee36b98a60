use crate::common::Value;
use std::fmt::Display;

/// How a query is executed.
///
/// Only a filter consisting of exactly one literal equality on an indexed
/// field is answered from the index. Everything else scans the collection in
/// order and runs the filter against each document.
#[derive(Clone, Debug, PartialEq)]
pub enum FindPlan {
    /// Ids come straight from the index bucket of `value`.
    IndexedEquality { field: String, value: Value },
    FullScan,
}

impl FindPlan {
    pub fn is_indexed(&self) -> bool {
        matches!(self, FindPlan::IndexedEquality { .. })
    }
}

impl Display for FindPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FindPlan::IndexedEquality { field, value } => {
                write!(f, "IndexScan({} == {})", field, value)
            }
            FindPlan::FullScan => write!(f, "CollectionScan"),
        }
    }
}
