use crate::aggregate::{self, AggregateOp, GroupResult};
use crate::collection::Collection;
use crate::common::Value;
use crate::errors::JsonDbResult;

impl Collection {
    /// Groups every document by the value at `field`.
    pub fn group_by(&self, field: &str) -> GroupResult {
        aggregate::group_by(&self.documents, field)
    }

    /// Reduces the numeric values at `field` with `"sum"`, `"avg"`, `"min"`
    /// or `"max"`. Returns `Ok(None)` when no document holds a number there.
    ///
    /// # Errors
    ///
    /// [crate::errors::ErrorKind::InvalidOperation] for any other operation.
    pub fn aggregate(&self, field: &str, op: &str) -> JsonDbResult<Option<Value>> {
        let op: AggregateOp = op.parse()?;
        Ok(self.aggregate_with(field, op))
    }

    pub fn aggregate_with(&self, field: &str, op: AggregateOp) -> Option<Value> {
        aggregate::aggregate(&self.documents, field, op)
    }
}
