use crate::collection::Document;
use crate::common::{resolve, Value};
use crate::errors::{ErrorKind, JsonDbError};
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

/// A numeric reduction over one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AggregateOp {
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateOp {
    pub fn name(&self) -> &'static str {
        match self {
            AggregateOp::Sum => "sum",
            AggregateOp::Avg => "avg",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
        }
    }
}

impl FromStr for AggregateOp {
    type Err = JsonDbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sum" => Ok(AggregateOp::Sum),
            "avg" => Ok(AggregateOp::Avg),
            "min" => Ok(AggregateOp::Min),
            "max" => Ok(AggregateOp::Max),
            other => {
                log::error!("Unknown aggregate operation '{}'", other);
                Err(JsonDbError::new(
                    &format!("Unknown aggregate operation '{}'", other),
                    ErrorKind::InvalidOperation,
                ))
            }
        }
    }
}

impl Display for AggregateOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Reduces the numeric values found at `field` across the documents.
///
/// Absent fields and non-numeric values (booleans included) are skipped.
/// Returns `None` when no numeric value remains.
///
/// * `sum` stays an integer while every value is an integer and the total
///   fits in an `i64`, and is a float otherwise
/// * `avg` is always a float
/// * `min` and `max` return the original value, integer or float
///
/// ```rust
/// use jsondb::aggregate::{aggregate, AggregateOp};
/// use jsondb::common::Value;
/// use jsondb::doc;
///
/// let scores = vec![doc! { score: 10 }, doc! { score: 20 }, doc! { score: "n/a" }];
/// assert_eq!(aggregate(&scores, "score", AggregateOp::Sum), Some(Value::I64(30)));
/// assert_eq!(aggregate(&scores, "score", AggregateOp::Avg), Some(Value::F64(15.0)));
/// assert_eq!(aggregate(&scores, "missing", AggregateOp::Max), None);
/// ```
pub fn aggregate<'a, I>(documents: I, field: &str, op: AggregateOp) -> Option<Value>
where
    I: IntoIterator<Item = &'a Document>,
{
    let values: Vec<&Value> = documents
        .into_iter()
        .filter_map(|document| resolve(document, field))
        .filter(|value| is_numeric(value))
        .collect();

    if values.is_empty() {
        return None;
    }

    let result = match op {
        AggregateOp::Sum => sum(&values),
        AggregateOp::Avg => Value::F64(float_sum(&values) / values.len() as f64),
        AggregateOp::Min => extreme(&values, Ordering::Less),
        AggregateOp::Max => extreme(&values, Ordering::Greater),
    };
    Some(result)
}

#[inline]
fn is_numeric(value: &Value) -> bool {
    match value {
        Value::I64(_) => true,
        Value::F64(v) => !v.is_nan(),
        _ => false,
    }
}

fn float_sum(values: &[&Value]) -> f64 {
    values.iter().filter_map(|value| value.as_f64()).sum()
}

fn sum(values: &[&Value]) -> Value {
    let integral = values.iter().try_fold(0i64, |total, value| match value {
        Value::I64(v) => total.checked_add(*v),
        _ => None,
    });
    match integral {
        Some(total) => Value::I64(total),
        None => Value::F64(float_sum(values)),
    }
}

/// First value that no other value beats in the `wanted` direction.
fn extreme(values: &[&Value], wanted: Ordering) -> Value {
    let mut best = values[0];
    for &candidate in &values[1..] {
        if candidate.compare(best) == Some(wanted) {
            best = candidate;
        }
    }
    best.clone()
}
