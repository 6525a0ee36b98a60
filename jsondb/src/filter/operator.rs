use crate::common::Value;
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt::Display;

/// A single comparison inside an operator clause such as `{"$gt": 20}`.
///
/// Operands are validated when the operator is parsed, so evaluation never
/// fails: a value of the wrong kind simply does not match.
#[derive(Clone, Debug)]
pub enum Operator {
    /// `$gt`
    Gt(Value),
    /// `$lt`
    Lt(Value),
    /// `$gte`
    Gte(Value),
    /// `$lte`
    Lte(Value),
    /// `$ne`
    Ne(Value),
    /// `$in`
    In(Vec<Value>),
    /// `$regex`, compiled once
    Regex(Regex),
}

impl Operator {
    /// Parses an operator symbol and its operand.
    ///
    /// # Errors
    ///
    /// * [ErrorKind::InvalidOperator] for an unknown symbol
    /// * [ErrorKind::FilterError] if `$in` is not given an array, or `$regex`
    ///   is not given a valid pattern string
    pub fn parse(symbol: &str, operand: &Value) -> JsonDbResult<Operator> {
        match symbol {
            "$gt" => Ok(Operator::Gt(operand.clone())),
            "$lt" => Ok(Operator::Lt(operand.clone())),
            "$gte" => Ok(Operator::Gte(operand.clone())),
            "$lte" => Ok(Operator::Lte(operand.clone())),
            "$ne" => Ok(Operator::Ne(operand.clone())),
            "$in" => match operand {
                Value::Array(values) => Ok(Operator::In(values.clone())),
                other => {
                    log::error!("$in expects an array operand, found {}", other.type_name());
                    Err(JsonDbError::new(
                        &format!("$in expects an array operand, found {}", other.type_name()),
                        ErrorKind::FilterError,
                    ))
                }
            },
            "$regex" => {
                let pattern = operand.as_str().ok_or_else(|| {
                    log::error!("$regex expects a string operand, found {}", operand.type_name());
                    JsonDbError::new(
                        &format!("$regex expects a string operand, found {}", operand.type_name()),
                        ErrorKind::FilterError,
                    )
                })?;
                let regex = Regex::new(pattern).map_err(|e| {
                    log::error!("Invalid regex pattern '{}': {}", pattern, e);
                    JsonDbError::new(
                        &format!("Invalid regex pattern '{}': {}", pattern, e),
                        ErrorKind::FilterError,
                    )
                })?;
                Ok(Operator::Regex(regex))
            }
            unknown => {
                log::error!("Unknown filter operator {}", unknown);
                Err(JsonDbError::new(
                    &format!("Unknown filter operator {}", unknown),
                    ErrorKind::InvalidOperator,
                ))
            }
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Gt(_) => "$gt",
            Operator::Lt(_) => "$lt",
            Operator::Gte(_) => "$gte",
            Operator::Lte(_) => "$lte",
            Operator::Ne(_) => "$ne",
            Operator::In(_) => "$in",
            Operator::Regex(_) => "$regex",
        }
    }

    /// Evaluates the operator against a resolved field value; `None` means the
    /// field is absent.
    pub fn evaluate(&self, value: Option<&Value>) -> bool {
        match self {
            Operator::Ne(operand) => value.map_or(true, |v| v != operand),
            _ => match value {
                Some(v) => self.evaluate_present(v),
                None => false,
            },
        }
    }

    fn evaluate_present(&self, value: &Value) -> bool {
        match self {
            Operator::Gt(operand) => value.compare(operand) == Some(Ordering::Greater),
            Operator::Lt(operand) => value.compare(operand) == Some(Ordering::Less),
            Operator::Gte(operand) => matches!(
                value.compare(operand),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::Lte(operand) => matches!(
                value.compare(operand),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Operator::Ne(operand) => value != operand,
            Operator::In(operands) => operands.iter().any(|operand| operand == value),
            Operator::Regex(regex) => value.as_str().is_some_and(|text| regex.is_match(text)),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Gt(v) => write!(f, "> {}", v),
            Operator::Lt(v) => write!(f, "< {}", v),
            Operator::Gte(v) => write!(f, ">= {}", v),
            Operator::Lte(v) => write!(f, "<= {}", v),
            Operator::Ne(v) => write!(f, "!= {}", v),
            Operator::In(values) => write!(f, "in {}", Value::Array(values.clone())),
            Operator::Regex(regex) => write!(f, "=~ {}", regex.as_str()),
        }
    }
}
