use super::Operator;
use crate::common::{Value, OPERATOR_PREFIX};
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use itertools::Itertools;
use std::fmt::Display;

/// The per-field part of a filter.
///
/// The shape is decided once, when the filter is compiled:
///
/// * a document whose keys all start with `$` is an operator clause, and every
///   operator in it must hold
/// * anything else, including a document without `$` keys and the empty
///   document, is a literal matched by deep equality
#[derive(Clone, Debug)]
pub enum Clause {
    Literal(Value),
    Operators(Vec<Operator>),
}

impl Clause {
    /// Compiles the value a filter associates with a field.
    ///
    /// # Errors
    ///
    /// [ErrorKind::InvalidOperator] for an unknown operator or for a document
    /// mixing operators with plain fields, and [ErrorKind::FilterError] for a
    /// malformed operand.
    pub fn compile(operand: &Value) -> JsonDbResult<Clause> {
        let document = match operand {
            Value::Document(document) => document,
            _ => return Ok(Clause::Literal(operand.clone())),
        };

        let (operators, fields): (Vec<&str>, Vec<&str>) = document
            .fields()
            .partition(|key| key.starts_with(OPERATOR_PREFIX));

        if operators.is_empty() {
            return Ok(Clause::Literal(operand.clone()));
        }

        if !fields.is_empty() {
            log::error!(
                "Filter clause mixes operators {:?} with fields {:?}",
                operators,
                fields
            );
            return Err(JsonDbError::new(
                &format!(
                    "Filter clause mixes operators with fields: {}",
                    fields.iter().join(", ")
                ),
                ErrorKind::InvalidOperator,
            ));
        }

        let operators = document
            .iter()
            .map(|(symbol, value)| Operator::parse(symbol, value))
            .collect::<JsonDbResult<Vec<_>>>()?;
        Ok(Clause::Operators(operators))
    }

    /// Evaluates the clause against a resolved field value; `None` means the
    /// field is absent.
    pub fn evaluate(&self, value: Option<&Value>) -> bool {
        match self {
            Clause::Literal(literal) => value.is_some_and(|v| v == literal),
            Clause::Operators(operators) => operators.iter().all(|op| op.evaluate(value)),
        }
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Clause::Literal(literal) => Some(literal),
            Clause::Operators(_) => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Clause::Literal(_))
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Clause::Literal(value) => write!(f, "== {}", value),
            Clause::Operators(operators) => write!(f, "{}", operators.iter().join(" && ")),
        }
    }
}
