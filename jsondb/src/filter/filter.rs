use super::Clause;
use crate::collection::Document;
use crate::common::{resolve, Value};
use crate::errors::JsonDbResult;
use itertools::Itertools;
use std::fmt::Display;

/// A compiled filter clause bound to the field path it applies to.
#[derive(Clone, Debug)]
pub struct FieldClause {
    field: String,
    clause: Clause,
}

impl FieldClause {
    pub fn new(field: impl Into<String>, clause: Clause) -> Self {
        FieldClause {
            field: field.into(),
            clause,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn clause(&self) -> &Clause {
        &self.clause
    }

    #[inline]
    fn matches(&self, document: &Document) -> bool {
        self.clause.evaluate(resolve(document, &self.field))
    }
}

/// A compiled filter expression.
///
/// A filter is a conjunction of [FieldClause]s: a document matches only if
/// every clause matches. The empty filter matches every document. There is no
/// OR and no negation of a whole filter; `$ne` is the only negative match.
///
/// Filters are compiled from a filter document with [Filter::compile], or
/// built with the fluent API in [crate::filter::field].
///
/// # Examples
///
/// ```rust
/// use jsondb::doc;
/// use jsondb::filter::Filter;
///
/// let filter = Filter::compile(&doc! { age: { "$gt": 25 } }).unwrap();
/// assert!(filter.matches(&doc! { age: 30 }));
/// assert!(!filter.matches(&doc! { age: 20 }));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Filter {
    clauses: Vec<FieldClause>,
}

impl Filter {
    /// The empty filter, matching every document.
    pub fn all() -> Filter {
        Filter::default()
    }

    /// Compiles a filter document, mapping each field path to a literal or an
    /// operator clause.
    ///
    /// # Errors
    ///
    /// Fails before any document is inspected if a clause uses an unknown
    /// operator ([crate::errors::ErrorKind::InvalidOperator]) or a malformed
    /// operand ([crate::errors::ErrorKind::FilterError]).
    pub fn compile(expression: &Document) -> JsonDbResult<Filter> {
        let clauses = expression
            .iter()
            .map(|(field, operand)| -> JsonDbResult<FieldClause> {
                Ok(FieldClause::new(field.clone(), Clause::compile(operand)?))
            })
            .collect::<JsonDbResult<Vec<_>>>()?;
        Ok(Filter { clauses })
    }

    pub(crate) fn from_clause(field: impl Into<String>, clause: Clause) -> Filter {
        Filter {
            clauses: vec![FieldClause::new(field, clause)],
        }
    }

    /// Checks whether a document satisfies every clause.
    pub fn matches(&self, document: &Document) -> bool {
        self.clauses.iter().all(|clause| clause.matches(document))
    }

    /// Combines two filters; the result matches documents matching both.
    pub fn and(mut self, other: Filter) -> Filter {
        self.clauses.extend(other.clauses);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[FieldClause] {
        &self.clauses
    }

    /// Returns the field and value when the filter is a single literal
    /// equality, the only shape an index can answer on its own.
    pub(crate) fn single_equality(&self) -> Option<(&str, &Value)> {
        match self.clauses.as_slice() {
            [only] => only.clause.as_literal().map(|value| (only.field(), value)),
            _ => None,
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "AllFilter");
        }
        let rendered = self
            .clauses
            .iter()
            .map(|clause| format!("({} {})", clause.field, clause.clause))
            .join(" && ");
        write!(f, "{}", rendered)
    }
}

/// Conversion into a compiled [Filter].
///
/// Collection operations accept anything implementing this trait: a filter
/// document, a compiled filter, or a fluent filter.
pub trait IntoFilter {
    fn into_filter(self) -> JsonDbResult<Filter>;
}

impl IntoFilter for Filter {
    fn into_filter(self) -> JsonDbResult<Filter> {
        Ok(self)
    }
}

impl IntoFilter for &Filter {
    fn into_filter(self) -> JsonDbResult<Filter> {
        Ok(self.clone())
    }
}

impl IntoFilter for Document {
    fn into_filter(self) -> JsonDbResult<Filter> {
        Filter::compile(&self)
    }
}

impl IntoFilter for &Document {
    fn into_filter(self) -> JsonDbResult<Filter> {
        Filter::compile(self)
    }
}
