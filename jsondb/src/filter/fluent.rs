use super::{Clause, Filter, Operator};
use crate::common::Value;
use crate::errors::JsonDbResult;

/// Creates a fluent filter builder for the specified field path.
///
/// ```rust
/// use jsondb::doc;
/// use jsondb::filter::field;
///
/// let filter = field("age").gt(25).and(field("address.city").eq("London"));
/// assert!(filter.matches(&doc! { age: 30, address: { city: "London" } }));
/// ```
pub fn field(field_name: &str) -> FluentFilter {
    FluentFilter {
        field_name: field_name.to_string(),
    }
}

/// The filter that matches every document.
pub fn all() -> Filter {
    Filter::all()
}

/// A fluent builder for single-field filters.
///
/// Each method produces the same [Filter] that compiling the equivalent filter
/// document would, e.g. `field("age").gt(25)` and `{"age": {"$gt": 25}}`.
pub struct FluentFilter {
    field_name: String,
}

impl FluentFilter {
    /// Matches documents where the field equals the value.
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> Filter {
        Filter::from_clause(self.field_name, Clause::Literal(value.into()))
    }

    /// Matches documents where the field is absent or differs from the value.
    #[inline]
    pub fn ne<T: Into<Value>>(self, value: T) -> Filter {
        self.with(Operator::Ne(value.into()))
    }

    #[inline]
    pub fn gt<T: Into<Value>>(self, value: T) -> Filter {
        self.with(Operator::Gt(value.into()))
    }

    #[inline]
    pub fn gte<T: Into<Value>>(self, value: T) -> Filter {
        self.with(Operator::Gte(value.into()))
    }

    #[inline]
    pub fn lt<T: Into<Value>>(self, value: T) -> Filter {
        self.with(Operator::Lt(value.into()))
    }

    #[inline]
    pub fn lte<T: Into<Value>>(self, value: T) -> Filter {
        self.with(Operator::Lte(value.into()))
    }

    /// Matches documents where the field equals one of the values.
    pub fn in_array<T: Into<Value>>(self, values: Vec<T>) -> Filter {
        self.with(Operator::In(values.into_iter().map(Into::into).collect()))
    }

    /// Matches documents where the field is a string containing a match of the
    /// pattern.
    ///
    /// # Errors
    ///
    /// Returns [crate::errors::ErrorKind::FilterError] for an invalid pattern.
    pub fn regex(self, pattern: &str) -> JsonDbResult<Filter> {
        let operator = Operator::parse("$regex", &Value::from(pattern))?;
        Ok(self.with(operator))
    }

    fn with(self, operator: Operator) -> Filter {
        Filter::from_clause(self.field_name, Clause::Operators(vec![operator]))
    }
}
