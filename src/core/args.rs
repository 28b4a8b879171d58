//! Positional arguments handed to a filter operation
//!
//! Operations own their arity and type checks. The helpers here turn a bad
//! call into a [`FilterError`] naming the operation and the argument.

use super::error::{FilterError, FilterResult};
use super::value::FilterValue;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Ordered argument list for one operation invocation
#[derive(Debug, Clone, Copy)]
pub struct FilterArgs<'a> {
    operation: &'a str,
    values: &'a [FilterValue],
}

impl<'a> FilterArgs<'a> {
    /// Wrap the arguments for `operation`
    pub fn new(operation: &'a str, values: &'a [FilterValue]) -> Self {
        Self { operation, values }
    }

    /// Name of the operation being invoked
    pub fn operation(&self) -> &'a str {
        self.operation
    }

    /// All arguments, in order
    pub fn values(&self) -> &'a [FilterValue] {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, FilterValue> {
        self.values.iter()
    }

    /// Require exactly `n` arguments
    pub fn exactly(&self, n: usize) -> FilterResult<()> {
        if self.values.len() == n {
            Ok(())
        } else {
            Err(self.arity_error(n.to_string()))
        }
    }

    /// Require at least `n` arguments
    pub fn at_least(&self, n: usize) -> FilterResult<()> {
        if self.values.len() >= n {
            Ok(())
        } else {
            Err(self.arity_error(format!("at least {}", n)))
        }
    }

    /// Require between `min` and `max` arguments, inclusive
    pub fn between(&self, min: usize, max: usize) -> FilterResult<()> {
        let len = self.values.len();
        if (min..=max).contains(&len) {
            Ok(())
        } else {
            Err(self.arity_error(format!("{} to {}", min, max)))
        }
    }

    /// Get an argument without failing
    pub fn get(&self, index: usize) -> Option<&'a FilterValue> {
        self.values.get(index)
    }

    /// Get an argument, failing with an arity error when it is missing
    pub fn value(&self, index: usize) -> FilterResult<&'a FilterValue> {
        self.values
            .get(index)
            .ok_or_else(|| self.arity_error(format!("at least {}", index + 1)))
    }

    /// The first argument
    pub fn first(&self) -> FilterResult<&'a FilterValue> {
        self.value(0)
    }

    pub fn str(&self, index: usize) -> FilterResult<&'a str> {
        let value = self.value(index)?;
        value
            .as_str()
            .ok_or_else(|| self.type_error(index, "a string", value))
    }

    pub fn i64(&self, index: usize) -> FilterResult<i64> {
        let value = self.value(index)?;
        value
            .as_integer()
            .ok_or_else(|| self.type_error(index, "an integer", value))
    }

    pub fn f64(&self, index: usize) -> FilterResult<f64> {
        let value = self.value(index)?;
        value
            .as_f64()
            .ok_or_else(|| self.type_error(index, "a number", value))
    }

    pub fn bool(&self, index: usize) -> FilterResult<bool> {
        let value = self.value(index)?;
        value
            .as_bool()
            .ok_or_else(|| self.type_error(index, "a boolean", value))
    }

    pub fn uuid(&self, index: usize) -> FilterResult<Uuid> {
        let value = self.value(index)?;
        value
            .as_uuid()
            .ok_or_else(|| self.type_error(index, "a UUID", value))
    }

    pub fn datetime(&self, index: usize) -> FilterResult<DateTime<Utc>> {
        let value = self.value(index)?;
        value
            .as_datetime()
            .ok_or_else(|| self.type_error(index, "an RFC 3339 timestamp", value))
    }

    /// Parse a date argument with a `chrono` format string
    pub fn date(&self, index: usize, format: &str) -> FilterResult<NaiveDate> {
        let value = self.value(index)?;
        value
            .as_date(format)
            .ok_or_else(|| self.type_error(index, "a date", value))
    }

    /// All arguments as strings, for variadic operations like `role IN (...)`
    pub fn strings(&self) -> FilterResult<Vec<&'a str>> {
        (0..self.values.len()).map(|i| self.str(i)).collect()
    }

    fn arity_error(&self, expected: String) -> FilterError {
        FilterError::Arity {
            operation: self.operation.to_string(),
            expected,
            found: self.values.len(),
        }
    }

    fn type_error(&self, index: usize, expected: &'static str, found: &FilterValue) -> FilterError {
        FilterError::InvalidArgument {
            operation: self.operation.to_string(),
            index,
            expected,
            found: found.to_string(),
        }
    }
}

impl<'a> IntoIterator for FilterArgs<'a> {
    type Item = &'a FilterValue;
    type IntoIter = std::slice::Iter<'a, FilterValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
