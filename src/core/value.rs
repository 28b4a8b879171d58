//! Scalar filter values

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// A single scalar value passed to a filter operation
///
/// Deserialized untagged, so a JSON payload such as
/// `{"status": "active", "age": 30, "score": 4.5, "verified": true}`
/// maps directly onto the matching variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FilterValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl FilterValue {
    /// Convert a JSON scalar into a filter value
    ///
    /// Returns `None` for arrays and objects, which are not scalars, and for
    /// integers outside the `i64` range. Those are never widened to `Float`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(FilterValue::Null),
            Value::Bool(b) => Some(FilterValue::Boolean(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(FilterValue::Integer(i)),
                None if n.is_f64() => n.as_f64().map(FilterValue::Float),
                None => None,
            },
            Value::String(s) => Some(FilterValue::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Get the value as a string if possible
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FilterValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FilterValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a float, widening integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FilterValue::Float(f) => Some(*f),
            FilterValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FilterValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Parse a string value as a UUID
    pub fn as_uuid(&self) -> Option<Uuid> {
        self.as_str().and_then(|s| Uuid::parse_str(s).ok())
    }

    /// Parse a string value as an RFC 3339 timestamp
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        self.as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Parse a string value as a date in the given `chrono` format
    pub fn as_date(&self, format: &str) -> Option<NaiveDate> {
        self.as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, format).ok())
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FilterValue::Null)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::String(s) => write!(f, "\"{}\"", s),
            FilterValue::Integer(i) => write!(f, "{}", i),
            FilterValue::Float(v) => write!(f, "{}", v),
            FilterValue::Boolean(b) => write!(f, "{}", b),
            FilterValue::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::String(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Integer(i64::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Float(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Boolean(value)
    }
}
