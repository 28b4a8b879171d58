//! Filter mappings and key eligibility
//!
//! A [`FilterMap`] is the ordered set of key/value pairs extracted from a
//! validated request. A [`FilterScope`] narrows which of those keys may reach
//! a filter operation.

use super::value::FilterValue;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// The value(s) supplied for a single filter key
///
/// # Format
/// - Scalar: `{"status": "active"}`
/// - Sequence: `{"role": ["admin", "editor"]}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FilterInput {
    One(FilterValue),
    Many(Vec<FilterValue>),
}

impl FilterInput {
    /// Flatten into the positional argument list handed to an operation
    ///
    /// A scalar becomes a one-element list; a sequence keeps its order.
    pub fn to_args(&self) -> Vec<FilterValue> {
        match self {
            FilterInput::One(value) => vec![value.clone()],
            FilterInput::Many(values) => values.clone(),
        }
    }

    /// Number of positional arguments this input expands to
    pub fn arity(&self) -> usize {
        match self {
            FilterInput::One(_) => 1,
            FilterInput::Many(values) => values.len(),
        }
    }
}

impl From<FilterValue> for FilterInput {
    fn from(value: FilterValue) -> Self {
        FilterInput::One(value)
    }
}

impl From<&str> for FilterInput {
    fn from(value: &str) -> Self {
        FilterInput::One(value.into())
    }
}

impl From<String> for FilterInput {
    fn from(value: String) -> Self {
        FilterInput::One(value.into())
    }
}

impl From<i64> for FilterInput {
    fn from(value: i64) -> Self {
        FilterInput::One(value.into())
    }
}

impl From<i32> for FilterInput {
    fn from(value: i32) -> Self {
        FilterInput::One(value.into())
    }
}

impl From<f64> for FilterInput {
    fn from(value: f64) -> Self {
        FilterInput::One(value.into())
    }
}

impl From<bool> for FilterInput {
    fn from(value: bool) -> Self {
        FilterInput::One(value.into())
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterInput {
    fn from(values: Vec<T>) -> Self {
        FilterInput::Many(values.into_iter().map(Into::into).collect())
    }
}

/// Ordered mapping from filter key to value(s)
///
/// Iteration follows insertion order, which is the order operations are
/// applied in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FilterMap {
    entries: IndexMap<String, FilterInput>,
}

impl FilterMap {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, replacing any previous value while keeping its position
    pub fn insert(&mut self, key: impl Into<String>, input: impl Into<FilterInput>) {
        self.entries.insert(key.into(), input.into());
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, input: impl Into<FilterInput>) -> Self {
        self.insert(key, input);
        self
    }

    /// Get the value(s) for a key
    pub fn get(&self, key: &str) -> Option<&FilterInput> {
        self.entries.get(key)
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over keys and values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterInput)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<FilterInput>> FromIterator<(K, V)> for FilterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FilterMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Inclusion/exclusion policy for filter keys
///
/// An empty `only` set admits every key. `except` is checked after `only`,
/// so a key listed in both is excluded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FilterScope {
    /// If non-empty, only these keys are eligible
    pub only: IndexSet<String>,

    /// Keys that are never eligible
    pub except: IndexSet<String>,
}

impl FilterScope {
    /// Create a scope that admits every key
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict eligible keys to `keys`
    pub fn only<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Exclude `keys`
    pub fn except<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Check whether a key may be dispatched
    pub fn is_eligible(&self, key: &str) -> bool {
        if !self.only.is_empty() && !self.only.contains(key) {
            return false;
        }

        !self.except.contains(key)
    }

    /// Whether this scope admits every key
    pub fn is_unrestricted(&self) -> bool {
        self.only.is_empty() && self.except.is_empty()
    }
}
