//! Per-call filter options

use super::mapping::FilterScope;
use serde::{Deserialize, Serialize};

/// Options for one filter call
///
/// # Example
/// ```rust,ignore
/// let options = FilterOptions::new()
///     .prefix("filters")
///     .only(["status", "role"])
///     .except(["role"]);
/// query.filter(&payload, &options)?;
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FilterOptions {
    /// Key prefix passed to the input source (e.g. `"filters"` to read
    /// `{"filters": {...}}`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Inclusion/exclusion policy
    #[serde(flatten)]
    pub scope: FilterScope,
}

impl FilterOptions {
    /// Options that read the whole payload and admit every key
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn only<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope = self.scope.only(keys);
        self
    }

    pub fn except<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope = self.scope.except(keys);
        self
    }
}
