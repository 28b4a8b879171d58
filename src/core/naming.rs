//! Operation naming for filter keys
//!
//! Converts request field names (`user_id`, `created-at`) into the
//! operation names filter handlers are registered under (`filterUserId`,
//! `filterCreatedAt`).

/// Maps a filter key to the candidate operation name
///
/// Implementations must be pure: the same key always yields the same name,
/// because the name is computed once at registration and again at dispatch.
pub trait NamingStrategy: Send + Sync {
    /// Compute the operation name for `key`
    fn operation_name(&self, key: &str) -> String;
}

impl<F> NamingStrategy for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn operation_name(&self, key: &str) -> String {
        self(key)
    }
}

/// Default operation prefix
pub const DEFAULT_OPERATION_PREFIX: &str = "filter";

/// Fixed prefix followed by the camel-cased key
///
/// # Examples
///
/// ```
/// use filterable::core::naming::{NamingStrategy, PrefixedCamelCase};
///
/// let naming = PrefixedCamelCase::default();
/// assert_eq!(naming.operation_name("status"), "filterStatus");
/// assert_eq!(naming.operation_name("user_id"), "filterUserId");
/// assert_eq!(naming.operation_name("created-at"), "filterCreatedAt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixedCamelCase {
    prefix: String,
}

impl PrefixedCamelCase {
    /// Create a strategy with a custom prefix
    ///
    /// An empty prefix yields plain camelCase names (`user_id` → `userId`).
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The fixed prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for PrefixedCamelCase {
    fn default() -> Self {
        Self::new(DEFAULT_OPERATION_PREFIX)
    }
}

impl NamingStrategy for PrefixedCamelCase {
    fn operation_name(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            CaseConverter::camel(key)
        } else {
            format!("{}{}", self.prefix, CaseConverter::studly(key))
        }
    }
}

/// Utility for converting separated words into studly and camel case
pub struct CaseConverter;

impl CaseConverter {
    /// Convert to StudlyCase
    ///
    /// Words are split on `-`, `_`, `.` and whitespace. Each word gets its
    /// first letter upper-cased; the rest of the word is left as-is.
    ///
    /// # Examples
    ///
    /// ```
    /// use filterable::core::naming::CaseConverter;
    ///
    /// assert_eq!(CaseConverter::studly("user_id"), "UserId");
    /// assert_eq!(CaseConverter::studly("created-at"), "CreatedAt");
    /// assert_eq!(CaseConverter::studly("HTTPCode"), "HTTPCode");
    /// ```
    pub fn studly(input: &str) -> String {
        input
            .split(|c: char| c == '-' || c == '_' || c == '.' || c.is_whitespace())
            .filter(|word| !word.is_empty())
            .map(Self::upper_first)
            .collect()
    }

    /// Convert to camelCase
    ///
    /// # Examples
    ///
    /// ```
    /// use filterable::core::naming::CaseConverter;
    ///
    /// assert_eq!(CaseConverter::camel("user_id"), "userId");
    /// assert_eq!(CaseConverter::camel("Status"), "status");
    /// ```
    pub fn camel(input: &str) -> String {
        let studly = Self::studly(input);
        let mut chars = studly.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => studly,
        }
    }

    fn upper_first(word: &str) -> String {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
