//! Validated input sources
//!
//! An [`InputSource`] hands the dispatcher the filter mapping for one call.
//! [`JsonPayload`] trusts that its payload was checked upstream and only
//! rejects shapes that cannot be filter values. [`Validated`] runs the
//! `validator` rules of its inner struct when it is built.

use super::error::{FilterError, FilterResult};
use super::mapping::{FilterInput, FilterMap};
use super::value::FilterValue;
use serde::Serialize;
use serde_json::{Map, Value};
use validator::Validate;

/// Provider of validated request data
pub trait InputSource {
    /// Return the validated fields, optionally narrowed to the nested
    /// section named by `prefix`
    fn validated(&self, prefix: Option<&str>) -> FilterResult<FilterMap>;
}

/// An already-extracted mapping; the prefix does not apply to a flat map
impl InputSource for FilterMap {
    fn validated(&self, _prefix: Option<&str>) -> FilterResult<FilterMap> {
        Ok(self.clone())
    }
}

/// A JSON request payload
///
/// With a prefix, the prefix is a dot-separated path into nested objects:
/// `"filters.user"` reads `{"filters": {"user": {...}}}`.
///
/// # Example
/// ```rust,ignore
/// let payload = JsonPayload::new(json!({
///     "page": 2,
///     "filters": {"status": "active", "role": ["admin", "editor"]}
/// }));
/// let filters = payload.validated(Some("filters"))?;
/// ```
#[derive(Debug, Clone)]
pub struct JsonPayload {
    value: Value,
    skip_nulls: bool,
}

impl JsonPayload {
    /// Wrap a JSON payload
    pub fn new(value: Value) -> Self {
        Self {
            value,
            skip_nulls: false,
        }
    }

    /// Omit keys whose value is `null` instead of passing `Null` through
    pub fn skip_nulls(mut self) -> Self {
        self.skip_nulls = true;
        self
    }

    /// Get the inner payload
    pub fn into_inner(self) -> Value {
        self.value
    }

    fn section(&self, prefix: Option<&str>) -> Option<&Value> {
        match prefix.filter(|p| !p.is_empty()) {
            None => Some(&self.value),
            Some(path) => path
                .split('.')
                .try_fold(&self.value, |current, segment| current.get(segment)),
        }
    }

    fn convert_object(&self, object: &Map<String, Value>) -> FilterResult<FilterMap> {
        let mut filters = FilterMap::new();

        for (key, value) in object {
            if self.skip_nulls && value.is_null() {
                continue;
            }
            filters.insert(key.as_str(), Self::convert_value(key, value)?);
        }

        Ok(filters)
    }

    fn convert_value(key: &str, value: &Value) -> FilterResult<FilterInput> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| Self::convert_scalar(key, item))
                .collect::<FilterResult<Vec<_>>>()
                .map(FilterInput::Many),
            Value::Object(_) => Err(FilterError::InvalidInput {
                key: key.to_string(),
                message: "nested objects cannot be filter values".to_string(),
            }),
            scalar => Self::convert_scalar(key, scalar).map(FilterInput::One),
        }
    }

    fn convert_scalar(key: &str, value: &Value) -> FilterResult<FilterValue> {
        FilterValue::from_json(value).ok_or_else(|| {
            let message = match value {
                Value::Array(_) | Value::Object(_) => "sequence elements must be scalars",
                Value::Number(_) => "integer out of range for i64",
                _ => "unsupported value",
            };
            FilterError::InvalidInput {
                key: key.to_string(),
                message: message.to_string(),
            }
        })
    }
}

impl From<Value> for JsonPayload {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl InputSource for JsonPayload {
    fn validated(&self, prefix: Option<&str>) -> FilterResult<FilterMap> {
        match self.section(prefix) {
            None | Some(Value::Null) => {
                tracing::debug!(prefix = ?prefix, "no filter section in payload");
                Ok(FilterMap::new())
            }
            Some(Value::Object(object)) => self.convert_object(object),
            Some(_) => Err(FilterError::InvalidInput {
                key: prefix.unwrap_or("$").to_string(),
                message: "filter section must be an object".to_string(),
            }),
        }
    }
}

/// A request struct that passed `validator` checks
///
/// Fields are read through `serde`, so `#[serde(rename = ..)]` and friends
/// control the filter keys. Fields serializing to `null` (unset `Option`s)
/// are omitted.
///
/// # Example
/// ```rust,ignore
/// #[derive(Serialize, Validate)]
/// struct UserSearch {
///     #[validate(length(min = 1))]
///     status: Option<String>,
///     role: Vec<String>,
/// }
///
/// let request = Validated::new(UserSearch { .. })?;
/// query.filter(&request, &FilterOptions::new())?;
/// ```
#[derive(Debug, Clone)]
pub struct Validated<T>(T);

impl<T: Validate> Validated<T> {
    /// Validate `inner`, failing with [`FilterError::Validation`]
    pub fn new(inner: T) -> FilterResult<Self> {
        inner.validate()?;
        Ok(Self(inner))
    }
}

impl<T> Validated<T> {
    /// Get the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Serialize> InputSource for Validated<T> {
    fn validated(&self, prefix: Option<&str>) -> FilterResult<FilterMap> {
        let value = serde_json::to_value(&self.0).map_err(|e| FilterError::InvalidInput {
            key: "$".to_string(),
            message: e.to_string(),
        })?;

        JsonPayload::new(value).skip_nulls().validated(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_whole_payload() {
        let payload = JsonPayload::new(json!({"status": "active", "role": ["admin", "editor"]}));
        let filters = payload.validated(None).unwrap();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters.get("status"), Some(&FilterInput::from("active")));
        assert_eq!(
            filters.get("role"),
            Some(&FilterInput::from(vec!["admin", "editor"]))
        );
    }

    #[test]
    fn test_preserves_payload_order() {
        let payload: Value =
            serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let filters = JsonPayload::new(payload).validated(None).unwrap();
        let keys: Vec<&str> = filters.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_prefix_selects_nested_section() {
        let payload = JsonPayload::new(json!({
            "page": 2,
            "filters": {"status": "active"}
        }));
        let filters = payload.validated(Some("filters")).unwrap();
        assert_eq!(filters.len(), 1);
        assert!(filters.contains_key("status"));
        assert!(!filters.contains_key("page"));
    }

    #[test]
    fn test_dotted_prefix() {
        let payload = JsonPayload::new(json!({"filters": {"user": {"role": "admin"}}}));
        let filters = payload.validated(Some("filters.user")).unwrap();
        assert!(filters.contains_key("role"));
    }

    #[test]
    fn test_missing_prefix_is_empty() {
        let payload = JsonPayload::new(json!({"status": "active"}));
        assert!(payload.validated(Some("filters")).unwrap().is_empty());
    }

    #[test]
    fn test_null_section_is_empty() {
        let payload = JsonPayload::new(json!({"filters": null}));
        assert!(payload.validated(Some("filters")).unwrap().is_empty());
    }

    #[test]
    fn test_empty_prefix_reads_whole_payload() {
        let payload = JsonPayload::new(json!({"status": "active"}));
        assert_eq!(payload.validated(Some("")).unwrap().len(), 1);
    }

    #[test]
    fn test_scalar_section_is_invalid() {
        let payload = JsonPayload::new(json!({"filters": "status=active"}));
        let err = payload.validated(Some("filters")).unwrap_err();
        assert!(matches!(err, FilterError::InvalidInput { ref key, .. } if key == "filters"));
    }

    #[test]
    fn test_nested_object_value_is_invalid() {
        let payload = JsonPayload::new(json!({"status": {"eq": "active"}}));
        let err = payload.validated(None).unwrap_err();
        assert!(matches!(err, FilterError::InvalidInput { ref key, .. } if key == "status"));
    }

    #[test]
    fn test_nested_array_element_is_invalid() {
        let payload = JsonPayload::new(json!({"role": [["admin"]]}));
        assert!(payload.validated(None).is_err());
    }

    #[test]
    fn test_integer_beyond_i64_is_invalid() {
        let payload = JsonPayload::new(json!({"owner_id": u64::MAX}));
        match payload.validated(None).unwrap_err() {
            FilterError::InvalidInput { key, message } => {
                assert_eq!(key, "owner_id");
                assert_eq!(message, "integer out of range for i64");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let payload = JsonPayload::new(json!({"owner_id": [1, u64::MAX]}));
        assert!(matches!(
            payload.validated(None),
            Err(FilterError::InvalidInput { ref key, .. }) if key == "owner_id"
        ));
    }

    #[test]
    fn test_null_passes_through_by_default() {
        let payload = JsonPayload::new(json!({"deleted_at": null}));
        let filters = payload.validated(None).unwrap();
        assert_eq!(
            filters.get("deleted_at"),
            Some(&FilterInput::One(FilterValue::Null))
        );
    }

    #[test]
    fn test_skip_nulls() {
        let payload = JsonPayload::new(json!({"deleted_at": null, "status": "active"})).skip_nulls();
        let filters = payload.validated(None).unwrap();
        assert_eq!(filters.len(), 1);
        assert!(filters.contains_key("status"));
    }

    #[test]
    fn test_filter_map_source_ignores_prefix() {
        let map = FilterMap::new().with("status", "active");
        assert_eq!(map.validated(Some("filters")).unwrap(), map);
    }
}
