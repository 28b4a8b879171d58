//! The `Filterable` extension trait
//!
//! Implemented by query builders. Declaring the operations once gives every
//! instance a `filter` method that applies validated request fields.

use super::error::FilterResult;
use super::mapping::{FilterMap, FilterScope};
use super::naming::{NamingStrategy, PrefixedCamelCase};
use super::options::FilterOptions;
use super::registry::FilterRegistry;
use super::source::InputSource;
use std::sync::Arc;

/// A queryable that can be filtered by request fields
///
/// # Example
///
/// ```rust,ignore
/// impl Filterable for UserQuery {
///     fn register_filters(registry: &mut FilterRegistry<Self>) {
///         registry
///             .on("status", |query, args| {
///                 args.exactly(1)?;
///                 query.where_eq("status", args.str(0)?);
///                 Ok(())
///             })
///             .on("role", |query, args| {
///                 query.where_in("role", args.strings()?);
///                 Ok(())
///             });
///     }
/// }
///
/// let mut query = UserQuery::new();
/// query.filter(&payload, &FilterOptions::new().except(["password"]))?;
/// ```
pub trait Filterable: Sized {
    /// Declare the filter operations this type supports
    fn register_filters(registry: &mut FilterRegistry<Self>);

    /// Naming strategy mapping filter keys to operation names
    fn naming_strategy() -> Arc<dyn NamingStrategy> {
        Arc::new(PrefixedCamelCase::default())
    }

    /// Build the registry for this type
    ///
    /// [`filter`](Self::filter) and [`filter_map`](Self::filter_map) build a
    /// fresh registry per call. Hot paths keep one (e.g. in a
    /// `static OnceLock<FilterRegistry<Self>>`) and use
    /// [`filter_with`](Self::filter_with).
    fn filter_registry() -> FilterRegistry<Self> {
        let mut registry = FilterRegistry::with_naming(Self::naming_strategy());
        Self::register_filters(&mut registry);
        registry
    }

    /// Read the filter mapping from `source` and apply it
    ///
    /// The source is read once, with `options.prefix`. Returns `self` so
    /// calls chain into the rest of the query.
    fn filter<S>(&mut self, source: &S, options: &FilterOptions) -> FilterResult<&mut Self>
    where
        S: InputSource + ?Sized,
    {
        let filters = source.validated(options.prefix.as_deref())?;
        if filters.is_empty() {
            return Ok(self);
        }

        Self::filter_registry().apply(self, &filters, &options.scope)
    }

    /// Like [`filter`](Self::filter), with a registry the caller keeps
    fn filter_with<'q, S>(
        &'q mut self,
        registry: &FilterRegistry<Self>,
        source: &S,
        options: &FilterOptions,
    ) -> FilterResult<&'q mut Self>
    where
        S: InputSource + ?Sized,
    {
        let filters = source.validated(options.prefix.as_deref())?;
        registry.apply(self, &filters, &options.scope)
    }

    /// Apply an already-extracted mapping
    fn filter_map(&mut self, filters: &FilterMap, scope: &FilterScope) -> FilterResult<&mut Self> {
        Self::filter_registry().apply(self, filters, scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::JsonPayload;
    use serde_json::json;
    use std::sync::OnceLock;

    #[derive(Debug, Default)]
    struct ArticleQuery {
        clauses: Vec<String>,
    }

    impl Filterable for ArticleQuery {
        fn register_filters(registry: &mut FilterRegistry<Self>) {
            registry
                .on("status", |query, args| {
                    args.exactly(1)?;
                    query.clauses.push(format!("status = {}", args.str(0)?));
                    Ok(())
                })
                .on("author_id", |query, args| {
                    query.clauses.push(format!("author_id = {}", args.i64(0)?));
                    Ok(())
                });
        }
    }

    struct ScopedQuery {
        applied: usize,
    }

    impl Filterable for ScopedQuery {
        fn register_filters(registry: &mut FilterRegistry<Self>) {
            registry.on("status", |query, _| {
                query.applied += 1;
                Ok(())
            });
        }

        fn naming_strategy() -> Arc<dyn NamingStrategy> {
            Arc::new(PrefixedCamelCase::new("scope"))
        }
    }

    #[test]
    fn test_filter_from_payload() {
        let payload = JsonPayload::new(json!({"status": "published", "author_id": 7, "page": 2}));
        let mut query = ArticleQuery::default();

        query.filter(&payload, &FilterOptions::new()).unwrap();

        assert_eq!(query.clauses, vec!["status = published", "author_id = 7"]);
    }

    #[test]
    fn test_filter_chains() {
        let payload = JsonPayload::new(json!({"status": "draft"}));
        let mut query = ArticleQuery::default();

        let count = query
            .filter(&payload, &FilterOptions::new())
            .map(|q| q.clauses.len())
            .unwrap();

        assert_eq!(count, 1);
    }

    #[test]
    fn test_filter_with_prefix_and_scope() {
        let payload = JsonPayload::new(json!({
            "status": "ignored",
            "filters": {"status": "draft", "author_id": 3}
        }));
        let mut query = ArticleQuery::default();

        query
            .filter(
                &payload,
                &FilterOptions::new().prefix("filters").except(["author_id"]),
            )
            .unwrap();

        assert_eq!(query.clauses, vec!["status = draft"]);
    }

    #[test]
    fn test_filter_map_direct() {
        let mut query = ArticleQuery::default();
        let filters = FilterMap::new().with("author_id", 9);

        query.filter_map(&filters, &FilterScope::all()).unwrap();

        assert_eq!(query.clauses, vec!["author_id = 9"]);
    }

    #[test]
    fn test_registry_uses_custom_naming() {
        let registry = ScopedQuery::filter_registry();
        assert_eq!(registry.operation_names(), vec!["scopeStatus"]);

        let mut query = ScopedQuery { applied: 0 };
        query
            .filter_map(&FilterMap::new().with("status", "x"), &FilterScope::all())
            .unwrap();
        assert_eq!(query.applied, 1);
    }

    #[test]
    fn test_filter_with_cached_registry() {
        static REGISTRY: OnceLock<FilterRegistry<ArticleQuery>> = OnceLock::new();
        let registry = REGISTRY.get_or_init(ArticleQuery::filter_registry);

        for status in ["draft", "published"] {
            let payload = JsonPayload::new(json!({"status": status}));
            let mut query = ArticleQuery::default();
            query
                .filter_with(registry, &payload, &FilterOptions::new())
                .unwrap();
            assert_eq!(query.clauses, vec![format!("status = {}", status)]);
        }
    }

    #[test]
    fn test_handler_error_propagates() {
        let payload = JsonPayload::new(json!({"author_id": "seven"}));
        let mut query = ArticleQuery::default();

        let err = query.filter(&payload, &FilterOptions::new()).unwrap_err();
        assert_eq!(err.error_code(), "FILTER_INVALID_ARGUMENT");
        assert!(query.clauses.is_empty());
    }
}
