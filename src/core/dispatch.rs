//! The filter dispatcher
//!
//! Walks a [`FilterMap`] in order and invokes the matching operation for every
//! eligible key, threading the same queryable through each call.

use super::args::FilterArgs;
use super::error::FilterResult;
use super::mapping::{FilterMap, FilterScope};
use super::naming::NamingStrategy;
use super::registry::FilterOperations;

/// Apply `filters` to `queryable`
///
/// For each key, in insertion order:
/// 1. skip it unless `scope` admits it (`only` first, then `except`);
/// 2. derive the operation name with `naming`;
/// 3. skip it if `operations` has no operation under that name;
/// 4. otherwise invoke the operation with the key's value(s) as positional
///    arguments.
///
/// Keys without a matching operation are ignored, never reported. The first
/// error returned by an operation stops the walk and is returned unchanged;
/// operations applied before it stay applied.
///
/// Returns the same queryable that was passed in.
pub fn dispatch<'q, Q, O>(
    queryable: &'q mut Q,
    filters: &FilterMap,
    scope: &FilterScope,
    naming: &dyn NamingStrategy,
    operations: &O,
) -> FilterResult<&'q mut Q>
where
    O: FilterOperations<Q> + ?Sized,
{
    if filters.is_empty() {
        return Ok(queryable);
    }

    let mut applied = 0usize;
    let mut skipped = 0usize;

    for (key, input) in filters.iter() {
        if !scope.is_eligible(key) {
            tracing::debug!(key, "filter key not eligible, skipping");
            skipped += 1;
            continue;
        }

        let operation = naming.operation_name(key);
        let Some(handler) = operations.operation(&operation) else {
            tracing::debug!(key, operation = %operation, "no filter operation for key, skipping");
            skipped += 1;
            continue;
        };

        let values = input.to_args();
        tracing::trace!(key, operation = %operation, arity = values.len(), "applying filter");
        handler(&mut *queryable, FilterArgs::new(&operation, &values))?;
        applied += 1;
    }

    tracing::debug!(applied, skipped, "filters dispatched");

    Ok(queryable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FilterError;
    use crate::core::naming::PrefixedCamelCase;
    use crate::core::registry::{FilterHandler, FilterRegistry};
    use crate::core::value::FilterValue;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Records every invocation as (operation, args)
    #[derive(Debug, Default)]
    struct RecordingQuery {
        calls: Vec<(String, Vec<FilterValue>)>,
    }

    fn record(query: &mut RecordingQuery, args: FilterArgs<'_>) -> FilterResult<()> {
        query
            .calls
            .push((args.operation().to_string(), args.values().to_vec()));
        Ok(())
    }

    fn registry(keys: &[&str]) -> FilterRegistry<RecordingQuery> {
        let mut registry = FilterRegistry::new();
        for key in keys {
            registry.on(key, record);
        }
        registry
    }

    #[test]
    fn test_empty_map_is_identity() {
        let registry = registry(&["status"]);
        let mut query = RecordingQuery::default();
        let ptr: *const RecordingQuery = &query;

        let returned = registry
            .apply(&mut query, &FilterMap::new(), &FilterScope::all())
            .unwrap();

        assert!(std::ptr::eq(returned, ptr));
        assert!(returned.calls.is_empty());
    }

    #[test]
    fn test_returns_same_instance() {
        let registry = registry(&["status"]);
        let mut query = RecordingQuery::default();
        let ptr: *const RecordingQuery = &query;

        let filters = FilterMap::new().with("status", "active");
        let returned = registry
            .apply(&mut query, &filters, &FilterScope::all())
            .unwrap();

        assert!(std::ptr::eq(returned, ptr));
        assert_eq!(returned.calls.len(), 1);
    }

    #[test]
    fn test_applies_in_insertion_order() {
        let registry = registry(&["a", "b", "c"]);
        let mut query = RecordingQuery::default();
        let filters = FilterMap::new().with("c", 3).with("a", 1).with("b", 2);

        registry
            .apply(&mut query, &filters, &FilterScope::all())
            .unwrap();

        let order: Vec<&str> = query.calls.iter().map(|(op, _)| op.as_str()).collect();
        assert_eq!(order, vec!["filterC", "filterA", "filterB"]);
    }

    #[test]
    fn test_unknown_key_is_skipped() {
        let registry = registry(&["status"]);
        let mut query = RecordingQuery::default();
        let filters = FilterMap::new().with("bogus", "x").with("status", "active");

        registry
            .apply(&mut query, &filters, &FilterScope::all())
            .unwrap();

        assert_eq!(query.calls.len(), 1);
        assert_eq!(query.calls[0].0, "filterStatus");
    }

    #[test]
    fn test_handler_error_stops_and_propagates() {
        let mut registry = registry(&["first", "third"]);
        registry.on("second", |_: &mut RecordingQuery, args| {
            args.exactly(1)?;
            Ok(())
        });

        let mut query = RecordingQuery::default();
        let filters = FilterMap::new()
            .with("first", 1)
            .with("second", vec![1, 2])
            .with("third", 3);

        let err = registry
            .apply(&mut query, &filters, &FilterScope::all())
            .unwrap_err();

        assert!(matches!(err, FilterError::Arity { found: 2, .. }));
        assert_eq!(query.calls.len(), 1);
        assert_eq!(query.calls[0].0, "filterFirst");
    }

    #[test]
    fn test_naming_passed_explicitly() {
        // Operations keyed by plain names, looked up with a closure strategy
        struct Plain(HashMap<String, FilterHandler<RecordingQuery>>);

        impl FilterOperations<RecordingQuery> for Plain {
            fn operation(&self, name: &str) -> Option<&FilterHandler<RecordingQuery>> {
                self.0.get(name)
            }
        }

        let mut ops: HashMap<String, FilterHandler<RecordingQuery>> = HashMap::new();
        ops.insert("by_status".to_string(), Arc::new(record));
        let ops = Plain(ops);

        let naming = |key: &str| format!("by_{}", key);
        let mut query = RecordingQuery::default();
        let filters = FilterMap::new().with("status", "active");

        dispatch(&mut query, &filters, &FilterScope::all(), &naming, &ops).unwrap();

        assert_eq!(query.calls[0].0, "by_status");
    }

    #[test]
    fn test_mismatched_naming_finds_nothing() {
        let registry = registry(&["status"]);
        let mut query = RecordingQuery::default();
        let filters = FilterMap::new().with("status", "active");
        let scope_naming = PrefixedCamelCase::new("scope");

        dispatch(
            &mut query,
            &filters,
            &FilterScope::all(),
            &scope_naming,
            &registry,
        )
        .unwrap();

        assert!(query.calls.is_empty());
    }
}
