//! Registry of named filter operations
//!
//! A queryable type declares the filters it supports by registering typed
//! handlers here. Dispatch checks membership by operation name, so unknown
//! request keys are skipped without probing the type at runtime.

use super::args::FilterArgs;
use super::dispatch::dispatch;
use super::error::FilterResult;
use super::mapping::{FilterMap, FilterScope};
use super::naming::{NamingStrategy, PrefixedCamelCase};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A filter operation applied to a queryable of type `Q`
pub type FilterHandler<Q> = Arc<dyn Fn(&mut Q, FilterArgs<'_>) -> FilterResult<()> + Send + Sync>;

/// The set of operations a queryable exposes
///
/// [`FilterRegistry`] is the standard implementation. Implement this directly
/// when operations come from somewhere else (a generated table, a plugin set).
pub trait FilterOperations<Q> {
    /// Look up an operation by its exact name
    fn operation(&self, name: &str) -> Option<&FilterHandler<Q>>;
}

/// Operation registry for a queryable type `Q`
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = FilterRegistry::<UserQuery>::new();
/// registry
///     .on("status", |query, args| {
///         query.where_eq("status", args.str(0)?);
///         Ok(())
///     })
///     .on("role", |query, args| {
///         query.where_in("role", args.strings()?);
///         Ok(())
///     });
///
/// registry.apply(&mut query, &filters, &FilterScope::all())?;
/// ```
pub struct FilterRegistry<Q> {
    naming: Arc<dyn NamingStrategy>,
    operations: HashMap<String, FilterHandler<Q>>,
}

impl<Q> FilterRegistry<Q> {
    /// Create an empty registry using the default `filter` + CamelCase naming
    pub fn new() -> Self {
        Self::with_naming(Arc::new(PrefixedCamelCase::default()))
    }

    /// Create an empty registry with a custom naming strategy
    pub fn with_naming(naming: Arc<dyn NamingStrategy>) -> Self {
        Self {
            naming,
            operations: HashMap::new(),
        }
    }

    /// The naming strategy used by [`on`](Self::on) and [`apply`](Self::apply)
    pub fn naming(&self) -> &dyn NamingStrategy {
        self.naming.as_ref()
    }

    /// The operation name a filter key resolves to
    pub fn operation_name(&self, key: &str) -> String {
        self.naming.operation_name(key)
    }

    /// Register a handler under an explicit operation name
    ///
    /// Registering the same name twice replaces the earlier handler.
    pub fn register<F>(&mut self, operation: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&mut Q, FilterArgs<'_>) -> FilterResult<()> + Send + Sync + 'static,
    {
        let operation = operation.into();
        if self
            .operations
            .insert(operation.clone(), Arc::new(handler))
            .is_some()
        {
            tracing::debug!(operation = %operation, "filter operation replaced");
        }
        self
    }

    /// Register a handler for a filter key
    ///
    /// The operation name is derived with this registry's naming strategy,
    /// so `on("user_id", ..)` registers `filterUserId` by default.
    pub fn on<F>(&mut self, key: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Q, FilterArgs<'_>) -> FilterResult<()> + Send + Sync + 'static,
    {
        let operation = self.operation_name(key);
        self.register(operation, handler)
    }

    /// Remove an operation, returning whether it existed
    pub fn remove(&mut self, operation: &str) -> bool {
        self.operations.remove(operation).is_some()
    }

    /// Whether an operation with this exact name exists
    pub fn contains(&self, operation: &str) -> bool {
        self.operations.contains_key(operation)
    }

    /// Whether the operation a filter key resolves to exists
    pub fn supports_key(&self, key: &str) -> bool {
        self.contains(&self.operation_name(key))
    }

    /// Get a handler by operation name
    pub fn get(&self, operation: &str) -> Option<&FilterHandler<Q>> {
        self.operations.get(operation)
    }

    /// All registered operation names, sorted
    pub fn operation_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Apply every eligible filter in `filters` to `queryable`
    ///
    /// Returns the same queryable. See [`dispatch`] for the exact rules.
    pub fn apply<'q>(
        &self,
        queryable: &'q mut Q,
        filters: &FilterMap,
        scope: &FilterScope,
    ) -> FilterResult<&'q mut Q> {
        dispatch(queryable, filters, scope, self.naming.as_ref(), self)
    }
}

impl<Q> FilterOperations<Q> for FilterRegistry<Q> {
    fn operation(&self, name: &str) -> Option<&FilterHandler<Q>> {
        self.operations.get(name)
    }
}

impl<Q> Default for FilterRegistry<Q> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q> Clone for FilterRegistry<Q> {
    fn clone(&self) -> Self {
        Self {
            naming: Arc::clone(&self.naming),
            operations: self.operations.clone(),
        }
    }
}

impl<Q> fmt::Debug for FilterRegistry<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("operations", &self.operation_names())
            .finish()
    }
}
