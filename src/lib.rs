//! # Filterable
//!
//! Apply validated request fields to a query builder through named, typed
//! filter operations.
//!
//! ## Features
//!
//! - **Registry-Based Dispatch**: Each query type registers the filters it supports
//! - **Permissive by Design**: Request keys without a matching filter are ignored
//! - **Ordered**: Filters apply in the order the payload lists them
//! - **Scoped**: `only` / `except` sets narrow which keys may apply
//! - **Typed Arguments**: Handlers check arity and types with `FilterArgs`
//! - **Configuration-Based**: Per-resource options via YAML configuration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use filterable::prelude::*;
//!
//! #[derive(Default)]
//! struct UserQuery {
//!     clauses: Vec<String>,
//! }
//!
//! impl Filterable for UserQuery {
//!     fn register_filters(registry: &mut FilterRegistry<Self>) {
//!         registry
//!             .on("status", |query, args| {
//!                 args.exactly(1)?;
//!                 query.clauses.push(format!("status = '{}'", args.str(0)?));
//!                 Ok(())
//!             })
//!             .on("role", |query, args| {
//!                 query.clauses.push(format!("role IN ({})", args.strings()?.join(", ")));
//!                 Ok(())
//!             });
//!     }
//! }
//!
//! let payload = JsonPayload::new(json!({"status": "active", "role": ["admin", "editor"]}));
//! let mut query = UserQuery::default();
//! query.filter(&payload, &FilterOptions::new())?;
//! ```

pub mod config;
pub mod core;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        filterable::Filterable,
        naming::NamingStrategy,
        registry::FilterOperations,
        source::InputSource,
    };

    // === Types ===
    pub use crate::core::{
        FilterArgs, FilterError, FilterHandler, FilterInput, FilterMap, FilterOptions,
        FilterRegistry, FilterResult, FilterScope, FilterValue, JsonPayload, PrefixedCamelCase,
        Validated, dispatch,
    };

    // === Config ===
    pub use crate::config::FilterConfig;

    // === External dependencies ===
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::json;
    pub use validator::Validate;
}
