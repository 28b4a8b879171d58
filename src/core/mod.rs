//! Core module containing the dispatcher and the types it works with

pub mod args;
pub mod dispatch;
pub mod error;
pub mod filterable;
pub mod mapping;
pub mod naming;
pub mod options;
pub mod registry;
pub mod source;
pub mod value;

pub use args::FilterArgs;
pub use dispatch::dispatch;
pub use error::{FilterError, FilterResult};
pub use filterable::Filterable;
pub use mapping::{FilterInput, FilterMap, FilterScope};
pub use naming::{CaseConverter, NamingStrategy, PrefixedCamelCase};
pub use options::FilterOptions;
pub use registry::{FilterHandler, FilterOperations, FilterRegistry};
pub use source::{InputSource, JsonPayload, Validated};
pub use value::FilterValue;
