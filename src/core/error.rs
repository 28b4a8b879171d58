//! Typed error handling for filter dispatch
//!
//! The dispatcher itself never fails: a key without a matching operation is
//! skipped. Every variant here is produced either by an input source while
//! extracting the filter mapping, or by a filter operation while checking its
//! own arguments.
//!
//! # Example
//!
//! ```rust,ignore
//! use filterable::prelude::*;
//!
//! match query.filter(&payload, &options) {
//!     Ok(query) => run(query),
//!     Err(FilterError::Arity { operation, expected, found }) => {
//!         eprintln!("{operation} takes {expected} argument(s), got {found}");
//!     }
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Result alias used throughout the dispatch path
pub type FilterResult<T> = Result<T, FilterError>;

/// The error type for filter extraction and filter operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// An operation received the wrong number of arguments
    #[error("Operation '{operation}' expects {expected} argument(s), got {found}")]
    Arity {
        operation: String,
        expected: String,
        found: usize,
    },

    /// An operation argument had the wrong type or format
    #[error("Operation '{operation}' argument #{index} must be {expected} (got: {found})")]
    InvalidArgument {
        operation: String,
        index: usize,
        expected: &'static str,
        found: String,
    },

    /// The input source produced a value that cannot be a filter
    #[error("Invalid filter input for '{key}': {message}")]
    InvalidInput { key: String, message: String },

    /// The request payload failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Filter configuration is invalid or unreadable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other failure raised inside a filter operation
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

impl FilterError {
    /// Get a stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            FilterError::Arity { .. } => "FILTER_ARITY",
            FilterError::InvalidArgument { .. } => "FILTER_INVALID_ARGUMENT",
            FilterError::InvalidInput { .. } => "FILTER_INVALID_INPUT",
            FilterError::Validation(_) => "VALIDATION_ERROR",
            FilterError::Config(_) => "CONFIG_ERROR",
            FilterError::Handler(_) => "FILTER_HANDLER_ERROR",
        }
    }

    /// Whether the error was caused by the caller's input rather than by
    /// the application (bad arguments, bad payload)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FilterError::Arity { .. }
                | FilterError::InvalidArgument { .. }
                | FilterError::InvalidInput { .. }
                | FilterError::Validation(_)
        )
    }
}

impl From<validator::ValidationErrors> for FilterError {
    fn from(errors: validator::ValidationErrors) -> Self {
        FilterError::Validation(errors.to_string())
    }
}
