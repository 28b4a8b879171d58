//! Configuration loading and management

use crate::core::naming::{DEFAULT_OPERATION_PREFIX, NamingStrategy, PrefixedCamelCase};
use crate::core::{FilterError, FilterOptions, FilterRegistry, FilterResult, Filterable};
use anyhow::Result;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Filter configuration for an application
///
/// # Example
/// ```yaml
/// operation_prefix: filter
/// resources:
///   user:
///     prefix: filters
///     except: [password]
///   order:
///     only: [status, customer_id]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Prefix for operation names (`filter` → `filterStatus`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_prefix: Option<String>,

    /// Filter options per resource name
    #[serde(default)]
    pub resources: IndexMap<String, FilterOptions>,
}

impl FilterConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// The operation prefix, falling back to `filter`
    pub fn operation_prefix(&self) -> &str {
        self.operation_prefix
            .as_deref()
            .unwrap_or(DEFAULT_OPERATION_PREFIX)
    }

    /// The naming strategy described by this configuration
    pub fn naming(&self) -> Arc<dyn NamingStrategy> {
        Arc::new(PrefixedCamelCase::new(self.operation_prefix()))
    }

    /// Get the options for a resource
    ///
    /// Unknown resources get the default options (whole payload, every key
    /// eligible).
    pub fn options_for(&self, resource: &str) -> FilterOptions {
        self.resources.get(resource).cloned().unwrap_or_default()
    }

    /// Build the registry for `Q` using this configuration's naming
    pub fn registry_for<Q: Filterable>(&self) -> FilterRegistry<Q> {
        let mut registry = FilterRegistry::with_naming(self.naming());
        Q::register_filters(&mut registry);
        registry
    }

    /// Check the configuration
    ///
    /// The operation prefix must be empty or a valid identifier. Keys listed
    /// in both `only` and `except` are legal (except wins) but logged.
    pub fn validate(&self) -> FilterResult<()> {
        let prefix = self.operation_prefix();
        if !prefix.is_empty() && !identifier_regex().is_match(prefix) {
            return Err(FilterError::Config(format!(
                "operation_prefix '{}' is not a valid identifier",
                prefix
            )));
        }

        for (resource, options) in &self.resources {
            for key in options.scope.only.intersection(&options.scope.except) {
                tracing::warn!(
                    resource = %resource,
                    key = %key,
                    "filter key listed in both only and except; it will never apply"
                );
            }
        }

        Ok(())
    }

    /// Merge multiple configurations
    ///
    /// Later configurations win: a set `operation_prefix` replaces earlier
    /// ones, and resource options replace earlier options for the same
    /// resource.
    pub fn merge(configs: Vec<Self>) -> Self {
        let mut merged = Self::default();

        for config in configs {
            if config.operation_prefix.is_some() {
                merged.operation_prefix = config.operation_prefix;
            }
            for (resource, options) in config.resources {
                if merged.resources.contains_key(&resource) {
                    tracing::debug!(resource = %resource, "filter options overridden");
                }
                merged.resources.insert(resource, options);
            }
        }

        merged
    }
}

fn identifier_regex() -> &'static Regex {
    static IDENTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex is valid")
    })
}
