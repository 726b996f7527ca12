//! Runtime configuration lookups
//!
//! Level overrides and component filtering are driven by two environment
//! variables, `SYPL_DEBUG` and `SYPL_FILTER`. Loggers read them through a
//! [`ConfigSource`], so embedders and tests can supply values without touching
//! the process environment.

use std::collections::HashMap;

/// Name of the debug override variable, see [`crate::core::debug::DebugResolver`]
pub const DEBUG_ENV_VAR: &str = "SYPL_DEBUG";

/// Name of the component filter variable, see [`ComponentFilter`]
pub const FILTER_ENV_VAR: &str = "SYPL_FILTER";

/// Key lookup used for runtime configuration
pub trait ConfigSource: Send + Sync {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Reads the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ConfigSource for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed in-memory values
///
/// # Example
///
/// ```
/// use sypl::core::config::{ConfigSource, StaticConfig, DEBUG_ENV_VAR};
///
/// let config = StaticConfig::new().with(DEBUG_ENV_VAR, "info,console:debug");
/// assert_eq!(config.lookup(DEBUG_ENV_VAR).as_deref(), Some("info,console:debug"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: HashMap<String, String>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigSource for StaticConfig {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Parsed `SYPL_FILTER`: the component names allowed to print.
///
/// An unset or empty variable allows every component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentFilter {
    names: Vec<String>,
}

impl ComponentFilter {
    pub fn parse(content: &str) -> Self {
        Self {
            names: content
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    pub fn from_source(source: &dyn ConfigSource) -> Self {
        source
            .lookup(FILTER_ENV_VAR)
            .map(|content| Self::parse(&content))
            .unwrap_or_default()
    }

    /// Filtering applies only when at least one name was listed
    pub fn is_active(&self) -> bool {
        !self.names.is_empty()
    }

    pub fn allows(&self, component: &str) -> bool {
        !self.is_active() || self.names.iter().any(|name| name == component)
    }
}
