//! Configuration Module
//!
//! Handles cache configuration: optional include/exclude filters on
//! component type names and an optional capacity bound.

use std::collections::HashSet;
use std::env;

use serde::Deserialize;

use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// Hosts construct this directly or deserialize it from configuration data.
/// The demo binary loads it from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Allow-list of component type names; when present, only listed
    /// components participate in caching
    #[serde(default)]
    pub include: Option<HashSet<String>>,
    /// Deny-list of component type names; listed components never
    /// participate, even when also included
    #[serde(default)]
    pub exclude: Option<HashSet<String>>,
    /// Maximum number of cached instances; None = unbounded
    #[serde(default)]
    pub max: Option<usize>,
}

impl Config {
    // == Validation ==
    /// Checks the configuration once at setup time.
    ///
    /// A capacity of zero would disable caching entirely, which this cache
    /// does not support; empty filter names can never match a component.
    /// Both are rejected here so render cycles never see them.
    pub fn validate(&self) -> Result<()> {
        if self.max == Some(0) {
            return Err(CacheError::InvalidCapacity(0));
        }
        for set in [&self.include, &self.exclude].into_iter().flatten() {
            if let Some(name) = set.iter().find(|name| name.trim().is_empty()) {
                return Err(CacheError::InvalidFilter(format!(
                    "empty type name {:?}",
                    name
                )));
            }
        }
        Ok(())
    }

    // == Filter Check ==
    /// Decides whether a component type participates in caching.
    ///
    /// Exclusion wins over inclusion. With an include list present, only
    /// listed names participate; without one, everything not excluded does.
    pub fn allows(&self, type_name: &str) -> bool {
        if let Some(exclude) = &self.exclude {
            if exclude.contains(type_name) {
                return false;
            }
        }
        match &self.include {
            Some(include) => include.contains(type_name),
            None => true,
        }
    }

    // == Environment Loading ==
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX` - Maximum cached instances (default: unbounded)
    /// - `CACHE_INCLUDE` - Comma-separated allow-list of type names
    /// - `CACHE_EXCLUDE` - Comma-separated deny-list of type names
    pub fn from_env() -> Self {
        Self {
            include: env::var("CACHE_INCLUDE").ok().and_then(parse_name_list),
            exclude: env::var("CACHE_EXCLUDE").ok().and_then(parse_name_list),
            max: env::var("CACHE_MAX").ok().and_then(|v| v.parse().ok()),
        }
    }
}

/// Splits a comma-separated list into a set of type names.
///
/// Returns None for a blank value so an empty variable behaves like an
/// unset one.
fn parse_name_list(raw: String) -> Option<HashSet<String>> {
    let names: HashSet<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_set(names: &[&str]) -> Option<HashSet<String>> {
        Some(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_config_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.include.is_none());
        assert!(config.exclude.is_none());
        assert!(config.max.is_none());
    }

    #[test]
    fn test_config_rejects_zero_capacity() {
        let config = Config {
            max: Some(0),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn test_config_rejects_empty_filter_name() {
        let config = Config {
            include: name_set(&["panel", "  "]),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_allows_without_filters() {
        let config = Config::default();
        assert!(config.allows("anything"));
    }

    #[test]
    fn test_allows_include_list() {
        let config = Config {
            include: name_set(&["panel", "editor"]),
            ..Config::default()
        };
        assert!(config.allows("panel"));
        assert!(!config.allows("sidebar"));
    }

    #[test]
    fn test_allows_exclude_list() {
        let config = Config {
            exclude: name_set(&["sidebar"]),
            ..Config::default()
        };
        assert!(!config.allows("sidebar"));
        assert!(config.allows("panel"));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let config = Config {
            include: name_set(&["panel"]),
            exclude: name_set(&["panel"]),
            max: None,
        };
        assert!(!config.allows("panel"));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_MAX");
        env::remove_var("CACHE_INCLUDE");
        env::remove_var("CACHE_EXCLUDE");

        let config = Config::from_env();
        assert!(config.max.is_none());
        assert!(config.include.is_none());
        assert!(config.exclude.is_none());
    }

    #[test]
    fn test_parse_name_list() {
        let names = parse_name_list("panel, editor,,sidebar".to_string()).unwrap();
        assert_eq!(names.len(), 3);
        assert!(names.contains("editor"));

        assert!(parse_name_list("  ,".to_string()).is_none());
    }

    #[test]
    fn test_config_deserialize() {
        let json = r#"{"include": ["panel"], "max": 5}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.max, Some(5));
        assert!(config.allows("panel"));
        assert!(!config.allows("sidebar"));
    }
}
