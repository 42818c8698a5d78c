//! Top-level configuration and its sections.

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::FailurePolicy;

/// Settings for the fontshelf font store.
///
/// Every field has a default, so an empty YAML document is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontShelfConfig {
    pub shaping_cache: ShapingCacheConfig,
    pub materialization: MaterializationConfig,
    pub registry: RegistryConfig,
}

/// Shaping-handle cache sizing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapingCacheConfig {
    /// Maximum number of live handles kept; `None` keeps every handle until
    /// its font is dropped and purged.
    pub capacity: Option<usize>,
}

impl ShapingCacheConfig {
    /// Capacity as a non-zero bound, `None` when unbounded.
    pub fn bound(&self) -> Option<NonZeroUsize> {
        self.capacity.and_then(NonZeroUsize::new)
    }
}

/// Lazy typeface materialization behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterializationConfig {
    pub failure_policy: FailurePolicy,
}

/// Font-collection registry defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Family whose registration also installs the collection as the default fallback.
    pub default_family: Option<String>,
}

impl FontShelfConfig {
    /// Load and validate configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading fontshelf config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        // serde_yaml_ng rejects an empty document; treat it as all defaults.
        let config: FontShelfConfig = if contents.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(contents)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check field values that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shaping_cache.capacity == Some(0) {
            log::warn!("Rejecting shaping_cache.capacity of 0");
            return Err(ConfigError::Validation(
                "shaping_cache.capacity must be greater than zero (omit it for no bound)"
                    .to_string(),
            ));
        }
        if self
            .registry
            .default_family
            .as_deref()
            .is_some_and(|family| family.trim().is_empty())
        {
            log::warn!("Rejecting empty registry.default_family");
            return Err(ConfigError::Validation(
                "registry.default_family must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
