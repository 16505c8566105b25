//! Configuration management for fieldgate
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (FIELDGATE_* prefix, highest precedence)
//! 2. fieldgate.local.toml (gitignored, local overrides)
//! 3. fieldgate.toml (git-tracked, project config)
//! 4. ~/.config/fieldgate/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)
//!
//! Only registry options are configurable. Rules are registered in code.

use anyhow::Result;
use fieldgate::{RegistryConfig, RuleRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod error;
mod loader;

pub use error::ConfigError;
pub use loader::ConfigLoader;

/// Main fieldgate configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldgateConfig {
    pub registry: RegistryConfig,
}

impl FieldgateConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Check values that deserialize fine but make no sense
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.registry.name.trim().is_empty() {
            return Err(ConfigError::BlankRegistryName);
        }
        Ok(())
    }

    /// Create an empty registry using these options
    pub fn build_registry(&self) -> RuleRegistry {
        RuleRegistry::with_config(self.registry.clone())
    }
}
