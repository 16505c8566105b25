//! Layered loading of registry options

use crate::{ConfigError, FieldgateConfig};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

const PROJECT_FILE: &str = "fieldgate.toml";
const LOCAL_FILE: &str = "fieldgate.local.toml";

/// `~/.config/fieldgate/config.toml` on Linux, platform equivalent elsewhere.
fn user_config_file() -> Option<PathBuf> {
    ProjectDirs::from("dev", "fieldgate", "fieldgate")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Merges registry options from files and the environment.
///
/// Precedence, lowest first: built-in defaults, the user file,
/// `fieldgate.toml`, `fieldgate.local.toml`, then `<PREFIX>_*` variables
/// (`FIELDGATE_REGISTRY_AUDIT=false`).
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
    user_config: bool,
    env_vars: Option<config::Map<String, String>>,
}

impl ConfigLoader {
    /// Loader rooted at the current directory
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "FIELDGATE".to_string(),
            user_config: true,
            env_vars: None,
        }
    }

    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the environment variable prefix (default: "FIELDGATE")
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Read overrides from `vars` instead of the process environment
    pub fn with_env_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    pub fn without_user_config(mut self) -> Self {
        self.user_config = false;
        self
    }

    /// Files consulted by [`load`](Self::load), lowest precedence first.
    /// Files that do not exist are skipped when loading.
    pub fn candidate_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::with_capacity(3);
        if self.user_config {
            files.extend(user_config_file());
        }
        files.push(self.project_dir.join(PROJECT_FILE));
        files.push(self.project_dir.join(LOCAL_FILE));
        files
    }

    /// Merge every source and validate the result
    pub fn load(self) -> Result<FieldgateConfig> {
        let defaults = config::Config::try_from(&FieldgateConfig::default())?;
        let mut builder = config::Config::builder().add_source(defaults);

        for path in self.candidate_files() {
            if !path.is_file() {
                continue;
            }
            debug!(path = %path.display(), "Merging registry options");
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .separator("_")
                .try_parsing(true)
                .source(self.env_vars),
        );

        let merged: FieldgateConfig = builder
            .build()
            .context("Failed to merge registry options")?
            .try_deserialize()
            .context("Invalid registry options")?;

        merged.validate()?;
        debug!(
            registry = %merged.registry.name,
            audit = merged.registry.audit,
            "Registry options loaded"
        );
        Ok(merged)
    }

    /// Like [`load`](Self::load), falling back to defaults on any error
    pub fn load_or_default(self) -> FieldgateConfig {
        self.load().unwrap_or_default()
    }

    /// Load exactly one TOML file. Keys it omits keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<FieldgateConfig, ConfigError> {
        let path = path.as_ref();
        let load_error = |source: config::ConfigError| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        };

        let config: FieldgateConfig = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).format(config::FileFormat::Toml))
            .build()
            .map_err(load_error)?
            .try_deserialize()
            .map_err(load_error)?;

        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
