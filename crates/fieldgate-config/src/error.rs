//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load registry options from {path}: {source}")]
    Load {
        path: PathBuf,
        source: config::ConfigError,
    },

    #[error("registry.name must not be blank")]
    BlankRegistryName,
}
