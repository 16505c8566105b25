//! Registry options.

use serde::{Deserialize, Serialize};

/// Options controlling a [`RuleRegistry`](crate::RuleRegistry).
///
/// Rules themselves are always registered in code; only behavior around
/// resolution is configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Label attached to every log event, to tell registries apart.
    pub name: String,
    /// Whether resolutions and rule failures are logged.
    pub audit: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            audit: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.name, "default");
        assert!(config.audit);
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: RegistryConfig = serde_json::from_str(r#"{"name":"tenant-a"}"#).unwrap();
        assert_eq!(config.name, "tenant-a");
        assert!(config.audit);
    }
}
