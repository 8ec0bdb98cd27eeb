//! Runtime configuration
//!
//! Loaded from a TOML file by the binary; every field has a default so an
//! empty file (or no file at all) is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::{LoreError, LoreResult};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoreConfig {
    /// Tenant stamped on every causal event
    pub tenant: String,

    /// TOML file holding the axiom set.
    ///
    /// When absent the built-in default axioms are used.
    pub axioms_file: Option<PathBuf>,

    /// TOML file holding the initial world records
    pub world_file: PathBuf,

    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,

    pub export: ExportConfig,
}

/// Where and under which names the symbolic export lands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub directory: PathBuf,
    pub axioms_file: String,
    pub state_file: String,
    pub events_file: String,
    pub invariants_file: String,
}

impl Default for LoreConfig {
    fn default() -> Self {
        Self {
            tenant: "default".to_string(),
            axioms_file: None,
            world_file: PathBuf::from("data/worlds/sample.toml"),
            log_filter: "lorecraft=info".to_string(),
            export: ExportConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("export"),
            axioms_file: "axioms.lp".to_string(),
            state_file: "state.lp".to_string(),
            events_file: "events.lp".to_string(),
            invariants_file: "invariants.lp".to_string(),
        }
    }
}

impl LoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> LoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> LoreResult<Self> {
        let config: LoreConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> LoreResult<()> {
        if self.tenant.trim().is_empty() {
            return Err(LoreError::Config("tenant must not be empty".into()));
        }

        let names = [
            &self.export.axioms_file,
            &self.export.state_file,
            &self.export.events_file,
            &self.export.invariants_file,
        ];
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(LoreError::Config("export file names must not be empty".into()));
            }
            // Four independent files; a shared name would overwrite one with another
            if names[..i].contains(name) {
                return Err(LoreError::Config(format!(
                    "export file name '{}' is used twice",
                    name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(LoreConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = LoreConfig::from_toml_str(
            r#"
tenant = "guild"

[export]
directory = "out"
"#,
        )
        .unwrap();

        assert_eq!(config.tenant, "guild");
        assert_eq!(config.export.directory, PathBuf::from("out"));
        assert_eq!(config.export.axioms_file, "axioms.lp");
        assert_eq!(config.log_filter, "lorecraft=info");
    }

    #[test]
    fn test_duplicate_export_names_rejected() {
        let result = LoreConfig::from_toml_str(
            r#"
[export]
state_file = "facts.lp"
events_file = "facts.lp"
"#,
        );
        assert!(matches!(result, Err(LoreError::Config(_))));
    }

    #[test]
    fn test_empty_tenant_rejected() {
        let result = LoreConfig::from_toml_str("tenant = \"  \"");
        assert!(result.is_err());
    }
}
