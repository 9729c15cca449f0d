//! Pluggable config validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation (for library use).

use std::path::{Path, PathBuf};

use crate::config::SheafConfig;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &SheafConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use sheaf_config::{ConfigValidator, SchemaValidator, SheafConfig};
///
/// SchemaValidator.validate(&SheafConfig::default()).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &SheafConfig) -> Result<()> {
        if config.groups.is_empty() {
            return Err(ConfigError::NoGroups);
        }

        for (idx, group) in config.groups.iter().enumerate() {
            if group.pattern.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: format!("group #{} has an empty pattern", idx + 1),
                    hint: Some(
                        "Give every [[groups]] entry a glob such as \"src/*.js\"".to_string(),
                    ),
                });
            }
        }

        if config.out_dir.as_os_str().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "out_dir cannot be empty".to_string(),
                hint: Some("Set out_dir to a directory such as \"build\"".to_string()),
            });
        }

        if config.diagnostics.allow.iter().any(|s| s.is_empty()) {
            return Err(ConfigError::SchemaValidation {
                message: "diagnostics.allow contains an empty string".to_string(),
                hint: Some(
                    "An empty substring would suppress every warning; remove it".to_string(),
                ),
            });
        }

        if config.transform.strip_attributes.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::SchemaValidation {
                message: "transform.strip_attributes contains an empty attribute name".to_string(),
                hint: None,
            });
        }

        if config.transform.strip_plugin.trim().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "transform.strip_plugin cannot be empty".to_string(),
                hint: None,
            });
        }

        let rules = config
            .transform
            .presets
            .iter()
            .flatten()
            .chain(config.transform.plugins.iter().flatten());
        for rule in rules {
            if rule.name.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "preset or plugin with an empty name".to_string(),
                    hint: None,
                });
            }
        }

        Ok(())
    }
}

/// Filesystem validation relative to a project root (for CLI use)
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &SheafConfig) -> Result<()> {
        if !self.root.is_dir() {
            return Err(ConfigError::RootNotFound(self.root.clone()));
        }

        let out_dir = self.root.join(&config.out_dir);
        if out_dir.is_file() {
            return Err(ConfigError::OutDirIsFile(out_dir));
        }

        Ok(())
    }
}

/// Run schema validation only
pub fn validate_schema(config: &SheafConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Run schema validation followed by filesystem validation
pub fn validate_fs(config: &SheafConfig, root: impl AsRef<Path>) -> Result<()> {
    SchemaValidator.validate(config)?;
    FsValidator::new(root).validate(config)
}
