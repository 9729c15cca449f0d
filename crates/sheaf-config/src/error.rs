//! Error types for configuration validation and loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Filesystem validation errors (for CLI use)
    #[error("project root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("output directory path is an existing file: {}", .0.display())]
    OutDirIsFile(PathBuf),

    // Config parsing/loading errors
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid config value for '{field}'{}", suffix(hint))]
    InvalidValue { field: String, hint: Option<String> },

    // Schema validation errors (no filesystem checks)
    #[error("no discovery groups specified")]
    NoGroups,

    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn suffix(hint: &Option<String>) -> String {
    hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default()
}

impl ConfigError {
    /// Actionable hint attached to the error, if any.
    pub fn hint(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidValue { hint, .. } | ConfigError::SchemaValidation { hint, .. } => {
                hint.as_deref()
            }
            ConfigError::NoGroups => {
                Some("Add at least one [[groups]] table with a 'pattern' glob")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_renders_hint_inline() {
        let err = ConfigError::InvalidValue {
            field: "format".to_string(),
            hint: Some("expected one of cjs, esm, iife, umd".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for 'format': expected one of cjs, esm, iife, umd"
        );
    }

    #[test]
    fn invalid_value_without_hint() {
        let err = ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: None,
        };
        assert_eq!(err.to_string(), "invalid config value for 'toml'");
        assert!(err.hint().is_none());
    }

    #[test]
    fn no_groups_has_hint() {
        assert!(ConfigError::NoGroups.hint().unwrap().contains("[[groups]]"));
    }
}
