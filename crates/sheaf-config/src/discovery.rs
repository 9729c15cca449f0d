//! File-based config discovery for CLI use
//!
//! Finds the sheaf configuration file of a project root. Loading and
//! layering happens in [`crate::loading`].

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: &[&str] = &["sheaf.toml", "sheaf.config.json", "package.json"];

/// A located configuration file and its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Toml(PathBuf),
    Json(PathBuf),
    /// `package.json` carrying a non-null `sheaf` field
    PackageJson(PathBuf),
}

impl ConfigSource {
    /// Classify an explicit config path by its file name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();

        if file_name == "package.json" {
            return Ok(ConfigSource::PackageJson(path.to_path_buf()));
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(ConfigSource::Toml(path.to_path_buf())),
            Some("json") => Ok(ConfigSource::Json(path.to_path_buf())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::Toml(p) | ConfigSource::Json(p) | ConfigSource::PackageJson(p) => p,
        }
    }

    /// Read the `sheaf` field of a `package.json`.
    pub(crate) fn read_package_field(path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path)?;

        let mut parsed: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "package.json".to_string(),
                hint: Some(format!("Invalid JSON: {}", e)),
            })?;

        match parsed.get_mut("sheaf").map(Value::take) {
            Some(Value::Null) => Err(ConfigError::InvalidValue {
                field: "sheaf".to_string(),
                hint: Some("The 'sheaf' field cannot be null".to_string()),
            }),
            Some(value) => Ok(value),
            None => Err(ConfigError::InvalidValue {
                field: "sheaf".to_string(),
                hint: Some("Add a 'sheaf' field to your package.json".to_string()),
            }),
        }
    }
}

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use sheaf_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let source = discovery.find();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. sheaf.toml
    /// 2. sheaf.config.json
    /// 3. package.json (sheaf field)
    pub fn find(&self) -> Option<ConfigSource> {
        let toml_path = self.root.join("sheaf.toml");
        if toml_path.is_file() {
            return Some(ConfigSource::Toml(toml_path));
        }

        let json_path = self.root.join("sheaf.config.json");
        if json_path.is_file() {
            return Some(ConfigSource::Json(json_path));
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.is_file() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get("sheaf").is_some_and(|v| !v.is_null()) {
                        return Some(ConfigSource::PackageJson(pkg_path));
                    }
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        let discovery = ConfigDiscovery::new(dir.path());
        assert!(discovery.find().is_none());
    }

    #[test]
    fn toml_wins_over_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sheaf.toml"), "out_dir = \"a\"\n").unwrap();
        fs::write(dir.path().join("sheaf.config.json"), "{}").unwrap();

        let found = ConfigDiscovery::new(dir.path()).find().unwrap();
        assert_eq!(found, ConfigSource::Toml(dir.path().join("sheaf.toml")));
    }

    #[test]
    fn package_json_without_field_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "calc" }"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn package_json_with_null_field_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "calc", "sheaf": null }"#,
        )
        .unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn from_path_classifies_by_name() {
        assert!(matches!(
            ConfigSource::from_path("x/package.json").unwrap(),
            ConfigSource::PackageJson(_)
        ));
        assert!(matches!(
            ConfigSource::from_path("custom.toml").unwrap(),
            ConfigSource::Toml(_)
        ));
        assert!(matches!(
            ConfigSource::from_path("custom.json").unwrap(),
            ConfigSource::Json(_)
        ));
        assert!(matches!(
            ConfigSource::from_path("sheaf.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
