//! High-level configuration structure for sheaf.
//!
//! For file discovery see the `discovery` module; for layered loading see
//! `loading`.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result as ConfigResult};
use crate::rules::RuleSpec;
use crate::types::{CollisionPolicy, DEFAULT_ENV, ExportMode, OutputFormat, TEST_ENV};

/// Root configuration of a sheaf project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SheafConfig {
    /// Flat output directory every artifact is written to
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Module format of the artifacts
    #[serde(default)]
    pub format: OutputFormat,

    /// Export mode of the artifacts
    #[serde(default)]
    pub exports: ExportMode,

    /// Emit interop helpers for default imports
    #[serde(default)]
    pub interop: bool,

    /// Build environment (`SHEAF_ENV`, falling back to `NODE_ENV`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,

    /// Handling of entry names produced by more than one group
    #[serde(default)]
    pub on_collision: CollisionPolicy,

    /// Discovery groups; earlier groups take precedence on name collisions
    #[serde(default = "default_groups")]
    pub groups: Vec<GroupConfig>,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,

    #[serde(default)]
    pub transform: TransformConfig,

    #[serde(default)]
    pub size: SizeConfig,
}

/// A glob pattern, relative to the project root, that yields entry files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GroupConfig {
    pub pattern: String,
}

impl GroupConfig {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

/// Warnings whose message contains one of these substrings are suppressed;
/// every other warning fails the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiagnosticsConfig {
    #[serde(default = "default_allow")]
    pub allow: Vec<String>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            allow: default_allow(),
        }
    }
}

/// Options of the language-transform stage.
///
/// `presets`, `plugins` and `ignore` replace the built-in rule set when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TransformConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presets: Option<Vec<RuleSpec>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<RuleSpec>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<Vec<String>>,

    /// Paths the transform never touches
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// JSX attributes removed outside the test environment
    #[serde(default = "default_strip_attributes")]
    pub strip_attributes: Vec<String>,

    /// Plugin that performs the attribute removal
    #[serde(default = "default_strip_plugin")]
    pub strip_plugin: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            presets: None,
            plugins: None,
            ignore: None,
            exclude: default_exclude(),
            strip_attributes: default_strip_attributes(),
            strip_plugin: default_strip_plugin(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SizeConfig {
    /// Snapshot file, relative to the project root
    #[serde(default = "default_snapshot")]
    pub snapshot: PathBuf,
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self {
            snapshot: default_snapshot(),
        }
    }
}

impl Default for SheafConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            format: OutputFormat::default(),
            exports: ExportMode::default(),
            interop: false,
            env: None,
            on_collision: CollisionPolicy::default(),
            groups: default_groups(),
            diagnostics: DiagnosticsConfig::default(),
            transform: TransformConfig::default(),
            size: SizeConfig::default(),
        }
    }
}

impl SheafConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use sheaf_config::SheafConfig;
    /// use serde_json::json;
    ///
    /// let config = SheafConfig::from_value(json!({
    ///     "out_dir": "lib",
    ///     "groups": [{ "pattern": "src/*.js" }]
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(config.groups.len(), 1);
    /// assert!(!config.interop);
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Resolved environment name.
    pub fn environment(&self) -> &str {
        self.env.as_deref().unwrap_or(DEFAULT_ENV)
    }

    /// True when running in the test environment.
    pub fn is_test_env(&self) -> bool {
        self.environment() == TEST_ENV
    }

    /// Render the configuration as `sheaf.toml` content.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: Some(e.to_string()),
        })
    }
}

pub(crate) fn default_out_dir() -> PathBuf {
    PathBuf::from("build")
}

pub(crate) fn default_groups() -> Vec<GroupConfig> {
    vec![
        GroupConfig::new("src/calculator/*.js"),
        GroupConfig::new("src/utils/calculator/*.js"),
    ]
}

pub(crate) fn default_allow() -> Vec<String> {
    vec!["'react' but never used".to_string()]
}

pub(crate) fn default_exclude() -> Vec<String> {
    vec!["node_modules/**".to_string()]
}

pub(crate) fn default_strip_attributes() -> Vec<String> {
    vec!["data-testid".to_string()]
}

pub(crate) fn default_strip_plugin() -> String {
    "babel-plugin-react-remove-properties".to_string()
}

pub(crate) fn default_snapshot() -> PathBuf {
    PathBuf::from(".size-snapshot.json")
}
