//! Language-transform rule configuration (presets and plugins).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One preset or plugin handed to the language-transform stage.
///
/// Mirrors the `'name'` / `['name', { ...options }]` entries of a Babel
/// config. `options` is forwarded to the engine untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl RuleSpec {
    /// A rule without options.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: None,
        }
    }

    /// A rule with an options object.
    pub fn with_options(name: impl Into<String>, options: Value) -> Self {
        Self {
            name: name.into(),
            options: Some(options),
        }
    }
}
