//! The rule set handed to the language-transform stage.
//!
//! The built-in presets and plugins target a React component library that
//! ships CommonJS for old browsers; projects can replace any list through
//! the `[transform]` config table.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sheaf_config::{RuleSpec, TransformConfig};

/// Options that change the generated plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOptions {
    /// Append the attribute-removal plugin to the language transform
    pub strip_test_attributes: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            strip_test_attributes: true,
        }
    }
}

impl PlanOptions {
    /// Options for an environment name; `test` keeps test attributes.
    pub fn for_env(env: &str) -> Self {
        Self {
            strip_test_attributes: env != sheaf_config::TEST_ENV,
        }
    }
}

/// Presets, plugins and path filters of the language transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRules {
    pub presets: Vec<RuleSpec>,
    pub plugins: Vec<RuleSpec>,
    pub ignore: Vec<String>,
    pub exclude: Vec<String>,
}

impl TransformRules {
    /// Built-in rules, without the conditional attribute-removal plugin.
    pub fn builtin() -> Self {
        Self {
            presets: default_presets(),
            plugins: default_plugins(),
            ignore: default_ignore(),
            exclude: vec!["node_modules/**".to_string()],
        }
    }

    /// Resolve the rule set for a project.
    ///
    /// Configured lists replace the built-in ones. When
    /// `options.strip_test_attributes` is set, the attribute-removal plugin
    /// is appended after every other plugin.
    pub fn resolve(config: &TransformConfig, options: &PlanOptions) -> Self {
        let builtin = Self::builtin();

        let mut plugins = config.plugins.clone().unwrap_or(builtin.plugins);
        if options.strip_test_attributes && !config.strip_attributes.is_empty() {
            plugins.push(RuleSpec::with_options(
                config.strip_plugin.clone(),
                json!({ "properties": config.strip_attributes }),
            ));
        }

        Self {
            presets: config.presets.clone().unwrap_or(builtin.presets),
            plugins,
            ignore: config.ignore.clone().unwrap_or(builtin.ignore),
            exclude: config.exclude.clone(),
        }
    }

    /// Whether a plugin with this name is part of the rule set.
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name == name)
    }

    /// Options object of the language-transform stage.
    pub fn to_options(&self) -> Value {
        json!({
            "exclude": self.exclude,
            "presets": self.presets,
            "plugins": self.plugins,
            "ignore": self.ignore,
        })
    }
}

fn default_presets() -> Vec<RuleSpec> {
    vec![
        RuleSpec::with_options(
            "@babel/preset-env",
            json!({
                "targets": { "browsers": [">0.01%", "not op_mini all"] },
                "exclude": ["transform-async-to-generator", "transform-regenerator"],
                "loose": true,
            }),
        ),
        RuleSpec::named("@babel/preset-react"),
    ]
}

fn default_plugins() -> Vec<RuleSpec> {
    vec![
        RuleSpec::with_options("@babel/plugin-proposal-class-properties", json!({ "loose": true })),
        RuleSpec::with_options(
            "@babel/plugin-proposal-object-rest-spread",
            json!({ "loose": true }),
        ),
        RuleSpec::named("@babel/plugin-transform-object-assign"),
        RuleSpec::named("@babel/plugin-transform-react-constant-elements"),
        RuleSpec::named("@babel/plugin-transform-react-inline-elements"),
        RuleSpec::with_options(
            "babel-plugin-transform-react-remove-prop-types",
            json!({ "mode": "remove", "removeImport": true }),
        ),
    ]
}

fn default_ignore() -> Vec<String> {
    vec!["@babel/runtime".to_string()]
}
