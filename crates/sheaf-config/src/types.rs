use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Module format of every emitted artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CommonJS (`require` / `module.exports`)
    #[default]
    Cjs,
    /// ECMAScript modules
    Esm,
    /// Immediately invoked function expression
    Iife,
    /// Universal module definition
    Umd,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Cjs => "cjs",
            OutputFormat::Esm => "esm",
            OutputFormat::Iife => "iife",
            OutputFormat::Umd => "umd",
        }
    }
}

/// Export mode of every emitted artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Named exports only (`exports.foo = ...`)
    #[default]
    Named,
    /// A single default export
    Default,
    /// Let the engine pick from the entry's export shape
    Auto,
    /// No exports (side-effect entries)
    None,
}

impl ExportMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportMode::Named => "named",
            ExportMode::Default => "default",
            ExportMode::Auto => "auto",
            ExportMode::None => "none",
        }
    }
}

/// What to do when two discovery groups produce the same entry name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Keep the first occurrence and log a warning for the dropped one
    #[default]
    Warn,
    /// Fail discovery on the first collision
    Error,
}

/// Environment name that disables test-attribute stripping.
pub const TEST_ENV: &str = "test";

/// Environment used when neither `SHEAF_ENV` nor `NODE_ENV` is set.
pub const DEFAULT_ENV: &str = "development";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_commonjs_named_output() {
        assert_eq!(OutputFormat::default(), OutputFormat::Cjs);
        assert_eq!(ExportMode::default(), ExportMode::Named);
        assert_eq!(CollisionPolicy::default(), CollisionPolicy::Warn);
    }

    #[test]
    fn serde_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&OutputFormat::Umd).unwrap(), "\"umd\"");
        assert_eq!(serde_json::to_string(&ExportMode::None).unwrap(), "\"none\"");
        let policy: CollisionPolicy = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(policy, CollisionPolicy::Error);
    }

    #[test]
    fn as_str_matches_serde() {
        for format in [
            OutputFormat::Cjs,
            OutputFormat::Esm,
            OutputFormat::Iife,
            OutputFormat::Umd,
        ] {
            assert_eq!(
                serde_json::to_string(&format).unwrap(),
                format!("\"{}\"", format.as_str())
            );
        }
    }
}
