//! Configuration for the sheaf build-plan generator.
//!
//! A project describes its discovery groups, output settings, diagnostics
//! allow-list and language-transform rules in `sheaf.toml`,
//! `sheaf.config.json` or the `sheaf` field of `package.json`. Loading is
//! layered with `figment`: defaults, then the config file, then `SHEAF_*`
//! environment variables, then caller-provided overrides.

pub mod config;
pub mod discovery;
pub mod error;
pub mod loading;
pub mod rules;
pub mod types;
pub mod validation;

// Re-export main types
pub use config::*;
pub use error::*;
pub use rules::*;
pub use types::*;

pub use discovery::{CONFIG_FILE_NAMES, ConfigDiscovery, ConfigSource};
pub use loading::ConfigLoader;
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};
