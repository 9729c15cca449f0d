//! Layered configuration loading.
//!
//! Priority: overrides (CLI) > `SHEAF_*` environment > `NODE_ENV` > config
//! file > defaults.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use serde_json::Value;
use tracing::debug;

use crate::config::SheafConfig;
use crate::discovery::{ConfigDiscovery, ConfigSource};
use crate::error::{ConfigError, Result};

/// Top-level keys that may be set through `SHEAF_*` variables.
const ENV_KEYS: &[&str] = &["out_dir", "format", "exports", "interop", "env", "on_collision"];

/// Builder for loading a [`SheafConfig`] from every source.
///
/// # Example
///
/// ```no_run
/// use sheaf_config::ConfigLoader;
///
/// let loaded = ConfigLoader::new(".").load().unwrap();
/// println!("{} groups", loaded.config.groups.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
    file: Option<PathBuf>,
    overrides: Option<Value>,
    read_env: bool,
}

/// A loaded configuration together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: SheafConfig,
    pub source: Option<ConfigSource>,
}

impl ConfigLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            file: None,
            overrides: None,
            read_env: true,
        }
    }

    /// Use an explicit config file instead of discovering one.
    ///
    /// Relative paths are resolved against the root.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.file = Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        });
        self
    }

    /// Highest-priority values, usually built from command-line flags.
    ///
    /// Must be a JSON object; keys that are absent leave lower layers intact.
    pub fn with_overrides(mut self, overrides: Value) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Skip `SHEAF_*` and `NODE_ENV`.
    pub fn without_env(mut self) -> Self {
        self.read_env = false;
        self
    }

    pub fn load(&self) -> Result<LoadedConfig> {
        let source = match &self.file {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::Io(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("config file not found: {}", path.display()),
                    )));
                }
                Some(ConfigSource::from_path(path)?)
            }
            None => ConfigDiscovery::new(&self.root).find(),
        };

        let mut figment = Figment::new().merge(Serialized::defaults(SheafConfig::default()));

        match &source {
            Some(ConfigSource::Toml(path)) => {
                debug!("loading config from {}", path.display());
                figment = figment.merge(Toml::file_exact(path));
            }
            Some(ConfigSource::Json(path)) => {
                debug!("loading config from {}", path.display());
                figment = figment.merge(Json::file_exact(path));
            }
            Some(ConfigSource::PackageJson(path)) => {
                debug!("loading config from the sheaf field of {}", path.display());
                let value = ConfigSource::read_package_field(path)?;
                figment = figment.merge(Serialized::defaults(value));
            }
            None => debug!("no config file in {}, using defaults", self.root.display()),
        }

        if self.read_env {
            figment = figment
                .merge(Env::raw().only(&["NODE_ENV"]).map(|_| "env".into()))
                .merge(Env::prefixed("SHEAF_").only(ENV_KEYS));
        }

        if let Some(overrides) = &self.overrides {
            figment = figment.merge(Serialized::defaults(overrides));
        }

        let config: SheafConfig = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            hint: Some(e.to_string()),
        })?;

        Ok(LoadedConfig { config, source })
    }
}
