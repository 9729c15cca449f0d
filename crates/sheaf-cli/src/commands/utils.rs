//! Shared utilities for command implementations.
//!
//! - Path resolution against the working directory
//! - Project root and configuration loading
//! - Translation of command-line flags into config overrides
//! - Writing machine-readable output to a file or stdout

use crate::cli::ProjectArgs;
use crate::error::{CliError, Result, ResultExt};
use serde_json::{Map, Value};
use sheaf_config::loading::LoadedConfig;
use sheaf_config::{ConfigError, ConfigLoader, OutputFormat, SheafConfig, validate_fs};
use sheaf_plan::PlanOptions;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Resolve a path relative to a working directory.
///
/// Absolute paths are returned unchanged.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to get current directory: {}", e),
        ))
    })
}

/// Project root from `--cwd`, falling back to the current directory.
pub fn project_root(project: &ProjectArgs) -> Result<PathBuf> {
    let cwd = get_cwd()?;
    let root = match &project.cwd {
        Some(dir) => resolve_path(dir, &cwd),
        None => cwd,
    };

    if !root.is_dir() {
        return Err(ConfigError::RootNotFound(root).into());
    }
    Ok(root)
}

/// Config values set on the command line; they beat every other layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub env: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}

impl Overrides {
    pub fn with_env(env: Option<String>) -> Self {
        Self {
            env,
            ..Self::default()
        }
    }

    /// JSON object holding only the flags that were given.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        if let Some(env) = &self.env {
            map.insert("env".into(), Value::String(env.clone()));
        }
        if let Some(out_dir) = &self.out_dir {
            map.insert(
                "out_dir".into(),
                Value::String(out_dir.to_string_lossy().into_owned()),
            );
        }
        if let Some(format) = self.format {
            map.insert("format".into(), Value::String(format.as_str().into()));
        }
        Value::Object(map)
    }
}

/// Load, layer and validate the project configuration.
pub fn load_config(
    project: &ProjectArgs,
    root: &Path,
    overrides: &Overrides,
) -> Result<LoadedConfig> {
    let mut loader = ConfigLoader::new(root).with_overrides(overrides.to_value());

    if let Some(file) = &project.config {
        let file = resolve_path(file, &get_cwd()?);
        if !file.is_file() {
            return Err(CliError::FileNotFound(file));
        }
        loader = loader.with_file(file);
    }

    let loaded = loader.load()?;
    validate_fs(&loaded.config, root)?;

    match &loaded.source {
        Some(source) => debug!("using config {}", source.path().display()),
        None => debug!("using default config"),
    }
    debug!("environment: {}", loaded.config.environment());

    Ok(loaded)
}

/// Plan options for the resolved environment.
pub fn plan_options(config: &SheafConfig) -> PlanOptions {
    PlanOptions::for_env(config.environment())
}

/// Write `content` to `out`, or to stdout when no file is given.
pub async fn write_output(out: Option<&Path>, content: &str) -> Result<()> {
    let mut content = content.to_string();
    if !content.ends_with('\n') {
        content.push('\n');
    }

    match out {
        Some(path) => tokio::fs::write(path, content).await.with_path(path),
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(content.as_bytes()).await?;
            stdout.flush().await?;
            Ok(())
        }
    }
}
