//! Error handling for the sheaf CLI.
//!
//! `CliError` wraps the library errors (`ConfigError`, `PlanError`) and adds
//! the failures that only the CLI can hit. Errors are converted to miette
//! reports at the top of `main`.
//!
//! # Example
//!
//! ```rust,no_run
//! use sheaf_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_plan(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

mod report;

use std::path::PathBuf;

use sheaf_config::ConfigError;
use sheaf_plan::PlanError;
use thiserror::Error;

pub use report::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or validating the configuration failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Discovery, plan generation, triage or size measurement failed
    #[error("{0}")]
    Plan(#[from] PlanError),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Refusing to overwrite an existing file
    #[error("File already exists: {}\n\nHint: Pass --force to overwrite it", .0.display())]
    AlreadyExists(PathBuf),

    /// I/O errors from file system or stdin operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Actionable hint for the error, if one is known.
    pub fn hint(&self) -> Option<String> {
        match self {
            CliError::Config(e) => e.hint().map(str::to_string),
            CliError::Plan(PlanError::InvalidPattern { .. }) => {
                Some("Check the 'pattern' of every [[groups]] entry".to_string())
            }
            CliError::Plan(PlanError::NameCollision { .. }) => Some(
                "Rename one of the files or set on_collision = \"warn\" to keep the first"
                    .to_string(),
            ),
            CliError::Plan(PlanError::Diagnostic(_)) => Some(
                "Fix the warning or add a substring of it to [diagnostics] allow".to_string(),
            ),
            CliError::Plan(PlanError::ArtifactMissing(_)) => {
                Some("Run the build engine on the current plan before measuring".to_string())
            }
            _ => None,
        }
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }
}
