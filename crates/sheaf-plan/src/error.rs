//! Error types for discovery, plan generation and diagnostics triage.

use std::path::PathBuf;

use thiserror::Error;

use crate::diagnostics::Diagnostic;

pub type Result<T> = std::result::Result<T, PlanError>;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("failed to read {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "entry '{name}' is produced by both {} and {}",
        kept.display(),
        shadowed.display()
    )]
    NameCollision {
        name: String,
        kept: PathBuf,
        shadowed: PathBuf,
    },

    #[error("invalid stage order: {0}")]
    StageOrder(String),

    /// A diagnostic that is not on the allow-list.
    #[error("{}", .0.message)]
    Diagnostic(Box<Diagnostic>),

    #[error("artifact not found: {}", .0.display())]
    ArtifactMissing(PathBuf),

    #[error("invalid size snapshot {}: {message}", path.display())]
    Snapshot { path: PathBuf, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlanError {
    /// Returns true for errors raised by the diagnostics policy.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, PlanError::Diagnostic(_))
    }
}
