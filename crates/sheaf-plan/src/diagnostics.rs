//! Fail-fast diagnostics policy.
//!
//! Every warning a stage emits is fatal unless its message contains an
//! allow-listed substring. Errors are always fatal. The first fatal
//! diagnostic closes the channel for the rest of the run.

use std::fmt;

use serde::{Deserialize, Serialize};
use sheaf_config::DiagnosticsConfig;
use tracing::debug;

use crate::error::{PlanError, Result};

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Warning,
    Error,
}

/// A message emitted by a stage while a job runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(default)]
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Stage that emitted the diagnostic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    /// Job (entry name) the diagnostic belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            code: None,
            stage: None,
            job: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            ..Self::warning(message)
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    pub fn with_job(mut self, job: impl Into<String>) -> Self {
        self.job = Some(job.into());
        self
    }

    /// Parse one line of engine output.
    ///
    /// Lines holding a JSON object are read as a [`Diagnostic`]; any other
    /// non-blank line is a warning with the line as message.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if line.starts_with('{') {
            if let Ok(diagnostic) = serde_json::from_str::<Diagnostic>(line) {
                return Some(diagnostic);
            }
        }
        Some(Self::warning(line))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{level}")?;
        if let Some(code) = &self.code {
            write!(f, "[{code}]")?;
        }
        match (&self.job, &self.stage) {
            (Some(job), Some(stage)) => write!(f, " ({job}, {stage})")?,
            (Some(job), None) => write!(f, " ({job})")?,
            (None, Some(stage)) => write!(f, " ({stage})")?,
            (None, None) => {}
        }
        write!(f, ": {}", self.message)
    }
}

/// Allow-list of warning substrings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticPolicy {
    pub allow: Vec<String>,
}

impl Default for DiagnosticPolicy {
    fn default() -> Self {
        Self::from_config(&DiagnosticsConfig::default())
    }
}

impl DiagnosticPolicy {
    pub fn new<I, S>(allow: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allow: allow.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &DiagnosticsConfig) -> Self {
        Self::new(config.allow.iter().cloned())
    }

    /// Whether the diagnostic is a suppressible warning.
    pub fn allows(&self, diagnostic: &Diagnostic) -> bool {
        diagnostic.severity == Severity::Warning
            && self.allow.iter().any(|s| diagnostic.message.contains(s.as_str()))
    }

    /// `Ok` when the diagnostic is suppressed, the escalated error otherwise.
    pub fn check(&self, diagnostic: &Diagnostic) -> Result<()> {
        if self.allows(diagnostic) {
            Ok(())
        } else {
            Err(PlanError::Diagnostic(Box::new(diagnostic.clone())))
        }
    }
}

/// Diagnostics channel for one run.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    policy: DiagnosticPolicy,
    suppressed: Vec<Diagnostic>,
    fatal: Option<Diagnostic>,
}

impl Diagnostics {
    pub fn new(policy: DiagnosticPolicy) -> Self {
        Self {
            policy,
            suppressed: Vec::new(),
            fatal: None,
        }
    }

    /// Feed one diagnostic through the policy.
    ///
    /// After the first fatal diagnostic every call fails with that same
    /// diagnostic.
    pub fn report(&mut self, diagnostic: Diagnostic) -> Result<()> {
        if let Some(fatal) = &self.fatal {
            return Err(PlanError::Diagnostic(Box::new(fatal.clone())));
        }

        match self.policy.check(&diagnostic) {
            Ok(()) => {
                debug!("suppressed allow-listed {}", diagnostic);
                self.suppressed.push(diagnostic);
                Ok(())
            }
            Err(err) => {
                self.fatal = Some(diagnostic);
                Err(err)
            }
        }
    }

    pub fn policy(&self) -> &DiagnosticPolicy {
        &self.policy
    }

    pub fn suppressed(&self) -> &[Diagnostic] {
        &self.suppressed
    }

    pub fn fatal(&self) -> Option<&Diagnostic> {
        self.fatal.as_ref()
    }

    pub fn is_failed(&self) -> bool {
        self.fatal.is_some()
    }
}
