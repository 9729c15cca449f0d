//! Entry discovery and build-plan generation.
//!
//! The pipeline is single-pass and synchronous:
//!
//! 1. [`Discovery`] scans ordered glob groups and collapses duplicate entry
//!    names into an [`EntrySet`] (first occurrence wins).
//! 2. [`PlanGenerator`] maps every entry onto a [`BuildJob`] carrying the
//!    [`StageChain`] and the [`DiagnosticPolicy`] the engine must apply.
//! 3. After the engine ran, [`Diagnostics`] triages what it emitted and
//!    [`SizeSnapshot`] records the artifact sizes.
//!
//! # Example
//!
//! ```no_run
//! use sheaf_config::SheafConfig;
//! use sheaf_plan::{PlanOptions, plan_project};
//! use std::path::Path;
//!
//! let config = SheafConfig::default();
//! let options = PlanOptions::for_env(config.environment());
//! let plan = plan_project(Path::new("."), &config, options).unwrap();
//! for job in &plan.jobs {
//!     println!("{} -> {}", job.input.display(), job.output.display());
//! }
//! ```

pub mod diagnostics;
pub mod discovery;
pub mod entry;
pub mod error;
pub mod plan;
pub mod rules;
pub mod size;
pub mod stage;

pub use diagnostics::{Diagnostic, DiagnosticPolicy, Diagnostics, Severity};
pub use discovery::{Discovery, discover_files};
pub use entry::{Collision, EntryDescriptor, EntrySet};
pub use error::{PlanError, Result};
pub use plan::{BuildJob, BuildPlan, OutputSettings, PlanGenerator, plan_project};
pub use rules::{PlanOptions, TransformRules};
pub use size::{ChangeKind, SizeChange, SizeEntry, SizeSnapshot, measure};
pub use stage::{Position, StageChain, StageDescriptor, StageKind};
