//! Command implementations for the sheaf CLI.
//!
//! - [`plan`] - Discover entries and write the build plan
//! - [`check`] - Configuration, discovery and stage-chain validation
//! - [`triage`] - Diagnostics allow-list enforcement
//! - [`size`] - Artifact size measurement and snapshot
//! - [`init`] - Default `sheaf.toml`
//! - [`schema`] - Configuration JSON schema
//!
//! Each command provides an `execute` function that takes its parsed
//! arguments and returns a Result.

pub mod check;
pub mod init;
pub mod plan;
pub mod schema;
pub mod size;
pub mod triage;
pub mod utils;

pub use check::execute as check_execute;
pub use init::execute as init_execute;
pub use plan::execute as plan_execute;
pub use schema::execute as schema_execute;
pub use size::execute as size_execute;
pub use triage::execute as triage_execute;
