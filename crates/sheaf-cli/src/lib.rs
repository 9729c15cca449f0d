//! sheaf CLI - plan, triage and size-check multi-entry library builds.
//!
//! This crate exposes `sheaf-config` and `sheaf-plan` on the command line.
//! The external build engine consumes the plan JSON written by `sheaf plan`
//! and pipes its diagnostics through `sheaf triage`.
//!
//! # Architecture
//!
//! - [`cli`] - clap definitions of the commands and global flags
//! - [`commands`] - one module per command, each with an async `execute`
//! - [`error`] - `CliError` with actionable hints and miette rendering
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages, tables and spinners on stderr
//!
//! # Example
//!
//! ```rust,no_run
//! use sheaf_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
