//! Command-line interface definition for sheaf.
//!
//! # Command Structure
//!
//! - `sheaf plan` - Discover entries and write the build plan
//! - `sheaf check` - Validate configuration, discovery and stage chain
//! - `sheaf triage` - Apply the diagnostics policy to engine output
//! - `sheaf size` - Measure artifacts against the size snapshot
//! - `sheaf init` - Write a default `sheaf.toml`
//! - `sheaf schema` - Print the configuration JSON schema

mod commands;
pub mod enums;

use clap::{Args, Parser};
use std::path::PathBuf;

pub use commands::{CheckArgs, Command, InitArgs, PlanArgs, SchemaArgs, SizeArgs, TriageArgs};
pub use enums::*;

/// sheaf - build plans for multi-entry libraries
#[derive(Parser, Debug)]
#[command(
    name = "sheaf",
    version,
    about = "Build plans for multi-entry JavaScript libraries",
    long_about = "sheaf discovers entry files from ordered glob groups, collapses duplicate\n\
                  names (first group wins) and emits one build job per entry for an external\n\
                  bundling engine. It also triages the engine's warnings against an\n\
                  allow-list and tracks artifact sizes."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Where the project lives and which config file to read.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Config file to use instead of discovering one in the project root
    ///
    /// Accepts sheaf.toml, *.json or package.json (reads its "sheaf" field).
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
