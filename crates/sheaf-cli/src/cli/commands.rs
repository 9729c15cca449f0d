use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::Format;

/// Available sheaf subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Discover entries and write the build plan as JSON
    ///
    /// Every unique entry name becomes one job with the resolve, interop,
    /// language-transform and size-report stages. The plan goes to stdout
    /// unless --out is given.
    Plan(PlanArgs),

    /// Validate the configuration without writing anything
    ///
    /// Loads the config, runs discovery, validates the stage chain and
    /// reports entries shadowed by an earlier group.
    Check(CheckArgs),

    /// Apply the diagnostics policy to build-engine output
    ///
    /// Reads one diagnostic per line (JSON objects or plain warning text)
    /// and stops at the first one that is not on the allow-list.
    Triage(TriageArgs),

    /// Measure built artifacts and compare with the size snapshot
    Size(SizeArgs),

    /// Write a default sheaf.toml to the project root
    Init(InitArgs),

    /// Print the JSON schema of the configuration file
    Schema(SchemaArgs),
}

/// Arguments for the plan command
#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// Build environment (overrides SHEAF_ENV and NODE_ENV)
    ///
    /// The "test" environment keeps test attributes in the output.
    #[arg(long, value_name = "ENV")]
    pub env: Option<String>,

    /// Write the plan to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Flat output directory for every artifact
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Module format of the artifacts
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,
}

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Build environment used for the check
    #[arg(long, value_name = "ENV")]
    pub env: Option<String>,
}

/// Arguments for the triage command
#[derive(Args, Debug, Default)]
pub struct TriageArgs {
    /// Read diagnostics from this file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

/// Arguments for the size command
#[derive(Args, Debug, Default)]
pub struct SizeArgs {
    /// Write the measured sizes to the snapshot file
    ///
    /// The snapshot is always written when none exists yet.
    #[arg(short, long)]
    pub update: bool,

    /// Build environment used to plan the artifacts
    #[arg(long, value_name = "ENV")]
    pub env: Option<String>,
}

/// Arguments for the init command
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Overwrite an existing sheaf.toml
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the schema command
#[derive(Args, Debug, Default)]
pub struct SchemaArgs {
    /// Write the schema to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}
