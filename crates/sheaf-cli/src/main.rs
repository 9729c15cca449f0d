//! sheaf CLI - build-plan generator for multi-entry libraries.
//!
//! Parses arguments, sets up logging and dispatches to the command
//! implementations.

use clap::Parser;
use miette::Result;
use sheaf_cli::{cli, commands, error, logger, ui};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let project = args.project;
    let result = match args.command {
        cli::Command::Plan(plan_args) => commands::plan_execute(plan_args, &project).await,
        cli::Command::Check(check_args) => commands::check_execute(check_args, &project).await,
        cli::Command::Triage(triage_args) => commands::triage_execute(triage_args, &project).await,
        cli::Command::Size(size_args) => commands::size_execute(size_args, &project).await,
        cli::Command::Init(init_args) => commands::init_execute(init_args, &project).await,
        cli::Command::Schema(schema_args) => commands::schema_execute(schema_args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
