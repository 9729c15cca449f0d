//! Plan command implementation.
//!
//! Discovers entries, generates one build job per unique name and writes the
//! plan JSON for the build engine.

use crate::cli::{PlanArgs, ProjectArgs};
use crate::commands::utils::{self, Overrides};
use crate::error::Result;
use crate::ui;
use sheaf_config::SheafConfig;
use sheaf_plan::{BuildPlan, plan_project};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Execute the plan command.
///
/// # Process
///
/// 1. Load the config, with `--env`, `--out-dir` and `--format` on top
/// 2. Discover entries group by group (first group wins on collisions)
/// 3. Generate the jobs and serialize the plan
/// 4. Write it to `--out` or stdout and print a summary on stderr
pub async fn execute(args: PlanArgs, project: &ProjectArgs) -> Result<()> {
    let start = Instant::now();
    let root = utils::project_root(project)?;
    let overrides = Overrides {
        env: args.env,
        out_dir: args.out_dir,
        format: args.format.map(Into::into),
    };

    let loaded = utils::load_config(project, &root, &overrides)?;
    let plan = build_plan(&root, &loaded.config)?;
    let json = plan.to_json_pretty()?;
    utils::write_output(args.out.as_deref(), &json).await?;

    ui::print_plan_summary(&plan, start.elapsed());
    if let Some(out) = &args.out {
        ui::success(&format!("Plan written to {}", out.display()));
    }
    Ok(())
}

/// Discover and generate the plan for `root`.
pub fn build_plan(root: &Path, config: &SheafConfig) -> Result<BuildPlan> {
    let spinner = ui::Spinner::new("Discovering entries...");
    let plan = match plan_project(root, config, utils::plan_options(config)) {
        Ok(plan) => {
            spinner.clear();
            plan
        }
        Err(e) => {
            spinner.fail("Discovery failed");
            return Err(e.into());
        }
    };

    if plan.is_empty() {
        ui::warning("No entries matched any discovery group");
    }
    info!(
        "planned {} jobs for env {} (strip test attributes: {})",
        plan.len(),
        plan.env,
        plan.options.strip_test_attributes
    );

    Ok(plan)
}
