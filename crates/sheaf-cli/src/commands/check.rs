//! Check command implementation.
//!
//! Validates configuration, discovery and the stage chain without writing
//! anything.

use crate::cli::{CheckArgs, ProjectArgs};
use crate::commands::utils::{self, Overrides};
use crate::error::Result;
use crate::ui;
use sheaf_plan::{Discovery, EntrySet, PlanGenerator};

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load and validate the config
/// 2. Build the stage chain and validate its order
/// 3. Run discovery and report per-group counts and shadowed entries
pub async fn execute(args: CheckArgs, project: &ProjectArgs) -> Result<()> {
    ui::info("Checking configuration...");

    let root = utils::project_root(project)?;
    let loaded = utils::load_config(project, &root, &Overrides::with_env(args.env))?;
    let config = &loaded.config;

    match &loaded.source {
        Some(source) => ui::success(&format!(
            "Configuration is valid ({})",
            source.path().display()
        )),
        None => ui::warning("No sheaf config found, using defaults"),
    }

    let generator = PlanGenerator::from_config(config, &utils::plan_options(config))?;
    ui::success(&format!(
        "Stage chain: {}",
        generator.stages().names().join(" -> ")
    ));

    ui::info("Checking discovery groups...");
    let entries = Discovery::from_config(&root, config).discover_config(config)?;
    for (idx, group) in config.groups.iter().enumerate() {
        let count = group_count(&entries, idx);
        if count == 0 {
            ui::warning(&format!("  {} contributes no entries", group.pattern));
        } else {
            ui::success(&format!("  {} contributes {} entries", group.pattern, count));
        }
    }

    for collision in entries.collisions() {
        ui::warning(&format!(
            "  '{}' in {} is shadowed by {}",
            collision.name,
            collision.shadowed.display(),
            collision.kept.display()
        ));
    }

    ui::success(&format!("All checks passed: {} entries", entries.len()));
    Ok(())
}

/// Number of kept entries that came from group `idx`.
fn group_count(entries: &EntrySet, idx: usize) -> usize {
    entries.iter().filter(|e| e.group == idx).count()
}
