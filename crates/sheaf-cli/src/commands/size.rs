//! Size command implementation.
//!
//! Measures the artifact of every planned job and compares the result with
//! the stored size snapshot.

use crate::cli::{ProjectArgs, SizeArgs};
use crate::commands::plan::build_plan;
use crate::commands::utils::{self, Overrides};
use crate::error::Result;
use crate::ui;
use sheaf_plan::{ChangeKind, SizeChange, SizeSnapshot};
use std::path::Path;

/// Execute the size command.
///
/// # Process
///
/// 1. Plan the project to learn every artifact path
/// 2. Measure raw and gzipped sizes of each artifact
/// 3. Print them with deltas against the stored snapshot
/// 4. Write the snapshot with `--update`, or when there is none yet
pub async fn execute(args: SizeArgs, project: &ProjectArgs) -> Result<()> {
    let root = utils::project_root(project)?;
    let loaded = utils::load_config(project, &root, &Overrides::with_env(args.env))?;
    let snapshot_path = utils::resolve_path(&loaded.config.size.snapshot, &root);

    let plan = build_plan(&root, &loaded.config)?;
    let spinner = ui::Spinner::new("Measuring artifacts...");
    let current = match SizeSnapshot::measure_plan(&plan) {
        Ok(snapshot) => {
            spinner.clear();
            snapshot
        }
        Err(e) => {
            spinner.fail("Measuring failed");
            return Err(e.into());
        }
    };

    let previous = SizeSnapshot::read(&snapshot_path)?;
    let changes = compare(&current, previous.as_ref());
    ui::print_size_report(&changes, current.total());

    if args.update || previous.is_none() {
        current.write(&snapshot_path)?;
        ui::success(&format!(
            "Size snapshot written to {}",
            display_relative(&snapshot_path, &root)
        ));
    } else if changes.iter().any(|c| c.kind() != ChangeKind::Unchanged) {
        ui::warning("Sizes differ from the snapshot; run 'sheaf size --update' to record them");
    } else {
        ui::success("Sizes match the snapshot");
    }
    Ok(())
}

/// Changes from `previous` to `current`; everything is new without a snapshot.
pub fn compare(current: &SizeSnapshot, previous: Option<&SizeSnapshot>) -> Vec<SizeChange> {
    match previous {
        Some(previous) => current.diff(previous),
        None => current.diff(&SizeSnapshot::new()),
    }
}

fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheaf_plan::SizeEntry;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_compare_without_snapshot_marks_everything_added() {
        let mut current = SizeSnapshot::new();
        current.insert("add.js", SizeEntry { bundled: 10, gzipped: 8 });

        let changes = compare(&current, None);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind(), ChangeKind::Added);
    }

    #[tokio::test]
    async fn test_execute_writes_snapshot_once_then_keeps_it() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src/calculator");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("add.js"), "export const add = (a, b) => a + b;\n").unwrap();
        fs::create_dir_all(temp.path().join("build")).unwrap();
        fs::write(temp.path().join("build/add.js"), "exports.add = (a, b) => a + b;\n").unwrap();

        let project = ProjectArgs {
            cwd: Some(temp.path().to_path_buf()),
            config: None,
        };
        execute(SizeArgs::default(), &project).await.unwrap();

        let snapshot_path = temp.path().join(".size-snapshot.json");
        let first = SizeSnapshot::read(&snapshot_path).unwrap().unwrap();
        assert_eq!(first.get("add.js").unwrap().bundled, 31);

        fs::write(temp.path().join("build/add.js"), "exports.add = function () {};\n").unwrap();
        execute(SizeArgs::default(), &project).await.unwrap();
        assert_eq!(SizeSnapshot::read(&snapshot_path).unwrap().unwrap(), first);

        let args = SizeArgs {
            update: true,
            env: None,
        };
        execute(args, &project).await.unwrap();
        assert_ne!(SizeSnapshot::read(&snapshot_path).unwrap().unwrap(), first);
    }
}
