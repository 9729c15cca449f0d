//! Init command implementation.
//!
//! Writes a `sheaf.toml` with the default groups, diagnostics allow-list and
//! transform settings.

use crate::cli::{InitArgs, ProjectArgs};
use crate::commands::utils;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;
use sheaf_config::{CONFIG_FILE_NAMES, SheafConfig};

const HEADER: &str = "\
# sheaf configuration
#
# Entries are discovered group by group; when two groups produce the same
# file name the earlier group wins.

";

/// Execute the init command.
pub async fn execute(args: InitArgs, project: &ProjectArgs) -> Result<()> {
    let root = utils::project_root(project)?;
    let path = root.join(CONFIG_FILE_NAMES[0]);

    if path.exists() && !args.force {
        return Err(CliError::AlreadyExists(path));
    }

    tokio::fs::write(&path, default_config_toml()?)
        .await
        .with_path(&path)?;

    ui::success(&format!("Created {}", path.display()));
    ui::info("Next: adjust [[groups]] and run 'sheaf check'");
    Ok(())
}

/// Default configuration rendered as `sheaf.toml`.
pub fn default_config_toml() -> Result<String> {
    let body = SheafConfig::default().to_toml_string()?;
    Ok(format!("{HEADER}{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheaf_config::ConfigLoader;
    use std::fs;
    use tempfile::TempDir;

    fn project_in(temp: &TempDir) -> ProjectArgs {
        ProjectArgs {
            cwd: Some(temp.path().to_path_buf()),
            config: None,
        }
    }

    #[tokio::test]
    async fn test_init_writes_loadable_defaults() {
        let temp = TempDir::new().unwrap();
        execute(InitArgs::default(), &project_in(&temp)).await.unwrap();

        let content = fs::read_to_string(temp.path().join("sheaf.toml")).unwrap();
        assert!(content.starts_with("# sheaf configuration"));
        assert!(content.contains("src/calculator/*.js"));

        let loaded = ConfigLoader::new(temp.path()).without_env().load().unwrap();
        assert_eq!(loaded.config, SheafConfig::default());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("sheaf.toml"), "out_dir = \"lib\"\n").unwrap();

        let err = execute(InitArgs::default(), &project_in(&temp))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::AlreadyExists(_)));
        assert_eq!(
            fs::read_to_string(temp.path().join("sheaf.toml")).unwrap(),
            "out_dir = \"lib\"\n"
        );

        execute(InitArgs { force: true }, &project_in(&temp))
            .await
            .unwrap();
        assert!(
            fs::read_to_string(temp.path().join("sheaf.toml"))
                .unwrap()
                .contains("[[groups]]")
        );
    }
}
