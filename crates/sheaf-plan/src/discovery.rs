//! Entry discovery from glob pattern groups.
//!
//! Each group is a glob relative to the project root. Matches inside a
//! group are sorted, groups keep their declared order, and the first file
//! to claim a name wins.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern, glob_with};
use sheaf_config::{CollisionPolicy, SheafConfig};
use tracing::{debug, warn};

use crate::entry::{EntryDescriptor, EntrySet};
use crate::error::{PlanError, Result};

/// Discover files matching a glob pattern relative to `root`.
///
/// Returns matching regular files as paths relative to `root`, sorted.
/// An empty match set is not an error.
pub fn discover_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    Pattern::new(pattern).map_err(|e| PlanError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    // The root itself may contain glob metacharacters.
    let escaped_root = Pattern::escape(&root.to_string_lossy());
    let full_pattern = Path::new(&escaped_root).join(pattern);
    let full_pattern = full_pattern.to_string_lossy();

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let paths = glob_with(&full_pattern, options).map_err(|e| PlanError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| PlanError::Walk {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;

        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        files.push(relative);
    }

    files.sort();
    Ok(files)
}

/// Source discovery over ordered pattern groups.
///
/// # Example
///
/// ```no_run
/// use sheaf_plan::Discovery;
///
/// let entries = Discovery::new(".")
///     .discover(&["src/calculator/*.js", "src/utils/calculator/*.js"])
///     .unwrap();
/// println!("{} entries", entries.len());
/// ```
#[derive(Debug, Clone)]
pub struct Discovery {
    root: PathBuf,
    on_collision: CollisionPolicy,
}

impl Discovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            on_collision: CollisionPolicy::default(),
        }
    }

    /// Discovery configured from a loaded project config.
    pub fn from_config(root: impl AsRef<Path>, config: &SheafConfig) -> Self {
        Self::new(root).with_collision_policy(config.on_collision)
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.on_collision = policy;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run every group in order and collapse duplicate names.
    pub fn discover<S: AsRef<str>>(&self, patterns: &[S]) -> Result<EntrySet> {
        let mut entries = EntrySet::new();

        for (group, pattern) in patterns.iter().enumerate() {
            let pattern = pattern.as_ref();
            let files = discover_files(&self.root, pattern)?;
            debug!(pattern, matches = files.len(), "scanned discovery group");

            for file in files {
                let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
                    warn!("skipping non UTF-8 file name: {}", file.display());
                    continue;
                };
                let directory = file.parent().map(Path::to_path_buf).unwrap_or_default();

                let entry = EntryDescriptor::new(name, directory, group);
                if let Some(collision) = entries.insert(entry) {
                    if self.on_collision == CollisionPolicy::Error {
                        return Err(PlanError::NameCollision {
                            name: collision.name,
                            kept: collision.kept,
                            shadowed: collision.shadowed,
                        });
                    }
                    warn!(
                        "entry '{}' from {} shadowed by {}",
                        collision.name,
                        collision.shadowed.display(),
                        collision.kept.display()
                    );
                }
            }
        }

        Ok(entries)
    }

    /// Run the groups declared in `config`.
    pub fn discover_config(&self, config: &SheafConfig) -> Result<EntrySet> {
        let patterns: Vec<&str> = config.groups.iter().map(|g| g.pattern.as_str()).collect();
        self.discover(&patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export const x = 1;\n").unwrap();
    }

    #[test]
    fn discover_files_returns_sorted_relative_paths() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/b.js");
        touch(dir.path(), "src/a.js");
        touch(dir.path(), "src/readme.md");

        let files = discover_files(dir.path(), "src/*.js").unwrap();
        assert_eq!(files, vec![PathBuf::from("src/a.js"), PathBuf::from("src/b.js")]);
    }

    #[test]
    fn directories_are_not_entries() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/nested.js")).unwrap();
        touch(dir.path(), "src/a.js");

        let files = discover_files(dir.path(), "src/*.js").unwrap();
        assert_eq!(files, vec![PathBuf::from("src/a.js")]);
    }

    #[test]
    fn empty_match_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let entries = Discovery::new(dir.path()).discover(&["src/*.js"]).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = Discovery::new(dir.path()).discover(&["src/[*.js"]).unwrap_err();
        assert!(matches!(err, PlanError::InvalidPattern { .. }));
    }

    #[test]
    fn collision_error_policy_fails_fast() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "one/same.js");
        touch(dir.path(), "two/same.js");

        let err = Discovery::new(dir.path())
            .with_collision_policy(CollisionPolicy::Error)
            .discover(&["one/*.js", "two/*.js"])
            .unwrap_err();

        match err {
            PlanError::NameCollision { name, kept, shadowed } => {
                assert_eq!(name, "same.js");
                assert_eq!(kept, PathBuf::from("one"));
                assert_eq!(shadowed, PathBuf::from("two"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn root_with_glob_metacharacters_is_escaped() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("proj[1]");
        touch(&root, "src/a.js");

        let entries = Discovery::new(&root).discover(&["src/*.js"]).unwrap();
        assert!(entries.contains("a.js"));
    }
}
