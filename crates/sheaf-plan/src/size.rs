//! Artifact size measurement and the size snapshot file.
//!
//! The snapshot maps artifact names to their raw and gzipped byte counts
//! so that size regressions show up as diffs between runs.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlanError, Result};
use crate::plan::BuildPlan;

/// Byte counts of one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeEntry {
    pub bundled: u64,
    pub gzipped: u64,
}

/// Measure an artifact without modifying it.
pub fn measure(path: &Path) -> Result<SizeEntry> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(PlanError::ArtifactMissing(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(SizeEntry {
        bundled: bytes.len() as u64,
        gzipped: gzip_len(&bytes)?,
    })
}

fn gzip_len(bytes: &[u8]) -> io::Result<u64> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?.len() as u64)
}

/// How an artifact's size moved between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    Changed,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeChange {
    pub name: String,
    pub previous: Option<SizeEntry>,
    pub current: Option<SizeEntry>,
}

impl SizeChange {
    pub fn kind(&self) -> ChangeKind {
        match (self.previous, self.current) {
            (None, Some(_)) => ChangeKind::Added,
            (Some(_), None) => ChangeKind::Removed,
            (Some(prev), Some(cur)) if prev == cur => ChangeKind::Unchanged,
            _ => ChangeKind::Changed,
        }
    }

    /// Change in raw bytes (current minus previous).
    pub fn bundled_delta(&self) -> i64 {
        delta(self.previous.map(|e| e.bundled), self.current.map(|e| e.bundled))
    }

    /// Change in gzipped bytes (current minus previous).
    pub fn gzipped_delta(&self) -> i64 {
        delta(self.previous.map(|e| e.gzipped), self.current.map(|e| e.gzipped))
    }
}

fn delta(previous: Option<u64>, current: Option<u64>) -> i64 {
    current.unwrap_or(0) as i64 - previous.unwrap_or(0) as i64
}

/// Recorded sizes of every artifact, keyed by artifact name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeSnapshot {
    entries: BTreeMap<String, SizeEntry>,
}

impl SizeSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure the output of every job in the plan.
    pub fn measure_plan(plan: &BuildPlan) -> Result<Self> {
        let mut snapshot = Self::new();
        for job in &plan.jobs {
            let path = plan.artifact_path(job);
            let entry = measure(&path)?;
            debug!(
                "{}: {} bytes, {} gzipped",
                job.name, entry.bundled, entry.gzipped
            );
            snapshot.insert(job.name.clone(), entry);
        }
        Ok(snapshot)
    }

    /// Read a snapshot file; `None` when it does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| PlanError::Snapshot {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        fs::write(path, content)?;
        Ok(())
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: SizeEntry) {
        self.entries.insert(name.into(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&SizeEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SizeEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Sum of raw and gzipped sizes.
    pub fn total(&self) -> SizeEntry {
        self.entries.values().fold(
            SizeEntry {
                bundled: 0,
                gzipped: 0,
            },
            |acc, e| SizeEntry {
                bundled: acc.bundled + e.bundled,
                gzipped: acc.gzipped + e.gzipped,
            },
        )
    }

    /// Per-artifact changes from `previous` to `self`, sorted by name.
    pub fn diff(&self, previous: &SizeSnapshot) -> Vec<SizeChange> {
        let mut names: Vec<&String> = self.entries.keys().chain(previous.entries.keys()).collect();
        names.sort();
        names.dedup();

        names
            .into_iter()
            .map(|name| SizeChange {
                name: name.clone(),
                previous: previous.entries.get(name).copied(),
                current: self.entries.get(name).copied(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(bundled: u64, gzipped: u64) -> SizeEntry {
        SizeEntry { bundled, gzipped }
    }

    #[test]
    fn measure_reports_raw_and_gzip_sizes_without_touching_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("add.js");
        let content = "exports.add = (a, b) => a + b;\n".repeat(50);
        fs::write(&path, &content).unwrap();

        let size = measure(&path).unwrap();
        assert_eq!(size.bundled, content.len() as u64);
        assert!(size.gzipped > 0);
        assert!(size.gzipped < size.bundled);
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn measure_missing_artifact() {
        let dir = TempDir::new().unwrap();
        let err = measure(&dir.path().join("nope.js")).unwrap_err();
        assert!(matches!(err, PlanError::ArtifactMissing(_)));
    }

    #[test]
    fn diff_classifies_changes() {
        let mut previous = SizeSnapshot::new();
        previous.insert("add.js", entry(100, 50));
        previous.insert("old.js", entry(10, 5));
        previous.insert("sub.js", entry(80, 40));

        let mut current = SizeSnapshot::new();
        current.insert("add.js", entry(120, 55));
        current.insert("new.js", entry(30, 20));
        current.insert("sub.js", entry(80, 40));

        let changes = current.diff(&previous);
        let kinds: Vec<_> = changes.iter().map(|c| (c.name.as_str(), c.kind())).collect();
        assert_eq!(
            kinds,
            [
                ("add.js", ChangeKind::Changed),
                ("new.js", ChangeKind::Added),
                ("old.js", ChangeKind::Removed),
                ("sub.js", ChangeKind::Unchanged),
            ]
        );
        assert_eq!(changes[0].bundled_delta(), 20);
        assert_eq!(changes[2].gzipped_delta(), -5);
    }

    #[test]
    fn snapshot_file_round_trip_and_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".size-snapshot.json");
        assert!(SizeSnapshot::read(&path).unwrap().is_none());

        let mut snapshot = SizeSnapshot::new();
        snapshot.insert("add.js", entry(100, 50));
        snapshot.write(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        insta::assert_snapshot!(written.trim_end(), @r###"
        {
          "add.js": {
            "bundled": 100,
            "gzipped": 50
          }
        }
        "###);
        assert_eq!(SizeSnapshot::read(&path).unwrap(), Some(snapshot));
    }

    #[test]
    fn corrupt_snapshot_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".size-snapshot.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            SizeSnapshot::read(&path),
            Err(PlanError::Snapshot { .. })
        ));
    }

    #[test]
    fn total_sums_entries() {
        let mut snapshot = SizeSnapshot::new();
        snapshot.insert("a.js", entry(10, 4));
        snapshot.insert("b.js", entry(5, 3));
        assert_eq!(snapshot.total(), entry(15, 7));
    }
}
