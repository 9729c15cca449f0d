//! Entry descriptors and the first-seen-wins entry set.

use std::path::PathBuf;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};

/// A discovered build input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDescriptor {
    /// File name of the entry, unique across the set
    pub name: String,
    /// Containing directory, relative to the project root
    pub directory: PathBuf,
    /// Index of the discovery group that produced the entry
    pub group: usize,
}

impl EntryDescriptor {
    pub fn new(name: impl Into<String>, directory: impl Into<PathBuf>, group: usize) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
            group,
        }
    }

    /// Path of the entry file: `directory/name`.
    pub fn input(&self) -> PathBuf {
        self.directory.join(&self.name)
    }
}

/// Two different files that map to the same entry name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    pub name: String,
    /// Directory of the entry that was kept
    pub kept: PathBuf,
    /// Directory of the entry that was dropped
    pub shadowed: PathBuf,
    pub kept_group: usize,
    pub shadowed_group: usize,
}

/// Entry descriptors keyed by name. The first insertion of a name wins.
#[derive(Debug, Clone, Default)]
pub struct EntrySet {
    entries: IndexMap<String, EntryDescriptor>,
    collisions: Vec<Collision>,
}

impl EntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry unless its name is already taken.
    ///
    /// Returns the collision when a different file already owns the name.
    /// Re-inserting the very same file is a no-op.
    pub fn insert(&mut self, entry: EntryDescriptor) -> Option<Collision> {
        match self.entries.entry(entry.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
                None
            }
            Entry::Occupied(slot) => {
                let kept = slot.get();
                if kept.directory == entry.directory {
                    return None;
                }
                let collision = Collision {
                    name: entry.name,
                    kept: kept.directory.clone(),
                    shadowed: entry.directory,
                    kept_group: kept.group,
                    shadowed_group: entry.group,
                };
                self.collisions.push(collision.clone());
                Some(collision)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&EntryDescriptor> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &EntryDescriptor> {
        self.entries.values()
    }

    /// Entries sorted by name.
    pub fn sorted(&self) -> Vec<&EntryDescriptor> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }
}

impl FromIterator<EntryDescriptor> for EntrySet {
    fn from_iter<I: IntoIterator<Item = EntryDescriptor>>(iter: I) -> Self {
        let mut set = EntrySet::new();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}
