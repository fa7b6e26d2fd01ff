// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! File tree snapshots and the pure diff between two of them.
//!
//! ```text
//! capture(dir) --> TreeSnapshot  { "src/lib.rs" -> File { exec, sha256 }, ... }
//!
//! diff_trees(dest, source) --> TreeDiff
//!   added     in source only
//!   modified  in both, entry differs
//!   removed   in dest only
//!
//! apply_diff(diff, source_root, dest_root)
//!   1. delete removed, prune empty dirs
//!   2. copy added + modified
//! ```
//!
//! Paths are relative to the tree root and always `/`-separated. VCS
//! metadata (`.git`) never appears in a snapshot.

pub mod apply;
pub mod snapshot;

#[cfg(test)]
mod tests;

use serde::Serialize;
use std::collections::BTreeMap;

pub use apply::apply_diff;

/// Kind of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Regular file; the executable bit is part of its identity.
    File { executable: bool },
    /// Symbolic link; its digest covers the link target.
    Symlink,
}

/// One file or symlink in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    kind: EntryKind,
    digest: String,
}

impl TreeEntry {
    #[must_use]
    pub fn file(digest: impl Into<String>, executable: bool) -> Self {
        Self {
            kind: EntryKind::File { executable },
            digest: digest.into(),
        }
    }

    #[must_use]
    pub fn symlink(digest: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Symlink,
            digest: digest.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Hex SHA-256 of the file content or link target.
    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

/// File tree of one checkout, keyed by relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSnapshot {
    entries: BTreeMap<String, TreeEntry>,
}

impl TreeSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, entry: TreeEntry) {
        self.entries.insert(path.into(), entry);
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&TreeEntry> {
        self.entries.get(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TreeEntry)> {
        self.entries.iter().map(|(path, entry)| (path.as_str(), entry))
    }
}

impl FromIterator<(String, TreeEntry)> for TreeSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, TreeEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Changes that turn a destination tree into the source tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeDiff {
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub removed: Vec<String>,
}

/// Entry counts of a [`TreeDiff`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub added: usize,
    pub modified: usize,
    pub removed: usize,
}

impl TreeDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> DiffStats {
        DiffStats {
            added: self.added.len(),
            modified: self.modified.len(),
            removed: self.removed.len(),
        }
    }
}

impl std::fmt::Display for DiffStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "+{} ~{} -{}", self.added, self.modified, self.removed)
    }
}

/// Computes the diff that makes `destination` identical to `source`.
///
/// Pure: no filesystem access. All three lists come out sorted.
#[must_use]
pub fn diff_trees(destination: &TreeSnapshot, source: &TreeSnapshot) -> TreeDiff {
    let mut diff = TreeDiff::default();

    for (path, entry) in &source.entries {
        match destination.entries.get(path) {
            None => diff.added.push(path.clone()),
            Some(existing) if existing != entry => diff.modified.push(path.clone()),
            Some(_) => {}
        }
    }

    diff.removed = destination
        .entries
        .keys()
        .filter(|path| !source.entries.contains_key(*path))
        .cloned()
        .collect();

    diff
}
