// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git query operations.
//!
//! ```text
//! query.rs --> GixBackend   --> .git/ (no subprocess)
//!          \-> ShellBackend --> git status (commit decision)
//! ```
//!
//! Branch enumeration goes through gix. Whether a commit is needed is asked
//! of `git status` itself, so the answer matches what `git commit` will see.

use crate::error::MirrorResult;
use std::path::Path;

use super::backend::{GitQuery, GixBackend, RemoteBranch, ShellBackend};

/// Branches of `remote` known to the repository at `path`, sorted.
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or reference iteration fails.
pub fn remote_branches(path: &Path, remote: &str) -> MirrorResult<Vec<RemoteBranch>> {
    GixBackend::remote_branches(path, remote)
}

/// Whether the index or work tree differ from HEAD.
///
/// # Errors
///
/// Returns a `GitError` if `git status` fails.
pub fn has_uncommitted_changes(path: &Path) -> MirrorResult<bool> {
    ShellBackend::has_uncommitted_changes(path)
}
