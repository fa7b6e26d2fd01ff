// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pure per-branch decisions.
//!
//! ```text
//! is_up_to_date(force, tip, dest msg)   skip without comparing trees?
//! plan_branch(source, worktree, exists) --> BranchPlan { diff, changes, action }
//!    !exists         --> Create
//!    exists, diff    --> Update
//!    exists, no diff --> Unchanged
//! ```

use serde::Serialize;
use std::fmt;

use crate::tree::{DiffStats, TreeDiff, TreeSnapshot, diff_trees};

/// Trailer key recording which source commit a mirror commit copies.
pub const SOURCE_COMMIT_TRAILER: &str = "Source-Commit";

/// What has to happen to one destination branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchAction {
    /// Branch is new in the destination.
    Create,
    /// Branch exists and its tree differs from the source.
    Update,
    /// Branch exists with an identical tree.
    Unchanged,
}

impl fmt::Display for BranchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Unchanged => "unchanged",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPlan {
    /// Changes that turn the working copy into the source tree.
    pub diff: TreeDiff,
    /// Changes the destination branch sees; a new branch starts from an
    /// empty tree, whatever the working copy held.
    pub changes: DiffStats,
    pub action: BranchAction,
}

/// Plans one branch.
///
/// `worktree` is the working copy as it stands after switching to the
/// branch; for a new branch that is whatever the previous branch left.
#[must_use]
pub fn plan_branch(
    source: &TreeSnapshot,
    worktree: &TreeSnapshot,
    exists_in_destination: bool,
) -> BranchPlan {
    let diff = diff_trees(worktree, source);
    let (action, changes) = if !exists_in_destination {
        let changes = diff_trees(&TreeSnapshot::new(), source).stats();
        (BranchAction::Create, changes)
    } else if diff.is_empty() {
        (BranchAction::Unchanged, diff.stats())
    } else {
        (BranchAction::Update, diff.stats())
    };
    BranchPlan {
        diff,
        changes,
        action,
    }
}

/// Message of a mirror commit copying `source_tip`.
#[must_use]
pub fn mirror_commit_message(base: &str, source_tip: &str) -> String {
    format!("{}\n\n{SOURCE_COMMIT_TRAILER}: {source_tip}", base.trim_end())
}

/// Source commit recorded in a mirror commit message, if any.
///
/// The last trailer wins.
#[must_use]
pub fn recorded_source_commit(message: &str) -> Option<&str> {
    message.lines().rev().find_map(|line| {
        line.trim()
            .strip_prefix(SOURCE_COMMIT_TRAILER)?
            .strip_prefix(':')
            .map(str::trim)
            .filter(|sha| !sha.is_empty())
    })
}

/// Whether a branch can be skipped without a tree comparison.
///
/// Only when `force_sync` is off and the destination tip already records
/// `source_tip`.
#[must_use]
pub fn is_up_to_date(force_sync: bool, source_tip: &str, destination_message: Option<&str>) -> bool {
    !force_sync
        && destination_message
            .and_then(recorded_source_commit)
            .is_some_and(|recorded| recorded.eq_ignore_ascii_case(source_tip))
}
