// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command operations using shell backend.
//!
//! ```text
//! cmd.rs --> ShellBackend --> git (ssh agent, https token)
//! ```

use crate::error::MirrorResult;
use std::path::Path;

use super::backend::{GitMutation, ShellBackend};

/// Execute git command with standard environment variables.
/// ALWAYS sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
///
/// This is exposed for internal use by ops.rs which needs raw command execution.
pub(super) fn git_command(args: &[&str], cwd: &Path) -> MirrorResult<String> {
    ShellBackend::git_command(args, cwd)
}

/// Clone every branch of a repository.
///
/// # Errors
///
/// Returns a `GitError` if the clone operation fails or the destination path is invalid.
pub fn clone(url: &str, dest: &Path) -> MirrorResult<()> {
    ShellBackend::clone(url, dest)
}

/// Detach HEAD at a revision, discarding local changes.
///
/// # Errors
///
/// Returns a `GitError` if the checkout operation fails.
pub fn checkout_detached(repo_path: &Path, rev: &str) -> MirrorResult<()> {
    ShellBackend::checkout_detached(repo_path, rev)
}

/// Create or reset a local branch to its remote-tracking counterpart.
///
/// # Errors
///
/// Returns a `GitError` if the checkout operation fails.
pub fn checkout_tracking(repo_path: &Path, remote: &str, branch: &str) -> MirrorResult<()> {
    ShellBackend::checkout_tracking(repo_path, remote, branch)
}

/// Point HEAD at a branch that does not exist yet.
///
/// # Errors
///
/// Returns a `GitError` if HEAD cannot be updated.
pub fn start_unborn_branch(repo_path: &Path, branch: &str) -> MirrorResult<()> {
    ShellBackend::start_unborn_branch(repo_path, branch)
}

/// Remove untracked and ignored files.
///
/// # Errors
///
/// Returns a `GitError` if the clean operation fails.
pub fn clean(repo_path: &Path) -> MirrorResult<()> {
    ShellBackend::clean(repo_path)
}

/// Stage the whole work tree.
///
/// # Errors
///
/// Returns a `GitError` if the add operation fails.
pub fn add_all(repo_path: &Path) -> MirrorResult<()> {
    ShellBackend::add_all(repo_path)
}

/// Commit the index.
///
/// # Errors
///
/// Returns a `GitError` if the commit operation fails.
pub fn commit(repo_path: &Path, message: &str, allow_empty: bool) -> MirrorResult<()> {
    ShellBackend::commit(repo_path, message, allow_empty)
}

/// Push a branch to the same name on the remote, without force.
///
/// # Errors
///
/// Returns a `GitError` if the push is rejected or the remote is unreachable.
pub fn push_branch(repo_path: &Path, remote: &str, branch: &str) -> MirrorResult<()> {
    ShellBackend::push_branch(repo_path, remote, branch)
}

/// Set git config value.
///
/// # Errors
///
/// Returns a `GitError` if the config value cannot be set.
pub fn set_config(repo_path: &Path, key: &str, value: &str) -> MirrorResult<()> {
    ShellBackend::set_config(repo_path, key, value)
}
