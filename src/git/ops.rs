// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Composite git operations used by the mirror job.
//!
//! ```text
//! ensure_git_available  git on PATH (which)
//! list_remote_heads     ls-remote --heads (reachability precondition)
//! configure_committer   user.name/email, no signing, in one clone
//! commit_message        full message of a commit
//! ```

use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::error::{MirrorResult, ProcessError};

use super::cmd::{git_command, set_config};
use super::redact_credentials;

/// Locate the `git` executable.
///
/// # Errors
///
/// Returns `ProcessError::ExecutableNotFound` if `git` is not on `PATH`.
pub fn ensure_git_available() -> MirrorResult<PathBuf> {
    let path = which::which("git").map_err(|_| ProcessError::ExecutableNotFound {
        name: "git".to_string(),
    })?;
    trace!(git = %path.display(), "found git");
    Ok(path)
}

/// List branch heads of a remote without cloning it.
///
/// Doubles as the reachability check: a missing repository, a bad
/// credential and a network failure all fail here.
///
/// # Errors
///
/// Returns a `GitError` if `git ls-remote` fails.
pub fn list_remote_heads(url: &str, cwd: &Path) -> MirrorResult<Vec<String>> {
    let output = git_command(&["ls-remote", "--heads", url], cwd)?;

    let heads: Vec<String> = output
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .filter_map(|refname| refname.strip_prefix("refs/heads/"))
        .map(str::to_string)
        .collect();

    debug!(url = %redact_credentials(url), heads = heads.len(), "remote reachable");
    Ok(heads)
}

/// Configure the identity mirror commits are made with.
///
/// Signing is disabled so a global `commit.gpgsign` on the runner cannot
/// make commits fail.
///
/// # Errors
///
/// Returns a `GitError` if any config value cannot be set.
pub fn configure_committer(repo_path: &Path, name: &str, email: &str) -> MirrorResult<()> {
    set_config(repo_path, "user.name", name)?;
    set_config(repo_path, "user.email", email)?;
    set_config(repo_path, "commit.gpgsign", "false")?;
    Ok(())
}

/// Full message of the commit `rev` resolves to.
///
/// # Errors
///
/// Returns a `GitError` if `rev` does not resolve to a commit.
pub fn commit_message(repo_path: &Path, rev: &str) -> MirrorResult<String> {
    git_command(&["log", "-1", "--format=%B", rev, "--"], repo_path)
}
