// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)  --> GixBackend (pure Rust gix)
//! GitMutation (write) --> ShellBackend (git CLI)
//! ```

use crate::error::{GitError, GixError, MirrorResult};
use std::path::Path;
use tracing::debug;

use super::redact_credentials;

/// A branch as seen through a remote-tracking ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBranch {
    /// Branch name without the `refs/remotes/<remote>/` prefix.
    pub name: String,
    /// Full hex id of the tip commit.
    pub tip: String,
}

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
///
/// Implementors provide methods to inspect repository state without modification.
pub trait GitQuery {
    /// List branches under `refs/remotes/<remote>/`, symbolic `HEAD` excluded,
    /// sorted by name.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or reference iteration fails.
    fn remote_branches(path: &Path, remote: &str) -> MirrorResult<Vec<RemoteBranch>>;
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
///
/// These operations use shell git for:
/// - The runner's SSH agent and deploy keys
/// - Credential handling over HTTPS
/// - Full git CLI compatibility
pub trait GitMutation {
    /// Clone every branch of `url` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the clone operation fails or the destination path is invalid.
    fn clone(url: &str, dest: &Path) -> MirrorResult<()>;

    /// Detach HEAD at `rev`, discarding local changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout operation fails.
    fn checkout_detached(repo_path: &Path, rev: &str) -> MirrorResult<()>;

    /// Create or reset local `branch` to `<remote>/<branch>` and track it.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout operation fails.
    fn checkout_tracking(repo_path: &Path, remote: &str, branch: &str) -> MirrorResult<()>;

    /// Point HEAD at an unborn `branch`, so the next commit starts it.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if HEAD cannot be updated.
    fn start_unborn_branch(repo_path: &Path, branch: &str) -> MirrorResult<()>;

    /// Remove every untracked and ignored file.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the clean operation fails.
    fn clean(repo_path: &Path) -> MirrorResult<()>;

    /// Stage everything in the work tree, ignored files included.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the add operation fails.
    fn add_all(repo_path: &Path) -> MirrorResult<()>;

    /// Commit the index.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the commit operation fails.
    fn commit(repo_path: &Path, message: &str, allow_empty: bool) -> MirrorResult<()>;

    /// Push local `branch` to the same name on `remote`, setting upstream.
    /// Never forces.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the remote rejects the push or is unreachable.
    fn push_branch(repo_path: &Path, remote: &str, branch: &str) -> MirrorResult<()>;

    /// Set git config value.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the config value cannot be set.
    fn set_config(repo_path: &Path, key: &str, value: &str) -> MirrorResult<()>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Provides read-only operations without spawning subprocesses.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn remote_branches(path: &Path, remote: &str) -> MirrorResult<Vec<RemoteBranch>> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let prefix = format!("refs/remotes/{remote}/");

        let platform = repo
            .references()
            .map_err(|e| GitError::Gix(GixError::References(e.to_string())))?;
        let iter = platform
            .remote_branches()
            .map_err(|e| GitError::Gix(GixError::References(e.to_string())))?;

        let mut branches = Vec::new();
        for reference in iter {
            let reference =
                reference.map_err(|e| GitError::Gix(GixError::References(e.to_string())))?;
            let full_name = reference.name().as_bstr().to_string();

            let Some(name) = full_name.strip_prefix(&prefix) else {
                continue;
            };
            if name == "HEAD" {
                continue;
            }
            let name = name.to_string();

            let tip = reference
                .into_fully_peeled_id()
                .map_err(|e| GitError::Gix(GixError::References(e.to_string())))?
                .to_string();

            branches.push(RemoteBranch { name, tip });
        }

        branches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(branches)
    }}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using git CLI.
///
/// Required for:
/// - Network operations (clone, ls-remote, push) with the runner's credentials
/// - Index and work tree writes
/// - Exact `git status` semantics for the commit decision
pub struct ShellBackend;

impl ShellBackend {
    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    ///
    /// Credentials embedded in URLs never reach logs or error messages.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> MirrorResult<String> {
        use std::process::Command;

        let printable = redact_credentials(&format!("git {}", args.join(" ")));
        debug!(command = %printable, cwd = %cwd.display(), "running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: printable,
                message: redact_credentials(String::from_utf8_lossy(&output.stderr).trim()),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Whether `git status` reports anything to commit, untracked files included.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git status` fails.
    pub fn has_uncommitted_changes(path: &Path) -> MirrorResult<bool> {
        let output = Self::git_command(&["status", "--porcelain"], path)?;
        Ok(!output.is_empty())
    }
}

impl GitMutation for ShellBackend {
    fn clone(url: &str, dest: &Path) -> MirrorResult<()> {
        let dest_str = dest.to_str().ok_or_else(|| GitError::CloneFailed {
            url: redact_credentials(url),
            message: "invalid destination path".to_string(),
        })?;
        let args = [
            "clone",
            "--quiet",
            "--no-local",
            "-c",
            "core.autocrlf=false",
            "-c",
            "advice.detachedHead=false",
            url,
            dest_str,
        ];

        let parent = dest.parent().unwrap_or_else(|| Path::new("."));
        Self::git_command(&args, parent).map_err(|e| GitError::CloneFailed {
            url: redact_credentials(url),
            message: e.to_string(),
        })?;
        Ok(())
    }

    fn checkout_detached(repo_path: &Path, rev: &str) -> MirrorResult<()> {
        Self::git_command(
            &[
                "-c",
                "advice.detachedHead=false",
                "checkout",
                "-q",
                "--force",
                "--detach",
                rev,
            ],
            repo_path,
        )
        .map_err(|e| GitError::CheckoutFailed {
            what: rev.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    fn checkout_tracking(repo_path: &Path, remote: &str, branch: &str) -> MirrorResult<()> {
        let upstream = format!("{remote}/{branch}");
        Self::git_command(
            &["checkout", "-q", "--force", "-B", branch, "--track", &upstream],
            repo_path,
        )
        .map_err(|e| GitError::CheckoutFailed {
            what: branch.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    fn start_unborn_branch(repo_path: &Path, branch: &str) -> MirrorResult<()> {
        let full_ref = format!("refs/heads/{branch}");
        Self::git_command(&["symbolic-ref", "HEAD", &full_ref], repo_path)?;
        Ok(())
    }

    fn clean(repo_path: &Path) -> MirrorResult<()> {
        Self::git_command(&["clean", "-ffdxq"], repo_path)?;
        Ok(())
    }

    fn add_all(repo_path: &Path) -> MirrorResult<()> {
        Self::git_command(&["add", "--all", "--force"], repo_path)?;
        Ok(())
    }

    fn commit(repo_path: &Path, message: &str, allow_empty: bool) -> MirrorResult<()> {
        let mut args = vec!["commit", "--quiet", "--no-verify", "-m", message];
        if allow_empty {
            args.push("--allow-empty");
        }
        Self::git_command(&args, repo_path)?;
        Ok(())
    }

    fn push_branch(repo_path: &Path, remote: &str, branch: &str) -> MirrorResult<()> {
        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        Self::git_command(
            &["push", "--quiet", "--set-upstream", remote, &refspec],
            repo_path,
        )?;
        Ok(())
    }

    fn set_config(repo_path: &Path, key: &str, value: &str) -> MirrorResult<()> {
        Self::git_command(&["config", key, value], repo_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
