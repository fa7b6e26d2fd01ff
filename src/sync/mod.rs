// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The mirror job.
//!
//! ```text
//! run_sync(&SyncOptions)
//!   1. git on PATH?                        ProcessError
//!   2. ls-remote destination               SyncError::DestinationUnreachable
//!   3. clone source, clone destination     into a fresh Workspace
//!   4. for each source branch (sorted):    SyncError::BranchFailed
//!        up to date?  --> UpToDate
//!        checkout source tip, snapshot
//!        switch/create destination branch, snapshot
//!        plan_branch --> apply diff, add, commit if changed
//!   5. push created/updated branches       SyncError::PushFailed
//! ```
//!
//! Branches are processed one at a time. Nothing is force-pushed; existing
//! destination history only grows.

pub mod plan;
pub mod workspace;


use bon::Builder;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{MirrorError, Result, SyncError};
use crate::git::backend::RemoteBranch;
use crate::git::cmd::{
    add_all, checkout_detached, checkout_tracking, clean, clone, commit, push_branch,
    start_unborn_branch,
};
use crate::git::ops::{commit_message, configure_committer, ensure_git_available, list_remote_heads};
use crate::git::query::{has_uncommitted_changes, remote_branches};
use crate::git::{ORIGIN, redact_credentials};
use crate::tree::{DiffStats, TreeSnapshot, apply_diff};

use plan::{BranchAction, is_up_to_date, mirror_commit_message, plan_branch};
use workspace::Workspace;

pub const DEFAULT_COMMIT_MESSAGE: &str = "Sync from private repository";
/// Identity of the GitHub Actions bot, used for mirror commits by default.
pub const DEFAULT_AUTHOR_NAME: &str = "github-actions[bot]";
pub const DEFAULT_AUTHOR_EMAIL: &str = "41898282+github-actions[bot]@users.noreply.github.com";

/// Inputs of one mirror run.
#[derive(Debug, Clone, Builder)]
pub struct SyncOptions {
    /// Clone URL of the source (may embed a token).
    #[builder(setters(name = with_source_url), into)]
    source_url: String,
    /// Clone and push URL of the destination.
    #[builder(setters(name = with_destination_url), into)]
    destination_url: String,
    /// Compare every branch even when its destination tip records the
    /// current source commit.
    #[builder(setters(name = with_force_sync), default = true)]
    force_sync: bool,
    /// Plan only: no commit, no push.
    #[builder(setters(name = with_dry_run), default = false)]
    dry_run: bool,
    #[builder(setters(name = with_commit_message), default = DEFAULT_COMMIT_MESSAGE.to_string())]
    commit_message: String,
    #[builder(setters(name = with_author_name), default = DEFAULT_AUTHOR_NAME.to_string())]
    author_name: String,
    #[builder(setters(name = with_author_email), default = DEFAULT_AUTHOR_EMAIL.to_string())]
    author_email: String,
    /// Parent of the per-run workspace (system temp dir if unset).
    #[builder(setters(name = with_work_dir))]
    work_dir: Option<PathBuf>,
}

impl SyncOptions {
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    #[must_use]
    pub fn destination_url(&self) -> &str {
        &self.destination_url
    }

    #[must_use]
    pub const fn force_sync(&self) -> bool {
        self.force_sync
    }

    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub fn commit_message(&self) -> &str {
        &self.commit_message
    }

    #[must_use]
    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    #[must_use]
    pub fn author_email(&self) -> &str {
        &self.author_email
    }

    #[must_use]
    pub fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_deref()
    }
}

/// What happened to one branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchOutcome {
    /// New in the destination.
    Created,
    /// Existing branch received a mirror commit.
    Updated,
    /// Existing branch already had the source tree; no commit.
    Unchanged,
    /// Destination tip already records the source tip; not compared.
    UpToDate,
}

impl BranchOutcome {
    /// Whether the branch has local commits the destination lacks.
    #[must_use]
    pub const fn needs_push(self) -> bool {
        matches!(self, Self::Created | Self::Updated)
    }
}

impl fmt::Display for BranchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
            Self::UpToDate => "up-to-date",
        })
    }
}

impl From<BranchAction> for BranchOutcome {
    fn from(action: BranchAction) -> Self {
        match action {
            BranchAction::Create => Self::Created,
            BranchAction::Update => Self::Updated,
            BranchAction::Unchanged => Self::Unchanged,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchReport {
    pub branch: String,
    /// Source tip that was mirrored.
    pub source_commit: String,
    pub outcome: BranchOutcome,
    pub changes: DiffStats,
    pub pushed: bool,
}

/// Result of a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Destination URL, credentials redacted.
    pub destination: String,
    pub dry_run: bool,
    pub branches: Vec<BranchReport>,
}

impl SyncReport {
    /// Number of branches with the given outcome.
    #[must_use]
    pub fn count(&self, outcome: BranchOutcome) -> usize {
        self.branches.iter().filter(|b| b.outcome == outcome).count()
    }

    #[must_use]
    pub fn pushed(&self) -> usize {
        self.branches.iter().filter(|b| b.pushed).count()
    }

    /// One-line summary for the log.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} branches: {} created, {} updated, {} unchanged, {} up-to-date, {} pushed",
            self.branches.len(),
            self.count(BranchOutcome::Created),
            self.count(BranchOutcome::Updated),
            self.count(BranchOutcome::Unchanged),
            self.count(BranchOutcome::UpToDate),
            self.pushed(),
        )
    }

    /// Aligned table, one row per branch.
    #[must_use]
    pub fn format_table(&self) -> Vec<String> {
        let width = self
            .branches
            .iter()
            .map(|b| b.branch.len())
            .max()
            .unwrap_or(0)
            .max("BRANCH".len());

        let mut lines = vec![format!("{:<width$}  {:<10}  {:<12}  PUSHED", "BRANCH", "OUTCOME", "CHANGES")];
        lines.extend(self.branches.iter().map(|b| {
            format!(
                "{:<width$}  {:<10}  {:<12}  {}",
                b.branch,
                b.outcome.to_string(),
                b.changes.to_string(),
                if b.pushed { "yes" } else { "no" }
            )
        }));
        lines
    }
}

fn sync_error(error: SyncError) -> anyhow::Error {
    MirrorError::from(error).into()
}

/// Runs the mirror job.
///
/// # Errors
///
/// - `ProcessError::ExecutableNotFound` if `git` is missing.
/// - `SyncError::DestinationUnreachable` before any branch work.
/// - A `GitError` if either repository cannot be cloned.
/// - `SyncError::BranchFailed` / `SyncError::PushFailed` naming the branch.
pub async fn run_sync(options: &SyncOptions) -> Result<SyncReport> {
    ensure_git_available()?;

    let destination = redact_credentials(options.destination_url());
    let workspace = Workspace::create(options.work_dir())?;

    list_remote_heads(options.destination_url(), workspace.root()).map_err(|e| {
        sync_error(SyncError::DestinationUnreachable {
            url: destination.clone(),
            message: e.to_string(),
        })
    })?;

    let source_dir = workspace.source();
    let dest_dir = workspace.destination();

    info!(source = %redact_credentials(options.source_url()), "cloning source");
    clone(options.source_url(), &source_dir)?;
    info!(destination = %destination, "cloning destination");
    clone(options.destination_url(), &dest_dir)?;
    configure_committer(&dest_dir, options.author_name(), options.author_email())?;

    let mut report = SyncReport {
        destination,
        dry_run: options.dry_run(),
        branches: Vec::new(),
    };

    let source_branches = remote_branches(&source_dir, ORIGIN)?;
    if source_branches.is_empty() {
        warn!("source repository has no branches, nothing to mirror");
        return Ok(report);
    }

    let existing: BTreeSet<String> = remote_branches(&dest_dir, ORIGIN)?
        .into_iter()
        .map(|b| b.name)
        .collect();

    for stale in existing
        .iter()
        .filter(|name| !source_branches.iter().any(|b| &b.name == *name))
    {
        debug!(branch = %stale, "destination branch has no source counterpart, left untouched");
    }

    for branch in &source_branches {
        let exists = existing.contains(&branch.name);
        let branch_report = replicate_branch(&workspace, options, branch, exists)
            .await
            .map_err(|e| {
                sync_error(SyncError::BranchFailed {
                    branch: branch.name.clone(),
                    message: format!("{e:#}"),
                })
            })?;

        info!(
            branch = %branch_report.branch,
            outcome = %branch_report.outcome,
            changes = %branch_report.changes,
            "branch replicated"
        );
        report.branches.push(branch_report);
    }

    if options.dry_run() {
        info!(summary = %report.summary(), "dry run, nothing pushed");
        return Ok(report);
    }

    for branch in report.branches.iter_mut().filter(|b| b.outcome.needs_push()) {
        push_branch(&dest_dir, ORIGIN, &branch.branch).map_err(|e| {
            sync_error(SyncError::PushFailed {
                branch: branch.branch.clone(),
                message: e.to_string(),
            })
        })?;
        branch.pushed = true;
        info!(branch = %branch.branch, "pushed");
    }

    info!(summary = %report.summary(), "mirror complete");
    Ok(report)
}

async fn replicate_branch(
    workspace: &Workspace,
    options: &SyncOptions,
    branch: &RemoteBranch,
    exists: bool,
) -> Result<BranchReport> {
    let source_dir = workspace.source();
    let dest_dir = workspace.destination();
    let tracking_ref = format!("{ORIGIN}/{}", branch.name);

    let mut report = BranchReport {
        branch: branch.name.clone(),
        source_commit: branch.tip.clone(),
        outcome: BranchOutcome::UpToDate,
        changes: DiffStats::default(),
        pushed: false,
    };

    if exists && !options.force_sync() {
        let message = commit_message(&dest_dir, &tracking_ref)?;
        if is_up_to_date(options.force_sync(), &branch.tip, Some(&message)) {
            debug!(branch = %branch.name, tip = %branch.tip, "destination already records source tip");
            return Ok(report);
        }
    }

    checkout_detached(&source_dir, &tracking_ref)?;
    clean(&source_dir)?;
    let source_tree = TreeSnapshot::capture(&source_dir)?;

    if exists {
        checkout_tracking(&dest_dir, ORIGIN, &branch.name)?;
    } else {
        start_unborn_branch(&dest_dir, &branch.name)?;
    }
    clean(&dest_dir)?;
    let worktree = TreeSnapshot::capture(&dest_dir)?;

    let plan = plan_branch(&source_tree, &worktree, exists);
    report.changes = plan.changes;
    debug!(
        branch = %branch.name,
        action = %plan.action,
        changes = %report.changes,
        files = source_tree.len(),
        "planned"
    );

    if options.dry_run() {
        report.outcome = plan.action.into();
        return Ok(report);
    }

    apply_diff(&plan.diff, &source_dir, &dest_dir).await?;
    add_all(&dest_dir)?;

    let message = mirror_commit_message(options.commit_message(), &branch.tip);
    report.outcome = match plan.action {
        BranchAction::Create => {
            commit(&dest_dir, &message, true)?;
            BranchOutcome::Created
        }
        BranchAction::Update | BranchAction::Unchanged => {
            if has_uncommitted_changes(&dest_dir)? {
                commit(&dest_dir, &message, false)?;
                BranchOutcome::Updated
            } else {
                BranchOutcome::Unchanged
            }
        }
    };

    Ok(report)
}
