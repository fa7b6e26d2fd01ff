// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Trigger gate: decides whether an event leads to a mirror run.
//!
//! ```text
//! push                                     --> Mirror
//! pull_request  action != closed           --> Skip(NotClosed)
//!               closed, !merged            --> Skip(NotMerged)
//!               closed, merged, fork, relay --> Relay(payload)
//!               closed, merged             --> Mirror
//! workflow_dispatch                        --> Mirror(inputs)
//! repository_dispatch                      --> Mirror(client_payload)
//! anything else                            --> Skip(UnsupportedEvent)
//! ```

use anyhow::Context;
use std::fmt;
use std::io::Write;
use std::path::Path;

use super::{DispatchPayload, Event, EventKind};
use crate::error::Result;

/// Knobs that change how events are gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateOptions {
    /// Forward merged fork pull requests instead of mirroring directly.
    pub relay_fork_merges: bool,
}

impl Default for GateOptions {
    fn default() -> Self {
        Self {
            relay_fork_merges: true,
        }
    }
}

/// Why an event does not lead to any work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Pull request event for an action other than `closed`.
    NotClosed { action: String },
    /// Pull request closed without being merged.
    NotMerged { number: u64 },
    /// Event kind the mirror does not react to.
    UnsupportedEvent(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotClosed { action } => write!(f, "pull request action '{action}' is not 'closed'"),
            Self::NotMerged { number } => write!(f, "pull request #{number} was closed without merging"),
            Self::UnsupportedEvent(name) => write!(f, "event '{name}' does not trigger a mirror"),
        }
    }
}

/// What a mirroring invocation carries from its trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorRequest {
    /// Manual `force_sync` input, overriding configuration when set.
    pub force_sync: Option<bool>,
    /// Manual destination name override.
    pub public_repo_name: Option<String>,
    /// Payload of the relayed fork merge that caused this run.
    pub forwarded: Option<DispatchPayload>,
}

/// Result of evaluating the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Skip(SkipReason),
    Mirror(MirrorRequest),
    Relay(DispatchPayload),
}

impl GateDecision {
    /// Whether this invocation mirrors branches itself.
    ///
    /// A relayed fork merge is `false`: the work happens in the downstream
    /// job that receives the dispatch.
    #[must_use]
    pub const fn should_sync(&self) -> bool {
        matches!(self, Self::Mirror(_))
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Skip(_) => "skip",
            Self::Mirror(_) => "mirror",
            Self::Relay(_) => "relay",
        }
    }

    /// Step output lines in `$GITHUB_OUTPUT` syntax.
    #[must_use]
    pub fn output_lines(&self) -> String {
        let mut lines = format!(
            "should_sync={}\ndecision={}\n",
            self.should_sync(),
            self.label()
        );
        if let Self::Relay(payload) = self {
            lines.push_str(&format!(
                "base_branch={}\npr_number={}\n",
                payload.base_branch, payload.pr_number
            ));
        }
        lines
    }

    /// Appends [`Self::output_lines`] to the file named by `$GITHUB_OUTPUT`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn append_github_output(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        file.write_all(self.output_lines().as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))
    }
}

impl fmt::Display for GateDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip(reason) => write!(f, "skip: {reason}"),
            Self::Mirror(_) => write!(f, "mirror"),
            Self::Relay(payload) => write!(
                f,
                "relay fork merge of #{} into '{}'",
                payload.pr_number, payload.base_branch
            ),
        }
    }
}

/// Evaluates the gate for `event`. Pure.
#[must_use]
pub fn evaluate(event: &Event, options: &GateOptions) -> GateDecision {
    match event.kind() {
        EventKind::Push { .. } => GateDecision::Mirror(MirrorRequest::default()),
        EventKind::PullRequest(pr) => {
            if pr.action != "closed" {
                return GateDecision::Skip(SkipReason::NotClosed {
                    action: pr.action.clone(),
                });
            }
            if !pr.merged {
                return GateDecision::Skip(SkipReason::NotMerged { number: pr.number });
            }
            if options.relay_fork_merges && pr.is_from_fork() {
                return GateDecision::Relay(DispatchPayload {
                    base_branch: pr.base_branch.clone(),
                    pr_number: pr.number,
                });
            }
            GateDecision::Mirror(MirrorRequest::default())
        }
        EventKind::WorkflowDispatch(inputs) => GateDecision::Mirror(MirrorRequest {
            force_sync: inputs.force_sync,
            public_repo_name: inputs.public_repo_name.clone(),
            forwarded: None,
        }),
        EventKind::RepositoryDispatch { payload, .. } => GateDecision::Mirror(MirrorRequest {
            forwarded: payload.clone(),
            ..MirrorRequest::default()
        }),
        EventKind::Other(name) => GateDecision::Skip(SkipReason::UnsupportedEvent(name.clone())),
    }
}
