// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Inbound trigger events.
//!
//! ```text
//! GITHUB_EVENT_NAME + GITHUB_EVENT_PATH (json)
//!          |
//!          v
//!   Event::from_github()
//!          |
//!   push | pull_request(_target) | workflow_dispatch | repository_dispatch | other
//!          |
//!          v
//!   gate::evaluate() --> Skip | Mirror | Relay
//! ```

pub mod gate;

#[cfg(test)]
mod tests;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::error::{ConfigError, MirrorError, Result};

pub use gate::{GateDecision, GateOptions, MirrorRequest, SkipReason, evaluate};

/// Payload forwarded to the downstream job when a fork merge is relayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchPayload {
    pub base_branch: String,
    pub pr_number: u64,
}

/// Pull request fields the gate looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    pub action: String,
    pub number: u64,
    pub merged: bool,
    pub base_branch: String,
    pub head_branch: String,
    /// `org/name` of the base repository.
    pub base_repo: Option<String>,
    /// `org/name` of the head repository; `None` when the fork was deleted.
    pub head_repo: Option<String>,
}

impl PullRequestEvent {
    /// Whether the contribution came from another repository.
    #[must_use]
    pub fn is_from_fork(&self) -> bool {
        match (&self.head_repo, &self.base_repo) {
            (Some(head), Some(base)) => !head.eq_ignore_ascii_case(base),
            _ => true,
        }
    }
}

/// Inputs of a manual `workflow_dispatch` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualInputs {
    pub force_sync: Option<bool>,
    pub public_repo_name: Option<String>,
}

/// Kind of event plus its kind-specific fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Push { git_ref: Option<String> },
    PullRequest(PullRequestEvent),
    WorkflowDispatch(ManualInputs),
    RepositoryDispatch {
        action: Option<String>,
        payload: Option<DispatchPayload>,
    },
    Other(String),
}

/// A trigger event as delivered by the CI runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: String,
    kind: EventKind,
}

#[derive(Deserialize)]
struct RawRepo {
    full_name: String,
}

#[derive(Deserialize)]
struct RawRef {
    #[serde(rename = "ref")]
    name: String,
    repo: Option<RawRepo>,
}

#[derive(Deserialize)]
struct RawPullRequest {
    number: u64,
    #[serde(default)]
    merged: bool,
    base: RawRef,
    head: RawRef,
}

#[derive(Deserialize)]
struct RawPullRequestPayload {
    action: String,
    pull_request: RawPullRequest,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawPushPayload {
    #[serde(rename = "ref")]
    git_ref: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawDispatchPayload {
    action: Option<String>,
    client_payload: Option<Value>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawManualPayload {
    inputs: Option<serde_json::Map<String, Value>>,
}

impl Event {
    /// Builds an event directly from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: EventKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Parses a GitHub Actions event from its name and JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid JSON or is missing
    /// fields the event kind requires.
    pub fn from_github(name: &str, payload: &str) -> Result<Self> {
        let kind = match name {
            "push" => {
                let raw: RawPushPayload = parse_payload(name, payload)?;
                EventKind::Push {
                    git_ref: raw.git_ref,
                }
            }
            "pull_request" | "pull_request_target" => {
                let raw: RawPullRequestPayload = parse_payload(name, payload)?;
                let pr = raw.pull_request;
                EventKind::PullRequest(PullRequestEvent {
                    action: raw.action,
                    number: pr.number,
                    merged: pr.merged,
                    base_branch: pr.base.name,
                    head_branch: pr.head.name,
                    base_repo: pr.base.repo.map(|r| r.full_name),
                    head_repo: pr.head.repo.map(|r| r.full_name),
                })
            }
            "workflow_dispatch" => {
                let raw: RawManualPayload = parse_payload(name, payload)?;
                EventKind::WorkflowDispatch(manual_inputs(raw.inputs.unwrap_or_default())?)
            }
            "repository_dispatch" => {
                let raw: RawDispatchPayload = parse_payload(name, payload)?;
                EventKind::RepositoryDispatch {
                    action: raw.action,
                    payload: raw.client_payload.as_ref().and_then(client_payload),
                }
            }
            other => EventKind::Other(other.to_string()),
        };

        Ok(Self::new(name, kind))
    }

    /// Reads the payload from `path` and parses it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_github_file(name: &str, path: &Path) -> Result<Self> {
        let payload = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event payload {}", path.display()))?;
        Self::from_github(name, &payload)
    }

    /// Event name as delivered (`pull_request_target`, not the kind).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> &EventKind {
        &self.kind
    }
}

fn parse_payload<T: for<'de> Deserialize<'de>>(name: &str, payload: &str) -> Result<T> {
    let payload = if payload.trim().is_empty() { "{}" } else { payload };
    serde_json::from_str(payload).with_context(|| format!("invalid '{name}' event payload"))
}

fn manual_inputs(inputs: serde_json::Map<String, Value>) -> Result<ManualInputs> {
    let force_sync = match inputs.get("force_sync") {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(parse_bool(s)?),
        Some(other) => return Err(invalid_input("force_sync", &other.to_string())),
    };

    let public_repo_name = match inputs.get("public_repo_name") {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    };

    Ok(ManualInputs {
        force_sync,
        public_repo_name,
    })
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(invalid_input("force_sync", value)),
    }
}

fn invalid_input(key: &str, value: &str) -> anyhow::Error {
    MirrorError::from(ConfigError::InvalidValue {
        section: "inputs".to_string(),
        key: key.to_string(),
        message: format!("expected a boolean, got {value}"),
    })
    .into()
}

fn client_payload(value: &Value) -> Option<DispatchPayload> {
    let base_branch = value.get("base_branch")?.as_str()?.to_string();
    let pr_number = match value.get("pr_number")? {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    Some(DispatchPayload {
        base_branch,
        pr_number,
    })
}
