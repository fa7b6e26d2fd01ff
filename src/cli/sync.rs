// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI arguments for the `sync`, `gate` and `resolve` commands.
//!
//! ```text
//! mirror sync    [--source-repo R] [--event-name N --event-path P] [--json]
//! mirror gate    --event-name N [--event-path P] [--github-output F]
//! mirror resolve [--source-repo R] [--public-repo-name NAME]
//!
//! USAGE (GitHub Actions, everything from the environment):
//! $ mirror sync
//! $ mirror --dry sync --source-repo acme/widgets-private --json
//! ```

use clap::Args;
use std::path::PathBuf;

/// Trigger event as handed over by the CI runner.
#[derive(Debug, Clone, Default, Args)]
pub struct EventArgs {
    /// Name of the trigger event (push, pull_request, workflow_dispatch, ...).
    #[arg(long = "event-name", value_name = "NAME", env = "GITHUB_EVENT_NAME")]
    pub event_name: Option<String>,

    /// JSON payload of the trigger event.
    #[arg(long = "event-path", value_name = "FILE", env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,
}

/// Arguments for the `sync` command.
#[derive(Debug, Clone, Args)]
pub struct SyncArgs {
    /// Source repository as `org/name`.
    #[arg(long = "source-repo", value_name = "REPO", env = "GITHUB_REPOSITORY")]
    pub source_repo: Option<String>,

    /// Clone URL of the source, instead of one derived from the prefix.
    #[arg(long = "source-url", value_name = "URL")]
    pub source_url: Option<String>,

    /// Clone/push URL of the destination, instead of one derived from the prefix.
    #[arg(long = "destination-url", value_name = "URL")]
    pub destination_url: Option<String>,

    /// Destination name (`name` or `org/name`), overriding the derived one.
    #[arg(long = "public-repo-name", value_name = "NAME")]
    pub public_repo_name: Option<String>,

    /// Compare every branch even when nothing new was committed.
    #[arg(long = "force-sync", value_name = "BOOL")]
    pub force_sync: Option<bool>,

    #[command(flatten)]
    pub event: EventArgs,

    /// Token for reading the source and sending dispatches.
    #[arg(
        long = "github-token",
        value_name = "TOKEN",
        env = "GITHUB_TOKEN",
        hide_env_values = true
    )]
    pub github_token: Option<String>,

    /// Prints the report as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `gate` command.
#[derive(Debug, Clone, Args)]
pub struct GateArgs {
    #[command(flatten)]
    pub event: EventArgs,

    /// Step output file the decision is appended to.
    #[arg(long = "github-output", value_name = "FILE", env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Source repository as `org/name`.
    #[arg(long = "source-repo", value_name = "REPO", env = "GITHUB_REPOSITORY")]
    pub source_repo: Option<String>,

    /// Destination name (`name` or `org/name`), overriding the derived one.
    #[arg(long = "public-repo-name", value_name = "NAME")]
    pub public_repo_name: Option<String>,
}
