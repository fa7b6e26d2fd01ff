// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `sync` command: the whole job.
//!
//! ```text
//! event? --> gate
//!   Skip   --> exit 0
//!   Relay  --> dispatch to the PR's base repository, exit 0
//!   Mirror --> resolve destination
//!                NotEligible --> refuse, exit 0
//!                Eligible    --> run_sync --> report (table | JSON)
//! ```
//!
//! | Setting            | CLI                  | Event input        | Config                  |
//! |--------------------|----------------------|--------------------|-------------------------|
//! | destination name   | `--public-repo-name` | `public_repo_name` | `mirror.public_repo_name` |
//! | force sync         | `--force-sync`       | `force_sync`       | `mirror.force_sync`     |
//!
//! Left to right: the first value set wins.

use tracing::{info, warn};

use super::{first_non_blank, gate_options, load_event, source_repo};
use crate::cli::sync::SyncArgs;
use crate::config::Config;
use crate::dispatch::DispatchClient;
use crate::error::Result;
use crate::event::{DispatchPayload, Event, EventKind, GateDecision, MirrorRequest, evaluate};
use crate::naming::{RepoName, Resolution, repo_url, resolve_destination, with_token};
use crate::sync::{SyncOptions, SyncReport, run_sync};

/// Run the sync command.
///
/// # Errors
///
/// Returns an error if the event does not parse, the destination cannot be
/// resolved, the dispatch is rejected, or the mirror job fails.
pub async fn run_sync_command(args: &SyncArgs, config: &Config) -> Result<()> {
    let event = load_event(&args.event)?;
    let decision = event.as_ref().map_or_else(
        || GateDecision::Mirror(MirrorRequest::default()),
        |event| evaluate(event, &gate_options(config)),
    );

    match decision {
        GateDecision::Skip(reason) => {
            info!(reason = %reason, "nothing to mirror");
            Ok(())
        }
        GateDecision::Relay(payload) => relay(args, config, event.as_ref(), &payload).await,
        GateDecision::Mirror(request) => mirror(args, config, &request).await,
    }
}

/// API token from the command line, falling back to `dispatch.token`.
fn github_token<'a>(args: &'a SyncArgs, config: &'a Config) -> Option<&'a str> {
    first_non_blank([
        args.github_token.as_deref(),
        Some(config.dispatch.token.as_str()),
    ])
}

/// Repository receiving a relayed fork merge: the pull request's base
/// repository, or the source repository when the payload does not name one.
///
/// # Errors
///
/// Returns an error if neither is available or the name is malformed.
pub fn relay_target(event: Option<&Event>, source: Option<&str>) -> Result<RepoName> {
    let base = event.and_then(|event| match event.kind() {
        EventKind::PullRequest(pr) => pr.base_repo.as_deref(),
        _ => None,
    });
    source_repo(first_non_blank([base, source]))
}

async fn relay(
    args: &SyncArgs,
    config: &Config,
    event: Option<&Event>,
    payload: &DispatchPayload,
) -> Result<()> {
    let target = relay_target(event, args.source_repo.as_deref())?;

    if config.global.dry {
        info!(
            repo = %target,
            base_branch = %payload.base_branch,
            pr_number = payload.pr_number,
            "dry run, dispatch not sent"
        );
        return Ok(());
    }

    let client = DispatchClient::new(
        &config.dispatch.api_url,
        github_token(args, config).map(str::to_string),
    );
    client
        .send(&target, &config.dispatch.event_type, payload)
        .await?;
    Ok(())
}

/// Assembles the job options for mirroring `source` into `destination`.
#[must_use]
pub fn build_sync_options(
    args: &SyncArgs,
    config: &Config,
    request: &MirrorRequest,
    source: &RepoName,
    destination: &RepoName,
) -> SyncOptions {
    let mirror = &config.mirror;

    let source_url = args.source_url.clone().unwrap_or_else(|| {
        let url = repo_url(&mirror.source_url_prefix, source);
        match github_token(args, config) {
            Some(token) => with_token(&url, token),
            None => url,
        }
    });
    let destination_url = args
        .destination_url
        .clone()
        .unwrap_or_else(|| repo_url(&mirror.destination_url_prefix, destination));
    let force_sync = args
        .force_sync
        .or(request.force_sync)
        .unwrap_or(mirror.force_sync);

    SyncOptions::builder()
        .with_source_url(source_url)
        .with_destination_url(destination_url)
        .with_force_sync(force_sync)
        .with_dry_run(config.global.dry)
        .with_commit_message(mirror.commit_message.clone())
        .with_author_name(mirror.author_name.clone())
        .with_author_email(mirror.author_email.clone())
        .maybe_with_work_dir(mirror.work_dir.clone())
        .build()
}

async fn mirror(args: &SyncArgs, config: &Config, request: &MirrorRequest) -> Result<()> {
    let source = source_repo(args.source_repo.as_deref())?;
    let override_name = first_non_blank([
        args.public_repo_name.as_deref(),
        request.public_repo_name.as_deref(),
        Some(config.mirror.public_repo_name.as_str()),
    ]);

    let destination = match resolve_destination(&source, override_name, &config.mirror.marker)? {
        Resolution::Eligible(destination) => destination,
        Resolution::NotEligible { source, marker } => {
            warn!(
                repo = %source,
                marker = %marker,
                "repository name lacks the marker, refusing to mirror"
            );
            return Ok(());
        }
    };

    if let Some(forwarded) = &request.forwarded {
        info!(
            base_branch = %forwarded.base_branch,
            pr_number = forwarded.pr_number,
            "mirroring after relayed fork merge"
        );
    }
    info!(source = %source, destination = %destination, "mirroring");

    let options = build_sync_options(args, config, request, &source, &destination);
    let report = run_sync(&options).await?;
    print_report(&report, args.json)
}

fn print_report(report: &SyncReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        for line in report.format_table() {
            println!("{line}");
        }
    }
    Ok(())
}
