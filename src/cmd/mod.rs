// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, inis), gate, resolve, sync
//! ```

pub mod config;
pub mod gate;
pub mod resolve;
pub mod sync;


use anyhow::Context;

use crate::cli::sync::EventArgs;
use crate::config::Config;
use crate::error::Result;
use crate::event::{Event, GateOptions};
use crate::naming::RepoName;

/// Loads the trigger event, if one was named.
///
/// Without a payload file the event is parsed from an empty payload.
///
/// # Errors
///
/// Returns an error if the payload file cannot be read or parsed.
pub fn load_event(args: &EventArgs) -> Result<Option<Event>> {
    let Some(name) = args
        .event_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
    else {
        return Ok(None);
    };

    let event = match &args.event_path {
        Some(path) => Event::from_github_file(name, path)?,
        None => Event::from_github(name, "")?,
    };
    Ok(Some(event))
}

/// Gate knobs taken from `[dispatch]`.
#[must_use]
pub const fn gate_options(config: &Config) -> GateOptions {
    GateOptions {
        relay_fork_merges: config.dispatch.relay_fork_merges,
    }
}

/// Parses the source repository given on the command line or by the runner.
///
/// # Errors
///
/// Returns an error if no repository was given or it is not `org/name`.
pub fn source_repo(value: Option<&str>) -> Result<RepoName> {
    let value = first_non_blank([value])
        .context("no source repository, pass --source-repo or set GITHUB_REPOSITORY")?;
    Ok(RepoName::parse(value)?)
}

/// First candidate that is set and not blank.
pub(crate) fn first_non_blank<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
}
