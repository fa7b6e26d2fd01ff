// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `resolve` command.

use super::{first_non_blank, source_repo};
use crate::cli::sync::ResolveArgs;
use crate::config::Config;
use crate::error::Result;
use crate::naming::{Resolution, resolve_destination};

/// Human-readable form of a resolution.
#[must_use]
pub fn describe_resolution(resolution: &Resolution) -> String {
    match resolution {
        Resolution::Eligible(destination) => destination.to_string(),
        Resolution::NotEligible { source, marker } => {
            format!("not eligible: '{source}' does not contain '{marker}'")
        }
    }
}

/// Run the resolve command.
///
/// A source without the marker is reported, not treated as an error.
///
/// # Errors
///
/// Returns an error if the source or override is malformed.
pub fn run_resolve_command(args: &ResolveArgs, config: &Config) -> Result<()> {
    let source = source_repo(args.source_repo.as_deref())?;
    let override_name = first_non_blank([
        args.public_repo_name.as_deref(),
        Some(config.mirror.public_repo_name.as_str()),
    ]);

    let resolution = resolve_destination(&source, override_name, &config.mirror.marker)?;
    println!("{}", describe_resolution(&resolution));
    Ok(())
}
