// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for repo-mirror using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! mirror [global options] <command>
//! sync      gate --> resolve --> mirror | relay
//! gate      print decision (+ $GITHUB_OUTPUT)
//! resolve   print destination or refusal
//! options
//! inis
//! version
//! ```

pub mod global;
pub mod sync;


use crate::cli::global::GlobalOptions;
use crate::cli::sync::{GateArgs, ResolveArgs, SyncArgs};
use clap::{Parser, Subcommand};

/// Private-to-public repository branch mirror
///
/// Replicates every branch of a private source repository into its public
/// counterpart.
#[derive(Debug, Parser)]
#[command(
    name = "mirror",
    author,
    version,
    about = "Private-to-public repository branch mirror",
    long_about = "repo-mirror Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Replicates every branch of a private repository into its public\n\
                  counterpart. The public name is the private name with the marker\n\
                  (default `-private`) removed; repositories without the marker are\n\
                  never mirrored. See `mirror <command> --help` for more information\n\
                  about a command.",
    after_help = "CONFIG FILES:\n\n\
                  mirror reads `mirror.toml` from the current directory if present.\n\
                  Additional files can be given with --ini and are loaded after it.\n\
                  MIRROR_<SECTION>__<KEY> environment variables override files,\n\
                  --set overrides the environment, and the dedicated flags\n\
                  (--dry, --log-level, ...) override everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists the configuration sources used.
    Inis,

    /// Gates the trigger event, then mirrors or relays.
    Sync(SyncArgs),

    /// Evaluates the trigger event only.
    Gate(GateArgs),

    /// Prints the destination repository for a source repository.
    Resolve(ResolveArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
