// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for repo-mirror.
//!
//! # Config Structure
//!
//! ```text
//! Config
//!   global    dry run, log levels, log file
//!   mirror    marker, naming override, URLs, commit identity
//!   dispatch  fork-merge relay (event type, API url)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;
use crate::sync::{DEFAULT_AUTHOR_EMAIL, DEFAULT_AUTHOR_NAME, DEFAULT_COMMIT_MESSAGE};

/// Marker that distinguishes a private repository from its public mirror.
pub const DEFAULT_MARKER: &str = "-private";

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Compute and log every branch plan without writing, committing or pushing.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file (empty disables file logging).
    pub log_file: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::new(),
        }
    }
}

/// Mirror job configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MirrorConfig {
    /// Substring a source repository name must contain to be mirrored.
    /// Removed from the source name to derive the destination name.
    pub marker: String,
    /// Explicit destination name (`name` or `org/name`); empty derives it.
    pub public_repo_name: String,
    /// Compare every branch in full, even when the destination tip already
    /// records the current source commit.
    pub force_sync: bool,
    /// Fixed descriptive message for mirror commits.
    pub commit_message: String,
    /// URL prefix for cloning the source repository.
    pub source_url_prefix: String,
    /// URL prefix for cloning and pushing the destination repository.
    pub destination_url_prefix: String,
    /// Committer/author name for mirror commits.
    pub author_name: String,
    /// Committer/author email for mirror commits.
    pub author_email: String,
    /// Parent directory for the per-run workspace (system temp dir if unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            public_repo_name: String::new(),
            force_sync: true,
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            source_url_prefix: "https://github.com/".to_string(),
            destination_url_prefix: "git@github.com:".to_string(),
            author_name: DEFAULT_AUTHOR_NAME.to_string(),
            author_email: DEFAULT_AUTHOR_EMAIL.to_string(),
            work_dir: None,
        }
    }
}

/// Cross-repository dispatch configuration for fork merges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    /// Forward merged fork pull requests to a downstream job instead of
    /// mirroring directly.
    pub relay_fork_merges: bool,
    /// `event_type` of the emitted `repository_dispatch`.
    pub event_type: String,
    /// GitHub REST API base URL.
    pub api_url: String,
    /// API token (usually supplied through `GITHUB_TOKEN` instead).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            relay_fork_merges: true,
            event_type: "sync-fork-merge".to_string(),
            api_url: "https://api.github.com".to_string(),
            token: String::new(),
        }
    }
}
