// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Destination repository name resolution.
//!
//! ```text
//! source "acme/widgets-private", marker "-private"
//!   no override            --> Eligible(acme/widgets)
//!   override "gadgets"     --> Eligible(acme/gadgets)
//!   override "oss/gadgets" --> Eligible(oss/gadgets)
//!
//! source "acme/widgets" (no marker)
//!   any override           --> NotEligible
//! ```


use serde::Serialize;
use std::fmt;

use crate::error::{ConfigError, MirrorError, MirrorResult};

/// A GitHub-style `org/name` repository identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepoName {
    org: String,
    name: String,
}

impl RepoName {
    /// Parses `org/name`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` unless the input has exactly one
    /// `/` with a non-empty, whitespace-free part on each side.
    pub fn parse(full_name: &str) -> MirrorResult<Self> {
        let invalid = |message: &str| {
            MirrorError::from(ConfigError::InvalidValue {
                section: "mirror".to_string(),
                key: "repository".to_string(),
                message: format!("'{full_name}': {message}"),
            })
        };

        let (org, name) = full_name
            .split_once('/')
            .ok_or_else(|| invalid("expected org/name"))?;

        if name.contains('/') {
            return Err(invalid("expected exactly one '/'"));
        }
        Self::from_parts(org, name)
            .map_err(|_| invalid("org and name must be non-empty without whitespace"))
    }

    /// Builds a name from its two halves.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if either half is empty, contains
    /// whitespace or a `/`.
    pub fn from_parts(org: &str, name: &str) -> MirrorResult<Self> {
        let valid = |part: &str| {
            !part.is_empty() && !part.contains('/') && !part.chars().any(char::is_whitespace)
        };

        if !valid(org) || !valid(name) {
            return Err(ConfigError::InvalidValue {
                section: "mirror".to_string(),
                key: "repository".to_string(),
                message: format!("invalid repository '{org}/{name}'"),
            }
            .into());
        }

        Ok(Self {
            org: org.to_string(),
            name: name.to_string(),
        })
    }

    #[must_use]
    pub fn org(&self) -> &str {
        &self.org
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.name)
    }
}

/// Outcome of destination name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The source may be mirrored into this destination.
    Eligible(RepoName),
    /// The source name lacks the marker; nothing may be mirrored.
    NotEligible { source: RepoName, marker: String },
}

impl Resolution {
    #[must_use]
    pub const fn destination(&self) -> Option<&RepoName> {
        match self {
            Self::Eligible(name) => Some(name),
            Self::NotEligible { .. } => None,
        }
    }
}

/// Resolves the destination repository for `source`.
///
/// Eligibility is decided on the source name first: an override renames the
/// destination but never makes an unmarked source eligible. A blank override
/// is treated as absent.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` when the marker is empty, the override
/// is malformed, or stripping the marker leaves no name.
pub fn resolve_destination(
    source: &RepoName,
    override_name: Option<&str>,
    marker: &str,
) -> MirrorResult<Resolution> {
    if marker.is_empty() {
        return Err(ConfigError::InvalidValue {
            section: "mirror".to_string(),
            key: "marker".to_string(),
            message: "must not be empty".to_string(),
        }
        .into());
    }

    if !source.name().contains(marker) {
        return Ok(Resolution::NotEligible {
            source: source.clone(),
            marker: marker.to_string(),
        });
    }

    let override_name = override_name.map(str::trim).filter(|s| !s.is_empty());

    let destination = match override_name {
        Some(full) if full.contains('/') => RepoName::parse(full)?,
        Some(name) => RepoName::from_parts(source.org(), name)?,
        None => {
            let stripped = source.name().replace(marker, "");
            if stripped.is_empty() {
                return Err(ConfigError::InvalidValue {
                    section: "mirror".to_string(),
                    key: "marker".to_string(),
                    message: format!(
                        "removing '{marker}' from '{}' leaves an empty name",
                        source.name()
                    ),
                }
                .into());
            }
            RepoName::from_parts(source.org(), &stripped)?
        }
    };

    Ok(Resolution::Eligible(destination))
}

/// Clone URL of `repo` under `prefix` (`https://github.com/`,
/// `git@github.com:`, a local directory, ...).
#[must_use]
pub fn repo_url(prefix: &str, repo: &RepoName) -> String {
    format!("{prefix}{}/{}.git", repo.org(), repo.name())
}

/// Embeds `token` into an `https://` URL as GitHub installation
/// credentials. Any other URL is returned as is.
#[must_use]
pub fn with_token(url: &str, token: &str) -> String {
    match url.strip_prefix("https://") {
        Some(rest) if !token.is_empty() => format!("https://x-access-token:{token}@{rest}"),
        _ => url.to_string(),
    }
}
