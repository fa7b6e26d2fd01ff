// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Context;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

use crate::error::Result;

/// Disposable working area of one mirror run.
///
/// ```text
/// mirror-XXXXXX/
///   source/       clone of the source, checked out per branch (detached)
///   destination/  working copy of the destination, committed and pushed
/// ```
///
/// Removed from disk when dropped.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates a fresh workspace under `parent`, or the system temp dir.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create(parent: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("mirror-");

        let dir = match parent {
            Some(parent) => {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
                builder.tempdir_in(parent)
            }
            None => builder.tempdir(),
        }
        .context("failed to create workspace directory")?;

        debug!(path = %dir.path().display(), "workspace created");
        Ok(Self { dir })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn source(&self) -> PathBuf {
        self.root().join("source")
    }

    #[must_use]
    pub fn destination(&self) -> PathBuf {
        self.root().join("destination")
    }
}
