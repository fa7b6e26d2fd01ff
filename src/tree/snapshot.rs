// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Context;
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::trace;

use super::{TreeEntry, TreeSnapshot};
use crate::error::{FsError, MirrorError, Result};
use crate::utility::fs::walk::{WalkOptions, parallel_walk};

impl TreeSnapshot {
    /// Captures the tree under `root`, excluding `.git`.
    ///
    /// Hidden files and files matched by ignore rules are included; a
    /// checkout's content is whatever git put there.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` does not exist, any entry cannot be read,
    /// or a path is not valid UTF-8.
    pub fn capture(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(MirrorError::from(FsError::NotFound(root.display().to_string())).into());
        }

        let walk = parallel_walk(root, &WalkOptions::for_working_tree())?;
        if walk.error_count() > 0 {
            anyhow::bail!(
                "{} entries under {} could not be read",
                walk.error_count(),
                root.display()
            );
        }

        let mut snapshot = Self::new();

        for path in walk.files() {
            let key = relative_key(root, path)?;
            let entry = TreeEntry::file(hash_file(path)?, is_executable(path)?);
            trace!(path = %key, digest = entry.digest(), "file");
            snapshot.insert(key, entry);
        }

        for path in walk.symlinks() {
            let key = relative_key(root, path)?;
            let target = std::fs::read_link(path)
                .with_context(|| format!("failed to read link {}", path.display()))?;
            let digest = hash_bytes(target.to_string_lossy().as_bytes());
            trace!(path = %key, target = %target.display(), "symlink");
            snapshot.insert(key, TreeEntry::symlink(digest));
        }

        Ok(snapshot)
    }
}

fn relative_key(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .with_context(|| format!("{} is outside {}", path.display(), root.display()))?;

    let parts = relative
        .components()
        .map(|c| {
            c.as_os_str()
                .to_str()
                .with_context(|| format!("non UTF-8 path: {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(parts.join("/"))
}

fn hash_file(path: &Path) -> Result<String> {
    let mut file = std::fs::File::open(path).map_err(|source| {
        MirrorError::from(FsError::IoError {
            path: path.display().to_string(),
            source,
        })
    })?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(format!("{:x}", hasher.finalize()))
}

fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> Result<bool> {
    use std::os::unix::fs::PermissionsExt;

    let meta = std::fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?;
    Ok(meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn is_executable(_path: &Path) -> Result<bool> {
    Ok(false)
}
