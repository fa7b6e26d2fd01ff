// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Copies one file or symlink from `src` to `dst` (async version).
///
/// Parent directories of `dst` are created. Whatever currently sits at `dst`
/// (file, symlink or directory) is removed first, so a link is never written
/// through and a directory never blocks a file. Regular files keep their
/// permission bits; symlinks are recreated with the same target on unix.
///
/// # Example
/// ```no_run
/// use repo_mirror::utility::fs::copy::copy_entry_async;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// copy_entry_async(Path::new("/src/bin/run.sh"), Path::new("/dst/bin/run.sh")).await?;
/// # Ok(())
/// # }
/// ```
/// # Errors
///
/// Returns an error if any IO operation fails (creating directory, removing,
/// reading the link, copying).
pub async fn copy_entry_async(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    remove_path_async(dst).await?;

    let meta = fs::symlink_metadata(src)
        .await
        .with_context(|| format!("failed to stat {}", src.display()))?;

    if meta.file_type().is_symlink() {
        copy_symlink(src, dst).await
    } else {
        fs::copy(src, dst).await.with_context(|| {
            format!("failed to copy {} to {}", src.display(), dst.display())
        })?;
        Ok(())
    }
}

#[cfg(unix)]
async fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let target = fs::read_link(src)
        .await
        .with_context(|| format!("failed to read link {}", src.display()))?;
    fs::symlink(&target, dst)
        .await
        .with_context(|| format!("failed to create link {}", dst.display()))
}

// Without unix symlinks the link is materialised as a copy of its target.
#[cfg(not(unix))]
async fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst)
        .await
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}

/// Removes a file, symlink or directory tree. A missing path is not an error.
///
/// # Errors
///
/// Returns an error if the path exists and cannot be removed.
pub async fn remove_path_async(path: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(path).await {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to stat {}", path.display()));
        }
    };

    if meta.is_dir() {
        fs::remove_dir_all(path)
            .await
            .with_context(|| format!("failed to remove directory {}", path.display()))
    } else {
        fs::remove_file(path)
            .await
            .with_context(|| format!("failed to remove {}", path.display()))
    }
}

/// Removes empty directories from `start` upward, stopping at `root`.
///
/// `root` itself is never removed. Stops at the first directory that still
/// has entries.
///
/// # Errors
///
/// Returns an error if a directory cannot be read or removed.
pub async fn prune_empty_dirs_async(start: &Path, root: &Path) -> Result<()> {
    let mut current = Some(start);

    while let Some(dir) = current {
        if dir == root || !dir.starts_with(root) {
            break;
        }

        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                current = dir.parent();
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read directory {}", dir.display()));
            }
        };

        if entries
            .next_entry()
            .await
            .with_context(|| format!("failed to read entry from {}", dir.display()))?
            .is_some()
        {
            break;
        }

        fs::remove_dir(dir)
            .await
            .with_context(|| format!("failed to remove directory {}", dir.display()))?;
        current = dir.parent();
    }

    Ok(())
}
