// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::TreeDiff;
use crate::error::Result;
use crate::utility::fs::copy::{copy_entry_async, prune_empty_dirs_async, remove_path_async};

fn resolve(root: &Path, key: &str) -> PathBuf {
    key.split('/').fold(root.to_path_buf(), |path, part| path.join(part))
}

/// Applies `diff` to the tree at `dest_root`, reading new content from
/// `source_root`.
///
/// Removals run first so that a path switching between file and directory
/// is free by the time its replacement is written.
///
/// # Errors
///
/// Returns an error on the first filesystem operation that fails.
pub async fn apply_diff(diff: &TreeDiff, source_root: &Path, dest_root: &Path) -> Result<()> {
    for key in &diff.removed {
        let target = resolve(dest_root, key);
        trace!(path = %key, "remove");
        remove_path_async(&target).await?;
        if let Some(parent) = target.parent() {
            prune_empty_dirs_async(parent, dest_root).await?;
        }
    }

    for key in diff.added.iter().chain(&diff.modified) {
        trace!(path = %key, "write");
        copy_entry_async(&resolve(source_root, key), &resolve(dest_root, key)).await?;
    }

    debug!(stats = %diff.stats(), dest = %dest_root.display(), "applied tree diff");
    Ok(())
}
