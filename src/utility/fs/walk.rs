// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use flume::unbounded;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;

/// Options for parallel directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Respect .gitignore, .ignore and global excludes
    #[builder(setters(name = with_respect_ignore_files), default = true)]
    respect_ignore_files: bool,
    /// Number of threads (None = auto-detect based on CPU count)
    #[builder(setters(name = with_threads))]
    threads: Option<usize>,
    /// Skip entries with these names (exact match, files and directories)
    #[builder(setters(name = with_skip_names), default)]
    skip_names: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn respect_ignore_files(&self) -> bool {
        self.respect_ignore_files
    }

    #[must_use]
    pub const fn threads(&self) -> Option<usize> {
        self.threads
    }

    #[must_use]
    pub fn skip_names(&self) -> &[String] {
        &self.skip_names
    }

    /// Options for enumerating a git working tree exactly as committed.
    ///
    /// - Includes hidden files (`.github/`, `.gitignore` itself)
    /// - Ignores no files: what is tracked must be seen
    /// - Skips the `.git` metadata entry (directory, or file for worktrees)
    /// - Does not follow symlinks, they are content in their own right
    #[must_use]
    pub fn for_working_tree() -> Self {
        Self::builder()
            .with_include_hidden(true)
            .with_respect_ignore_files(false)
            .with_skip_names(vec![".git".to_string()])
            .build()
    }
}

/// Result of a parallel walk operation.
#[derive(Debug)]
pub struct WalkResult {
    files: Vec<PathBuf>,
    directories: Vec<PathBuf>,
    symlinks: Vec<PathBuf>,
    error_count: usize,
}

impl WalkResult {
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Symlinks found during traversal (only when links are not followed).
    #[must_use]
    pub fn symlinks(&self) -> &[PathBuf] {
        &self.symlinks
    }

    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }
}

fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());

    let respect = options.respect_ignore_files();
    builder.ignore(respect);
    builder.git_ignore(respect);
    builder.git_global(respect);
    builder.git_exclude(respect);
    builder.parents(respect);

    if let Some(threads) = options.threads() {
        builder.threads(threads);
    }

    // filter_entry runs before descending, so skipped directories are never read
    if !options.skip_names().is_empty() {
        let skip_names: Arc<Vec<String>> = Arc::new(options.skip_names().to_vec());
        builder.filter_entry(move |entry| {
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !skip_names.iter().any(|skip| skip == name))
        });
    }

    builder
}

/// Performs parallel directory traversal using `ignore::WalkParallel`.
///
/// The root itself is reported as a directory. Results arrive in no
/// particular order; callers that need determinism sort them.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
///
/// # Example
/// ```no_run
/// use repo_mirror::utility::fs::walk::{parallel_walk, WalkOptions};
///
/// let result = parallel_walk("/tmp/checkout", &WalkOptions::for_working_tree())?;
/// println!("Found {} files", result.files().len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn parallel_walk<P: AsRef<Path>>(root: P, options: &WalkOptions) -> Result<WalkResult> {
    let root = root.as_ref();

    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    // Receivers are drained only after run() returns, so the channels must not block
    let (file_tx, file_rx) = unbounded::<PathBuf>();
    let (dir_tx, dir_rx) = unbounded::<PathBuf>();
    let (link_tx, link_rx) = unbounded::<PathBuf>();
    let error_count = Arc::new(AtomicUsize::new(0));

    let parallel = build_walker(root, options).build_parallel();

    parallel.run(|| {
        let file_tx = file_tx.clone();
        let dir_tx = dir_tx.clone();
        let link_tx = link_tx.clone();
        let error_count = Arc::clone(&error_count);

        Box::new(move |entry_result| {
            match entry_result {
                Ok(entry) => {
                    let path = entry.path().to_path_buf();
                    match entry.file_type() {
                        Some(ft) if ft.is_dir() => {
                            let _ = dir_tx.send(path);
                        }
                        Some(ft) if ft.is_symlink() => {
                            let _ = link_tx.send(path);
                        }
                        Some(ft) if ft.is_file() => {
                            let _ = file_tx.send(path);
                        }
                        _ => {}
                    }
                }
                Err(e) => {
                    warn!(error = %e, "walk error");
                    error_count.fetch_add(1, Ordering::Relaxed);
                }
            }
            ignore::WalkState::Continue
        })
    });

    drop(file_tx);
    drop(dir_tx);
    drop(link_tx);

    Ok(WalkResult {
        files: file_rx.iter().collect(),
        directories: dir_rx.iter().collect(),
        symlinks: link_rx.iter().collect(),
        error_count: error_count.load(Ordering::Relaxed),
    })
}
