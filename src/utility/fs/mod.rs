// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal and async copy.
//!
//! ```text
//! walk:  parallel_walk()           ignore::WalkParallel (multi-core)
//!        WalkOptions               hidden, ignore files, skip names
//! copy:  copy_entry_async()        tokio::fs file/symlink copy
//!        remove_path_async()       file, link or tree
//!        prune_empty_dirs_async()  clean up after removals
//! ```

pub mod copy;
pub mod walk;
