// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   walk:  parallel_walk(), WalkOptions
//!   copy:  copy_entry_async(), remove_path_async(), prune_empty_dirs_async()
//! ```

pub mod fs;
