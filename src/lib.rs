// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          sync / gate / resolve
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '--+--------+--------+------'
//!                 |        |        |
//!                 v        v        v
//!              event    naming   dispatch
//!              gate     org/name  HTTP
//!                 |
//!                 v
//!               sync  workspace, plan, run
//!              /    \
//!             v      v
//!           tree     git
//!     snapshot/diff  gix/CLI
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod git;
pub mod logging;
pub mod naming;
pub mod sync;
pub mod tree;
pub mod utility;
