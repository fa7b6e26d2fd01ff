// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `gate` command: evaluate the trigger event and report the decision.
//!
//! ```text
//! $GITHUB_EVENT_NAME + $GITHUB_EVENT_PATH --> evaluate --> stdout
//!                                                     --> $GITHUB_OUTPUT
//!   should_sync=true|false
//!   decision=skip|mirror|relay
//!   base_branch=..., pr_number=...   (relay only)
//! ```

use anyhow::Context;
use tracing::info;

use super::{gate_options, load_event};
use crate::cli::sync::GateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::event::evaluate;

/// Run the gate command.
///
/// # Errors
///
/// Returns an error if no event was given, the payload does not parse, or
/// the step output file cannot be written.
pub fn run_gate_command(args: &GateArgs, config: &Config) -> Result<()> {
    let event = load_event(&args.event)?
        .context("no trigger event, pass --event-name or set GITHUB_EVENT_NAME")?;

    let decision = evaluate(&event, &gate_options(config));
    info!(event = event.name(), decision = %decision, "gate evaluated");

    print!("{}", decision.output_lines());
    if let Some(path) = &args.github_output {
        decision.append_github_output(path)?;
    }
    Ok(())
}
