// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Sync | Gate | Resolve | Options | Inis
//! ```

use std::process::ExitCode;

use repo_mirror::cli::global::GlobalOptions;
use repo_mirror::cli::{self, Command};
use repo_mirror::cmd::config::{run_inis_command, run_options_command};
use repo_mirror::cmd::gate::run_gate_command;
use repo_mirror::cmd::resolve::run_resolve_command;
use repo_mirror::cmd::sync::run_sync_command;
use repo_mirror::config::Config;
use repo_mirror::config::loader::ConfigLoader;
use repo_mirror::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_CONFIG_FILE: &str = "mirror.toml";
const ENV_PREFIX: &str = "MIRROR";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let command = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            return ExitCode::SUCCESS;
        }
        Some(command) => command,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            return ExitCode::FAILURE;
        }
    };

    let loader = match build_config_loader(&cli.global) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if matches!(command, Command::Inis) {
        run_inis_command(&loader.format_loaded_files());
        return ExitCode::SUCCESS;
    }

    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(command, &config).await
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(config.log_file().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(command: &Command, config: &Config) -> ExitCode {
    let result = match command {
        Command::Options => {
            run_options_command(config);
            Ok(())
        }
        Command::Sync(args) => run_sync_command(args, config).await,
        Command::Gate(args) => run_gate_command(args, config),
        Command::Resolve(args) => run_resolve_command(args, config),
        Command::Version | Command::Inis => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

/// Layers: defaults, `mirror.toml`, `--ini` files, `MIRROR_*` env, `--set`
/// and flags.
fn build_config_loader(global: &GlobalOptions) -> repo_mirror::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader
        .with_env_prefix(ENV_PREFIX)
        .apply_overrides(&global.to_config_overrides())
}
