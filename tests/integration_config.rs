// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use repo_mirror::config::Config;
use repo_mirror::config::loader::ConfigLoader;
use repo_mirror::error::{ConfigError, MirrorError};
use repo_mirror::logging::LogLevel;
use std::path::Path;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_empty_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.mirror.marker, "-private");
    assert!(config.mirror.force_sync);
    assert!(config.dispatch.relay_fork_merges);
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert!(config.log_file().is_none());
}

#[test]
fn config_parse_full_file() {
    let toml = r#"
[global]
dry = true
output_log_level = 4
file_log_level = 6
log_file = "mirror.log"

[mirror]
marker = "-internal"
public_repo_name = "oss/widgets"
force_sync = false
commit_message = "Publish"
source_url_prefix = "https://git.example.com/"
destination_url_prefix = "ssh://git@git.example.com/"
author_name = "Publisher"
author_email = "publisher@example.com"
work_dir = "/var/tmp/mirror"

[dispatch]
relay_fork_merges = false
event_type = "fork-merge"
api_url = "https://ghe.example.com/api/v3"
token = "ghs_x"
"#;
    let config = Config::parse(toml).unwrap();

    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.log_file(), Some(Path::new("mirror.log")));
    assert_eq!(config.mirror.marker, "-internal");
    assert_eq!(config.mirror.public_repo_name, "oss/widgets");
    assert!(!config.mirror.force_sync);
    assert_eq!(config.mirror.commit_message, "Publish");
    assert_eq!(
        config.mirror.work_dir.as_deref(),
        Some(Path::new("/var/tmp/mirror"))
    );
    assert!(!config.dispatch.relay_fork_merges);
    assert_eq!(config.dispatch.event_type, "fork-merge");
    assert_eq!(config.dispatch.token, "ghs_x");
}

#[test]
fn config_rejects_unknown_section_key() {
    assert!(Config::parse("[mirror]\nmarkr = \"-x\"\n").is_err());
    assert!(Config::parse("[paths]\nprefix = \"/x\"\n").is_err());
}

#[test]
fn config_rejects_log_level_out_of_range() {
    assert!(Config::parse("[global]\noutput_log_level = 9\n").is_err());
}

#[test]
fn config_empty_commit_message_is_config_error() {
    let err = Config::parse("[mirror]\ncommit_message = \"  \"\n").unwrap_err();
    match err.downcast_ref::<MirrorError>() {
        Some(MirrorError::Config(boxed)) => match boxed.as_ref() {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "commit_message"),
            other => panic!("expected InvalidValue, got {other:?}"),
        },
        other => panic!("expected MirrorError::Config, got {other:?}"),
    }
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_later_files_override_earlier() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("base.toml");
    let ci = temp.path().join("ci.toml");
    std::fs::write(&base, "[mirror]\nmarker = \"-base\"\nforce_sync = false\n").unwrap();
    std::fs::write(&ci, "[mirror]\nmarker = \"-ci\"\n").unwrap();

    let config = ConfigLoader::new()
        .add_toml_file(&base)
        .add_toml_file(&ci)
        .build()
        .unwrap();

    assert_eq!(config.mirror.marker, "-ci");
    assert!(!config.mirror.force_sync);
}

#[test]
fn config_missing_required_file_fails() {
    let result = ConfigLoader::new()
        .add_toml_file("/nonexistent/mirror.toml")
        .build();
    assert!(result.is_err());
}

#[test]
fn config_missing_optional_file_is_ignored() {
    let loader = ConfigLoader::new().add_toml_file_optional("/nonexistent/mirror.toml");
    assert!(loader.loaded_files().is_empty());
    assert!(loader.build().is_ok());
}

#[test]
fn config_overrides_beat_files() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\noutput_log_level = 1\n[mirror]\nmarker = \"-file\"\n")
        .apply_overrides(&["mirror.marker=-cli", "global.output_log_level=5"])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.mirror.marker, "-cli");
    assert_eq!(config.global.output_log_level, LogLevel::TRACE);
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn config_format_options_lists_every_key() {
    let lines = Config::default().format_options();
    let keys: Vec<&str> = lines
        .iter()
        .filter_map(|line| line.split_whitespace().next())
        .collect();

    insta::assert_debug_snapshot!(keys, @r#"
    [
        "dispatch.api_url",
        "dispatch.event_type",
        "dispatch.relay_fork_merges",
        "global.dry",
        "global.file_log_level",
        "global.log_file",
        "global.output_log_level",
        "mirror.author_email",
        "mirror.author_name",
        "mirror.commit_message",
        "mirror.destination_url_prefix",
        "mirror.force_sync",
        "mirror.marker",
        "mirror.public_repo_name",
        "mirror.source_url_prefix",
    ]
    "#);
}
