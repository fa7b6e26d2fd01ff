// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for repo-mirror.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. local mirror.toml (cwd, optional)
//! 3. --ini FILE (repeatable)
//! 4. MIRROR_* env vars
//! 5. --set section.key=value, CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! MIRROR_GLOBAL__DRY=true              → global.dry = true
//! MIRROR_MIRROR__MARKER=-internal      → mirror.marker = "-internal"
//! MIRROR_DISPATCH__EVENT_TYPE=relay    → dispatch.event_type = "relay"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, MirrorError, Result};

use loader::ConfigLoader;
use types::{DispatchConfig, GlobalConfig, MirrorConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Mirror job options.
    pub mirror: MirrorConfig,
    /// Fork-merge relay options.
    pub dispatch: DispatchConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use repo_mirror::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("ci/mirror.toml")
    ///     .add_toml_file_optional("mirror.toml")
    ///     .with_env_prefix("MIRROR")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values that serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for an empty marker, commit
    /// message or dispatch event type.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("mirror", "marker", self.mirror.marker.as_str()),
            ("mirror", "commit_message", self.mirror.commit_message.as_str()),
            ("dispatch", "event_type", self.dispatch.event_type.as_str()),
        ];

        for (section, key, value) in required {
            if value.trim().is_empty() {
                return Err(MirrorError::from(ConfigError::InvalidValue {
                    section: section.to_string(),
                    key: key.to_string(),
                    message: "must not be empty".to_string(),
                })
                .into());
            }
        }
        Ok(())
    }

    /// Log file path, if file logging is enabled.
    #[must_use]
    pub fn log_file(&self) -> Option<&Path> {
        let path = self.global.log_file.as_path();
        (!path.as_os_str().is_empty()).then_some(path)
    }

    /// Format configuration options for display.
    ///
    /// Sensitive fields are hidden with a `[hidden]` marker. Output is
    /// deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_mirror_options(&mut options);
        self.format_dispatch_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global.log_file.display().to_string(),
        );
    }

    fn format_mirror_options(&self, options: &mut BTreeMap<String, String>) {
        let mirror = &self.mirror;
        options.insert("mirror.marker".into(), mirror.marker.clone());
        options.insert(
            "mirror.public_repo_name".into(),
            mirror.public_repo_name.clone(),
        );
        options.insert("mirror.force_sync".into(), mirror.force_sync.to_string());
        options.insert(
            "mirror.commit_message".into(),
            mirror.commit_message.clone(),
        );
        options.insert(
            "mirror.source_url_prefix".into(),
            mirror.source_url_prefix.clone(),
        );
        options.insert(
            "mirror.destination_url_prefix".into(),
            mirror.destination_url_prefix.clone(),
        );
        options.insert("mirror.author_name".into(), mirror.author_name.clone());
        options.insert("mirror.author_email".into(), mirror.author_email.clone());
        if let Some(work_dir) = &mirror.work_dir {
            options.insert("mirror.work_dir".into(), work_dir.display().to_string());
        }
    }

    fn format_dispatch_options(&self, options: &mut BTreeMap<String, String>) {
        let dispatch = &self.dispatch;
        options.insert(
            "dispatch.relay_fork_merges".into(),
            dispatch.relay_fork_merges.to_string(),
        );
        options.insert("dispatch.event_type".into(), dispatch.event_type.clone());
        options.insert("dispatch.api_url".into(), dispatch.api_url.clone());
        if !dispatch.token.is_empty() {
            options.insert("dispatch.token".into(), "[hidden]".into());
        }
    }
}
